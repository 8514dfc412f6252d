//! Settlement: rewards on victory, penalties on defeat.

use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::meters::OneShotFlags;
use crate::player::PlayerAggregate;

use super::BattleResult;
use super::session::BattleSession;

impl BattleSession {
    /// Write the outcome of a settled encounter to the player.
    ///
    /// Guarded by one-shot flags, so repeated calls change nothing.
    pub(super) fn settle<P>(&mut self, config: &BattleConfig, player: &mut P)
    where
        P: PlayerAggregate + ?Sized,
    {
        match self.result {
            BattleResult::Victory if !self.flags.contains(OneShotFlags::REWARDS_GRANTED) => {
                self.flags.insert(OneShotFlags::REWARDS_GRANTED);
                let mut total = self.pending.clone();
                total.absorb(&self.bonus);

                player.gain_experience(total.experience);
                player.add_currency(total.currency);
                for item in &total.items {
                    player.add_item(item, 1);
                }
                player.record_win();

                self.log.push(format!(
                    "Gained {} experience and {} denarii!",
                    total.experience, total.currency
                ));
                for item in &total.items {
                    self.log.push(format!("Found {item}!"));
                }
                tracing::info!(
                    experience = total.experience,
                    currency = total.currency,
                    items = total.items.len(),
                    "victory rewards granted"
                );
            }
            BattleResult::Defeat if !self.flags.contains(OneShotFlags::PENALTY_APPLIED) => {
                self.flags.insert(OneShotFlags::PENALTY_APPLIED);
                let penalty =
                    (player.currency() as u64 * config.defeat_penalty_percent as u64 / 100) as u32;
                let lost = player.remove_currency(penalty);
                for fish in self.fish.iter_mut() {
                    fish.revive(config.revive_percent);
                }
                player.record_loss();

                self.log
                    .push(format!("You retreat to safety, dropping {lost} denarii."));
                self.log.push("Your fish recover some of their strength.");
                tracing::info!(lost, "defeat penalty applied");
            }
            _ => {}
        }
    }
}
