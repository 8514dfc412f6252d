//! Consumables, miracles and ally abilities.

use crate::combat::{percent_of, weaknesses};
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::env::{BattleEnv, ConsumableEffect};
use crate::meters::{AllyEffect, AllyId, DamageAmount, MiracleEffect, MiracleKind, OneShotFlags};
use crate::player::PlayerAggregate;
use crate::stats::{Stat, StatusKind};

use super::round::stat_label;
use super::session::BattleSession;

impl BattleSession {
    // ========================================================================
    // Consumables
    // ========================================================================

    /// Use one consumable on roster slot `target`.
    ///
    /// Unknown ids act as a basic heal. Nothing is consumed when the effect
    /// cannot apply to the target.
    pub(super) fn use_item<P>(&mut self, env: &BattleEnv<'_>, player: &mut P, item_id: &str, target: usize)
    where
        P: PlayerAggregate + ?Sized,
    {
        let (definition, missing) = env.item_or_fallback(item_id);
        if missing.is_some() {
            self.log
                .push(format!("{item_id} is unfamiliar; it is eaten as plain bread."));
        }
        let Some(fish) = self.fish.get(target) else {
            return;
        };
        if definition.effect.targets_fainted() != fish.is_fainted() {
            let line = format!("{} had no effect on {}.", definition.name, fish.name());
            self.log.push(line);
            return;
        }
        if !player.remove_item(item_id, 1) {
            self.log.push(format!("You don't have any {}!", definition.name));
            return;
        }

        let potency = self.item_potency;
        let scale = |amount: u32| (amount as f64 * potency).floor() as u32;
        let fish = &mut self.fish[target];
        let name = fish.name().to_owned();
        let outcome = match definition.effect {
            ConsumableEffect::Heal(amount) => {
                let healed = fish.heal(scale(amount));
                format!("{name} restored {healed} HP!")
            }
            ConsumableEffect::HealPercent(percent) => {
                let amount = percent_of(fish.max_hp(), scale(percent).min(100));
                let healed = fish.heal(amount);
                format!("{name} restored {healed} HP!")
            }
            ConsumableEffect::Cure => {
                fish.core_mut().statuses.cure();
                format!("{name} was cured!")
            }
            ConsumableEffect::HealAndCure(amount) => {
                let healed = fish.heal(scale(amount));
                fish.core_mut().statuses.cure();
                format!("{name} restored {healed} HP and was cured!")
            }
            ConsumableEffect::Revive(percent) => {
                fish.revive(scale(percent).min(100));
                format!("{name} was revived with {} HP!", fish.hp())
            }
            ConsumableEffect::Buff {
                stat,
                multiplier,
                turns,
            } => {
                fish.apply_modifier(stat, multiplier, Some(turns));
                format!("{name}'s {} rose!", stat_label(stat))
            }
        };
        self.log.push(format!("Used {}!", definition.name));
        self.log.push(outcome);
        tracing::debug!(item = item_id, target = %name, potency, "item used");
    }

    // ========================================================================
    // Miracles
    // ========================================================================

    pub(super) fn perform_miracle(&mut self, kind: MiracleKind) {
        let definition = kind.definition();
        if !self.meter.spend(definition.cost) {
            return;
        }
        self.flags.insert(OneShotFlags::MIRACLE_USED);
        self.log.push(format!("A miracle: {}!", definition.name));
        tracing::info!(miracle = %kind, meter = self.meter.value(), "miracle performed");

        match definition.effect {
            MiracleEffect::HealAll => {
                for fish in self.fish.iter_mut().filter(|fish| !fish.is_fainted()) {
                    let max = fish.max_hp();
                    fish.heal(max);
                    fish.core_mut().statuses.cure();
                }
                self.log.push("Every fish is restored to full health!");
            }
            MiracleEffect::ItemPotency(multiplier) => {
                self.item_potency *= multiplier;
                self.log
                    .push(format!("Bread items are now {multiplier}x as potent!"));
            }
            MiracleEffect::Judgment {
                damage,
                multiplier,
                turns,
            } => {
                for opponent in &mut self.opponents {
                    let dealt = opponent.take_damage(damage);
                    for stat in [Stat::Atk, Stat::Def, Stat::Spd] {
                        opponent.apply_modifier(stat, multiplier, Some(turns));
                    }
                    self.log
                        .push(format!("{} is struck for {dealt} damage!", opponent.name()));
                }
                self.resolve_opponent_faints();
                self.check_boss_phases();
            }
            MiracleEffect::ReviveAll { immunity_turns } => {
                for fish in self.fish.iter_mut() {
                    if fish.revive(100) {
                        self.log.push(format!("{} rises again!", fish.name()));
                    }
                    fish.apply_status(StatusKind::Immunity, Some(immunity_turns));
                }
            }
        }
    }

    // ========================================================================
    // Ally abilities
    // ========================================================================

    pub(super) fn call_ally<P>(&mut self, config: &BattleConfig, player: &mut P, ally: AllyId)
    where
        P: PlayerAggregate + ?Sized,
    {
        let ability = ally.ability();
        self.log
            .push(format!("{} uses {}!", ability.ally_name, ability.name));

        // the field may have changed since validation; a failed call costs nothing
        let usable = match ability.effect {
            AllyEffect::ConditionalDamage { below_percent, .. } => {
                self.opponent_below(below_percent)
            }
            AllyEffect::ResourceExchange { .. } => self.sacrifice_candidate().is_some(),
            _ => true,
        };
        if !usable {
            self.log.push("But it failed!");
            tracing::debug!(%ally, "ally condition no longer holds");
            return;
        }

        self.flags.insert(OneShotFlags::APOSTLE_USED);
        self.meter.add(config.meter_on_ally_ability);
        tracing::info!(%ally, ability = ability.name, "ally ability invoked");

        match ability.effect {
            AllyEffect::DamageAll(amount) => {
                let damage = match amount {
                    DamageAmount::Fixed(damage) => damage,
                    DamageAmount::PercentOfActiveHp(percent) => {
                        percent_of(self.fish[self.active_fish].hp(), percent)
                    }
                };
                let mut total = 0;
                for opponent in &mut self.opponents {
                    let dealt = opponent.take_damage(damage);
                    total += dealt;
                    self.log
                        .push(format!("{} took {dealt} damage!", opponent.name()));
                }
                self.meter.add(total as f64 * config.meter_per_damage_dealt);
                self.resolve_opponent_faints();
                self.check_boss_phases();
            }
            AllyEffect::HealAll { amount, cure } => {
                for fish in self.fish.iter_mut().filter(|fish| !fish.is_fainted()) {
                    let healed = fish.heal(amount);
                    if cure {
                        fish.core_mut().statuses.cure();
                    }
                    self.log
                        .push(format!("{} restored {healed} HP!", fish.name()));
                }
            }
            AllyEffect::PartyBuff {
                stats,
                multiplier,
                turns,
                active_only,
            } => {
                let active = self.active_fish;
                for (index, fish) in self.fish.iter_mut().enumerate() {
                    if fish.is_fainted() || (active_only && index != active) {
                        continue;
                    }
                    for stat in stats {
                        fish.apply_modifier(*stat, multiplier, Some(turns));
                        self.log
                            .push(format!("{}'s {} rose!", fish.name(), stat_label(*stat)));
                    }
                }
            }
            AllyEffect::EnemyDebuff {
                stat,
                multiplier,
                turns,
                steal,
            } => {
                for opponent in &mut self.opponents {
                    opponent.apply_modifier(stat, multiplier, Some(turns));
                    self.log
                        .push(format!("{}'s {} fell!", opponent.name(), stat_label(stat)));
                }
                if steal > 0 {
                    self.pending.currency = self.pending.currency.saturating_add(steal);
                    self.log.push(format!("Recovered {steal} denarii!"));
                }
            }
            AllyEffect::ConditionalDamage { power, .. } => {
                let index = self.active_opponent;
                let dealt = self.opponents[index].take_damage(power);
                self.meter.add(dealt as f64 * config.meter_per_damage_dealt);
                let line = format!("{} took {dealt} damage!", self.opponents[index].name());
                self.log.push(line);
                self.resolve_opponent_faints();
                self.check_boss_phases();
            }
            AllyEffect::ResourceExchange {
                currency,
                stat,
                multiplier,
                turns,
            } => {
                let Some(index) = self.sacrifice_candidate() else {
                    return;
                };
                let hp = self.fish[index].hp();
                self.fish[index].take_damage(hp);
                let line = format!("{} is sacrificed for thirty pieces of silver...", self.fish[index].name());
                self.log.push(line);
                self.on_fish_fainted(index, config);

                player.add_currency(currency);
                self.log.push(format!("Gained {currency} denarii!"));
                for fish in self.fish.iter_mut().filter(|fish| !fish.is_fainted()) {
                    fish.apply_modifier(stat, multiplier, Some(turns));
                }
                self.log
                    .push(format!("The party's {} rose!", stat_label(stat)));
            }
            AllyEffect::MultiplyItems(multiplier) => {
                self.item_potency *= multiplier;
                self.log
                    .push(format!("Bread items are now {multiplier}x as potent!"));
            }
            AllyEffect::Reveal => {
                for opponent in &mut self.opponents {
                    opponent.apply_status(StatusKind::Revealed, None);
                    let weak: Vec<String> = weaknesses(opponent.element())
                        .into_iter()
                        .map(|element| element.to_string())
                        .collect();
                    let weak = if weak.is_empty() {
                        "nothing".to_owned()
                    } else {
                        weak.join(", ")
                    };
                    self.log.push(format!(
                        "{}: {}/{} HP, weak to {weak}.",
                        opponent.name(),
                        opponent.hp(),
                        opponent.max_hp()
                    ));
                }
            }
        }
    }
}
