//! Read-only view of a session for presentation layers.

use crate::combat::{Element, weaknesses};
use crate::combatant::Combatant;
use crate::meters::OneShotFlags;
use crate::stats::StatusKind;

use super::session::BattleSession;
use super::{BattleResult, EncounterKind};

/// Presentation data for one combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub name: String,
    pub element: Element,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub statuses: Vec<StatusKind>,
    /// Boss phase, `None` for fish and regular enemies.
    pub phase: Option<u32>,
}

impl CombatantView {
    fn of(combatant: &dyn Combatant) -> Self {
        Self {
            name: combatant.name().to_owned(),
            element: combatant.element(),
            level: combatant.level(),
            hp: combatant.hp(),
            max_hp: combatant.max_hp(),
            statuses: combatant.core().statuses.kinds(),
            phase: None,
        }
    }
}

/// An opponent exposed by a reveal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealedOpponent {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub weaknesses: Vec<Element>,
}

/// Everything a UI needs to draw the current round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub round: u32,
    pub result: BattleResult,
    pub active_fish: Option<CombatantView>,
    pub active_opponent: Option<CombatantView>,
    pub opponents: Vec<CombatantView>,
    /// Most recent log lines, oldest first.
    pub recent_log: Vec<String>,
    pub meter: f64,
    pub can_flee: bool,
    pub flags: OneShotFlags,
    pub item_potency: f64,
    pub revealed: Vec<RevealedOpponent>,
}

impl BattleSession {
    pub fn snapshot(&self) -> BattleSnapshot {
        let opponents: Vec<CombatantView> = self
            .opponents
            .iter()
            .map(|opponent| CombatantView {
                phase: opponent.as_boss().map(|boss| boss.phase()),
                ..CombatantView::of(opponent)
            })
            .collect();
        let revealed = self
            .opponents
            .iter()
            .filter(|opponent| opponent.has_status(StatusKind::Revealed))
            .map(|opponent| RevealedOpponent {
                name: opponent.name().to_owned(),
                hp: opponent.hp(),
                max_hp: opponent.max_hp(),
                weaknesses: weaknesses(opponent.element()),
            })
            .collect();

        BattleSnapshot {
            round: self.round,
            result: self.result,
            active_fish: self
                .fish
                .get(self.active_fish)
                .map(|fish| CombatantView::of(fish)),
            active_opponent: opponents.get(self.active_opponent).cloned(),
            opponents,
            recent_log: self.log.tail(self.log_tail),
            meter: self.meter.value(),
            can_flee: !self.result.is_terminal() && self.kind == EncounterKind::Regular,
            flags: self.flags,
            item_potency: self.item_potency,
            revealed,
        }
    }
}
