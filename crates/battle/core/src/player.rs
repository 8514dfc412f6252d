//! The player aggregate borrowed by an encounter.
//!
//! The session reads the roster, inventory, recruited allies and meter from
//! the aggregate at start, and writes rewards, penalties, the roster's end
//! state and the meter back through the same trait.

use std::collections::BTreeMap;

use crate::combatant::PlayerFish;
use crate::config::BattleConfig;
use crate::meters::{AllyId, MiracleKind};

/// Player-side state outside the combat core.
pub trait PlayerAggregate {
    /// The fish fielded in battle, in roster order (at most `MAX_PARTY`).
    fn active_party(&self) -> Vec<PlayerFish>;
    /// Write back the fielded fish after a round.
    fn store_party(&mut self, party: Vec<PlayerFish>);

    fn currency(&self) -> u32;
    fn add_currency(&mut self, amount: u32);
    /// Remove up to `amount`; returns the amount actually removed.
    fn remove_currency(&mut self, amount: u32) -> u32;

    fn item_count(&self, id: &str) -> u32;
    fn add_item(&mut self, id: &str, count: u32);
    /// Returns false (and changes nothing) if fewer than `count` are held.
    fn remove_item(&mut self, id: &str, count: u32) -> bool;

    /// Experience for the player character.
    fn gain_experience(&mut self, amount: u32);

    fn has_ally(&self, ally: AllyId) -> bool;
    fn miracle_unlocked(&self, kind: MiracleKind) -> bool;

    fn miracle_meter(&self) -> f64;
    fn set_miracle_meter(&mut self, value: f64);

    fn record_win(&mut self);
    fn record_loss(&mut self);
}

/// In-memory player aggregate.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Party {
    pub fish: Vec<PlayerFish>,
    pub currency: u32,
    pub inventory: BTreeMap<String, u32>,
    pub allies: Vec<AllyId>,
    pub miracles: Vec<MiracleKind>,
    pub meter: f64,
    pub level: u32,
    pub experience: u32,
    pub wins: u32,
    pub losses: u32,
}

impl Party {
    pub fn new(fish: Vec<PlayerFish>) -> Self {
        Self {
            fish,
            level: 1,
            ..Self::default()
        }
    }

    pub fn with_currency(mut self, currency: u32) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_item(mut self, id: impl Into<String>, count: u32) -> Self {
        *self.inventory.entry(id.into()).or_default() += count;
        self
    }

    pub fn with_ally(mut self, ally: AllyId) -> Self {
        if !self.allies.contains(&ally) {
            self.allies.push(ally);
        }
        self
    }

    pub fn with_miracle(mut self, kind: MiracleKind) -> Self {
        if !self.miracles.contains(&kind) {
            self.miracles.push(kind);
        }
        self
    }

    pub fn with_meter(mut self, meter: f64) -> Self {
        self.meter = meter;
        self
    }
}

impl PlayerAggregate for Party {
    fn active_party(&self) -> Vec<PlayerFish> {
        self.fish
            .iter()
            .take(BattleConfig::MAX_PARTY)
            .cloned()
            .collect()
    }

    fn store_party(&mut self, party: Vec<PlayerFish>) {
        for (slot, fish) in self.fish.iter_mut().zip(party) {
            *slot = fish;
        }
    }

    fn currency(&self) -> u32 {
        self.currency
    }

    fn add_currency(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }

    fn remove_currency(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.currency);
        self.currency -= removed;
        removed
    }

    fn item_count(&self, id: &str) -> u32 {
        self.inventory.get(id).copied().unwrap_or(0)
    }

    fn add_item(&mut self, id: &str, count: u32) {
        *self.inventory.entry(id.to_owned()).or_default() += count;
    }

    fn remove_item(&mut self, id: &str, count: u32) -> bool {
        match self.inventory.get_mut(id) {
            Some(held) if *held >= count => {
                *held -= count;
                if *held == 0 {
                    self.inventory.remove(id);
                }
                true
            }
            _ => false,
        }
    }

    fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
        while self.experience >= BattleConfig::XP_PER_LEVEL && self.level < BattleConfig::MAX_LEVEL
        {
            self.experience -= BattleConfig::XP_PER_LEVEL;
            self.level += 1;
        }
    }

    fn has_ally(&self, ally: AllyId) -> bool {
        self.allies.contains(&ally)
    }

    fn miracle_unlocked(&self, kind: MiracleKind) -> bool {
        self.miracles.contains(&kind)
    }

    fn miracle_meter(&self) -> f64 {
        self.meter
    }

    fn set_miracle_meter(&mut self, value: f64) {
        self.meter = value;
    }

    fn record_win(&mut self) {
        self.wins += 1;
    }

    fn record_loss(&mut self) {
        self.losses += 1;
    }
}
