//! Deterministic encounter rules for a turn-based fish battler.
//!
//! `battle-core` defines combatants, the damage and status model, resource
//! meters and the [`engine::BattleSession`] state machine. It performs no I/O:
//! templates, items and randomness arrive through the oracle traits in
//! [`env`], and player-side state is borrowed through
//! [`player::PlayerAggregate`].
pub mod combat;
pub mod combatant;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod meters;
pub mod player;
pub mod stats;

pub use combat::{
    AttackOutcome, DamageParams, DamageResult, DamageRolls, Element, Power, calculate_damage,
    effectiveness, hit_threshold, percent_of, weaknesses,
};
pub use combatant::{
    AiPolicy, Boss, BossTemplate, Combatant, CombatantCore, Enemy, EnemyTemplate, FishTemplate,
    HeldItem, LevelUp, Move, MoveCategory, MoveEffect, Opponent, PersistedCombatant, PhaseTransition,
    PlayerFish, Rewards, TickReport,
};
pub use config::BattleConfig;
pub use engine::{
    ActionError, BattleLog, BattleResult, BattleSession, BattleSnapshot, CombatantView, Encounter,
    EncounterKind, IllegalState, InvalidAction, PlayerAction, RevealedOpponent, RoundReport,
};
pub use env::{
    BattleEnv, CombatantOracle, ConsumableEffect, ItemDefinition, ItemOracle, MoveOracle, PcgRng,
    RngOracle, RollCursor, TemplateError, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use meters::{
    AllyAbility, AllyEffect, AllyId, DamageAmount, MiracleDefinition, MiracleEffect, MiracleKind,
    MiracleMeter, OneShotFlags,
};
pub use player::{Party, PlayerAggregate};
pub use stats::{ActiveStatus, BaseStats, Stat, StatModifiers, StatusKind, StatusSet, Vitals};
