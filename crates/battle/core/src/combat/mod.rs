//! Combat resolution system.
//!
//! Pure functions for resolving a single attack. Randomness is sampled by
//! [`roll_damage`] / [`resolve_attack`] through a [`RollCursor`](crate::env::RollCursor)
//! and handed to [`calculate_damage`] as plain values, so the formula itself is
//! side-effect free.
//!
//! # Core Functions
//!
//! - `resolve_attack`: accuracy roll + damage rolls + calculation
//! - `hit_threshold`: move accuracy vs accuracy/evasion multipliers
//! - `calculate_damage`: the damage formula
//! - `effectiveness`: the element chart

pub mod damage;
pub mod element;
pub mod hit;
pub mod result;

pub use damage::{DamageParams, DamageResult, DamageRolls, Power, calculate_damage, percent_of};
pub use element::{Element, effectiveness, weaknesses};
pub use hit::{check_hit, hit_threshold};
pub use result::{AttackOutcome, resolve_attack, roll_damage};
