//! Attack resolution: accuracy roll, damage rolls, calculation.

use crate::config::BattleConfig;
use crate::env::{RngOracle, RollCursor};

use super::damage::{DamageParams, DamageResult, DamageRolls, Power, calculate_damage};
use super::hit::check_hit;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack missed; the turn is spent.
    Miss,
    Hit(DamageResult),
}

impl AttackOutcome {
    pub fn damage(&self) -> Option<u32> {
        match self {
            AttackOutcome::Miss => None,
            AttackOutcome::Hit(result) => Some(result.damage),
        }
    }
}

/// Sample the random inputs of a damage calculation.
///
/// Draw order: power (ranges only), critical, variance.
pub fn roll_damage(
    cursor: &mut RollCursor,
    rng: &dyn RngOracle,
    power: Power,
    config: &BattleConfig,
) -> DamageRolls {
    let power = match power {
        Power::Fixed(n) => n,
        Power::Range(..) => cursor.range(rng, power.min(), power.max()),
    };
    let critical = cursor.chance(rng, config.crit_chance);
    let variance = cursor.uniform(rng, config.variance_min, config.variance_max);
    DamageRolls {
        power,
        critical,
        variance,
    }
}

/// Resolve a complete attack (hit check + damage).
///
/// A threshold of 100 or more always hits without drawing.
pub fn resolve_attack(
    cursor: &mut RollCursor,
    rng: &dyn RngOracle,
    params: &DamageParams,
    power: Power,
    hit_threshold: u32,
    config: &BattleConfig,
) -> AttackOutcome {
    if hit_threshold < 100 {
        let roll = cursor.roll_d100(rng);
        if !check_hit(hit_threshold, roll) {
            return AttackOutcome::Miss;
        }
    }

    let rolls = roll_damage(cursor, rng, power, config);
    AttackOutcome::Hit(calculate_damage(params, rolls, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Element;

    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn params() -> DamageParams {
        DamageParams {
            attack: 10,
            attacker_element: Element::Normal,
            move_element: Element::Normal,
            defense: 0,
            defender_element: Element::Normal,
        }
    }

    #[test]
    fn certain_hit_skips_accuracy_roll() {
        let mut cursor = RollCursor::new(3);
        let config = BattleConfig::deterministic();
        let outcome = resolve_attack(&mut cursor, &Fixed(0), &params(), Power::Fixed(20), 100, &config);
        // variance draw only
        assert_eq!(cursor.draws(), 1);
        // (20 + 5) × 1.2 same-type
        assert_eq!(outcome.damage(), Some(30));
    }

    #[test]
    fn high_roll_misses() {
        let mut cursor = RollCursor::new(3);
        let config = BattleConfig::deterministic();
        // 99 % 100 + 1 = 100 > 50
        let outcome = resolve_attack(&mut cursor, &Fixed(99), &params(), Power::Fixed(20), 50, &config);
        assert_eq!(outcome, AttackOutcome::Miss);
        assert_eq!(cursor.draws(), 1);
    }

    #[test]
    fn range_power_is_sampled_inclusively() {
        let mut cursor = RollCursor::new(0);
        let config = BattleConfig::deterministic();
        // 20 % 21 = 20 → hi bound
        let rolls = roll_damage(&mut cursor, &Fixed(20), Power::Range(40, 60), &config);
        assert_eq!(rolls.power, 60);
        assert!(!rolls.critical);
    }
}
