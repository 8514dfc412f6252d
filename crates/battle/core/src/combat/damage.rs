//! Damage calculation and application.

use crate::config::BattleConfig;

use super::element::{Element, effectiveness};

// ============================================================================
// Power
// ============================================================================

/// Base power of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Power {
    Fixed(u32),
    /// Inclusive range, sampled uniformly.
    Range(u32, u32),
}

impl Power {
    /// Highest value this power can produce.
    pub const fn max(&self) -> u32 {
        match *self {
            Power::Fixed(n) => n,
            Power::Range(lo, hi) => {
                if hi > lo {
                    hi
                } else {
                    lo
                }
            }
        }
    }

    pub const fn min(&self) -> u32 {
        match *self {
            Power::Fixed(n) => n,
            Power::Range(lo, hi) => {
                if hi < lo {
                    hi
                } else {
                    lo
                }
            }
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Combat-relevant view of attacker, move and defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageParams {
    /// Attacker's effective ATK.
    pub attack: u32,
    pub attacker_element: Element,
    pub move_element: Element,
    /// Defender's effective DEF.
    pub defense: u32,
    pub defender_element: Element,
}

/// Random samples consumed by one damage calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRolls {
    /// Sampled base power.
    pub power: u32,
    pub critical: bool,
    /// Variance factor in `[variance_min, variance_max]`.
    pub variance: f64,
}

impl DamageRolls {
    /// Rolls with no critical and a neutral variance.
    pub const fn flat(power: u32) -> Self {
        Self {
            power,
            critical: false,
            variance: 1.0,
        }
    }
}

/// Result of a damage calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    pub damage: u32,
    pub critical: bool,
    /// Element chart multiplier that applied.
    pub effectiveness: f64,
}

impl DamageResult {
    pub fn is_super_effective(&self) -> bool {
        self.effectiveness > 1.0
    }

    pub fn is_resisted(&self) -> bool {
        self.effectiveness < 1.0
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// damage = power + floor(atk / 2)
/// if critical:                    damage *= crit_multiplier
/// damage *= effectiveness(move_element, defender_element)
/// if move_element == attacker_element: damage *= same_type_bonus
/// damage *= variance
/// damage = damage * 100 / (100 + def)
/// final  = max(floor(damage), 1)
/// ```
pub fn calculate_damage(
    params: &DamageParams,
    rolls: DamageRolls,
    config: &BattleConfig,
) -> DamageResult {
    let multiplier = effectiveness(params.move_element, params.defender_element);

    let mut damage = (rolls.power + params.attack / 2) as f64;
    if rolls.critical {
        damage *= config.crit_multiplier;
    }
    damage *= multiplier;
    if params.move_element == params.attacker_element {
        damage *= config.same_type_bonus;
    }
    damage *= rolls.variance;
    damage = damage * 100.0 / (100.0 + params.defense as f64);

    DamageResult {
        damage: to_damage(damage),
        critical: rolls.critical,
        effectiveness: multiplier,
    }
}

/// Floor to an integer with a minimum of 1.
fn to_damage(raw: f64) -> u32 {
    if !raw.is_finite() || raw < 1.0 {
        return 1;
    }
    (raw.floor() as u32).max(1)
}

/// Percentage of `max` rounded down, at least 1.
///
/// Used for damage over time and percentage heals.
pub fn percent_of(max: u32, percent: u32) -> u32 {
    ((max as u64 * percent as u64 / 100) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holy_vs_dark() -> DamageParams {
        DamageParams {
            attack: 50,
            attacker_element: Element::Holy,
            move_element: Element::Holy,
            defense: 20,
            defender_element: Element::Dark,
        }
    }

    #[test]
    fn follows_formula_without_random_factors() {
        let config = BattleConfig::deterministic();
        for power in 40..=60 {
            let result = calculate_damage(&holy_vs_dark(), DamageRolls::flat(power), &config);
            let expected = ((power + 25) as f64 * 2.0 * 1.2 * 100.0 / 120.0).floor() as u32;
            assert_eq!(result.damage, expected, "power {power}");
            assert_eq!(result.effectiveness, 2.0);
            assert!(!result.critical);
        }
    }

    #[test]
    fn critical_multiplies_before_defense() {
        let config = BattleConfig::new();
        let params = DamageParams {
            attack: 0,
            attacker_element: Element::Normal,
            move_element: Element::Water,
            defense: 0,
            defender_element: Element::Normal,
        };
        let normal = calculate_damage(&params, DamageRolls::flat(100), &config);
        let crit = calculate_damage(
            &params,
            DamageRolls {
                critical: true,
                ..DamageRolls::flat(100)
            },
            &config,
        );
        assert_eq!(normal.damage, 100);
        assert_eq!(crit.damage, 150);
        assert!(crit.critical);
    }

    #[test]
    fn never_below_one() {
        let config = BattleConfig::new();
        let params = DamageParams {
            attack: 0,
            attacker_element: Element::Dark,
            move_element: Element::Dark,
            defense: 5_000,
            defender_element: Element::Holy,
        };
        let result = calculate_damage(&params, DamageRolls::flat(0), &config);
        assert_eq!(result.damage, 1);
        assert!(result.is_resisted());
    }

    #[test]
    fn percent_of_has_floor_of_one() {
        assert_eq!(percent_of(100, 5), 5);
        assert_eq!(percent_of(10, 3), 1);
        assert_eq!(percent_of(0, 50), 1);
    }
}
