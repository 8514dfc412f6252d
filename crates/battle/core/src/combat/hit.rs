//! Hit chance and accuracy calculations.

/// Hit threshold for a move against a defender.
///
/// # Formula
///
/// ```text
/// threshold = accuracy × attacker_accuracy_mult / defender_evasion_mult
/// clamped to [0, 100]
/// ```
///
/// Multipliers are the combatants' effective accuracy and evasion
/// multipliers (1.0 is neutral, Blinded halves accuracy).
pub fn hit_threshold(accuracy: u32, accuracy_mult: f64, evasion_mult: f64) -> u32 {
    let evasion_mult = if evasion_mult > 0.0 { evasion_mult } else { 1.0 };
    let raw = accuracy as f64 * accuracy_mult / evasion_mult;
    if !raw.is_finite() {
        return 100;
    }
    raw.clamp(0.0, 100.0).floor() as u32
}

/// Check a d100 roll (1-100) against a threshold.
///
/// Returns `true` if the attack hits.
pub const fn check_hit(threshold: u32, roll: u32) -> bool {
    roll <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_multipliers_keep_move_accuracy() {
        assert_eq!(hit_threshold(95, 1.0, 1.0), 95);
        assert_eq!(hit_threshold(100, 1.0, 1.0), 100);
    }

    #[test]
    fn blinded_halves_and_evasion_divides() {
        assert_eq!(hit_threshold(100, 0.5, 1.0), 50);
        assert_eq!(hit_threshold(90, 1.0, 2.0), 45);
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(hit_threshold(100, 3.0, 1.0), 100);
        assert_eq!(hit_threshold(0, 1.0, 1.0), 0);
    }

    #[test]
    fn roll_equal_to_threshold_hits() {
        assert!(check_hit(70, 70));
        assert!(!check_hit(70, 71));
    }
}
