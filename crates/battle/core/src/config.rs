/// Encounter configuration constants and tunable balance parameters.
///
/// Every field has a `DEFAULT_*` constant; content crates override them from
/// `config.toml`, and tests override single fields to pin random factors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Probability (0.0 - 1.0) that a damaging hit is critical.
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    /// Multiplier when the move's element matches its user's element.
    pub same_type_bonus: f64,
    /// Inclusive bounds of the random damage variance factor.
    pub variance_min: f64,
    pub variance_max: f64,

    pub flee_base_chance: f64,
    /// Weight of the speed ratio in the flee formula.
    pub flee_speed_weight: f64,

    pub meter_per_damage_dealt: f64,
    pub meter_per_damage_taken: f64,
    pub meter_on_faint: f64,
    pub meter_on_ally_ability: f64,

    /// Percentage of currency lost when the whole roster faints.
    pub defeat_penalty_percent: u32,
    /// Percentage of max HP restored to fainted fish after a defeat.
    pub revive_percent: u32,

    /// Number of log lines exposed through snapshots.
    pub log_tail: usize,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of fish fielded in one encounter.
    pub const MAX_PARTY: usize = 4;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_LEVEL: u32 = 50;
    pub const XP_PER_LEVEL: u32 = 100;
    pub const METER_MAX: f64 = 100.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRIT_CHANCE: f64 = 0.05;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_SAME_TYPE_BONUS: f64 = 1.2;
    pub const DEFAULT_VARIANCE_MIN: f64 = 0.85;
    pub const DEFAULT_VARIANCE_MAX: f64 = 1.0;
    pub const DEFAULT_FLEE_BASE_CHANCE: f64 = 0.5;
    pub const DEFAULT_FLEE_SPEED_WEIGHT: f64 = 0.2;
    pub const DEFAULT_METER_PER_DAMAGE_DEALT: f64 = 0.1;
    pub const DEFAULT_METER_PER_DAMAGE_TAKEN: f64 = 0.2;
    pub const DEFAULT_METER_ON_FAINT: f64 = 10.0;
    pub const DEFAULT_METER_ON_ALLY_ABILITY: f64 = 5.0;
    pub const DEFAULT_DEFEAT_PENALTY_PERCENT: u32 = 10;
    pub const DEFAULT_REVIVE_PERCENT: u32 = 50;
    pub const DEFAULT_LOG_TAIL: usize = 5;

    pub fn new() -> Self {
        Self {
            crit_chance: Self::DEFAULT_CRIT_CHANCE,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            same_type_bonus: Self::DEFAULT_SAME_TYPE_BONUS,
            variance_min: Self::DEFAULT_VARIANCE_MIN,
            variance_max: Self::DEFAULT_VARIANCE_MAX,
            flee_base_chance: Self::DEFAULT_FLEE_BASE_CHANCE,
            flee_speed_weight: Self::DEFAULT_FLEE_SPEED_WEIGHT,
            meter_per_damage_dealt: Self::DEFAULT_METER_PER_DAMAGE_DEALT,
            meter_per_damage_taken: Self::DEFAULT_METER_PER_DAMAGE_TAKEN,
            meter_on_faint: Self::DEFAULT_METER_ON_FAINT,
            meter_on_ally_ability: Self::DEFAULT_METER_ON_ALLY_ABILITY,
            defeat_penalty_percent: Self::DEFAULT_DEFEAT_PENALTY_PERCENT,
            revive_percent: Self::DEFAULT_REVIVE_PERCENT,
            log_tail: Self::DEFAULT_LOG_TAIL,
        }
    }

    /// Configuration with critical hits disabled and variance pinned to 1.0.
    ///
    /// Makes damage a pure function of the sampled power.
    pub fn deterministic() -> Self {
        Self {
            crit_chance: 0.0,
            variance_min: 1.0,
            variance_max: 1.0,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
