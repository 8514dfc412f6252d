//! Bosses: enemies with HP-threshold phases and dialogue.

use crate::combat::percent_of;
use crate::env::MoveOracle;
use crate::stats::Stat;

use super::{Combatant, CombatantCore, Enemy, EnemyTemplate};

/// Static boss definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossTemplate {
    pub base: EnemyTemplate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    /// Number of phases, 1 to 3.
    #[cfg_attr(feature = "serde", serde(default = "BossTemplate::default_phases"))]
    pub phases: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub intro_dialogue: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defeat_dialogue: String,
    /// Line spoken on entering each phase, keyed by phase number.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase_dialogue: Vec<(u32, String)>,
}

impl BossTemplate {
    #[cfg(feature = "serde")]
    fn default_phases() -> u32 {
        1
    }

    pub fn new(base: EnemyTemplate, phases: u32) -> Self {
        Self {
            base,
            title: String::new(),
            phases,
            intro_dialogue: String::new(),
            defeat_dialogue: String::new(),
            phase_dialogue: Vec::new(),
        }
    }
}

/// Result of a phase transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseTransition {
    /// Phase entered.
    pub phase: u32,
    pub healed: u32,
    pub dialogue: Option<String>,
}

/// A boss opponent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boss {
    enemy: Enemy,
    title: String,
    phases: u32,
    phase: u32,
    intro_dialogue: String,
    defeat_dialogue: String,
    phase_dialogue: Vec<(u32, String)>,
}

impl Boss {
    pub const PHASE_HEAL_PERCENT: u32 = 10;
    pub const PHASE_ATK_MULTIPLIER: f64 = 1.2;
    pub const PHASE_DEF_MULTIPLIER: f64 = 1.1;

    pub fn from_template(template: &BossTemplate, level: u32, moves: &dyn MoveOracle) -> Self {
        Self {
            enemy: Enemy::from_template(&template.base, level, moves),
            title: template.title.clone(),
            phases: template.phases.clamp(1, 3),
            phase: 1,
            intro_dialogue: template.intro_dialogue.clone(),
            defeat_dialogue: template.defeat_dialogue.clone(),
            phase_dialogue: template.phase_dialogue.clone(),
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn enemy_mut(&mut self) -> &mut Enemy {
        &mut self.enemy
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn phases(&self) -> u32 {
        self.phases
    }

    pub fn intro_dialogue(&self) -> &str {
        &self.intro_dialogue
    }

    pub fn defeat_dialogue(&self) -> &str {
        &self.defeat_dialogue
    }

    /// HP percentage at or below which the next phase begins.
    fn next_threshold(&self) -> Option<u32> {
        match (self.phases, self.phase) {
            (2, 1) => Some(50),
            (3, 1) => Some(66),
            (3, 2) => Some(33),
            _ => None,
        }
    }

    /// Advance at most one phase if the HP threshold was crossed.
    ///
    /// Each transition heals 10% of max HP, resets modifiers and applies
    /// persistent ATK ×1.2 and DEF ×1.1. The phase counter makes every
    /// threshold fire once; a fainted boss never transitions.
    pub fn check_phase_transition(&mut self) -> Option<PhaseTransition> {
        if self.is_fainted() {
            return None;
        }
        let threshold = self.next_threshold()?;
        let vitals = self.enemy.core().vitals;
        if vitals.current() as u64 * 100 > threshold as u64 * vitals.max() as u64 {
            return None;
        }

        self.phase += 1;
        let healed = self.heal(percent_of(vitals.max(), Self::PHASE_HEAL_PERCENT));
        self.reset_stat_modifiers();
        self.apply_modifier(Stat::Atk, Self::PHASE_ATK_MULTIPLIER, None);
        self.apply_modifier(Stat::Def, Self::PHASE_DEF_MULTIPLIER, None);

        let dialogue = self
            .phase_dialogue
            .iter()
            .find(|(phase, _)| *phase == self.phase)
            .map(|(_, line)| line.clone());
        tracing::info!(boss = %self.enemy.name(), phase = self.phase, "boss phase transition");

        Some(PhaseTransition {
            phase: self.phase,
            healed,
            dialogue,
        })
    }
}

impl Combatant for Boss {
    fn core(&self) -> &CombatantCore {
        self.enemy.core()
    }

    fn core_mut(&mut self) -> &mut CombatantCore {
        self.enemy.core_mut()
    }
}
