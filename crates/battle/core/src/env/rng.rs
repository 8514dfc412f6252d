//! RNG oracle and per-encounter draw cursor.
//!
//! Randomness in an encounter (accuracy, critical, power range, variance, flee,
//! paralysis, confusion and AI choice) comes from an injected [`RngOracle`].
//! The oracle is stateless: every draw is keyed by a seed derived from the
//! encounter seed and a monotonically increasing draw index held by
//! [`RollCursor`]. Replaying the same actions against the same seed therefore
//! reproduces the same encounter.

/// Deterministic random source.
///
/// Implementations must return the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// Stateless PCG-XSH-RR: one LCG step of the seed, then xorshift and rotate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let mixed = (((state >> 18) ^ state) >> 27) as u32;
        mixed.rotate_right((state >> 59) as u32)
    }
}

/// Seed for draw number `draw` of an encounter.
///
/// `stream` keeps independent sequences apart when they share a draw index;
/// sessions always use stream 0.
pub fn compute_seed(encounter_seed: u64, draw: u64, stream: u32) -> u64 {
    let mut key = encounter_seed
        ^ draw.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        ^ u64::from(stream).wrapping_mul(0x85eb_ca6b);
    key = (key ^ (key >> 33)).wrapping_mul(0xff51_afd7_ed55_8ccd);
    key ^ (key >> 33)
}

/// Sequential view over an [`RngOracle`] for one encounter.
///
/// Owns the encounter seed and the number of draws taken so far. The draw
/// counter is observable so callers can verify that an operation consumed no
/// randomness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollCursor {
    seed: u64,
    draws: u64,
}

impl RollCursor {
    pub const fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw the next raw value.
    pub fn next_u32(&mut self, rng: &dyn RngOracle) -> u32 {
        let seed = compute_seed(self.seed, self.draws, 0);
        self.draws += 1;
        rng.next_u32(seed)
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self, rng: &dyn RngOracle) -> f64 {
        self.next_u32(rng) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform value in `[min, max]`. Consumes a draw even if the bounds are equal.
    pub fn uniform(&mut self, rng: &dyn RngOracle, min: f64, max: f64) -> f64 {
        let t = self.unit(rng);
        if max <= min {
            return min;
        }
        min + t * (max - min)
    }

    /// Bernoulli trial: `true` with the given probability.
    ///
    /// Probabilities at or below zero never draw, so a disabled mechanic
    /// leaves the cursor untouched.
    pub fn chance(&mut self, rng: &dyn RngOracle, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        self.unit(rng) < probability
    }

    /// Roll a d100 (1-100 inclusive).
    pub fn roll_d100(&mut self, rng: &dyn RngOracle) -> u32 {
        self.next_u32(rng) % 100 + 1
    }

    /// Uniform integer in `[min, max]` inclusive.
    pub fn range(&mut self, rng: &dyn RngOracle, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + self.next_u32(rng) % span
    }

    /// Uniform index into a collection of `len` elements (`len > 0`).
    pub fn index(&mut self, rng: &dyn RngOracle, len: usize) -> usize {
        debug_assert!(len > 0, "index drawn from an empty collection");
        if len <= 1 {
            return 0;
        }
        (self.next_u32(rng) as usize) % len
    }
}
