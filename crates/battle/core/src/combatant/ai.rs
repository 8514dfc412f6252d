//! Opponent move selection.

use crate::env::{RngOracle, RollCursor};

use super::Move;

/// How an opponent picks its move each round.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AiPolicy {
    /// Uniform draw over known moves.
    #[default]
    Random,
    /// Always the move with the highest maximum power (first on ties).
    StrongestFirst,
    /// Known moves in order, wrapping around.
    Cycle,
}

impl AiPolicy {
    /// Pick a move index from a non-empty move list.
    ///
    /// `cycle` is the opponent's rotation cursor; only `Cycle` advances it.
    /// Only `Random` draws from the cursor, and only with two or more moves.
    pub fn choose(
        self,
        moves: &[Move],
        cycle: &mut usize,
        cursor: &mut RollCursor,
        rng: &dyn RngOracle,
    ) -> usize {
        if moves.is_empty() {
            return 0;
        }
        match self {
            AiPolicy::Random => cursor.index(rng, moves.len()),
            AiPolicy::StrongestFirst => {
                let mut best = 0;
                for (index, mv) in moves.iter().enumerate() {
                    if mv.power.max() > moves[best].power.max() {
                        best = index;
                    }
                }
                best
            }
            AiPolicy::Cycle => {
                let index = *cycle % moves.len();
                *cycle = index + 1;
                index
            }
        }
    }
}
