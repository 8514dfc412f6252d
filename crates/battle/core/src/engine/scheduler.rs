//! Action ordering within a round.

/// Which side an action belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

/// Priority and speed of one side's pending action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Initiative {
    pub priority: i32,
    /// Effective SPD of the acting combatant.
    pub speed: u32,
}

/// Order in which the two sides act this round.
///
/// Higher priority acts first regardless of speed; on equal priority the
/// faster combatant acts first; exact ties favour the player.
pub fn turn_order(player: Initiative, opponent: Initiative) -> [Side; 2] {
    let player_first = match player.priority.cmp(&opponent.priority) {
        core::cmp::Ordering::Greater => true,
        core::cmp::Ordering::Less => false,
        core::cmp::Ordering::Equal => player.speed >= opponent.speed,
    };
    if player_first {
        [Side::Player, Side::Opponent]
    } else {
        [Side::Opponent, Side::Player]
    }
}
