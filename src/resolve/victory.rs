//! Win and elimination detection.

use serde::{Deserialize, Serialize};

use crate::board::faction::{Faction, TURN_ORDER};
use crate::board::rules::VICTORY_THRESHOLD;
use crate::board::state::Board;

/// Result of a victory check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "faction", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    /// A faction reached `VICTORY_THRESHOLD` nodes.
    Winner(Faction),
    /// The player's faction holds no nodes.
    PlayerEliminated,
}

impl Outcome {
    /// Returns true for every terminal outcome.
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winning faction, if any.
    pub fn winner(self) -> Option<Faction> {
        match self {
            Outcome::Winner(f) => Some(f),
            _ => None,
        }
    }
}

/// Checks the board for a winner or the player's elimination.
///
/// Factions are tested in turn order, so the lowest index wins if several
/// reach the threshold at once. A winner takes precedence over player
/// elimination.
pub fn check(board: &Board) -> Outcome {
    if let Some(&winner) = TURN_ORDER
        .iter()
        .find(|&&f| board.count_nodes(f) >= VICTORY_THRESHOLD)
    {
        return Outcome::Winner(winner);
    }
    if board.count_nodes(Faction::PLAYER) == 0 {
        return Outcome::PlayerEliminated;
    }
    Outcome::Ongoing
}

/// Adds every playable faction without nodes to the eliminated set.
///
/// Factions are never removed from the set.
pub fn update_eliminations(board: &mut Board) {
    for faction in TURN_ORDER {
        if board.count_nodes(faction) == 0 {
            board.eliminated.insert(faction);
        }
    }
}
