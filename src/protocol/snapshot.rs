//! JSON save format for a board.
//!
//! Field names follow the save files written by the browser build of the
//! game, so saves move freely between the two:
//!
//! ```json
//! { "nodes": [{ "id": 0, "gridX": 3, "gridY": 1, "faction": 2,
//!               "strength": 4, "connections": [5, 9] }],
//!   "gameNumber": 7, "isGameOver": false,
//!   "eliminatedFactions": [3], "fractions": [0, 1, 0, 0, 0],
//!   "currentTurn": 0 }
//! ```
//!
//! `currentTurn` is optional and defaults to the first faction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::faction::{Faction, FACTION_COUNT};
use crate::board::node::Node;
use crate::board::state::{Board, GameOverFlag};
use crate::error::SnapshotError;

/// Serializable copy of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub nodes: Vec<Node>,
    pub game_number: u32,
    pub is_game_over: bool,
    pub eliminated_factions: Vec<Faction>,
    /// Reinforcement bank per faction.
    pub fractions: [u32; FACTION_COUNT],
    #[serde(default)]
    pub current_turn: Faction,
}

impl Board {
    /// Captures the board in its save form.
    pub fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            nodes: self.nodes().to_vec(),
            game_number: self.game_number,
            is_game_over: self.game_over.get(),
            eliminated_factions: self.eliminated.iter().copied().collect(),
            fractions: self.bank,
            current_turn: self.current_turn,
        }
    }

    /// Rebuilds a board from its save form, validating ids and adjacency.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Board, SnapshotError> {
        let mut board = Board::from_nodes(snapshot.nodes)?;
        board.game_number = snapshot.game_number;
        board.game_over = GameOverFlag::new(snapshot.is_game_over);
        board.eliminated = snapshot.eliminated_factions.into_iter().collect::<BTreeSet<_>>();
        board.bank = snapshot.fractions;
        board.current_turn = snapshot.current_turn;
        Ok(board)
    }

    /// Serializes the board as a single-line JSON save.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.to_snapshot())?)
    }

    /// Parses and validates a JSON save.
    pub fn from_json(json: &str) -> Result<Board, SnapshotError> {
        let snapshot: BoardSnapshot = serde_json::from_str(json)?;
        Board::from_snapshot(snapshot)
    }
}
