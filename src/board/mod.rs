//! Board representation and game-state types.
//!
//! Contains the core data structures for factions, nodes, adjacency, the
//! fixed rules tables and the overall game state.

pub mod adjacency;
pub mod faction;
pub mod node;
pub mod rules;
pub mod state;

pub use adjacency::{connect, is_symmetric, repair_isolated, wire_grid, DIRECTIONS};
pub use faction::{Faction, FactionInfo, FACTION_COUNT, FACTION_INFO, TURN_ORDER};
pub use node::{Node, NodeId};
pub use rules::*;
pub use state::{Board, GameOverFlag};
