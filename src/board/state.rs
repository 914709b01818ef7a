//! Game state representation.
//!
//! Holds the complete snapshot of a game at a given point in time: every
//! node, the faction to move, the game number the board was generated from,
//! the shared game-over flag, the eliminated set and the reinforcement bank.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::faction::{Faction, FACTION_COUNT};
use super::node::{Node, NodeId};
use crate::error::BoardError;

/// Game-over flag shared between the driver and a running turn.
///
/// [`GameOverFlag::handle`] returns a second handle to the same flag, which
/// the driver keeps while the turn controller holds the board. `Clone` copies
/// the current value into an independent flag, so cloned boards never share
/// cancellation state.
#[derive(Debug, Default)]
pub struct GameOverFlag(Arc<AtomicBool>);

impl GameOverFlag {
    /// Creates a flag with the given initial value.
    pub fn new(value: bool) -> Self {
        GameOverFlag(Arc::new(AtomicBool::new(value)))
    }

    /// Returns the current value.
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Sets the flag.
    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }

    /// Returns a handle sharing this flag.
    pub fn handle(&self) -> GameOverFlag {
        GameOverFlag(Arc::clone(&self.0))
    }
}

impl Clone for GameOverFlag {
    fn clone(&self) -> Self {
        GameOverFlag::new(self.get())
    }
}

impl PartialEq for GameOverFlag {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for GameOverFlag {}

/// Complete board state.
///
/// Nodes live in a `Vec` indexed by id, so iteration order is ascending id.
/// BFS start order and AI tie-breaks depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    nodes: Vec<Node>,
    pub current_turn: Faction,
    pub game_number: u32,
    pub game_over: GameOverFlag,
    pub eliminated: BTreeSet<Faction>,
    /// Reinforcement remainder carried per faction, indexed by `Faction as usize`.
    pub bank: [u32; FACTION_COUNT],
}

impl Board {
    /// Builds a board from nodes, validating ids and adjacency.
    ///
    /// Node `i` must carry id `i`, every neighbour id must exist and every
    /// edge must be present in both directions.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Board, BoardError> {
        for (position, node) in nodes.iter().enumerate() {
            if node.id != position {
                return Err(BoardError::NodeIdMismatch { position, id: node.id });
            }
        }
        for node in &nodes {
            for &neighbor in &node.connections {
                let other = nodes.get(neighbor).ok_or(BoardError::UnknownNodeReference {
                    node: node.id,
                    neighbor,
                })?;
                if !other.is_connected_to(node.id) {
                    return Err(BoardError::AsymmetricEdge { from: node.id, to: neighbor });
                }
            }
        }
        Ok(Board::assemble(nodes))
    }

    /// Wraps nodes that are already known to be well formed.
    pub(crate) fn assemble(nodes: Vec<Node>) -> Board {
        Board {
            nodes,
            current_turn: Faction::Red,
            game_number: 1,
            game_over: GameOverFlag::default(),
            eliminated: BTreeSet::new(),
            bank: [0; FACTION_COUNT],
        }
    }

    /// Returns all nodes in ascending id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the board has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id, if any.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns the node with the given id.
    ///
    /// Panics if `id` is out of range; ids taken from the board itself are
    /// always valid.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Mutable access to a node; panics like [`Board::node`].
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Iterates the nodes owned by `faction` in id order.
    pub fn nodes_of(&self, faction: Faction) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.faction == faction)
    }

    /// Counts the nodes owned by `faction`.
    pub fn count_nodes(&self, faction: Faction) -> usize {
        self.nodes_of(faction).count()
    }

    /// Sums the strength of the nodes owned by `faction`.
    pub fn total_strength(&self, faction: Faction) -> u32 {
        self.nodes_of(faction).map(|n| n.strength).sum()
    }

    /// Returns a handle to the shared game-over flag.
    pub fn game_over_handle(&self) -> GameOverFlag {
        self.game_over.handle()
    }

    /// Returns the banked reinforcement remainder for a playable faction.
    pub fn banked(&self, faction: Faction) -> u32 {
        self.bank.get(faction.index()).copied().unwrap_or(0)
    }
}
