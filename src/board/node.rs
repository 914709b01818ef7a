//! Territory nodes.

use serde::{Deserialize, Serialize};

use super::faction::Faction;

/// Stable node identifier, equal to the node's position on the board.
pub type NodeId = usize;

/// A territory on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub grid_x: i32,
    pub grid_y: i32,
    pub faction: Faction,
    pub strength: u32,
    pub connections: Vec<NodeId>,
}

impl Node {
    /// Creates an unowned, empty node at a grid position.
    pub fn new(id: NodeId, grid_x: i32, grid_y: i32) -> Self {
        Node {
            id,
            grid_x,
            grid_y,
            faction: Faction::Unowned,
            strength: 0,
            connections: Vec::new(),
        }
    }

    /// Returns true if `other` is a neighbour of this node.
    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.connections.contains(&other)
    }

    /// Manhattan distance between two nodes' grid positions.
    pub fn manhattan(&self, other: &Node) -> u32 {
        self.grid_x.abs_diff(other.grid_x) + self.grid_y.abs_diff(other.grid_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_unowned_and_isolated() {
        let node = Node::new(3, 2, 5);
        assert_eq!(node.faction, Faction::Unowned);
        assert_eq!(node.strength, 0);
        assert!(node.connections.is_empty());
        assert!(!node.is_connected_to(0));
    }

    #[test]
    fn manhattan_distance() {
        let a = Node::new(0, 0, 0);
        let b = Node::new(1, 3, 4);
        assert_eq!(a.manhattan(&b), 7);
        assert_eq!(b.manhattan(&a), 7);
    }
}
