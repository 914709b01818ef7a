//! Adjacency wiring for generated boards.
//!
//! Nodes sitting on neighbouring grid cells (orthogonal or diagonal) are
//! connected. Every edge is stored in both endpoints' connection lists, so the
//! graph is symmetric: if A lists B then B lists A. A node left without any
//! edge is tied to its Manhattan-nearest node afterwards.

use std::collections::HashMap;

use super::node::{Node, NodeId};

/// Neighbour offsets, in the order they are probed.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Adds the edge `a <-> b` unless `a` already lists `b`.
///
/// Returns true if an edge was added.
pub fn connect(nodes: &mut [Node], a: NodeId, b: NodeId) -> bool {
    if nodes[a].is_connected_to(b) {
        return false;
    }
    nodes[a].connections.push(b);
    nodes[b].connections.push(a);
    true
}

/// Connects every pair of nodes on 8-neighbouring grid cells.
///
/// Returns the number of edges added.
pub fn wire_grid(nodes: &mut [Node]) -> usize {
    let cells: HashMap<(i32, i32), NodeId> = nodes
        .iter()
        .map(|n| ((n.grid_x, n.grid_y), n.id))
        .collect();

    let mut edges = 0;
    for id in 0..nodes.len() {
        let (x, y) = (nodes[id].grid_x, nodes[id].grid_y);
        for (dx, dy) in DIRECTIONS {
            if let Some(&other) = cells.get(&(x + dx, y + dy)) {
                if connect(nodes, id, other) {
                    edges += 1;
                }
            }
        }
    }
    edges
}

/// Returns the Manhattan-nearest other node, first in id order on ties.
pub fn nearest_node(nodes: &[Node], id: NodeId) -> Option<NodeId> {
    let origin = &nodes[id];
    let mut best: Option<(NodeId, u32)> = None;
    for other in nodes.iter().filter(|n| n.id != id) {
        let dist = origin.manhattan(other);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((other.id, dist));
        }
    }
    best.map(|(other, _)| other)
}

/// Gives every isolated node one edge to its nearest node.
///
/// Nodes are visited in id order, so an earlier repair can already have
/// given a later node its edge. Guarantees degree >= 1 for boards with at
/// least two nodes; it does not guarantee a single connected component.
/// Returns the number of repairs made.
pub fn repair_isolated(nodes: &mut [Node]) -> usize {
    let mut repaired = 0;
    for id in 0..nodes.len() {
        if !nodes[id].connections.is_empty() {
            continue;
        }
        if let Some(other) = nearest_node(nodes, id) {
            connect(nodes, id, other);
            repaired += 1;
        }
    }
    repaired
}

/// Returns true if every edge is listed by both endpoints.
pub fn is_symmetric(nodes: &[Node]) -> bool {
    nodes.iter().all(|n| {
        n.connections
            .iter()
            .all(|&c| nodes.get(c).is_some_and(|o| o.is_connected_to(n.id)))
    })
}
