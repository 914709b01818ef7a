//! Territory control analysis.
//!
//! A cluster is a maximal set of same-faction nodes connected through
//! same-faction edges. The largest cluster sets the reinforcement income, and
//! its frontline nodes (those touching another owned faction) receive it.

use std::collections::VecDeque;

use crate::board::faction::Faction;
use crate::board::node::NodeId;
use crate::board::state::Board;

/// Returns the largest same-faction connected component, in BFS visit order.
///
/// Searches start from the faction's nodes in ascending id order; on equal
/// sizes the first component discovered wins. Empty if `faction` owns nothing.
pub fn largest_cluster(faction: Faction, board: &Board) -> Vec<NodeId> {
    let mut visited = vec![false; board.len()];
    let mut largest: Vec<NodeId> = Vec::new();
    let mut queue = VecDeque::new();

    for start in board.nodes_of(faction).map(|n| n.id) {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);

        let mut cluster = Vec::new();
        while let Some(current) = queue.pop_front() {
            cluster.push(current);
            for &next in &board.node(current).connections {
                if !visited[next] && board.node(next).faction == faction {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        if cluster.len() > largest.len() {
            largest = cluster;
        }
    }

    largest
}

/// Returns the nodes of `cluster` that border another owned faction.
///
/// `Unowned` neighbours do not count. Input order is preserved.
pub fn frontline(faction: Faction, board: &Board, cluster: &[NodeId]) -> Vec<NodeId> {
    cluster
        .iter()
        .copied()
        .filter(|&id| {
            board.node(id).connections.iter().any(|&c| {
                let owner = board.node(c).faction;
                owner != faction && owner != Faction::Unowned
            })
        })
        .collect()
}
