//! Reinforcement phase.
//!
//! A faction earns one unit per node of its largest cluster, plus whatever it
//! banked last time. The income is split evenly over the cluster's frontline;
//! the undistributed remainder is banked for the next reinforcement.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::faction::Faction;
use crate::board::node::NodeId;
use crate::board::state::Board;
use crate::chain::{frontline, largest_cluster};

/// Units granted to one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub node: NodeId,
    pub amount: u32,
}

/// Outcome of a reinforcement phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reinforcement {
    pub grants: Vec<Grant>,
    pub total: u32,
}

/// Reinforces `faction` in place and returns what was handed out.
///
/// With no cluster or no frontline nothing changes, the bank included.
/// `Unowned` has no bank and is never reinforced.
pub fn reinforce(faction: Faction, board: &mut Board) -> Reinforcement {
    if !faction.is_playable() {
        return Reinforcement::default();
    }
    let cluster = largest_cluster(faction, board);
    if cluster.is_empty() {
        return Reinforcement::default();
    }
    let front = frontline(faction, board, &cluster);
    if front.is_empty() {
        return Reinforcement::default();
    }

    let slot = faction.index();
    let raw = cluster.len() as u32 + board.bank[slot];
    let slots = front.len() as u32;
    let per_node = raw / slots;
    board.bank[slot] = raw - per_node * slots;

    let mut grants = Vec::with_capacity(front.len());
    if per_node > 0 {
        for id in front {
            board.node_mut(id).strength += per_node;
            grants.push(Grant { node: id, amount: per_node });
        }
    }

    let total = per_node * slots;
    info!(
        %faction,
        cluster = cluster.len(),
        frontline = slots,
        total,
        bank = board.bank[slot],
        "reinforced"
    );
    Reinforcement { grants, total }
}
