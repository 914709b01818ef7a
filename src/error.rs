//! Error types for board construction, snapshots and autoplay.
//!
//! Malformed boards are rejected when they are generated or loaded, so BFS,
//! combat and the turn controller can assume a well-formed board.

use thiserror::Error;

use crate::board::node::NodeId;

/// Errors that can occur when building or loading a board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("node {node} references unknown neighbour {neighbor}")]
    UnknownNodeReference { node: NodeId, neighbor: NodeId },

    #[error("node at position {position} has id {id}")]
    NodeIdMismatch { position: usize, id: NodeId },

    #[error("edge {from} -> {to} has no reverse edge")]
    AsymmetricEdge { from: NodeId, to: NodeId },

    #[error("invalid faction partition: {0}")]
    InvalidFactionPartition(String),

    #[error("grid has {cells} cells but {nodes} nodes were requested")]
    GridTooSmall { cells: usize, nodes: usize },

    #[error("unknown faction index {0}")]
    UnknownFaction(u8),
}

/// Errors raised while decoding a saved board.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

/// Errors raised by the autoplay driver.
#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid generation config: {0}")]
    Board(#[from] BoardError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
