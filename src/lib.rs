//! Open Network Wars simulation library.
//!
//! Exposes the seeded generator, board model, rule resolution, cluster
//! analysis, the AI turn controller and the protocol modules for use by
//! integration tests and the binary entry points.

pub mod ai;
pub mod autoplay;
pub mod board;
pub mod chain;
pub mod engine;
pub mod error;
pub mod generate;
pub mod prng;
pub mod protocol;
pub mod resolve;
