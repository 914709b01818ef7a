//! Rule resolution.
//!
//! Combat between adjacent nodes, the reinforcement phase and the victory and
//! elimination checks that run after every state change.

pub mod combat;
pub mod reinforce;
pub mod victory;

pub use combat::{resolve_combat, CombatResult, Round};
pub use reinforce::{reinforce, Grant, Reinforcement};
pub use victory::{check, update_eliminations, Outcome};
