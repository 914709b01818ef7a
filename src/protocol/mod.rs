//! Text protocol and save format.
//!
//! The command parser turns protocol lines into `Command` values for the
//! session loop; the snapshot module defines the JSON save format used by
//! `load` and `board`.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command};
pub use snapshot::BoardSnapshot;
