//! Computer-controlled factions.

pub mod turn;

pub use turn::{execute_turn, ignore_combat, CombatEvent, TurnEnd, TurnReport};
