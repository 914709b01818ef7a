//! Combat resolution between two adjacent nodes.
//!
//! The attacker commits everything but `UNITS_LEFT_BEHIND`; the defender
//! fights with its full strength. Rounds are fought one unit at a time until
//! either side runs out.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::rules::{ATTACKER_WIN_CHANCE, UNITS_LEFT_BEHIND};

/// A single round: who won it and the unit counts after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub attacker_wins: bool,
    pub attacker: u32,
    pub defender: u32,
}

/// Result of a full engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatResult {
    pub attacker_won: bool,
    pub attacker_remaining: u32,
    pub defender_remaining: u32,
    pub rounds: Vec<Round>,
}

impl CombatResult {
    /// Attacker units lost over the engagement.
    pub fn attacker_losses(&self) -> usize {
        self.rounds.iter().filter(|r| !r.attacker_wins).count()
    }

    /// Defender units lost over the engagement.
    pub fn defender_losses(&self) -> usize {
        self.rounds.iter().filter(|r| r.attacker_wins).count()
    }
}

/// Fights an attacker of strength `attacker` against a defender of strength
/// `defender`.
///
/// A committed force of zero on either side fights no rounds; the attacker
/// wins exactly when the defender ends at zero.
pub fn resolve_combat(attacker: u32, defender: u32, rng: &mut impl Rng) -> CombatResult {
    let mut atk = attacker.saturating_sub(UNITS_LEFT_BEHIND);
    let mut def = defender;
    let mut rounds = Vec::new();

    while atk > 0 && def > 0 {
        let attacker_wins = rng.gen::<f64>() < ATTACKER_WIN_CHANCE;
        if attacker_wins {
            def -= 1;
        } else {
            atk -= 1;
        }
        rounds.push(Round { attacker_wins, attacker: atk, defender: def });
    }

    debug!(
        attacker,
        defender,
        rounds = rounds.len(),
        won = def == 0,
        "combat resolved"
    );

    CombatResult {
        attacker_won: def == 0,
        attacker_remaining: atk,
        defender_remaining: def,
        rounds,
    }
}
