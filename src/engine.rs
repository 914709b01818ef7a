//! Session state management.
//!
//! Holds the current board between protocol commands and runs AI turns,
//! reinforcement and victory checks on it. Responses are written to the
//! caller's output; write failures are returned to the session loop.

use std::future::ready;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::ai::turn::execute_turn;
use crate::board::faction::Faction;
use crate::board::rules::VERSION;
use crate::board::state::Board;
use crate::generate::generate_for_game;
use crate::resolve::reinforce::reinforce;
use crate::resolve::victory::{check, Outcome};

/// Holds the mutable state of the session between commands.
pub struct Engine {
    pub board: Option<Board>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a session with no board and an entropy-seeded random source.
    pub fn new() -> Self {
        Engine::with_rng(SmallRng::from_entropy())
    }

    /// Creates a session drawing combat rolls and tie-breaks from `rng`.
    pub fn with_rng(rng: SmallRng) -> Self {
        Engine { board: None, rng }
    }

    /// Handles the handshake: writes the engine id, version and `hellook`.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name netwars")?;
        writeln!(out, "id version {}", VERSION)?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Generates the board for `game_number`, replacing any current board.
    pub fn new_game<W: Write>(&mut self, game_number: u32, out: &mut W) -> io::Result<()> {
        let board = generate_for_game(game_number);
        info!(game = game_number, "new game");
        writeln!(out, "game {} nodes {}", game_number, board.len())?;
        self.board = Some(board);
        out.flush()
    }

    /// Replaces the board with a JSON save.
    ///
    /// An invalid save is reported and leaves the current board untouched.
    pub fn load<W: Write>(&mut self, json: &str, out: &mut W) -> io::Result<()> {
        match Board::from_json(json) {
            Ok(board) => {
                writeln!(out, "loaded {}", board.len())?;
                self.board = Some(board);
            }
            Err(e) => {
                warn!(error = %e, "load failed");
                writeln!(out, "error {}", e)?;
            }
        }
        out.flush()
    }

    /// Writes the current board as a JSON save.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(board) = &self.board else {
            return no_board(out);
        };
        match board.to_json() {
            Ok(json) => writeln!(out, "board {}", json)?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Plays one AI turn for `faction`, streaming a `combat` line per attack.
    pub async fn handle_turn<W: Write>(&mut self, faction: Faction, out: &mut W) -> io::Result<()> {
        let Some(board) = self.board.as_mut() else {
            return no_board(out);
        };
        board.current_turn = faction;

        let mut written = Ok(());
        let report = execute_turn(faction, board, &mut self.rng, |event| {
            if written.is_ok() {
                written = writeln!(
                    out,
                    "combat {} {} {} {} {}",
                    event.attacker,
                    event.defender,
                    if event.result.attacker_won { "won" } else { "lost" },
                    event.result.attacker_remaining,
                    event.result.defender_remaining
                );
            }
            ready(())
        })
        .await;
        written?;

        writeln!(
            out,
            "turnend {} {} {}",
            report.attacks, report.captures, report.end
        )?;
        out.flush()
    }

    /// Runs the reinforcement phase for `faction`.
    pub fn handle_reinforce<W: Write>(&mut self, faction: Faction, out: &mut W) -> io::Result<()> {
        let Some(board) = self.board.as_mut() else {
            return no_board(out);
        };
        let result = reinforce(faction, board);
        writeln!(out, "reinforced {} bank {}", result.total, board.banked(faction))?;
        out.flush()
    }

    /// Reports the victory check for the current board.
    pub fn handle_check<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(board) = &self.board else {
            return no_board(out);
        };
        match check(board) {
            Outcome::Ongoing => writeln!(out, "outcome ongoing")?,
            Outcome::Winner(f) => {
                writeln!(out, "outcome winner {}", f.name().to_ascii_lowercase())?
            }
            Outcome::PlayerEliminated => writeln!(out, "outcome eliminated")?,
        }
        out.flush()
    }

    /// Raises the game-over flag on the current board, if any.
    pub fn set_game_over(&mut self) {
        match &self.board {
            Some(board) => board.game_over.set(true),
            None => warn!("gameover: no board"),
        }
    }
}

fn no_board<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "error no board")?;
    out.flush()
}
