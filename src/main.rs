//! netwars -- a session engine for Open Network Wars boards.
//!
//! This binary reads commands from stdin and writes responses to stdout, one
//! command per line. Logs go to stderr so the protocol stream stays clean.

use std::io::{self, BufRead, Write};

use tracing::error;
use tracing_subscriber::EnvFilter;

use netwars::engine::Engine;
use netwars::protocol::parser::{parse_command, Command};

/// Runs the protocol loop, reading commands from stdin and writing responses
/// to stdout.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("netwars=info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "session ended");
        std::process::exit(1);
    }
}

async fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::NewGame { game_number } => engine.new_game(game_number, &mut out)?,
            Command::Load { json } => engine.load(&json, &mut out)?,
            Command::Board => engine.handle_board(&mut out)?,
            Command::Turn { faction } => engine.handle_turn(faction, &mut out).await?,
            Command::Reinforce { faction } => engine.handle_reinforce(faction, &mut out)?,
            Command::Check => engine.handle_check(&mut out)?,
            Command::GameOver => engine.set_game_over(),
            Command::Quit => break,
        }
    }

    out.flush()
}
