//! Session command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that the
//! session loop can dispatch on.

use tracing::warn;

use crate::board::faction::Faction;

/// A parsed driver-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; the engine identifies itself.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Generate the board for a game number.
    NewGame { game_number: u32 },

    /// Replace the board with a JSON save.
    Load { json: String },

    /// Print the current board as a JSON save.
    Board,

    /// Play one AI turn for a faction.
    Turn { faction: Faction },

    /// Run the reinforcement phase for a faction.
    Reinforce { faction: Faction },

    /// Report the victory check.
    Check,

    /// Raise the game-over flag.
    GameOver,

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let mut tokens = trimmed.split_whitespace();
    let keyword = tokens.next()?;

    match keyword {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "board" => Some(Command::Board),
        "check" => Some(Command::Check),
        "gameover" => Some(Command::GameOver),
        "quit" => Some(Command::Quit),

        "newgame" => parse_newgame(tokens.next()),
        "load" => parse_load(trimmed),
        "turn" => parse_faction("turn", tokens.next()).map(|faction| Command::Turn { faction }),
        "reinforce" => {
            parse_faction("reinforce", tokens.next()).map(|faction| Command::Reinforce { faction })
        }

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `newgame <n>`.
fn parse_newgame(arg: Option<&str>) -> Option<Command> {
    let Some(arg) = arg else {
        warn!("malformed newgame: expected 'newgame <n>'");
        return None;
    };
    match arg.parse::<u32>() {
        Ok(game_number) => Some(Command::NewGame { game_number }),
        Err(_) => {
            warn!(value = arg, "invalid game number");
            None
        }
    }
}

/// Parses `load <json>`; the JSON is everything after the keyword.
fn parse_load(line: &str) -> Option<Command> {
    let json = line.strip_prefix("load").unwrap_or_default().trim();
    if json.is_empty() {
        warn!("malformed load: expected 'load <json>'");
        return None;
    }
    Some(Command::Load { json: json.to_string() })
}

/// Parses the faction argument of `turn` and `reinforce`.
///
/// Only the five playable factions are accepted.
fn parse_faction(command: &str, arg: Option<&str>) -> Option<Faction> {
    let Some(arg) = arg else {
        warn!(command, "missing faction");
        return None;
    };
    match Faction::parse(arg) {
        Some(faction) if faction.is_playable() => Some(faction),
        _ => {
            warn!(command, value = arg, "unknown faction");
            None
        }
    }
}
