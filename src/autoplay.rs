//! Headless AI-vs-AI games.
//!
//! Plays full games with every faction computer-controlled. Each round walks
//! the turn order; every faction still on the board plays its turn and then
//! reinforces. A game ends on a terminal victory check or after
//! `max_rounds` rounds. Independent games can run in parallel on a rayon
//! pool, each driven by its own current-thread tokio runtime.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::turn::{execute_turn, ignore_combat, TurnEnd, TurnReport};
use crate::board::faction::{Faction, FACTION_COUNT, TURN_ORDER};
use crate::board::state::Board;
use crate::error::AutoplayError;
use crate::generate::{generate_for_game, generate_with, GenerationConfig};
use crate::prng::Prng;
use crate::resolve::reinforce::reinforce;
use crate::resolve::victory::{check, Outcome};

/// Configuration for an autoplay batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Game number of the first game; later games count up from it.
    pub first_game: u32,
    /// Rounds before a game is cut off as ongoing.
    pub max_rounds: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Seed for combat rolls and tie-breaks (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
    /// Board layout.
    pub generation: GenerationConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            num_games: 10,
            first_game: 1,
            max_rounds: 200,
            threads: 4,
            seed: 0,
            quiet: false,
            generation: GenerationConfig::default(),
        }
    }
}

/// One faction's turn within a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub round: u32,
    pub report: TurnReport,
    /// Units handed out by the reinforcement after the turn.
    pub reinforced: u32,
}

/// A complete autoplay game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_number: u32,
    /// `Ongoing` when the game hit the round limit.
    pub outcome: Outcome,
    pub rounds: u32,
    pub turns: Vec<TurnRecord>,
    /// Nodes held per faction at the end, indexed by `Faction as usize`.
    pub final_nodes: [usize; FACTION_COUNT],
    pub eliminated: Vec<Faction>,
}

impl GameRecord {
    /// Total attacks across the game.
    pub fn attacks(&self) -> u32 {
        self.turns.iter().map(|t| t.report.attacks).sum()
    }
}

/// Builds the starting board for a game number.
pub fn starting_board(config: &MatchConfig, game_number: u32) -> Result<Board, AutoplayError> {
    if config.generation == GenerationConfig::default() {
        return Ok(generate_for_game(game_number));
    }
    let mut board = generate_with(&mut Prng::for_game(game_number), &config.generation)?;
    board.game_number = game_number;
    Ok(board)
}

/// Plays one game to completion on `board`.
pub async fn play_game(config: &MatchConfig, mut board: Board, rng: &mut SmallRng) -> GameRecord {
    let mut turns = Vec::new();
    let mut rounds = 0;
    let mut outcome = check(&board);

    'game: while !outcome.is_over() && rounds < config.max_rounds {
        rounds += 1;
        for faction in TURN_ORDER {
            if board.count_nodes(faction) == 0 {
                continue;
            }
            board.current_turn = faction;
            let report = execute_turn(faction, &mut board, rng, ignore_combat).await;
            let reinforced = match report.end {
                TurnEnd::Terminal(_) => 0,
                _ => reinforce(faction, &mut board).total,
            };
            turns.push(TurnRecord { round: rounds, report, reinforced });

            outcome = check(&board);
            if outcome.is_over() {
                board.game_over.set(true);
                break 'game;
            }
        }
        debug!(game = board.game_number, round = rounds, "round complete");
    }

    GameRecord {
        game_number: board.game_number,
        outcome,
        rounds,
        turns,
        final_nodes: TURN_ORDER.map(|f| board.count_nodes(f)),
        eliminated: board.eliminated.iter().copied().collect(),
    }
}

/// Plays game `index` of the batch on a fresh current-thread runtime.
fn play_indexed(config: &MatchConfig, index: usize) -> Result<GameRecord, AutoplayError> {
    let game_number = config.first_game.wrapping_add(index as u32);
    let board = starting_board(config, game_number)?;
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(index as u64))
    } else {
        SmallRng::from_entropy()
    };
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    Ok(runtime.block_on(play_game(config, board, &mut rng)))
}

/// Runs an autoplay batch and returns the records in game order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_autoplay(config: &MatchConfig) -> Result<Vec<GameRecord>, AutoplayError> {
    config.generation.validate()?;
    let completed = AtomicUsize::new(0);

    let play = |index: usize| -> Result<GameRecord, AutoplayError> {
        let start = Instant::now();
        let game = play_indexed(config, index)?;
        if !config.quiet {
            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
            info!(
                "Game {}/{}: #{} {} after {} rounds ({:.2}s)",
                n,
                config.num_games,
                game.game_number,
                describe(game.outcome),
                game.rounds,
                start.elapsed().as_secs_f64()
            );
        }
        Ok(game)
    };

    if config.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(|| (0..config.num_games).into_par_iter().map(play).collect())
    } else {
        (0..config.num_games).map(play).collect()
    }
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Ongoing => "unfinished".to_string(),
        Outcome::Winner(f) => format!("{} wins", f),
        Outcome::PlayerEliminated => format!("{} eliminated", Faction::PLAYER),
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> Result<(), AutoplayError> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Aggregate statistics over a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub wins: [usize; FACTION_COUNT],
    pub player_eliminated: usize,
    pub unfinished: usize,
    pub avg_rounds: f64,
    pub avg_attacks: f64,
}

/// Summarizes a batch of records.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut rounds = 0u64;
    let mut attacks = 0u64;
    for game in games {
        rounds += u64::from(game.rounds);
        attacks += u64::from(game.attacks());
        match game.outcome {
            Outcome::Winner(f) => summary.wins[f.index()] += 1,
            Outcome::PlayerEliminated => summary.player_eliminated += 1,
            Outcome::Ongoing => summary.unfinished += 1,
        }
    }
    let total = games.len().max(1) as f64;
    summary.avg_rounds = rounds as f64 / total;
    summary.avg_attacks = attacks as f64 / total;
    summary
}

/// Prints a summary of autoplay results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let summary = summarize(games);
    let total = summary.games.max(1) as f64;
    eprintln!("=== Autoplay Summary ===");
    eprintln!("Games: {}", summary.games);
    eprintln!("Avg rounds/game: {:.1}", summary.avg_rounds);
    eprintln!("Avg attacks/game: {:.1}", summary.avg_attacks);
    eprintln!("Unfinished: {}", summary.unfinished);
    eprintln!("{} eliminated: {}", Faction::PLAYER, summary.player_eliminated);
    eprintln!("Win distribution:");
    for faction in TURN_ORDER {
        let wins = summary.wins[faction.index()];
        eprintln!(
            "  {:>8}: {} ({:.1}%)",
            faction.name(),
            wins,
            100.0 * wins as f64 / total
        );
    }
}
