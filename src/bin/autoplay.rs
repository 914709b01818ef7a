//! Autoplay CLI.
//!
//! Plays Open Network Wars games with every faction computer-controlled and
//! writes one JSON game record per line.
//!
//! Usage:
//!   cargo run --release --bin autoplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 10)
//!   --first-game G   Game number of the first game (default: 1)
//!   --max-rounds R   Rounds before a game is cut off (default: 200)
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --config FILE    JSON match config; later flags override it
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::error;
use tracing_subscriber::EnvFilter;

use netwars::autoplay::{self, MatchConfig};
use netwars::error::AutoplayError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("netwars=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = MatchConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value(&args, i, "--games");
            }
            "--first-game" => {
                i += 1;
                config.first_game = value(&args, i, "--first-game");
            }
            "--max-rounds" => {
                i += 1;
                config.max_rounds = value(&args, i, "--max-rounds");
            }
            "--threads" => {
                i += 1;
                config.threads = value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = value(&args, i, "--seed");
            }
            "--config" => {
                i += 1;
                let path: String = value(&args, i, "--config");
                config = match load_config(&path) {
                    Ok(c) => c,
                    Err(e) => {
                        error!(path = %path, error = %e, "failed to read config");
                        process::exit(1);
                    }
                };
            }
            "--output" => {
                i += 1;
                output_path = Some(value(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = run(&config, output_path.as_deref()) {
        error!(error = %e, "autoplay failed");
        process::exit(1);
    }
}

fn run(config: &MatchConfig, output_path: Option<&str>) -> Result<(), AutoplayError> {
    if !config.quiet {
        eprintln!(
            "Autoplay: {} games from #{}, max {} rounds, {} threads",
            config.num_games, config.first_game, config.max_rounds, config.threads
        );
    }

    let start = Instant::now();
    let games = autoplay::run_autoplay(config)?;
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        autoplay::print_summary(&games);
    }

    match output_path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            autoplay::write_jsonl(&games, &mut writer)?;
            if !config.quiet {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            autoplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}

fn load_config(path: &str) -> Result<MatchConfig, AutoplayError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Parses the value following a flag, exiting with usage on failure.
fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        Some(Err(_)) => {
            eprintln!("invalid {} value: {}", flag, args[i]);
            print_usage();
            process::exit(1);
        }
        None => {
            eprintln!("missing value for {}", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: autoplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --first-game G   Game number of the first game (default: 1)");
    eprintln!("  --max-rounds R   Rounds before a game is cut off (default: 200)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE    JSON match config; later flags override it");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
