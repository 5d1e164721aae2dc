//! chess-perft - drives the position engine from the command line.
//!
//! Counts perft nodes (optionally split by root move or across threads),
//! checks perft suites, and plays SAN or UCI moves from a position.

mod config;

use anyhow::{bail, Context};
use chess_position::{
    moves_to_san, perft_divide, perft_parallel, FenOptions, GameResult, Move, Position,
    SanOptions,
};
use clap::{Parser, Subcommand};
use config::SuiteConfig;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "chess-perft")]
#[command(about = "Move generator validation and move playback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth in plies
        depth: u32,
        /// Starting position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Worker threads
        #[arg(short, long, default_value = "1")]
        threads: usize,
        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
        /// Treat kings as ordinary pieces
        #[arg(long)]
        no_special_king: bool,
    },
    /// Check every position of a perft suite file
    Suite {
        /// Path to the suite TOML file
        path: PathBuf,
        /// Skip depths beyond this one
        #[arg(long)]
        max_depth: Option<u32>,
        /// Override the suite's thread count
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Play moves (SAN or UCI, "0000" for a null move) and show the result
    Play {
        /// Moves to play in order
        moves: Vec<String>,
        /// Starting position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Print a JSON description of each move
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Perft {
            depth,
            fen,
            threads,
            divide,
            no_special_king,
        } => {
            let options = FenOptions {
                king_is_special: !no_special_king,
            };
            let position = load_position(fen.as_deref(), options)?;
            run_perft(&position, depth, threads, divide);
        }
        Commands::Suite {
            path,
            max_depth,
            threads,
        } => {
            let suite = SuiteConfig::load(&path)
                .with_context(|| format!("loading suite {}", path.display()))?;
            let threads = threads.unwrap_or(suite.threads);
            run_suite(&suite, max_depth, threads)?;
        }
        Commands::Play { moves, fen, json } => {
            let root = load_position(fen.as_deref(), FenOptions::default())?;
            play(&root, &moves, json)?;
        }
    }
    Ok(())
}

fn load_position(fen: Option<&str>, options: FenOptions) -> anyhow::Result<Position> {
    match fen {
        Some(fen) => Position::from_fen_with(fen, options)
            .with_context(|| format!("invalid FEN '{}'", fen)),
        None => Ok(Position::startpos()),
    }
}

fn run_perft(position: &Position, depth: u32, threads: usize, divide: bool) {
    let start = Instant::now();
    let nodes = if divide {
        let results = perft_divide(position, depth);
        for (uci, count) in &results {
            println!("{}: {}", uci, count);
        }
        results.iter().map(|(_, count)| count).sum()
    } else {
        perft_parallel(position, depth, threads)
    };
    let elapsed = start.elapsed();
    info!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    println!("nodes: {}", nodes);
}

fn run_suite(suite: &SuiteConfig, max_depth: Option<u32>, threads: usize) -> anyhow::Result<()> {
    let mut failures = 0;
    for entry in &suite.positions {
        let position = entry.position()?;
        for (index, &expected) in entry.depths.iter().enumerate() {
            let depth = index as u32 + 1;
            if max_depth.is_some_and(|max| depth > max) {
                break;
            }
            let start = Instant::now();
            let nodes = perft_parallel(&position, depth, threads);
            let elapsed_ms = start.elapsed().as_millis() as u64;
            if nodes == expected {
                info!(name = %entry.name, depth, nodes, elapsed_ms, "ok");
            } else {
                error!(name = %entry.name, depth, nodes, expected, "node count mismatch");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{} perft count(s) did not match", failures);
    }
    println!("all {} positions passed", suite.positions.len());
    Ok(())
}

fn play(root: &Position, moves: &[String], json: bool) -> anyhow::Result<()> {
    let mut position = root.clone();
    let mut played: Vec<Move> = Vec::with_capacity(moves.len());
    for text in moves {
        let next = match position.play_uci(text) {
            Some(next) => next,
            None => position
                .play_san(text)
                .with_context(|| format!("cannot play '{}' in {}", text, position.to_fen()))?,
        };
        let Some(m) = next.last_move() else {
            bail!("move '{}' left no history", text);
        };
        if json {
            if let Some(description) = position.describe_move(m) {
                println!("{}", serde_json::to_string(&description)?);
            }
        }
        played.push(m);
        position = next;
    }

    let numbered = SanOptions {
        include_move_number: true,
    };
    if !played.is_empty() {
        println!("moves: {}", moves_to_san(root, &played, numbered));
    }
    println!("fen: {}", position.to_fen());
    println!("{}", position.to_uci_position());
    match position.game_result() {
        Some(GameResult::WhiteWins) => println!("result: 1-0"),
        Some(GameResult::BlackWins) => println!("result: 0-1"),
        Some(GameResult::Draw(reason)) => println!("result: 1/2-1/2 ({:?})", reason),
        None if position.is_check() => println!("check"),
        None => {}
    }
    info!(plies = played.len(), "played moves");
    Ok(())
}
