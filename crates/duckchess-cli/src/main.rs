//! Self-play front end
//!
//! Plays the engine against itself from the initial position or a rendered
//! board file, printing the board and the chosen round after every move.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use duckchess_core::moves::Move;
use duckchess_core::{initial_position, parse_board, Board, GameResult, Searcher};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "duck chess self-play engine")]
struct Cli {
    /// Thinking budget per move in milliseconds
    #[arg(long, default_value_t = 5000)]
    think_ms: u64,

    /// Depth cap per move
    #[arg(long, default_value_t = 12)]
    max_depth: i32,

    /// Stop after this many rounds; 0 plays until the game is decided
    #[arg(long, default_value_t = 0)]
    max_rounds: u32,

    /// Start from a rendered board in this file instead of the initial position
    #[arg(long)]
    position: Option<PathBuf>,

    /// Transposition table size in entries
    #[arg(long)]
    tt_entries: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let mut board = load_board(&cli)?;
    let mut searcher = match cli.tt_entries {
        Some(entries) => Searcher::with_table_entries(entries),
        None => Searcher::new(),
    };
    let budget = Duration::from_millis(cli.think_ms);

    let mut round = 0;
    while board.result() == GameResult::Undecided {
        if cli.max_rounds > 0 && round >= cli.max_rounds {
            break;
        }
        println!("{board}");

        let start = Instant::now();
        let selected = searcher.best_move(&board, budget, cli.max_depth)?;
        let text = selected.text(&board);
        selected.mv.apply(&mut board);
        Move::DuckTo { to: selected.duck_to }.apply(&mut board);

        round += 1;
        println!("{round}. {text}");
        info!(
            "visited {} nodes, evaluated {} positions, {:?} elapsed",
            searcher.visited_nodes(),
            searcher.evaluated_positions(),
            start.elapsed()
        );
    }

    println!("{board}");
    match board.result() {
        GameResult::WhiteWon => println!("white wins"),
        GameResult::BlackWon => println!("black wins"),
        GameResult::Undecided => println!("stopped after {round} rounds"),
    }
    Ok(())
}

fn load_board(cli: &Cli) -> Result<Board> {
    match &cli.position {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading position from {}", path.display()))?;
            parse_board(&text)
                .with_context(|| format!("parsing position from {}", path.display()))
        }
        None => Ok(initial_position()),
    }
}
