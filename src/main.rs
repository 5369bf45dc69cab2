//! Command-line entry point.
//!
//! Starts one of the front ends (GUI or terminal) on a new game, or runs a
//! perft count to check the move generator.

use std::process::ExitCode;

use chess_tracker::gui::run_gui;
use chess_tracker::perft::{divide, Perft};
use chess_tracker::ui::run_terminal;
use chess_tracker::{Game, Position};
use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Gui,
    Terminal,
    Perft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Level {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chess_tracker", about = "Chess position tracker and legal-move generator")]
struct Args {
    /// Front end to start
    #[arg(long, value_enum, default_value_t = Mode::Gui)]
    mode: Mode,

    /// Starting position as FEN (placement and side to move are used)
    #[arg(long)]
    fen: Option<String>,

    /// Depth for perft mode
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Maximum log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(args.log_level))
        .with_writer(std::io::stderr)
        .init();

    let game = match &args.fen {
        Some(fen) => Game::from_fen(fen),
        None => Ok(Game::new()),
    };
    let game = match game {
        Ok(game) => game,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.mode {
        Mode::Gui => {
            if let Err(e) = run_gui(game) {
                error!("Error running GUI: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Mode::Terminal => {
            if let Err(e) = run_terminal(game) {
                error!("Error running terminal UI: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Mode::Perft => run_perft(game.position().clone(), args.depth),
    }

    ExitCode::SUCCESS
}

fn run_perft(mut position: Position, depth: u32) {
    for (mv, nodes) in divide(&mut position, depth) {
        println!("{}: {}", mv, nodes);
    }

    let mut perft = Perft::new();
    let nodes = perft.run(&mut position, depth);
    info!("perft({}) finished", depth);
    println!();
    println!("Nodes:      {}", nodes);
    println!("Captures:   {}", perft.captures);
    println!("Checks:     {}", perft.checks);
    println!("Checkmates: {}", perft.checkmates);
    println!("Stalemates: {}", perft.stalemates);
}
