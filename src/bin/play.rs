use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use monopoly_tui::cli;
use monopoly_tui::config::BoardConfig;
use monopoly_tui::game::{GameConfig, Session};
use monopoly_tui::render::Renderer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser, Clone)]
#[command(name = "monopoly")]
#[command(about = "Play Monopoly in the terminal, hot-seat style")]
struct Args {
    /// Number of players (1-4)
    #[arg(short = 'p', long, default_value_t = 4)]
    players: usize,

    /// Money each player starts with
    #[arg(long, default_value_t = 1500)]
    money: i64,

    /// Random seed for the dice
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Board description (JSON). Defaults to the classic board.
    #[arg(long)]
    board: Option<PathBuf>,

    /// Where to write logs. The terminal itself is reserved for the board.
    #[arg(long, default_value = "logs/monopoly.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let board = match &args.board {
        Some(path) => BoardConfig::from_path(path)
            .with_context(|| format!("loading board from {}", path.display()))?,
        None => BoardConfig::classic().context("loading built-in board")?,
    };
    let config = GameConfig {
        num_players: args.players,
        starting_money: args.money,
        seed: args.seed,
        ..GameConfig::default()
    };

    let stdout = io::stdout();
    let mut session = Session::new(&board, config, Renderer::new(stdout.lock()))
        .context("setting up the game")?;
    session.start()?;
    cli::run(&mut session, io::stdin().lock())?;

    let out = session.renderer_mut().writer_mut();
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn init_logging(log_path: &Path) -> Result<()> {
    if let Some(dir) = log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
