mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use question_loader::load_questions;
use quizboard::{default_players, PlayerConfig, QuestionPool, TurnEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    crossterm::{
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::app::App;

#[derive(Parser)]
struct Args {
    /// Spreadsheet (.xlsx, .xls, .ods) or JSON file with the questions
    questions: PathBuf,

    /// JSON file listing the players as {"name": ..., "color": "#rrggbb"}
    #[arg(short, long)]
    players: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file. Nothing is logged without it, since the
    /// terminal belongs to the game.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        initialize_logging(path, args.log_level)?;
    }

    let questions = load_questions(&args.questions)?;
    let players = match &args.players {
        Some(path) => PlayerConfig::load(path)?,
        None => default_players(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let engine = TurnEngine::new(
        players,
        QuestionPool::new(questions),
        StdRng::seed_from_u64(seed),
    )?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = App::new(engine).run(&mut terminal);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn initialize_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(File::create(path)?)),
        )
        .with(filter)
        .init();
    Ok(())
}
