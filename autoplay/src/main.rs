use std::path::PathBuf;

use autoplay::{play_game, GameResult, Recorder, SimulatedContestant};
use clap::Parser;
use question_loader::load_questions;
use quizboard::{default_players, Player, PlayerConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Spreadsheet (.xlsx, .xls, .ods) or JSON file with the questions
    questions: PathBuf,

    /// JSON file listing the players as {"name": ..., "color": "#rrggbb"}
    #[arg(short, long)]
    players: Option<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that a contestant answers correctly
    #[arg(short, long, default_value_t = 0.75)]
    accuracy: f64,

    /// Give up on a game after this many turns
    #[arg(short, long, default_value_t = 1000)]
    max_turns: usize,

    /// Record the game's events as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Tally {
    finishes: Vec<usize>,
    out_of_questions: usize,
    turn_limit: usize,
    turns_to_finish: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let questions = load_questions(&args.questions)?;
    let players = match &args.players {
        Some(path) => PlayerConfig::load(path)?,
        None => default_players(),
    };
    let mut contestant =
        SimulatedContestant::new(StdRng::seed_from_u64(rng.gen()), args.accuracy)?;

    let mut tally = Tally {
        finishes: vec![0; players.len()],
        ..Tally::default()
    };
    for game_idx in 0..args.num_games {
        match play_game(
            &mut rng,
            &players,
            &questions,
            &mut contestant,
            args.max_turns,
            &mut recorder,
        )? {
            GameResult::ReachedFinish { player_idx, turns } => {
                debug!(winner = players[player_idx].name, game_idx, turns);
                tally.finishes[player_idx] += 1;
                tally.turns_to_finish += turns;
            }
            GameResult::OutOfQuestions { turns } => {
                debug!(game_idx, turns, "Out of questions");
                tally.out_of_questions += 1;
            }
            GameResult::TurnLimit => {
                debug!(game_idx, "Turn limit reached");
                tally.turn_limit += 1;
            }
        }
    }

    print_summary(&players, &tally);
    Ok(())
}

fn print_summary(players: &[Player], tally: &Tally) {
    eprintln!("End result:");
    for (player, finishes) in players.iter().zip(&tally.finishes) {
        eprintln!("- {} finishes by {}", finishes, player.name);
    }
    eprintln!("- {} games ran out of questions", tally.out_of_questions);
    eprintln!("- {} games hit the turn limit", tally.turn_limit);
    let finished: usize = tally.finishes.iter().sum();
    if finished > 0 {
        eprintln!(
            "Finished games took {:.1} turns on average",
            tally.turns_to_finish as f64 / finished as f64
        );
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
