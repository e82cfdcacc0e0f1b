use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::{visualize_grid, Action, Grid, Session};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Policy {
    /// Greedy one-ply lookahead: most empty cells, then highest score
    Auto,
    /// Uniformly random directions
    Random,
}

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Move selection policy
    #[arg(short, long, value_enum, default_value_t = Policy::Auto)]
    policy: Policy,

    /// Abort a game after this many actions, counting it as stuck
    #[arg(long, default_value_t = 100_000)]
    max_moves: usize,

    /// Record every finished game as a JSON line into this file
    #[arg(short, long)]
    record_games_to: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Copy, Clone, Debug, Serialize)]
enum GameOutcome {
    Won,
    Lost,
    Stuck,
}

#[derive(Serialize)]
struct GameRecord {
    game_idx: usize,
    seed: u64,
    outcome: GameOutcome,
    num_moves: usize,
    score: u32,
    best_tile: u32,
    final_grid: Grid,
}

#[derive(Default)]
struct RunStats {
    wins: usize,
    losses: usize,
    stuck: usize,
    total_score: u64,
    best_tile: u32,
}

fn play_game(session: &mut Session, policy: Policy, max_moves: usize) -> (GameOutcome, usize) {
    let action = match policy {
        Policy::Auto => Action::AutoMove,
        Policy::Random => Action::RandomMove,
    };
    for num_moves in 1..=max_moves {
        session.handle_action(action);
        if session.won() {
            return (GameOutcome::Won, num_moves);
        }
        if session.lost() {
            return (GameOutcome::Lost, num_moves);
        }
    }
    (GameOutcome::Stuck, max_moves)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recording = match &args.record_games_to {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let mut stats = RunStats::default();
    for game_idx in 0..args.num_games {
        let game_seed: u64 = rng.gen();
        let mut session = Session::seeded(game_seed);
        let (outcome, num_moves) = play_game(&mut session, args.policy, args.max_moves);

        let best_tile = session.grid().max_value();
        debug!(
            game_idx,
            ?outcome,
            num_moves,
            score = session.score(),
            best_tile
        );
        debug!("final board:\n{}", visualize_grid(session.grid()));

        match outcome {
            GameOutcome::Won => stats.wins += 1,
            GameOutcome::Lost => stats.losses += 1,
            GameOutcome::Stuck => stats.stuck += 1,
        }
        stats.total_score += u64::from(session.score());
        stats.best_tile = stats.best_tile.max(best_tile);

        if let Some(writer) = &mut recording {
            let record = GameRecord {
                game_idx,
                seed: game_seed,
                outcome,
                num_moves,
                score: session.score(),
                best_tile,
                final_grid: *session.grid(),
            };
            serde_json::to_writer(&mut *writer, &record)?;
            writeln!(writer)?;
        }
    }

    if let Some(writer) = &mut recording {
        writer.flush()?;
    }

    let average_score = if args.num_games > 0 {
        stats.total_score as f64 / args.num_games as f64
    } else {
        0.0
    };
    eprintln!(
        "End result:\n- {} wins\n- {} losses\n- {} games stuck at the move cap\n- best tile {}\n- average score {:.1}",
        stats.wins, stats.losses, stats.stuck, stats.best_tile, average_score
    );

    Ok(())
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
