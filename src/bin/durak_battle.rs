//! Durak battle CLI: pit two computer strategies against each other.

use clap::Parser;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use durak_engine::ai::arena::{battle, ArenaConfig};
use durak_engine::ai::Opponent;
use durak_engine::core::{GameConfig, PlayerId};

#[derive(Parser)]
#[command(name = "durak-battle")]
#[command(about = "Play batches of AI-vs-AI Durak games and tally the winners")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value = "10")]
    games: usize,

    /// Strategy for player 0 (random, heuristic, endgame)
    #[arg(long, default_value = "random")]
    player0: Opponent,

    /// Strategy for player 1 (random, heuristic, endgame)
    #[arg(long, default_value = "heuristic")]
    player1: Opponent,

    /// Cards in the deck before the trump is drawn (even, at most 36)
    #[arg(long, default_value = "36")]
    deck_size: usize,

    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Actions after which a game counts as unfinished
    #[arg(long, default_value = "200")]
    max_actions: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins; --verbose only changes the fallback level
    let fallback = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();

    let game = GameConfig::default().with_deck_size(args.deck_size);
    game.validate()?;

    let mut config = ArenaConfig::new()
        .with_games(args.games)
        .with_max_actions(args.max_actions)
        .with_game(game);
    config.seed = args.seed;

    info!(
        games = args.games,
        player0 = %args.player0,
        player1 = %args.player1,
        "starting battle"
    );

    let start = Instant::now();
    let strategies = [args.player0, args.player1];
    let results = battle(&config, |player: PlayerId, seed| {
        strategies[player.index()].build(seed)
    })?;

    println!("{} vs {}: {}", args.player0, args.player1, results);
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "battle complete");
    Ok(())
}
