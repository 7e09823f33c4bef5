//! Durak HTTP server: hosts one game session.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use durak_engine::core::{GameConfig, PlayerId};
use durak_engine::http::{self, AppState};
use durak_engine::session::{SeatKind, Session, SessionConfig};

#[derive(Parser)]
#[command(name = "durak-server")]
#[command(about = "Serve a Durak game over HTTP")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Occupant of seat 0 (human, random, heuristic, endgame)
    #[arg(long, default_value = "heuristic")]
    seat0: SeatKind,

    /// Occupant of seat 1 (human, random, heuristic, endgame)
    #[arg(long, default_value = "human")]
    seat1: SeatKind,

    /// Cards in the deck before the trump is drawn (even, at most 36)
    #[arg(long, default_value = "36")]
    deck_size: usize,

    /// Session seed for reproducible deals
    #[arg(long)]
    seed: Option<u64>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut game = GameConfig::default().with_deck_size(args.deck_size);
    game.seed = args.seed;
    let config = SessionConfig::new()
        .with_game(game)
        .with_seat(PlayerId::ZERO, args.seat0)
        .with_seat(PlayerId::ONE, args.seat1);

    let session = Session::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let data = web::Data::new(AppState::new(session));

    info!(host = %args.host, port = args.port, seat0 = %args.seat0, seat1 = %args.seat1, "durak server listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(http::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}
