//! HTTP transport for a single hosted session.
//!
//! | Route | Query | Reply |
//! |---|---|---|
//! | `GET /game` | `player` | snapshot stripped for `player` |
//! | `POST /game` | `player`, `action` | snapshot after the action and any computer replies |
//! | `GET /test` | | `true` |
//!
//! `player` is `0`, `1`, or `undefined` (no redaction). Requests are served
//! one at a time through the session lock.

mod error;

pub use error::{ErrorBody, HttpError};

use actix_web::{web, HttpResponse};
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::info;

use crate::core::PlayerId;
use crate::session::Session;

/// Shared application state.
pub struct AppState {
    session: Mutex<Session>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    pub fn session(&self) -> &Mutex<Session> {
        &self.session
    }
}

#[derive(Debug, Deserialize)]
pub struct GameQuery {
    pub player: Option<String>,
    pub action: Option<String>,
}

/// Parse the `player` query value. Missing, empty and `undefined` mean
/// no viewer.
pub fn parse_player(raw: Option<&str>) -> Result<Option<PlayerId>, HttpError> {
    match raw.map(str::trim) {
        None | Some("") | Some("undefined") => Ok(None),
        Some(text) => text
            .parse::<PlayerId>()
            .map(Some)
            .map_err(|e| HttpError::bad_request("INVALID_PLAYER", e)),
    }
}

async fn get_game(
    state: web::Data<AppState>,
    query: web::Query<GameQuery>,
) -> Result<HttpResponse, HttpError> {
    let player = parse_player(query.player.as_deref())?;
    info!(player = ?player.map(PlayerId::index), "GET /game");

    let snapshot = state.session.lock().view(player);
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn post_game(
    state: web::Data<AppState>,
    query: web::Query<GameQuery>,
) -> Result<HttpResponse, HttpError> {
    let player = parse_player(query.player.as_deref())?;
    let action = query
        .action
        .as_deref()
        .ok_or_else(|| HttpError::bad_request("MISSING_ACTION", "query parameter `action` is required"))?;
    info!(player = ?player.map(PlayerId::index), action, "POST /game");

    let snapshot = state.session.lock().submit(player, action)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

async fn test() -> HttpResponse {
    HttpResponse::Ok().json(true)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/game", web::get().to(get_game))
        .route("/game", web::post().to(post_game))
        .route("/test", web::get().to(test));
}
