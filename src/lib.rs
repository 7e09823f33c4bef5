//! # durak-engine
//!
//! Two-player Durak as a turn-based state machine, with computer
//! opponents and an optional HTTP transport.
//!
//! ## Design Principles
//!
//! 1. **Textual actions**: every action a client can take is a string
//!    (`"Th"`, `"Pickup"`, `"End Attack"`, `"Rematch"`) and the state's
//!    legal-action lists are the only gate for applying one.
//!
//! 2. **Derived turn order**: whose turn it is follows from the two field
//!    lengths and is never stored.
//!
//! 3. **Cheap copies**: deck and discard are persistent vectors (`im`), so
//!    the endgame search can clone positions freely.
//!
//! ## Modules
//!
//! - `core`: cards, players, actions, configuration, RNG, errors
//! - `rules`: `GameState`, legal actions, snapshots and information hiding
//! - `search`: exhaustive endgame search
//! - `ai`: random, heuristic and endgame strategies, AI-vs-AI arena
//! - `session`: a hosted game with human and computer seats
//! - `http`: actix-web routes (feature `server`)

pub mod ai;
pub mod core;
pub mod rules;
pub mod search;
pub mod session;

#[cfg(feature = "server")]
pub mod http;

// Re-export commonly used types
pub use crate::core::{
    Action, Card, DurakError, FirstAttacker, GameConfig, GameRng, PlayerId, PlayerMap, Rank,
    SpecialAction, Suit, FULL_DECK,
};

pub use crate::rules::{CardToken, GameState, Position, Snapshot};

pub use crate::search::{EndgameSearch, Outcome, SearchConfig, SearchStats, Solution};

pub use crate::ai::{AiError, EndgameAi, HeuristicAi, Opponent, RandomAi, Strategy};

pub use crate::session::{SeatKind, Session, SessionConfig, SessionError};
