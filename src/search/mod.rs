//! Exhaustive endgame search for Durak.
//!
//! ## Overview
//!
//! Once the deck is empty both hands are public, so a residual position
//! can be solved outright. The solver:
//!
//! - **Explores every legal line** through the `Position` trait
//! - **Detects repetition**: a position already on the current path
//!   evaluates to `Outcome::Repeat`
//! - **Caches decided wins** for the lifetime of a single solve
//! - **Stops early** on the first winning move for the player to move
//!
//! ## Usage
//!
//! ```rust
//! use durak_engine::core::GameConfig;
//! use durak_engine::rules::GameState;
//! use durak_engine::search::{EndgameSearch, SearchConfig};
//!
//! let state = GameState::new(GameConfig::default().with_deck_size(6).with_seed(3)).unwrap();
//!
//! if SearchConfig::default().allows(&state) {
//!     let mut search = EndgameSearch::new();
//!     if let Some(solution) = search.solve(&state).unwrap() {
//!         println!("{} -> {:?}", solution.action, solution.outcome);
//!     }
//! }
//! ```

pub mod config;
pub mod endgame;
pub mod stats;

pub use config::SearchConfig;
pub use endgame::{resolve, EndgameSearch, Outcome, Solution};
pub use stats::SearchStats;
