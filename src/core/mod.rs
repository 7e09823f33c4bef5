//! Core domain types: cards, players, actions, RNG, configuration, errors.
//!
//! Everything here is independent of the rules. The rules engine in
//! `crate::rules` builds on these.

pub mod card;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use card::{Card, Rank, Suit, FULL_DECK};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{FirstAttacker, GameConfig};
pub use action::{Action, SpecialAction};
pub use error::DurakError;
