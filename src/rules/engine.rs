//! The interface search needs from a game.
//!
//! `Position` is the seam between the rules and the endgame solver: copy,
//! enumerate legal moves, apply one, detect a winner, and produce a
//! canonical key. `GameState` is the production implementation; tests can
//! plug in small hand-made games.

use std::fmt::Debug;

use super::state::GameState;
use crate::core::{Action, DurakError, PlayerId};

/// A two-player, perfect-information game position.
///
/// ## Implementation Notes
///
/// - `legal_moves`: enumeration order is the search's tie-break order
/// - `play`: must reject illegal moves without mutating
/// - `key`: positions with equal keys must be interchangeable
pub trait Position: Clone {
    /// A move in this game.
    type Move: Copy + Debug + PartialEq;

    /// Player to move.
    fn to_move(&self) -> PlayerId;

    /// The winner, once the game is decided.
    fn winner(&self) -> Option<PlayerId>;

    /// Legal moves, in a stable order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a move.
    fn play(&mut self, mv: Self::Move) -> Result<(), DurakError>;

    /// Canonical key for repetition detection.
    fn key(&self) -> String;
}

impl Position for GameState {
    type Move = Action;

    fn to_move(&self) -> PlayerId {
        self.active_player()
    }

    fn winner(&self) -> Option<PlayerId> {
        GameState::winner(self)
    }

    /// Card actions, then special actions. Rematch is excluded: it only
    /// appears once the game is decided.
    fn legal_moves(&self) -> Vec<Action> {
        if self.is_over() {
            return Vec::new();
        }
        self.legal_actions()
    }

    fn play(&mut self, mv: Action) -> Result<(), DurakError> {
        self.apply(mv)
    }

    fn key(&self) -> String {
        GameState::key(self)
    }
}
