//! Game configuration.
//!
//! `GameConfig` decides how a fresh game is dealt:
//! - `initial_deck_size`: cards kept from the shuffled deck (the trump is
//!   taken from these), even, at most 36
//! - `hand_size`: replenishment target between turn-cycles
//! - `first_attacker`: who opens the first turn-cycle
//! - `seed`: RNG seed, or `None` for system entropy

use serde::{Deserialize, Serialize};

use super::error::DurakError;
use super::player::PlayerId;
use super::card::FULL_DECK;

/// Who attacks first in a new game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstAttacker {
    /// Always player 0.
    #[default]
    PlayerZero,
    /// Always player 1.
    PlayerOne,
    /// Chosen by the game RNG.
    Random,
}

impl FirstAttacker {
    /// A fixed first attacker.
    #[must_use]
    pub fn player(player: PlayerId) -> Self {
        if player == PlayerId::ZERO {
            FirstAttacker::PlayerZero
        } else {
            FirstAttacker::PlayerOne
        }
    }
}

/// Configuration for dealing a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Deck size before the trump is drawn (default 36).
    pub initial_deck_size: usize,

    /// Hands are replenished up to this many cards (default 6).
    pub hand_size: usize,

    /// Starting attacker policy (default player 0).
    pub first_attacker: FirstAttacker,

    /// RNG seed. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_deck_size: FULL_DECK.len(),
            hand_size: 6,
            first_attacker: FirstAttacker::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Use a shortened deck.
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.initial_deck_size = size;
        self
    }

    /// Use a different hand size.
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the starting attacker policy.
    pub fn with_first_attacker(mut self, first: FirstAttacker) -> Self {
        self.first_attacker = first;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration can produce a game.
    ///
    /// The deck size must be even: with the trump removed an odd number of
    /// cards is in play, and discards come in pairs, so the two hands can
    /// never empty together.
    pub fn validate(&self) -> Result<(), DurakError> {
        if self.initial_deck_size < 2 || self.initial_deck_size > FULL_DECK.len() {
            return Err(DurakError::InvalidConfig(format!(
                "initial_deck_size must be between 2 and {}, got {}",
                FULL_DECK.len(),
                self.initial_deck_size
            )));
        }
        if self.initial_deck_size % 2 != 0 {
            return Err(DurakError::InvalidConfig(format!(
                "initial_deck_size must be even, got {}",
                self.initial_deck_size
            )));
        }
        if self.hand_size == 0 {
            return Err(DurakError::InvalidConfig("hand_size must be positive".to_string()));
        }
        Ok(())
    }
}
