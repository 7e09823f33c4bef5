//! Rules-engine errors.

use thiserror::Error;

/// Errors raised by the rules engine.
///
/// None of these leave a `GameState` partially modified: validation always
/// happens before mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurakError {
    /// The action text is not in the current card or special action lists.
    #[error("illegal action: {action}")]
    IllegalAction { action: String },

    /// Text that is not a two-character card token.
    #[error("invalid card token: {0:?}")]
    InvalidCard(String),

    /// A configuration value that cannot produce a playable game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A snapshot that cannot be turned back into a game state.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl DurakError {
    pub fn illegal(action: impl Into<String>) -> Self {
        Self::IllegalAction {
            action: action.into(),
        }
    }
}
