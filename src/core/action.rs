//! Action representation.
//!
//! An action is either a card to play or one of the special actions.
//! Both have a textual identifier, which is what clients send:
//! - a card token such as `"Th"`,
//! - `"Pickup"`, `"End Attack"`, or `"Rematch"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::card::Card;
use super::error::DurakError;

/// Non-card actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialAction {
    /// Defender takes every field card into hand.
    Pickup,
    /// Attacker closes the turn-cycle; field cards are discarded.
    #[serde(rename = "End Attack")]
    EndAttack,
    /// Start a new game once there is a winner.
    Rematch,
}

impl SpecialAction {
    /// Text identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialAction::Pickup => "Pickup",
            SpecialAction::EndAttack => "End Attack",
            SpecialAction::Rematch => "Rematch",
        }
    }
}

impl fmt::Display for SpecialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete game action.
///
/// ```
/// use durak_engine::core::{Action, SpecialAction};
///
/// let play: Action = "Qh".parse().unwrap();
/// assert!(play.card().is_some());
///
/// let end: Action = "End Attack".parse().unwrap();
/// assert_eq!(end, Action::Special(SpecialAction::EndAttack));
/// assert_eq!(end.to_string(), "End Attack");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move a card from the active hand to the active field.
    Play(Card),
    /// A special action.
    Special(SpecialAction),
}

impl Action {
    pub const PICKUP: Action = Action::Special(SpecialAction::Pickup);
    pub const END_ATTACK: Action = Action::Special(SpecialAction::EndAttack);
    pub const REMATCH: Action = Action::Special(SpecialAction::Rematch);

    /// The card, for play actions.
    #[must_use]
    pub fn card(self) -> Option<Card> {
        match self {
            Action::Play(card) => Some(card),
            Action::Special(_) => None,
        }
    }
}

impl From<Card> for Action {
    fn from(card: Card) -> Self {
        Action::Play(card)
    }
}

impl From<SpecialAction> for Action {
    fn from(special: SpecialAction) -> Self {
        Action::Special(special)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Play(card) => write!(f, "{card}"),
            Action::Special(special) => write!(f, "{special}"),
        }
    }
}

impl FromStr for Action {
    type Err = DurakError;

    /// Parse action text. Anything unrecognised is an illegal action.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pickup" => Ok(Action::PICKUP),
            "End Attack" => Ok(Action::END_ATTACK),
            "Rematch" => Ok(Action::REMATCH),
            other => other
                .parse::<Card>()
                .map(Action::Play)
                .map_err(|_| DurakError::illegal(other)),
        }
    }
}
