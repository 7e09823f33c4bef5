//! Who sits in each player slot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ai::{Opponent, Strategy};

/// Configured occupant of a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeatKind {
    /// Actions arrive through `Session::submit`.
    Human,
    /// The session plays for this seat.
    Computer(Opponent),
}

impl fmt::Display for SeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatKind::Human => f.write_str("human"),
            SeatKind::Computer(opponent) => write!(f, "{opponent}"),
        }
    }
}

impl FromStr for SeatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("human") {
            return Ok(SeatKind::Human);
        }
        s.parse::<Opponent>()
            .map(SeatKind::Computer)
            .map_err(|_| format!("unknown seat {s:?} (expected human, random, heuristic or endgame)"))
    }
}

impl TryFrom<String> for SeatKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatKind> for String {
    fn from(kind: SeatKind) -> Self {
        kind.to_string()
    }
}

/// A live seat.
pub enum Seat {
    Human,
    Computer(Box<dyn Strategy>),
}

impl Seat {
    pub fn build(kind: SeatKind, seed: Option<u64>) -> Self {
        match kind {
            SeatKind::Human => Seat::Human,
            SeatKind::Computer(opponent) => Seat::Computer(opponent.build(seed)),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Seat::Human)
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Human => f.write_str("Human"),
            Seat::Computer(ai) => f.debug_tuple("Computer").field(&ai.name()).finish(),
        }
    }
}
