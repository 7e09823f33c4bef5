//! Cards of the 36-card Durak deck.
//!
//! A card is a rank (6 through Ace) plus a suit. Cards are plain `Copy`
//! values; equality is rank and suit.
//!
//! ## Tokens
//!
//! On the wire and in action text a card is a two-character token:
//! rank char (`6 7 8 9 T J Q K A`) followed by suit char (`c d h s`).
//!
//! ```
//! use durak_engine::core::{Card, Rank, Suit};
//!
//! let card: Card = "Th".parse().unwrap();
//! assert_eq!(card, Card::new(Rank::Ten, Suit::Hearts));
//! assert_eq!(card.value(), 10);
//! assert_eq!(card.to_string(), "Th");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DurakError;

/// Card suit.
///
/// Declaration order is the display order for sorted hands:
/// clubs, diamonds, spades, hearts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Spades,
    Hearts,
}

impl Suit {
    /// All suits in display order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];

    /// Token character.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Spades => 's',
            Suit::Hearts => 'h',
        }
    }

    /// Parse a token character.
    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank, 6 low to Ace high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks, ascending.
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value, 6..=14.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    /// Token character.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Parse a token character.
    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A single playing card.
///
/// Ordering is suit-then-rank, which is the order hands are kept in.
/// Serializes as its two-character token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Rank value, 6..=14. Suit plays no part.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Whether this card, played in defence, beats `attack` under `trump`.
    ///
    /// Same suit needs a strictly higher rank. A trump beats any non-trump.
    /// A trump attack can only be beaten by a higher trump.
    #[must_use]
    pub fn beats(self, attack: Card, trump: Suit) -> bool {
        if self.suit == attack.suit {
            self.value() > attack.value()
        } else {
            self.suit == trump
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = DurakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(u), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(DurakError::InvalidCard(s.to_string()));
        };
        match (Rank::from_symbol(r), Suit::from_symbol(u)) {
            (Some(rank), Some(suit)) => Ok(Card::new(rank, suit)),
            _ => Err(DurakError::InvalidCard(s.to_string())),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = DurakError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

const fn build_full_deck() -> [Card; 36] {
    let mut deck = [Card::new(Rank::Six, Suit::Clubs); 36];
    let mut s = 0;
    while s < Suit::ALL.len() {
        let mut r = 0;
        while r < Rank::ALL.len() {
            deck[s * Rank::ALL.len() + r] = Card::new(Rank::ALL[r], Suit::ALL[s]);
            r += 1;
        }
        s += 1;
    }
    deck
}

/// Every card of the deck, suit by suit, ranks ascending.
pub const FULL_DECK: [Card; 36] = build_full_deck();
