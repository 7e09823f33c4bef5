//! Shared helpers for building hand-made positions.

#![allow(dead_code)]

use durak_engine::core::{Card, PlayerId};
use durak_engine::rules::{CardToken, GameState, Snapshot};

pub const P0: PlayerId = PlayerId::ZERO;
pub const P1: PlayerId = PlayerId::ONE;

pub fn card(token: &str) -> Card {
    token.parse().unwrap()
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens.iter().map(|t| card(t)).collect()
}

fn known(tokens: &[&str]) -> Vec<CardToken> {
    tokens.iter().map(|t| CardToken::Known(card(t))).collect()
}

/// Builder for positions that are awkward to reach by dealing.
///
/// Defaults: trump card `6s`, player 0 attacking, everything else empty.
pub struct PositionBuilder {
    snapshot: Snapshot,
}

impl PositionBuilder {
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot {
                deck: Vec::new(),
                discard: Vec::new(),
                hands: [Vec::new(), Vec::new()],
                fields: [Vec::new(), Vec::new()],
                tsar: card("6s"),
                attacker: P0,
                winner: None,
                card_actions: Vec::new(),
                special_actions: Vec::new(),
                action_count: 0,
                last_action: None,
            },
        }
    }

    pub fn tsar(mut self, token: &str) -> Self {
        self.snapshot.tsar = card(token);
        self
    }

    pub fn attacker(mut self, player: PlayerId) -> Self {
        self.snapshot.attacker = player;
        self
    }

    /// Deck in draw order reversed: the last token is drawn first.
    pub fn deck(mut self, tokens: &[&str]) -> Self {
        self.snapshot.deck = known(tokens);
        self
    }

    pub fn discard(mut self, tokens: &[&str]) -> Self {
        self.snapshot.discard = cards(tokens);
        self
    }

    pub fn hand(mut self, player: PlayerId, tokens: &[&str]) -> Self {
        self.snapshot.hands[player.index()] = known(tokens);
        self
    }

    pub fn field(mut self, player: PlayerId, tokens: &[&str]) -> Self {
        self.snapshot.fields[player.index()] = cards(tokens);
        self
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn build(self) -> GameState {
        GameState::from_snapshot(&self.snapshot).unwrap()
    }
}
