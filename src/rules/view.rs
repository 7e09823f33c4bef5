//! Wire snapshots and information hiding.
//!
//! A `Snapshot` is the plain-data form of a `GameState`, shaped exactly as
//! clients receive it (camelCase JSON). Stripping a snapshot for a viewer
//! applies these visibility rules:
//!
//! | Pile | Visible to |
//! |---|---|
//! | deck | nobody (face-down tokens, length kept) |
//! | own hand | owner |
//! | other hand | nobody (face-down tokens, length kept) |
//! | fields, discard, trump | everyone |
//! | `cardActions` | the active player only |
//! | `specialActions` | everyone |
//!
//! Stripping with no viewer returns everything unredacted.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::state::GameState;
use crate::core::{Card, DurakError, GameConfig, GameRng, PlayerId, PlayerMap, SpecialAction};

/// Placeholder text for a card the viewer may not see.
pub const FACE_DOWN: &str = "??";

/// A card slot that may be hidden from the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CardToken {
    Known(Card),
    FaceDown,
}

impl CardToken {
    /// The card, if visible.
    #[must_use]
    pub fn card(self) -> Option<Card> {
        match self {
            CardToken::Known(card) => Some(card),
            CardToken::FaceDown => None,
        }
    }
}

impl From<Card> for CardToken {
    fn from(card: Card) -> Self {
        CardToken::Known(card)
    }
}

impl fmt::Display for CardToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardToken::Known(card) => write!(f, "{card}"),
            CardToken::FaceDown => f.write_str(FACE_DOWN),
        }
    }
}

impl TryFrom<String> for CardToken {
    type Error = DurakError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == FACE_DOWN {
            Ok(CardToken::FaceDown)
        } else {
            value.parse().map(CardToken::Known)
        }
    }
}

impl From<CardToken> for String {
    fn from(token: CardToken) -> Self {
        token.to_string()
    }
}

/// Plain-data game state as sent over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub deck: Vec<CardToken>,
    pub discard: Vec<Card>,
    pub hands: [Vec<CardToken>; 2],
    pub fields: [Vec<Card>; 2],
    pub tsar: Card,
    pub attacker: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
    pub card_actions: Vec<Card>,
    pub special_actions: Vec<SpecialAction>,
    pub action_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
}

impl Snapshot {
    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacker.other()
    }

    /// Cards accounted for, trump included.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.hands.iter().map(Vec::len).sum::<usize>()
            + self.fields.iter().map(Vec::len).sum::<usize>()
            + 1
    }

    /// Whose turn it is, derived the same way as `GameState::active_player`.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        let defender = self.defender();
        if self.fields[self.attacker.index()].len() > self.fields[defender.index()].len() {
            defender
        } else {
            self.attacker
        }
    }

    /// Redact for `viewer`. `None` returns an unmodified copy.
    ///
    /// Applying the same strip twice changes nothing further.
    #[must_use]
    pub fn strip(&self, viewer: Option<PlayerId>) -> Snapshot {
        let mut out = self.clone();
        let Some(viewer) = viewer else {
            return out;
        };

        out.deck.fill(CardToken::FaceDown);
        out.hands[viewer.other().index()].fill(CardToken::FaceDown);
        if viewer != self.active_player() {
            out.card_actions.clear();
        }
        out
    }

    /// Whether any card is hidden.
    #[must_use]
    pub fn is_redacted(&self) -> bool {
        self.deck
            .iter()
            .chain(self.hands.iter().flatten())
            .any(|token| *token == CardToken::FaceDown)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn reveal(tokens: &[CardToken], what: &str) -> Result<Vec<Card>, DurakError> {
    tokens
        .iter()
        .map(|token| {
            token.card().ok_or_else(|| {
                DurakError::InvalidSnapshot(format!("{what} contains face-down cards"))
            })
        })
        .collect()
}

impl GameState {
    /// Full, unredacted snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let tokens = |cards: &[Card]| cards.iter().copied().map(CardToken::Known).collect::<Vec<_>>();
        Snapshot {
            deck: self.deck.iter().copied().map(CardToken::Known).collect(),
            discard: self.discard.iter().copied().collect(),
            hands: [
                tokens(self.hands[PlayerId::ZERO].as_slice()),
                tokens(self.hands[PlayerId::ONE].as_slice()),
            ],
            fields: [
                self.fields[PlayerId::ZERO].to_vec(),
                self.fields[PlayerId::ONE].to_vec(),
            ],
            tsar: self.tsar,
            attacker: self.attacker,
            winner: self.winner,
            card_actions: self.card_actions.to_vec(),
            special_actions: self.special_actions.to_vec(),
            action_count: self.action_count,
            last_action: self.last_action.clone(),
        }
    }

    /// Snapshot redacted for `viewer`; `None` means no redaction.
    #[must_use]
    pub fn strip(&self, viewer: Option<PlayerId>) -> Snapshot {
        self.snapshot().strip(viewer)
    }

    /// Rebuild a state from an unredacted snapshot.
    ///
    /// Rematches deal the same number of cards the snapshot holds when that
    /// is a valid deck size, otherwise a full deck.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, DurakError> {
        let sized = GameConfig::default().with_deck_size(snapshot.total_cards());
        let config = if sized.validate().is_ok() {
            sized
        } else {
            GameConfig::default()
        };
        Self::from_snapshot_with(snapshot, config)
    }

    /// Rebuild a state from an unredacted snapshot.
    ///
    /// Winner and legal actions are recomputed rather than trusted.
    pub fn from_snapshot_with(snapshot: &Snapshot, config: GameConfig) -> Result<Self, DurakError> {
        config.validate()?;

        let deck = reveal(&snapshot.deck, "deck")?;
        let hands = [reveal(&snapshot.hands[0], "hand 0")?, reveal(&snapshot.hands[1], "hand 1")?];

        let mut seen: FxHashSet<Card> = FxHashSet::default();
        seen.insert(snapshot.tsar);
        let everything = deck
            .iter()
            .chain(snapshot.discard.iter())
            .chain(hands.iter().flatten())
            .chain(snapshot.fields.iter().flatten());
        for card in everything {
            if !seen.insert(*card) {
                return Err(DurakError::InvalidSnapshot(format!("card {card} appears twice")));
            }
        }

        if snapshot.total_cards() > config.initial_deck_size {
            return Err(DurakError::InvalidSnapshot(format!(
                "{} cards do not fit a {}-card deck",
                snapshot.total_cards(),
                config.initial_deck_size
            )));
        }

        // Every attack is answered before the next one is played
        let attacks = snapshot.fields[snapshot.attacker.index()].len();
        let answers = snapshot.fields[snapshot.defender().index()].len();
        if answers > attacks || attacks > answers + 1 {
            return Err(DurakError::InvalidSnapshot(format!(
                "fields of {attacks} attacks and {answers} answers are out of step"
            )));
        }

        let [mut hand0, mut hand1] = hands;
        hand0.sort_unstable();
        hand1.sort_unstable();

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut state = GameState {
            config,
            deck: deck.into_iter().collect::<Vector<Card>>(),
            discard: snapshot.discard.iter().copied().collect(),
            hands: PlayerMap::from_pair(hand0, hand1),
            fields: PlayerMap::from_pair(
                snapshot.fields[0].iter().copied().collect::<SmallVec<_>>(),
                snapshot.fields[1].iter().copied().collect::<SmallVec<_>>(),
            ),
            tsar: snapshot.tsar,
            attacker: snapshot.attacker,
            winner: None,
            card_actions: SmallVec::new(),
            special_actions: SmallVec::new(),
            action_count: snapshot.action_count,
            last_action: snapshot.last_action.clone(),
            rng,
        };
        state.refresh_actions();
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    fn game(seed: u64) -> GameState {
        GameState::new(GameConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_face_down_token() {
        assert_eq!(CardToken::FaceDown.to_string(), "??");
        assert_eq!(CardToken::try_from("??".to_string()).unwrap(), CardToken::FaceDown);
        let json = serde_json::to_string(&vec![CardToken::FaceDown]).unwrap();
        assert_eq!(json, "[\"??\"]");
    }

    #[test]
    fn test_strip_none_is_unredacted() {
        let state = game(1);
        let full = state.strip(None);
        assert_eq!(full, state.snapshot());
        assert!(!full.is_redacted());
    }

    #[test]
    fn test_strip_hides_deck_and_opponent_hand() {
        let state = game(2);
        let view = state.strip(Some(PlayerId::ZERO));

        assert_eq!(view.deck.len(), state.deck_len());
        assert!(view.deck.iter().all(|t| *t == CardToken::FaceDown));
        assert_eq!(view.hands[1].len(), state.hand(PlayerId::ONE).len());
        assert!(view.hands[1].iter().all(|t| *t == CardToken::FaceDown));
        assert!(view.hands[0].iter().all(|t| t.card().is_some()));
        assert_eq!(view.tsar, state.tsar());
    }

    #[test]
    fn test_strip_clears_card_actions_for_inactive_viewer() {
        let mut state = game(3);
        let card = state.card_actions()[0];
        state.apply(Action::Play(card)).unwrap();

        // Defender to act; the attacker still sees the pending Pickup.
        let attacker_view = state.strip(Some(PlayerId::ZERO));
        assert!(attacker_view.card_actions.is_empty());
        assert_eq!(attacker_view.special_actions, vec![SpecialAction::Pickup]);

        let defender_view = state.strip(Some(PlayerId::ONE));
        assert_eq!(defender_view.card_actions, state.card_actions().to_vec());
    }

    #[test]
    fn test_strip_is_idempotent() {
        let state = game(4);
        for viewer in [None, Some(PlayerId::ZERO), Some(PlayerId::ONE)] {
            let once = state.strip(viewer);
            assert_eq!(once.strip(viewer), once);
        }
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let state = game(5);
        let json = state.strip(Some(PlayerId::ZERO)).to_json().unwrap();

        for field in [
            "\"deck\"",
            "\"discard\"",
            "\"hands\"",
            "\"fields\"",
            "\"tsar\"",
            "\"attacker\":0",
            "\"cardActions\"",
            "\"specialActions\"",
            "\"actionCount\":0",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
        assert!(!json.contains("\"winner\""));
        assert!(!json.contains("\"lastAction\""));

        let back = Snapshot::from_json(&json).unwrap();
        assert!(back.is_redacted());
    }

    #[test]
    fn test_from_snapshot_restores_position() {
        let mut state = game(6);
        let card = state.card_actions()[0];
        state.apply(Action::Play(card)).unwrap();

        let restored = GameState::from_snapshot(&state.snapshot()).unwrap();
        assert_eq!(restored.key(), state.key());
        assert_eq!(restored.card_actions(), state.card_actions());
        assert_eq!(restored.special_actions(), state.special_actions());
        assert_eq!(restored.action_count(), 1);
        assert_eq!(restored.last_action(), state.last_action());
    }

    #[test]
    fn test_from_snapshot_rejects_redacted() {
        let state = game(7);
        let err = GameState::from_snapshot(&state.strip(Some(PlayerId::ONE))).unwrap_err();
        assert!(matches!(err, DurakError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_from_snapshot_keeps_short_deck_for_rematch() {
        let state = GameState::new(GameConfig::default().with_deck_size(10).with_seed(4)).unwrap();
        let mut restored = GameState::from_snapshot(&state.snapshot()).unwrap();
        assert_eq!(restored.config().initial_deck_size, 10);

        while !restored.is_over() {
            let action = restored.legal_actions()[0];
            restored.apply(action).unwrap();
        }
        restored.apply(Action::REMATCH).unwrap();

        assert_eq!(restored.total_cards(), 10);
        assert!(!restored.is_over());
    }

    #[test]
    fn test_from_snapshot_odd_total_uses_full_deck() {
        let mut snapshot = game(9).snapshot();
        snapshot.discard.push(snapshot.deck.pop().and_then(CardToken::card).unwrap());
        snapshot.deck.pop();

        let restored = GameState::from_snapshot(&snapshot).unwrap();
        assert_eq!(snapshot.total_cards(), 35);
        assert_eq!(restored.config().initial_deck_size, 36);
    }

    #[test]
    fn test_from_snapshot_rejects_overfull_deck() {
        let snapshot = game(10).snapshot();
        let config = GameConfig::default().with_deck_size(20);
        let err = GameState::from_snapshot_with(&snapshot, config).unwrap_err();
        assert!(matches!(err, DurakError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_from_snapshot_rejects_unanswered_attacks() {
        let mut snapshot = game(11).snapshot();
        let attacker = snapshot.attacker.index();
        for _ in 0..2 {
            let card = snapshot.hands[attacker].pop().and_then(CardToken::card).unwrap();
            snapshot.fields[attacker].push(card);
        }

        let err = GameState::from_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, DurakError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_from_snapshot_rejects_duplicates() {
        let state = game(8);
        let mut snapshot = state.snapshot();
        snapshot.discard.push(snapshot.tsar);
        let err = GameState::from_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, DurakError::InvalidSnapshot(_)));
    }
}
