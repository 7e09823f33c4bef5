//! Durak game state and rules.
//!
//! ## Roles
//!
//! `attacker` is stored; the defender is always the other player. Whose
//! turn it is (`active_player`) is never stored: the defender is to act
//! while the attacker's field holds more cards than the defender's field,
//! otherwise the attacker is.
//!
//! ## Legal actions
//!
//! `card_actions` and `special_actions` are recomputed after every
//! mutation and are the only gate for `apply`. Nothing is changed when an
//! action is rejected.
//!
//! ## Cloning
//!
//! `Clone` is a full copy. Deck and discard are `im::Vector`s, so search
//! can branch thousands of times without copying them.

use im::Vector;
use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

use crate::core::{
    Action, Card, DurakError, FirstAttacker, GameConfig, GameRng, PlayerId, PlayerMap,
    SpecialAction, Suit,
};

/// Cards placed by one player during the current turn-cycle.
pub type Field = SmallVec<[Card; 8]>;

/// Full game state, including hidden information.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(super) config: GameConfig,

    /// Undrawn cards. The last element is drawn first.
    pub(super) deck: Vector<Card>,

    /// Cards out of play.
    pub(super) discard: Vector<Card>,

    /// Hands, kept sorted suit-then-rank.
    pub(super) hands: PlayerMap<Vec<Card>>,

    /// Attack cards on the attacker's side, answers at the same index on
    /// the defender's side.
    pub(super) fields: PlayerMap<Field>,

    /// Trump card. Only its suit matters; it is never dealt.
    pub(super) tsar: Card,

    pub(super) attacker: PlayerId,
    pub(super) winner: Option<PlayerId>,

    pub(super) card_actions: SmallVec<[Card; 8]>,
    pub(super) special_actions: SmallVec<[SpecialAction; 2]>,

    pub(super) action_count: u32,
    pub(super) last_action: Option<String>,

    pub(super) rng: GameRng,
}

impl GameState {
    /// Shuffle and deal a new game.
    ///
    /// ```
    /// use durak_engine::core::GameConfig;
    /// use durak_engine::rules::GameState;
    ///
    /// let state = GameState::new(GameConfig::default().with_seed(1)).unwrap();
    /// assert_eq!(state.deck_len(), 36 - 1 - 12);
    /// assert_eq!(state.card_actions().len(), 6);
    /// ```
    pub fn new(config: GameConfig) -> Result<Self, DurakError> {
        config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::deal(config, rng, 0)
    }

    /// Deal from a freshly shuffled deck, continuing `action_count`.
    fn deal(config: GameConfig, mut rng: GameRng, action_count: u32) -> Result<Self, DurakError> {
        let mut deck: Vector<Card> = rng.shuffled_deck(config.initial_deck_size).into_iter().collect();
        let tsar = deck.pop_back().ok_or_else(|| {
            DurakError::InvalidConfig("deck is empty, no trump can be drawn".to_string())
        })?;

        let attacker = match config.first_attacker {
            FirstAttacker::PlayerZero => PlayerId::ZERO,
            FirstAttacker::PlayerOne => PlayerId::ONE,
            FirstAttacker::Random => {
                if rng.gen_bool(0.5) {
                    PlayerId::ONE
                } else {
                    PlayerId::ZERO
                }
            }
        };

        let mut state = Self {
            config,
            deck,
            discard: Vector::new(),
            hands: PlayerMap::default(),
            fields: PlayerMap::default(),
            tsar,
            attacker,
            winner: None,
            card_actions: SmallVec::new(),
            special_actions: SmallVec::new(),
            action_count,
            last_action: None,
            rng,
        };
        state.replenish();
        state.refresh_actions();

        debug!(
            trump = %state.tsar,
            attacker = %state.attacker,
            deck = state.deck.len(),
            "dealt new game"
        );
        Ok(state)
    }

    // === Accessors ===

    /// Configuration used for dealing and rematches.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Undrawn cards, last element drawn first.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn discard(&self) -> &Vector<Card> {
        &self.discard
    }

    /// A player's hand, sorted suit-then-rank.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    /// A player's field for the current turn-cycle.
    #[must_use]
    pub fn field(&self, player: PlayerId) -> &[Card] {
        &self.fields[player]
    }

    /// The trump card.
    #[must_use]
    pub fn tsar(&self) -> Card {
        self.tsar
    }

    #[must_use]
    pub fn trump_suit(&self) -> Suit {
        self.tsar.suit
    }

    #[must_use]
    pub fn attacker(&self) -> PlayerId {
        self.attacker
    }

    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacker.other()
    }

    /// Whose turn it is.
    ///
    /// The defender owes an answer whenever the attacker's field is longer.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        let defender = self.defender();
        if self.fields[self.attacker].len() > self.fields[defender].len() {
            defender
        } else {
            self.attacker
        }
    }

    #[must_use]
    pub fn inactive_player(&self) -> PlayerId {
        self.active_player().other()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Cards the active player may play right now.
    #[must_use]
    pub fn card_actions(&self) -> &[Card] {
        &self.card_actions
    }

    /// Special actions available right now.
    #[must_use]
    pub fn special_actions(&self) -> &[SpecialAction] {
        &self.special_actions
    }

    /// Every legal action: card actions first, then special actions.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.card_actions
            .iter()
            .copied()
            .map(Action::Play)
            .chain(self.special_actions.iter().copied().map(Action::Special))
            .collect()
    }

    /// Whether `action` is currently legal.
    #[must_use]
    pub fn is_legal(&self, action: Action) -> bool {
        match action {
            Action::Play(card) => self.card_actions.contains(&card),
            Action::Special(special) => self.special_actions.contains(&special),
        }
    }

    /// Number of actions applied so far, including across rematches.
    #[must_use]
    pub fn action_count(&self) -> u32 {
        self.action_count
    }

    #[must_use]
    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    /// Cards still held or on the table.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.hands.values().map(Vec::len).sum::<usize>()
            + self.fields.values().map(|f| f.len()).sum::<usize>()
    }

    /// Every card accounted for, trump included.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.discard.len() + self.cards_in_play() + 1
    }

    // === Actions ===

    /// Apply a textual action identifier.
    ///
    /// Fails with `DurakError::IllegalAction` unless the text is one of the
    /// current card or special actions.
    pub fn apply_action(&mut self, text: &str) -> Result<(), DurakError> {
        let action: Action = text.parse()?;
        self.apply(action)
    }

    /// Apply a typed action.
    pub fn apply(&mut self, action: Action) -> Result<(), DurakError> {
        if !self.is_legal(action) {
            return Err(DurakError::illegal(action.to_string()));
        }

        let active = self.active_player();
        match action {
            Action::Play(card) => self.play_card(active, card),
            Action::Special(SpecialAction::Pickup) => self.pickup_field(active),
            Action::Special(SpecialAction::EndAttack) => self.end_attack(),
            Action::Special(SpecialAction::Rematch) => self.rematch()?,
        }

        self.action_count += 1;
        self.last_action = Some(action.to_string());
        self.refresh_actions();

        debug!(
            player = %active,
            action = %action,
            count = self.action_count,
            deck = self.deck.len(),
            "applied action"
        );
        Ok(())
    }

    fn play_card(&mut self, player: PlayerId, card: Card) {
        let hand = &mut self.hands[player];
        if let Some(pos) = hand.iter().position(|&c| c == card) {
            hand.remove(pos);
        }
        self.fields[player].push(card);
    }

    fn pickup_field(&mut self, player: PlayerId) {
        for field in self.fields.values_mut() {
            self.hands[player].extend(field.drain(..));
        }
        self.replenish();
    }

    fn end_attack(&mut self) {
        for field in self.fields.values_mut() {
            self.discard.extend(field.drain(..));
        }
        self.attacker = self.attacker.other();
        self.replenish();
    }

    /// Replace everything with a new deal, keeping the counter running.
    fn rematch(&mut self) -> Result<(), DurakError> {
        let fresh = Self::deal(self.config.clone(), self.rng.clone(), self.action_count)?;
        *self = fresh;
        Ok(())
    }

    /// Draw up to the hand size, one card at a time, attacker first.
    fn replenish(&mut self) {
        let target = self.config.hand_size;
        let order = [self.attacker, self.attacker.other()];
        for _ in 0..target {
            for &player in &order {
                if self.hands[player].len() < target {
                    if let Some(card) = self.deck.pop_back() {
                        self.hands[player].push(card);
                    }
                }
            }
        }
        for hand in self.hands.values_mut() {
            hand.sort_unstable();
        }
    }

    /// Recompute the winner and both legal-action lists.
    pub(super) fn refresh_actions(&mut self) {
        self.card_actions.clear();
        self.special_actions.clear();

        if self.deck.is_empty() {
            if let Some(player) = PlayerId::both().find(|&p| self.hands[p].is_empty()) {
                self.winner = Some(player);
                self.special_actions.push(SpecialAction::Rematch);
                return;
            }
        }

        let attacker = self.attacker;
        let defender = attacker.other();

        if self.active_player() == attacker {
            if self.fields[attacker].is_empty() {
                // Opening card of the cycle: anything goes
                self.card_actions.extend(self.hands[attacker].iter().copied());
                return;
            }
            self.special_actions.push(SpecialAction::EndAttack);
            let played: SmallVec<[u8; 12]> = self
                .fields
                .values()
                .flat_map(|field| field.iter().map(|c| c.value()))
                .collect();
            self.card_actions.extend(
                self.hands[attacker]
                    .iter()
                    .copied()
                    .filter(|card| played.contains(&card.value())),
            );
        } else {
            self.special_actions.push(SpecialAction::Pickup);
            if let Some(&attack) = self.fields[attacker].last() {
                let trump = self.tsar.suit;
                self.card_actions.extend(
                    self.hands[defender]
                        .iter()
                        .copied()
                        .filter(|card| card.beats(attack, trump)),
                );
            }
        }
    }

    // === Diagnostics ===

    /// Canonical position key used for cycle detection.
    ///
    /// Covers the attacker, both hands (sorted), both fields (in play
    /// order), and the deck length.
    #[must_use]
    pub fn key(&self) -> String {
        let mut key = String::with_capacity(64);
        key.push(char::from(b'0' + u8::from(self.attacker)));
        for hand in self.hands.values() {
            key.push('|');
            let mut sorted = hand.clone();
            sorted.sort_unstable();
            push_cards(&mut key, &sorted);
        }
        for field in self.fields.values() {
            key.push('|');
            push_cards(&mut key, field);
        }
        key.push('|');
        key.push_str(&self.deck.len().to_string());
        key
    }

    /// Human-readable dump of the whole state.
    #[must_use]
    pub fn print(&self) -> String {
        self.to_string()
    }
}

fn push_cards(out: &mut String, cards: &[Card]) {
    for card in cards {
        out.push(card.rank.symbol());
        out.push(card.suit.symbol());
    }
}

fn join_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> String {
    cards
        .into_iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trump: {} | Deck: {} | Discard: {} | Attacker: {} | Active: {}",
            self.tsar,
            self.deck.len(),
            self.discard.len(),
            self.attacker,
            self.active_player()
        )?;
        for (player, hand) in self.hands.iter() {
            writeln!(f, "{player} hand:  [{}]", join_cards(hand))?;
            writeln!(f, "{player} field: [{}]", join_cards(self.fields[player].iter()))?;
        }
        let specials: Vec<&str> = self.special_actions.iter().map(|s| s.as_str()).collect();
        writeln!(
            f,
            "Actions: [{}] [{}]",
            join_cards(self.card_actions.iter()),
            specials.join(", ")
        )?;
        match self.winner {
            Some(winner) => write!(f, "Winner: {winner}"),
            None => write!(f, "Turn {}", self.action_count),
        }
    }
}
