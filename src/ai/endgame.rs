//! Guarded endgame search with heuristic fallback.

use tracing::debug;

use super::heuristic::HeuristicAi;
use super::{AiError, Strategy};
use crate::core::Action;
use crate::rules::GameState;
use crate::search::{EndgameSearch, Outcome, SearchConfig, SearchStats};

/// Solves the position exactly when `guard` allows it, otherwise defers
/// to `fallback`.
#[derive(Debug, Default)]
pub struct EndgameAi {
    pub guard: SearchConfig,
    pub fallback: HeuristicAi,
    search: EndgameSearch,
    last_outcome: Option<Outcome>,
}

impl EndgameAi {
    pub const NAME: &'static str = "endgame";

    pub fn new(guard: SearchConfig) -> Self {
        Self {
            guard,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, fallback: HeuristicAi) -> Self {
        self.fallback = fallback;
        self
    }

    /// Value found by the last search, `None` if the fallback decided.
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn stats(&self) -> &SearchStats {
        self.search.stats()
    }
}

impl Strategy for EndgameAi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn select_action(&mut self, state: &GameState) -> Result<Action, AiError> {
        if state.is_over() {
            return Err(AiError::GameOver);
        }
        self.last_outcome = None;

        if !self.guard.allows(state) {
            debug!(
                deck = state.deck_len(),
                cards = state.cards_in_play(),
                "position too large to solve, using heuristic"
            );
            return self.fallback.select_action(state);
        }

        match self.search.solve(state)? {
            Some(solution) => {
                self.last_outcome = Some(solution.outcome);
                Ok(solution.action)
            }
            None => self.fallback.select_action(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, GameConfig, PlayerId};
    use crate::rules::{CardToken, Snapshot};

    fn card(token: &str) -> Card {
        token.parse().unwrap()
    }

    fn tokens(hand: &[&str]) -> Vec<CardToken> {
        hand.iter().map(|t| CardToken::Known(card(t))).collect()
    }

    /// Deck empty, trump spades, player 0 attacking.
    fn endgame(hand0: &[&str], hand1: &[&str]) -> GameState {
        let snapshot = Snapshot {
            deck: Vec::new(),
            discard: Vec::new(),
            hands: [tokens(hand0), tokens(hand1)],
            fields: [Vec::new(), Vec::new()],
            tsar: card("6s"),
            attacker: PlayerId::ZERO,
            winner: None,
            card_actions: Vec::new(),
            special_actions: Vec::new(),
            action_count: 0,
            last_action: None,
        };
        GameState::from_snapshot(&snapshot).unwrap()
    }

    #[test]
    fn test_finds_winning_line() {
        // Leading 6c lets 7c answer and empty P1's hand; Ah is unbeatable
        let state = endgame(&["6c", "Ah"], &["7c"]);
        let mut ai = EndgameAi::default();

        assert_eq!(ai.select_action(&state).unwrap(), Action::Play(card("Ah")));
        assert_eq!(ai.last_outcome(), Some(Outcome::Win(PlayerId::ZERO)));
        assert!(ai.stats().nodes > 0);
    }

    #[test]
    fn test_guard_falls_back_to_heuristic() {
        let state = endgame(&["6c", "Ah"], &["7c"]);
        let mut ai = EndgameAi::new(SearchConfig::default().with_max_remaining_cards(2));

        // Heuristic leads the cheapest card
        assert_eq!(ai.select_action(&state).unwrap(), Action::Play(card("6c")));
        assert_eq!(ai.last_outcome(), None);
    }

    #[test]
    fn test_finished_game_is_rejected() {
        let state = endgame(&[], &["7c"]);
        assert!(state.is_over());

        let mut ai = EndgameAi::default();
        assert_eq!(ai.select_action(&state), Err(AiError::GameOver));
        assert_eq!(ai.stats().nodes, 0);
    }

    #[test]
    fn test_opening_deal_uses_fallback() {
        let state = GameState::new(GameConfig::default().with_seed(2)).unwrap();
        let mut ai = EndgameAi::default();

        let action = ai.select_action(&state).unwrap();
        assert!(state.is_legal(action));
        assert_eq!(ai.last_outcome(), None);
    }
}
