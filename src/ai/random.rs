//! Uniform random strategy.

use tracing::trace;

use super::{playable_specials, AiError, Strategy};
use crate::core::{Action, GameRng};
use crate::rules::GameState;

/// Picks uniformly among the card actions and the non-Rematch special
/// actions.
#[derive(Clone, Debug)]
pub struct RandomAi {
    rng: GameRng,
}

impl RandomAi {
    pub const NAME: &'static str = "random";

    /// `None` seeds from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(GameRng::from_entropy, GameRng::new),
        }
    }
}

impl Default for RandomAi {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Strategy for RandomAi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn select_action(&mut self, state: &GameState) -> Result<Action, AiError> {
        let specials = playable_specials(state)?;
        let options: Vec<Action> = state
            .card_actions()
            .iter()
            .copied()
            .map(Action::Play)
            .chain(specials.into_iter().map(Action::Special))
            .collect();

        let action = *self.rng.choose(&options).ok_or(AiError::NoLegalAction)?;
        trace!(%action, options = options.len(), "random choice");
        Ok(action)
    }
}
