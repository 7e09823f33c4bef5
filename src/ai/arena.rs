//! AI-vs-AI games.
//!
//! Hosts complete games between two strategies without any session or
//! transport, and tallies results over a batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::{AiError, Strategy};
use crate::core::{GameConfig, PlayerId, PlayerMap};
use crate::rules::GameState;

/// Configuration for a batch of games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Games to play (default 10).
    pub games: usize,

    /// Actions after which a game is abandoned as unfinished (default 200).
    pub max_actions: u32,

    /// Deal settings. `game.seed` is ignored; see `seed`.
    pub game: GameConfig,

    /// Base seed. Game `i` is dealt with `seed + i`; `None` uses entropy.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_actions: 200,
            game: GameConfig::default(),
            seed: None,
        }
    }
}

impl ArenaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_max_actions(mut self, max: u32) -> Self {
        self.max_actions = max;
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed for game number `index`.
    pub fn game_seed(&self, index: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(index as u64))
    }
}

/// Win tally over a batch of games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResults {
    pub wins: PlayerMap<usize>,
    pub unfinished: usize,
}

impl BattleResults {
    pub fn record(&mut self, winner: Option<PlayerId>) {
        match winner {
            Some(player) => self.wins[player] += 1,
            None => self.unfinished += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.wins.values().sum::<usize>() + self.unfinished
    }
}

impl fmt::Display for BattleResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "player 0: {}, player 1: {}, unfinished: {}",
            self.wins[PlayerId::ZERO],
            self.wins[PlayerId::ONE],
            self.unfinished
        )
    }
}

/// Play `state` out, each player choosing with its own strategy.
///
/// Stops when the game is decided or after `max_actions` actions.
/// Returns the winner, or `None` if the cap was hit.
pub fn play_game(
    players: &mut PlayerMap<Box<dyn Strategy>>,
    state: &mut GameState,
    max_actions: u32,
) -> Result<Option<PlayerId>, AiError> {
    let mut taken = 0;
    while !state.is_over() && taken < max_actions {
        let active = state.active_player();
        let action = players[active].select_action(state)?;
        debug!(player = %active, ai = players[active].name(), %action, "arena action");
        state.apply(action)?;
        taken += 1;
    }
    Ok(state.winner())
}

/// Play a batch of games.
///
/// `make` builds a fresh strategy for each seat of each game, given the
/// seat and that game's seed.
pub fn battle<F>(config: &ArenaConfig, make: F) -> Result<BattleResults, AiError>
where
    F: Fn(PlayerId, Option<u64>) -> Box<dyn Strategy>,
{
    let mut results = BattleResults::default();
    for index in 0..config.games {
        let seed = config.game_seed(index);
        let mut game = config.game.clone();
        game.seed = seed;

        let mut state = GameState::new(game)?;
        let mut players = PlayerMap::new(|player| make(player, seed));
        let winner = play_game(&mut players, &mut state, config.max_actions)?;

        debug!(game = index, winner = ?winner, actions = state.action_count(), "arena game finished");
        results.record(winner);
    }
    info!(games = config.games, %results, "battle finished");
    Ok(results)
}
