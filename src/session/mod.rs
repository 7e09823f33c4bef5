//! A hosted game: one `GameState`, two seats, and meta-actions.
//!
//! ## Flow
//!
//! `submit` applies a human action, then lets computer seats act until a
//! human is to move or the game is decided. The reply is the state as the
//! submitting player may see it.
//!
//! ## Meta-actions
//!
//! Text starting with `Meta` is handled by the session rather than the
//! rules: `Meta Rematch` and `Meta New Game` both deal a fresh game. Any
//! other `Meta ...` text is rejected.

mod seat;

pub use seat::{Seat, SeatKind};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::{AiError, Opponent};
use crate::core::{DurakError, GameConfig, GameRng, PlayerId, PlayerMap};
use crate::rules::{GameState, Snapshot};

pub const META_PREFIX: &str = "Meta";
pub const META_REMATCH: &str = "Meta Rematch";
pub const META_NEW_GAME: &str = "Meta New Game";

/// Errors from hosting a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Rules(#[from] DurakError),

    #[error("computer player failed: {0}")]
    Ai(#[from] AiError),

    #[error("unknown meta action: {0:?}")]
    UnknownMetaAction(String),

    #[error("{player} submitted an action but it is {active}'s turn")]
    NotYourTurn { player: PlayerId, active: PlayerId },
}

/// Session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Deal settings. `game.seed` seeds the whole session: every new game
    /// draws its own seed from it.
    pub game: GameConfig,

    /// Occupants of seat 0 and seat 1 (default: heuristic computer, human).
    pub seats: PlayerMap<SeatKind>,

    /// Computer actions allowed per submission before auto-play gives up
    /// (default 1000).
    pub max_auto_actions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seats: PlayerMap::from_pair(SeatKind::Computer(Opponent::Heuristic), SeatKind::Human),
            max_auto_actions: 1000,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub fn with_seat(mut self, player: PlayerId, kind: SeatKind) -> Self {
        self.seats[player] = kind;
        self
    }

    pub fn with_max_auto_actions(mut self, max: u32) -> Self {
        self.max_auto_actions = max;
        self
    }
}

/// A single hosted game.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    seeds: GameRng,
    seats: PlayerMap<Seat>,
    state: GameState,
    games_started: u32,
}

impl Session {
    /// Deal the first game and let computer seats open it.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.game.validate()?;

        let mut seeds = config
            .game
            .seed
            .map_or_else(GameRng::from_entropy, GameRng::new);
        let seat_seeds = [seeds.next_seed(), seeds.next_seed()];
        let seats = PlayerMap::new(|player| {
            Seat::build(config.seats[player], Some(seat_seeds[player.index()]))
        });
        let state = GameState::new(Self::game_config(&config, &mut seeds))?;

        let mut session = Self {
            config,
            seeds,
            seats,
            state,
            games_started: 1,
        };
        info!(seats = ?session.seats, trump = %session.state.tsar(), "session started");
        session.run_computers()?;
        Ok(session)
    }

    fn game_config(config: &SessionConfig, seeds: &mut GameRng) -> GameConfig {
        let mut game = config.game.clone();
        game.seed = Some(seeds.next_seed());
        game
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The live game, unredacted.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seat(&self, player: PlayerId) -> &Seat {
        &self.seats[player]
    }

    /// Games dealt so far, counting the first.
    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// The state as `viewer` may see it; `None` sees everything.
    pub fn view(&self, viewer: Option<PlayerId>) -> Snapshot {
        self.state.strip(viewer)
    }

    /// Apply `action` for `player`, then run computer seats.
    ///
    /// `player` may be `None` for an unchecked submission. Once the game is
    /// decided either player may submit (typically `Rematch`).
    pub fn submit(&mut self, player: Option<PlayerId>, action: &str) -> Result<Snapshot, SessionError> {
        info!(player = ?player.map(PlayerId::index), action, "action submitted");

        if action.starts_with(META_PREFIX) {
            self.apply_meta(action)?;
            return Ok(self.view(player));
        }

        if let Some(player) = player {
            let active = self.state.active_player();
            if !self.state.is_over() && player != active {
                return Err(SessionError::NotYourTurn { player, active });
            }
        }

        self.state.apply_action(action)?;
        self.run_computers()?;
        Ok(self.view(player))
    }

    fn apply_meta(&mut self, action: &str) -> Result<(), SessionError> {
        match action {
            META_REMATCH | META_NEW_GAME => self.new_game(),
            other => {
                warn!(action = other, "rejected meta action");
                Err(SessionError::UnknownMetaAction(other.to_string()))
            }
        }
    }

    /// Throw away the current game and deal a new one.
    pub fn new_game(&mut self) -> Result<(), SessionError> {
        self.state = GameState::new(Self::game_config(&self.config, &mut self.seeds))?;
        self.games_started += 1;
        info!(game = self.games_started, trump = %self.state.tsar(), "new game dealt");
        self.run_computers()?;
        Ok(())
    }

    /// Let computer seats act until a human is to move or the game ends.
    ///
    /// Returns the number of computer actions applied.
    fn run_computers(&mut self) -> Result<u32, SessionError> {
        let mut applied = 0;
        while !self.state.is_over() {
            let active = self.state.active_player();
            let Seat::Computer(ai) = &mut self.seats[active] else {
                debug!(player = %active, "awaiting human action");
                break;
            };
            if applied >= self.config.max_auto_actions {
                warn!(applied, "computer auto-play cap reached");
                break;
            }

            let action = ai.select_action(&self.state)?;
            debug!(player = %active, ai = ai.name(), %action, "computer action");
            self.state.apply(action)?;
            applied += 1;
        }
        if let Some(winner) = self.state.winner() {
            info!(%winner, actions = self.state.action_count(), "game decided");
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_vs(opponent: Opponent) -> SessionConfig {
        SessionConfig::new()
            .with_game(GameConfig::default().with_seed(17))
            .with_seat(PlayerId::ZERO, SeatKind::Human)
            .with_seat(PlayerId::ONE, SeatKind::Computer(opponent))
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.seats[PlayerId::ZERO], SeatKind::Computer(Opponent::Heuristic));
        assert_eq!(config.seats[PlayerId::ONE], SeatKind::Human);
        assert_eq!(config.max_auto_actions, 1000);
    }

    #[test]
    fn test_computer_opens_when_attacking() {
        // Player 0 attacks first by default and is a computer here
        let session = Session::new(SessionConfig::new().with_game(GameConfig::default().with_seed(4))).unwrap();

        assert!(session.state().action_count() >= 1);
        assert_eq!(session.state().active_player(), PlayerId::ONE);
    }

    #[test]
    fn test_human_turn_is_waited_for() {
        let session = Session::new(human_vs(Opponent::Random)).unwrap();
        assert_eq!(session.state().action_count(), 0);
        assert_eq!(session.state().active_player(), PlayerId::ZERO);
    }

    #[test]
    fn test_submit_runs_computer_reply() {
        let mut session = Session::new(human_vs(Opponent::Heuristic)).unwrap();
        let card = session.state().card_actions()[0];

        let view = session.submit(Some(PlayerId::ZERO), &card.to_string()).unwrap();

        assert!(view.action_count >= 2);
        assert!(session.state().is_over() || session.state().active_player() == PlayerId::ZERO);
    }

    #[test]
    fn test_not_your_turn() {
        let mut session = Session::new(human_vs(Opponent::Heuristic)).unwrap();
        let card = session.state().card_actions()[0];

        let err = session.submit(Some(PlayerId::ONE), &card.to_string()).unwrap_err();
        assert_eq!(
            err,
            SessionError::NotYourTurn {
                player: PlayerId::ONE,
                active: PlayerId::ZERO
            }
        );
        assert_eq!(session.state().action_count(), 0);
    }

    #[test]
    fn test_illegal_action_is_rejected() {
        let mut session = Session::new(human_vs(Opponent::Heuristic)).unwrap();
        let err = session.submit(Some(PlayerId::ZERO), "Pickup").unwrap_err();
        assert!(matches!(err, SessionError::Rules(DurakError::IllegalAction { .. })));
    }

    #[test]
    fn test_meta_actions() {
        let mut session = Session::new(human_vs(Opponent::Heuristic)).unwrap();

        session.submit(Some(PlayerId::ZERO), META_NEW_GAME).unwrap();
        session.submit(None, META_REMATCH).unwrap();
        assert_eq!(session.games_started(), 3);
        assert_eq!(session.state().action_count(), 0);

        let err = session.submit(None, "Meta Undo").unwrap_err();
        assert_eq!(err, SessionError::UnknownMetaAction("Meta Undo".to_string()));
    }

    #[test]
    fn test_view_is_stripped() {
        let session = Session::new(human_vs(Opponent::Heuristic)).unwrap();
        let view = session.view(Some(PlayerId::ZERO));

        assert!(view.is_redacted());
        assert!(!session.view(None).is_redacted());
    }

    #[test]
    fn test_computers_play_to_the_end() {
        let config = SessionConfig::new()
            .with_game(GameConfig::default().with_seed(9))
            .with_seat(PlayerId::ZERO, SeatKind::Computer(Opponent::Heuristic))
            .with_seat(PlayerId::ONE, SeatKind::Computer(Opponent::Random));
        let session = Session::new(config).unwrap();

        assert!(session.state().is_over());
        assert!(session.state().action_count() < 1000);
    }

    #[test]
    fn test_auto_play_cap() {
        let config = SessionConfig::new()
            .with_game(GameConfig::default().with_seed(9))
            .with_seat(PlayerId::ZERO, SeatKind::Computer(Opponent::Random))
            .with_seat(PlayerId::ONE, SeatKind::Computer(Opponent::Random))
            .with_max_auto_actions(3);
        let session = Session::new(config).unwrap();

        assert_eq!(session.state().action_count(), 3);
    }
}
