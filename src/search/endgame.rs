//! Exhaustive endgame search.
//!
//! Minimax over a win/lose game with one extra outcome, `Repeat`, for
//! lines that run back into a position already on the current path.
//!
//! ## Resolution
//!
//! For the player to move, in priority order:
//! 1. any child is a win for them: win (the first such move is chosen)
//! 2. any child is `Repeat`: `Repeat`
//! 3. otherwise the opponent wins
//!
//! Siblings after the first winning child are not searched.
//!
//! ## Memo
//!
//! Each `solve` owns its path set and a cache of decided wins, both
//! dropped when it returns. A decided win never rests on a cycle cut, so
//! it is safe to reuse across transpositions; `Repeat` is path-dependent
//! and never cached.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::stats::SearchStats;
use crate::core::{DurakError, PlayerId};
use crate::rules::Position;

/// Game-theoretic value of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player wins with best play.
    Win(PlayerId),
    /// Best play for the side to move leads back into an earlier position.
    Repeat,
}

/// Chosen root move and its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Solution<M> {
    pub action: M,
    pub outcome: Outcome,
}

/// Combine child outcomes for the player to move.
#[must_use]
pub fn resolve(to_move: PlayerId, outcomes: &[Outcome]) -> Outcome {
    if outcomes.contains(&Outcome::Win(to_move)) {
        Outcome::Win(to_move)
    } else if outcomes.contains(&Outcome::Repeat) {
        Outcome::Repeat
    } else {
        Outcome::Win(to_move.other())
    }
}

/// Exhaustive endgame solver.
///
/// ```
/// use durak_engine::core::GameConfig;
/// use durak_engine::rules::GameState;
/// use durak_engine::search::EndgameSearch;
///
/// // A 4-card game: trump plus three dealt cards
/// let state = GameState::new(GameConfig::default().with_deck_size(4).with_seed(7)).unwrap();
/// let mut search = EndgameSearch::new();
/// let solution = search.solve(&state).unwrap().unwrap();
/// assert!(state.is_legal(solution.action));
/// ```
#[derive(Debug, Default)]
pub struct EndgameSearch {
    stats: SearchStats,
}

impl EndgameSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for the most recent solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick the best move for the player to move.
    ///
    /// Returns `Ok(None)` when the game is already decided or there is
    /// nothing to choose from.
    pub fn solve<P: Position>(&mut self, root: &P) -> Result<Option<Solution<P::Move>>, DurakError> {
        let start = Instant::now();
        self.stats.reset();

        if root.winner().is_some() {
            return Ok(None);
        }

        let to_move = root.to_move();
        let root_key = root.key();
        let mut solver = Solver {
            stats: &mut self.stats,
            wins: FxHashMap::default(),
        };
        let mut path = FxHashSet::default();
        path.insert(root_key);

        let mut fallback: Option<Solution<P::Move>> = None;
        let mut best: Option<Solution<P::Move>> = None;
        for mv in root.legal_moves() {
            let mut child = root.clone();
            child.play(mv)?;
            let outcome = solver.evaluate(&child, &mut path)?;

            if outcome == Outcome::Win(to_move) {
                best = Some(Solution { action: mv, outcome });
                break;
            }
            let candidate = Solution { action: mv, outcome };
            match (&fallback, outcome) {
                (None, _) => fallback = Some(candidate),
                (Some(prev), Outcome::Repeat) if prev.outcome != Outcome::Repeat => {
                    fallback = Some(candidate)
                }
                _ => {}
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        let solution = best.or(fallback);
        debug!(
            player = %to_move,
            outcome = ?solution.map(|s| s.outcome),
            stats = %self.stats,
            "endgame search finished"
        );
        Ok(solution)
    }

    /// Value of `root` with best play from both sides.
    pub fn evaluate<P: Position>(&mut self, root: &P) -> Result<Outcome, DurakError> {
        self.stats.reset();
        let mut solver = Solver {
            stats: &mut self.stats,
            wins: FxHashMap::default(),
        };
        solver.evaluate(root, &mut FxHashSet::default())
    }
}

/// Per-solve working state.
struct Solver<'a> {
    stats: &'a mut SearchStats,
    wins: FxHashMap<String, PlayerId>,
}

impl Solver<'_> {
    fn evaluate<P: Position>(
        &mut self,
        state: &P,
        path: &mut FxHashSet<String>,
    ) -> Result<Outcome, DurakError> {
        self.stats.visit(path.len());

        let key = state.key();
        if path.contains(&key) {
            self.stats.cycle_cuts += 1;
            return Ok(Outcome::Repeat);
        }
        if let Some(winner) = state.winner() {
            return Ok(Outcome::Win(winner));
        }
        if let Some(&winner) = self.wins.get(&key) {
            self.stats.cache_hits += 1;
            return Ok(Outcome::Win(winner));
        }

        let to_move = state.to_move();
        path.insert(key.clone());

        let mut outcomes = Vec::new();
        for mv in state.legal_moves() {
            let mut child = state.clone();
            if let Err(err) = child.play(mv) {
                path.remove(&key);
                return Err(err);
            }
            let outcome = match self.evaluate(&child, path) {
                Ok(outcome) => outcome,
                Err(err) => {
                    path.remove(&key);
                    return Err(err);
                }
            };
            outcomes.push(outcome);
            if outcome == Outcome::Win(to_move) {
                break;
            }
        }
        path.remove(&key);

        let result = resolve(to_move, &outcomes);
        if let Outcome::Win(winner) = result {
            self.wins.insert(key, winner);
        }
        Ok(result)
    }
}
