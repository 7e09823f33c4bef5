//! Counters for one endgame solve.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What one `solve` or `evaluate` call did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, cut and cached ones included.
    pub nodes: u64,

    /// Branches cut because the position was already on the path.
    pub cycle_cuts: u64,

    /// Positions answered from the decided-win cache.
    pub cache_hits: u64,

    /// Deepest path length reached.
    pub max_depth: u32,

    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Count a visited position `depth` moves below the root.
    pub fn visit(&mut self, depth: usize) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(u32::try_from(depth).unwrap_or(u32::MAX));
    }

    /// Share of visits answered without expanding (cycle cut or cache).
    #[must_use]
    pub fn shortcut_rate(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            (self.cycle_cuts + self.cache_hits) as f64 / self.nodes as f64
        }
    }

    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, depth {}, {} cycle cuts, {} cache hits, {}us",
            self.nodes, self.max_depth, self.cycle_cuts, self.cache_hits, self.time_us
        )
    }
}
