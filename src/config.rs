//! Search configuration
//!
//! Defaults match the engine's tuned behaviour: a 60 second budget, kill
//! mode from ply 5, a 10% closeness bonus and a 2^21-cell table. Depth and
//! branching width follow a schedule keyed on the number of stones unless a
//! fixed pair is set.

use std::time::Duration;

use crate::board::board::DEFAULT_CLOSENESS;

/// Depth and branching width for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum ply below the root move
    pub depth: u8,
    /// Candidates expanded per node
    pub width: usize,
}

impl SearchLimits {
    #[inline]
    pub const fn new(depth: u8, width: usize) -> Self {
        Self { depth, width }
    }
}

/// `(stone count below, limits)`; the last entry covers everything else
const SCHEDULE: [(usize, SearchLimits); 5] = [
    (4, SearchLimits::new(3, 20)),
    (6, SearchLimits::new(4, 18)),
    (8, SearchLimits::new(5, 16)),
    (10, SearchLimits::new(6, 15)),
    (12, SearchLimits::new(7, 15)),
];
const LATE_GAME: SearchLimits = SearchLimits::new(8, 14);

/// Engine settings
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget per move
    pub max_time: Duration,
    /// Depth from which only forcing moves are generated
    pub killer_depth: u8,
    /// Bonus per adjacent own stone in the cell heuristic
    pub closeness: f64,
    /// The transposition table has `2^tt_bits` cells
    pub tt_bits: u32,
    /// Overrides the stone-count schedule
    pub fixed: Option<SearchLimits>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_time: Duration::from_secs(60),
            killer_depth: 5,
            closeness: DEFAULT_CLOSENESS,
            tt_bits: 21,
            fixed: None,
        }
    }
}

impl SearchConfig {
    /// Default settings with a fixed depth and width.
    ///
    /// # Example
    ///
    /// ```
    /// use gomoku::config::{SearchConfig, SearchLimits};
    ///
    /// let config = SearchConfig::fixed(2, 8);
    /// assert_eq!(config.limits_for(30), SearchLimits::new(2, 8));
    /// ```
    #[must_use]
    pub fn fixed(depth: u8, width: usize) -> Self {
        Self::default().with_limits(depth, width)
    }

    #[must_use]
    pub fn with_limits(mut self, depth: u8, width: usize) -> Self {
        self.fixed = Some(SearchLimits::new(depth, width));
        self
    }

    #[must_use]
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = max_time;
        self
    }

    #[must_use]
    pub fn with_killer_depth(mut self, killer_depth: u8) -> Self {
        self.killer_depth = killer_depth;
        self
    }

    #[must_use]
    pub fn with_closeness(mut self, closeness: f64) -> Self {
        self.closeness = closeness;
        self
    }

    #[must_use]
    pub fn with_tt_bits(mut self, tt_bits: u32) -> Self {
        self.tt_bits = tt_bits;
        self
    }

    /// Depth and width for a position holding `stone_count` stones
    #[must_use]
    pub fn limits_for(&self, stone_count: usize) -> SearchLimits {
        if let Some(fixed) = self.fixed {
            return fixed;
        }
        SCHEDULE
            .iter()
            .find(|(below, _)| stone_count < *below)
            .map_or(LATE_GAME, |&(_, limits)| limits)
    }
}
