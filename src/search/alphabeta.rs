//! Alpha-beta search over Max/Min floors
//!
//! The computer moves on Max floors and the human on Min floors. Each node
//! receives the move that leads into it, plays it on the shared board for the
//! duration of the call and compares its running value against the value its
//! parent has reached so far (fail-soft alpha-beta with a single bound).
//!
//! # Features
//!
//! - Threat-ordered candidates from the board's generator, capped per node
//! - Kill mode: past a configured ply only forcing moves are expanded
//! - Transposition table for exact values, seeding bounds and leaf evaluations
//! - Cooperative wall-clock deadline checked after every child
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone};
//! use gomoku::config::SearchConfig;
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new(SearchConfig::fixed(2, 6).with_tt_bits(12));
//! let mut board = Board::new();
//! board.apply(7, 7, Stone::Human);
//!
//! let result = searcher.get_best_put_with_stats(&mut board);
//! assert!(board.is_empty(result.best_move));
//! assert_eq!(board.stone_count(), 1);
//! ```

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::board::{Board, GenMode, Pos, Stone};
use crate::config::{SearchConfig, SearchLimits};
use crate::eval::PatternScore;

use super::tt::{BoundKind, Probe, TTStats, TranspositionTable};

const INF: i64 = PatternScore::INF;

/// Whose turn it is at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Floor {
    /// Computer to move, maximising
    Max,
    /// Human to move, minimising
    Min,
}

impl Floor {
    #[inline]
    pub fn to_move(self) -> Stone {
        match self {
            Floor::Max => Stone::Computer,
            Floor::Min => Stone::Human,
        }
    }

    #[inline]
    pub fn opposite(self) -> Floor {
        match self {
            Floor::Max => Floor::Min,
            Floor::Min => Floor::Max,
        }
    }

    /// Worst value for the side to move
    #[inline]
    fn initial(self) -> i64 {
        match self {
            Floor::Max => -INF,
            Floor::Min => INF,
        }
    }

    /// Bound stored when the loop is cut short
    #[inline]
    fn bound_kind(self) -> BoundKind {
        match self {
            Floor::Max => BoundKind::Lower,
            Floor::Min => BoundKind::Upper,
        }
    }

    #[inline]
    fn improve(self, current: i64, child: i64) -> i64 {
        match self {
            Floor::Max => current.max(child),
            Floor::Min => current.min(child),
        }
    }

    /// The parent already has something better than this node can offer
    #[inline]
    fn refutes(self, value: i64, parent: i64) -> bool {
        match self {
            Floor::Max => value > parent,
            Floor::Min => value < parent,
        }
    }
}

/// Counters for one `get_best_put` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, root children included
    pub nodes: u64,
    /// Statically evaluated nodes
    pub leaves: u64,
    /// Nodes decided by a completed five
    pub wins: u64,
    /// Exact values returned from the table
    pub exact_hits: u64,
    /// Bounds used to seed a node's value
    pub bound_hits: u64,
    /// Leaf evaluations served from the table
    pub leaf_hits: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
    /// Deepest ply reached
    pub deepest: u8,
    /// The deadline fired before the search finished
    pub timed_out: bool,
}

impl SearchStats {
    /// All table hits
    pub fn table_hits(&self) -> u64 {
        self.exact_hits + self.bound_hits + self.leaf_hits
    }
}

/// Chosen move with diagnostics
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Pos,
    /// Backed-up value of `best_move`
    pub value: i64,
    /// Depth and width the search ran with
    pub limits: SearchLimits,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Alpha-beta searcher.
///
/// Owns the transposition table, which persists across moves of a game.
/// Call [`Searcher::clear`] before starting a new game.
pub struct Searcher {
    config: SearchConfig,
    tt: TranspositionTable,
    stats: SearchStats,
    limits: SearchLimits,
    deadline: Option<Instant>,
}

impl Searcher {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let tt = TranspositionTable::new(config.tt_bits);
        let limits = config.limits_for(0);
        Self {
            config,
            tt,
            stats: SearchStats::default(),
            limits,
            deadline: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick the computer's move.
    ///
    /// The board is borrowed mutably for the search and handed back
    /// unchanged.
    pub fn get_best_put(&mut self, board: &mut Board) -> Pos {
        self.get_best_put_with_stats(board).best_move
    }

    /// [`Searcher::get_best_put`] with the root value and counters.
    pub fn get_best_put_with_stats(&mut self, board: &mut Board) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();
        self.deadline = start.checked_add(self.config.max_time);
        self.limits = self.config.limits_for(board.stone_count());

        let mut value = -INF - 1;
        let mut best_move = Pos::center();
        let candidates = board.generator(Stone::Computer);
        for &mv in candidates.iter().take(self.limits.width) {
            let child = self.search(board, value, Floor::Min, mv, 1, GenMode::Normal);
            trace!("root candidate ({}, {}) -> {}", mv.row, mv.col, child);

            if child > value {
                value = child;
                best_move = mv;
            }
            if value >= INF || self.out_of_time() {
                break;
            }
        }

        let elapsed = start.elapsed();
        let stats = &self.stats;
        debug!(
            "search depth={} width={} nodes={} leaves={} wins={} hits={}/{}/{} (exact/bound/leaf) \
             cutoffs={} deepest={} elapsed={:?} timed_out={} value={}",
            self.limits.depth,
            self.limits.width,
            stats.nodes,
            stats.leaves,
            stats.wins,
            stats.exact_hits,
            stats.bound_hits,
            stats.leaf_hits,
            stats.cutoffs,
            stats.deepest,
            elapsed,
            stats.timed_out,
            value,
        );

        SearchResult {
            best_move,
            value,
            limits: self.limits,
            stats: self.stats.clone(),
            elapsed,
        }
    }

    /// Value of the node reached by playing `mv` into `floor`.
    ///
    /// `parent` is the running value of the node above; `depth` is the ply of
    /// this node below the root.
    pub fn search(
        &mut self,
        board: &mut Board,
        parent: i64,
        floor: Floor,
        mv: Pos,
        depth: u8,
        mode: GenMode,
    ) -> i64 {
        self.stats.nodes += 1;
        self.stats.deepest = self.stats.deepest.max(depth);

        let mover = floor.to_move().opponent();
        let mut board = match board.play(mv, mover) {
            Ok(guard) => guard,
            Err(err) => {
                warn!("skipping illegal candidate: {err}");
                // Worthless to the parent
                return floor.opposite().initial();
            }
        };

        if board.is_win(mv) {
            self.stats.wins += 1;
            return if mover == Stone::Computer { INF } else { -INF };
        }

        let code = board.code();
        #[allow(clippy::cast_possible_truncation)]
        let stamp = board.stone_count() as u16;

        if board.is_full() || depth >= self.limits.depth {
            return self.leaf_value(&board, code, stamp, mover);
        }

        let remaining = self.limits.depth - depth;
        let mut value = floor.initial();
        match self.tt.probe(code, stamp, remaining, floor.bound_kind()) {
            Probe::Exact(v) => {
                self.stats.exact_hits += 1;
                return v;
            }
            Probe::Seed(v) => {
                self.stats.bound_hits += 1;
                value = v;
            }
            Probe::Miss => {}
        }

        let mode = if depth >= self.config.killer_depth {
            GenMode::Kill
        } else {
            mode
        };
        let candidates = board.generate(floor.to_move(), mode);
        if candidates.is_empty() {
            // No forcing continuation
            return self.leaf_value(&board, code, stamp, mover);
        }

        let mut cut = false;
        for &child in candidates.iter().take(self.limits.width) {
            let v = self.search(&mut board, value, floor.opposite(), child, depth + 1, mode);
            value = floor.improve(value, v);
            if floor.refutes(value, parent) {
                self.stats.cutoffs += 1;
                cut = true;
                break;
            }
            if self.out_of_time() {
                cut = true;
                break;
            }
        }

        let kind = if cut { floor.bound_kind() } else { BoundKind::Exact };
        self.tt.store_bound(code, stamp, remaining, value, kind);
        value
    }

    fn leaf_value(&mut self, board: &Board, code: u64, stamp: u16, mover: Stone) -> i64 {
        self.stats.leaves += 1;
        if let Some(v) = self.tt.cached_eval(code, stamp) {
            self.stats.leaf_hits += 1;
            return v;
        }
        let v = board.evaluate(mover);
        self.tt.store_eval(code, stamp, v);
        v
    }

    /// Check the deadline, recording the first time it is missed.
    fn out_of_time(&mut self) -> bool {
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if expired && !self.stats.timed_out {
            warn!(
                "search deadline of {:?} reached after {} nodes",
                self.config.max_time, self.stats.nodes
            );
            self.stats.timed_out = true;
        }
        expired
    }

    /// Forget cached results, e.g. for a new game.
    pub fn clear(&mut self) {
        self.tt.clear();
    }

    /// Get statistics about the transposition table.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }
}
