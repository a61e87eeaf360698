//! Candidate move generation
//!
//! Every eligible cell is put into exactly one threat bucket, judged by the
//! strongest pattern either side would make by playing there. Forced
//! situations (a five on the board's next move, an open four) collapse the
//! list to the moves that answer them; otherwise buckets are concatenated in
//! priority order.

use std::cmp::Reverse;

use super::{Board, Pos, Stone, TOTAL_CELLS};
use crate::eval::PatternScore;

/// Generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenMode {
    /// All eligible cells
    #[default]
    Normal,
    /// Only cells where some side makes at least an open three
    Kill,
}

/// Candidates with their ordering score, one vector per bucket
#[derive(Default)]
struct Buckets {
    fives: Vec<(Pos, i64)>,
    own_open_fours: Vec<(Pos, i64)>,
    opp_open_fours: Vec<(Pos, i64)>,
    own_blocked_fours: Vec<(Pos, i64)>,
    opp_blocked_fours: Vec<(Pos, i64)>,
    own_double_threes: Vec<(Pos, i64)>,
    opp_double_threes: Vec<(Pos, i64)>,
    own_threes: Vec<(Pos, i64)>,
    rest: Vec<(Pos, i64)>,
}

impl Buckets {
    fn classify(&mut self, pos: Pos, own: i64, opp: i64, mode: GenMode) {
        if own >= PatternScore::FIVE || opp >= PatternScore::FIVE {
            self.fives.push((pos, own.max(opp)));
        } else if own >= PatternScore::OPEN_FOUR {
            self.own_open_fours.push((pos, own));
        } else if opp >= PatternScore::OPEN_FOUR {
            self.opp_open_fours.push((pos, opp));
        } else if own >= PatternScore::BLOCKED_FOUR {
            self.own_blocked_fours.push((pos, own));
        } else if opp >= PatternScore::BLOCKED_FOUR {
            self.opp_blocked_fours.push((pos, opp));
        } else if own >= 2 * PatternScore::OPEN_THREE {
            self.own_double_threes.push((pos, own));
        } else if opp >= 2 * PatternScore::OPEN_THREE {
            self.opp_double_threes.push((pos, opp));
        } else if own >= PatternScore::OPEN_THREE {
            self.own_threes.push((pos, own));
        } else {
            let best = own.max(opp);
            if mode == GenMode::Normal || best >= PatternScore::OPEN_THREE {
                self.rest.push((pos, best));
            }
        }
    }

    fn resolve(self) -> Vec<Pos> {
        if !self.fives.is_empty() {
            return ordered(self.fives);
        }
        if !self.own_open_fours.is_empty() {
            return ordered(self.own_open_fours);
        }
        if !self.opp_open_fours.is_empty() {
            // Counter with a four of our own first, then block
            let mut out = ordered(self.own_blocked_fours);
            out.extend(ordered(self.opp_open_fours));
            return out;
        }

        let mut out = Vec::new();
        for bucket in [
            self.own_double_threes,
            self.own_blocked_fours,
            self.own_threes,
            self.opp_double_threes,
            self.opp_blocked_fours,
            self.rest,
        ] {
            out.extend(ordered(bucket));
        }
        out
    }
}

/// Stable descending sort by score; ties keep row-major scan order
fn ordered(mut bucket: Vec<(Pos, i64)>) -> Vec<Pos> {
    bucket.sort_by_key(|&(_, score)| Reverse(score));
    bucket.into_iter().map(|(pos, _)| pos).collect()
}

impl Board {
    /// Ordered candidate moves for `side`.
    #[must_use]
    pub fn generator(&self, side: Stone) -> Vec<Pos> {
        self.generate(side, GenMode::Normal)
    }

    /// Forcing candidates for `side`. May be empty.
    #[must_use]
    pub fn generator_kill(&self, side: Stone) -> Vec<Pos> {
        self.generate(side, GenMode::Kill)
    }

    pub fn generate(&self, side: Stone, mode: GenMode) -> Vec<Pos> {
        let opp = side.opponent();
        let mut buckets = Buckets::default();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            if !self.is_candidate(pos) {
                continue;
            }
            buckets.classify(pos, self.heuristic(pos, side), self.heuristic(pos, opp), mode);
        }
        buckets.resolve()
    }
}
