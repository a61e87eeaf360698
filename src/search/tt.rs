//! Transposition table for caching search results
//!
//! A direct-mapped table of `2^bits` cells addressed by the low bits of the
//! board signature. A cell remembers the stone count it was written at; that
//! stamp is the only check against two positions sharing a slot. Each cell
//! holds a search result (exact value or fail-soft bound) and, independently,
//! a cached static evaluation for leaf nodes.
//!
//! # Example
//!
//! ```
//! use gomoku::search::tt::{BoundKind, Probe, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(10);
//! let code = 0x1234_5678_9ABC_DEF0;
//!
//! tt.store_bound(code, 6, 3, 250, BoundKind::Exact);
//! assert_eq!(tt.probe(code, 6, 3, BoundKind::Lower), Probe::Exact(250));
//! // A deeper remaining budget cannot use the shallower result
//! assert_eq!(tt.probe(code, 6, 4, BoundKind::Lower), Probe::Miss);
//! ```

/// Kind of value a cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundKind {
    /// No search result stored
    #[default]
    None,
    /// The subtree was searched completely
    Exact,
    /// True value >= stored value (cutoff at a Max floor)
    Lower,
    /// True value <= stored value (cutoff at a Min floor)
    Upper,
}

/// One table slot
#[derive(Debug, Clone, Copy, Default)]
pub struct TableCell {
    valid: bool,
    /// Stone count at write time
    stamp: u16,
    kind: BoundKind,
    /// Remaining depth budget the value was computed with
    depth: u8,
    value: i64,
    eval_valid: bool,
    eval: i64,
}

impl TableCell {
    #[inline]
    fn matches(&self, stamp: u16) -> bool {
        self.valid && self.stamp == stamp
    }

    /// Fresh cell for `stamp`, dropping everything stored for another position
    #[inline]
    fn claim(&mut self, stamp: u16) {
        if !self.matches(stamp) {
            *self = TableCell {
                valid: true,
                stamp,
                ..TableCell::default()
            };
        }
    }
}

/// Result of a table lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Exact value deep enough to return directly
    Exact(i64),
    /// Bound of the requested kind, usable as the starting value
    Seed(i64),
    Miss,
}

/// Direct-mapped transposition table.
pub struct TranspositionTable {
    cells: Vec<TableCell>,
    mask: u64,
}

impl TranspositionTable {
    /// Create a table with `2^bits` cells.
    #[must_use]
    pub fn new(bits: u32) -> Self {
        let size = 1usize << bits;
        Self {
            cells: vec![TableCell::default(); size],
            mask: size as u64 - 1,
        }
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn index(&self, code: u64) -> usize {
        (code & self.mask) as usize
    }

    /// Look up the search result for a node with `remaining` plies below it.
    ///
    /// An exact value needs a matching stamp. A bound of `seed_kind` only
    /// needs a valid cell, which is how the search has always seeded its
    /// running value.
    #[must_use]
    pub fn probe(&self, code: u64, stamp: u16, remaining: u8, seed_kind: BoundKind) -> Probe {
        let cell = &self.cells[self.index(code)];
        if !cell.valid || cell.kind == BoundKind::None || cell.depth < remaining {
            return Probe::Miss;
        }
        if cell.kind == BoundKind::Exact && cell.stamp == stamp {
            return Probe::Exact(cell.value);
        }
        if cell.kind == seed_kind {
            return Probe::Seed(cell.value);
        }
        Probe::Miss
    }

    /// Cached static evaluation, if one was stored at this stone count
    #[must_use]
    pub fn cached_eval(&self, code: u64, stamp: u16) -> Option<i64> {
        let cell = &self.cells[self.index(code)];
        (cell.matches(stamp) && cell.eval_valid).then_some(cell.eval)
    }

    pub fn store_eval(&mut self, code: u64, stamp: u16, eval: i64) {
        let idx = self.index(code);
        let cell = &mut self.cells[idx];
        cell.claim(stamp);
        cell.eval_valid = true;
        cell.eval = eval;
    }

    /// Record a search result.
    ///
    /// A cell from another stone count, or one without a result, is always
    /// taken. Otherwise only a result searched at least as deep replaces the
    /// stored one: an exact value unconditionally, a bound only when it is
    /// deeper or, at equal depth, tighter.
    pub fn store_bound(&mut self, code: u64, stamp: u16, depth: u8, value: i64, kind: BoundKind) {
        let idx = self.index(code);
        let cell = &mut self.cells[idx];

        let replace = if !cell.matches(stamp) || cell.kind == BoundKind::None {
            true
        } else if depth < cell.depth {
            false
        } else {
            match kind {
                BoundKind::Exact => true,
                BoundKind::Lower => depth > cell.depth || value > cell.value,
                BoundKind::Upper => depth > cell.depth || value < cell.value,
                BoundKind::None => false,
            }
        };

        if replace {
            cell.claim(stamp);
            cell.kind = kind;
            cell.depth = depth;
            cell.value = value;
        }
    }

    /// Forget everything, e.g. for a new game.
    pub fn clear(&mut self) {
        self.cells.fill(TableCell::default());
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.cells.iter().filter(|c| c.valid).count();
        let size = self.cells.len();
        TTStats {
            size,
            used,
            usage_percent: (used * 100 / size) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of cells
    pub size: usize,
    /// Cells written since the last clear
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: u64 = 0x1234_5678_9ABC_DEF0;

    #[test]
    fn test_tt_store_probe_exact() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 3, 100, BoundKind::Exact);

        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Lower), Probe::Exact(100));
        assert_eq!(tt.probe(CODE, 4, 1, BoundKind::Upper), Probe::Exact(100));
    }

    #[test]
    fn test_tt_depth_requirement() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 2, 100, BoundKind::Exact);
        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Lower), Probe::Miss);
    }

    #[test]
    fn test_tt_exact_needs_matching_stamp() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 3, 100, BoundKind::Exact);
        assert_eq!(tt.probe(CODE, 5, 3, BoundKind::Lower), Probe::Miss);
    }

    #[test]
    fn test_tt_seed_by_floor_kind() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 3, 200, BoundKind::Lower);

        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Lower), Probe::Seed(200));
        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Upper), Probe::Miss);
        // Seeding does not look at the stamp
        assert_eq!(tt.probe(CODE, 9, 2, BoundKind::Lower), Probe::Seed(200));
    }

    #[test]
    fn test_tt_shallower_result_does_not_replace() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 5, 100, BoundKind::Exact);
        tt.store_bound(CODE, 4, 2, -50, BoundKind::Exact);
        assert_eq!(tt.probe(CODE, 4, 5, BoundKind::Lower), Probe::Exact(100));
    }

    #[test]
    fn test_tt_bound_replacement_prefers_tighter() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 3, 100, BoundKind::Lower);

        // Looser lower bound at equal depth is ignored
        tt.store_bound(CODE, 4, 3, 50, BoundKind::Lower);
        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Lower), Probe::Seed(100));

        // Tighter one wins
        tt.store_bound(CODE, 4, 3, 150, BoundKind::Lower);
        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Lower), Probe::Seed(150));

        // Deeper always wins
        tt.store_bound(CODE, 4, 4, 10, BoundKind::Lower);
        assert_eq!(tt.probe(CODE, 4, 4, BoundKind::Lower), Probe::Seed(10));

        // Exact at the same depth replaces a bound
        tt.store_bound(CODE, 4, 4, 42, BoundKind::Exact);
        assert_eq!(tt.probe(CODE, 4, 4, BoundKind::Upper), Probe::Exact(42));
    }

    #[test]
    fn test_tt_upper_bound_tighter_is_smaller() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 3, 100, BoundKind::Upper);
        tt.store_bound(CODE, 4, 3, 150, BoundKind::Upper);
        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Upper), Probe::Seed(100));
        tt.store_bound(CODE, 4, 3, 80, BoundKind::Upper);
        assert_eq!(tt.probe(CODE, 4, 3, BoundKind::Upper), Probe::Seed(80));
    }

    #[test]
    fn test_tt_stamp_change_overwrites() {
        let mut tt = TranspositionTable::new(8);
        tt.store_bound(CODE, 4, 6, 100, BoundKind::Exact);
        tt.store_eval(CODE, 4, 77);

        // Same slot, different stone count: shallow result still taken
        tt.store_bound(CODE, 7, 1, -5, BoundKind::Exact);
        assert_eq!(tt.probe(CODE, 7, 1, BoundKind::Lower), Probe::Exact(-5));
        assert_eq!(tt.cached_eval(CODE, 7), None);
        assert_eq!(tt.cached_eval(CODE, 4), None);
    }

    #[test]
    fn test_tt_eval_cache() {
        let mut tt = TranspositionTable::new(8);
        assert_eq!(tt.cached_eval(CODE, 3), None);

        tt.store_eval(CODE, 3, -1234);
        assert_eq!(tt.cached_eval(CODE, 3), Some(-1234));
        assert_eq!(tt.cached_eval(CODE, 4), None);
        // An eval alone is not a search result
        assert_eq!(tt.probe(CODE, 3, 0, BoundKind::Lower), Probe::Miss);

        // Storing a result keeps the eval of the same position
        tt.store_bound(CODE, 3, 2, 10, BoundKind::Exact);
        assert_eq!(tt.cached_eval(CODE, 3), Some(-1234));
    }

    #[test]
    fn test_tt_index_wraps_by_mask() {
        let mut tt = TranspositionTable::new(4);
        tt.store_bound(0x10 | 0x3, 2, 1, 9, BoundKind::Exact);
        // Same low bits, different high bits: same slot
        assert_eq!(tt.probe(0xFF00 | 0x3, 2, 1, BoundKind::Lower), Probe::Exact(9));
    }

    #[test]
    fn test_tt_clear_and_stats() {
        let mut tt = TranspositionTable::new(6);
        assert_eq!(tt.stats().size, 64);
        assert_eq!(tt.stats().used, 0);

        tt.store_bound(1, 1, 1, 1, BoundKind::Exact);
        tt.store_eval(2, 1, 5);
        assert_eq!(tt.stats().used, 2);

        tt.clear();
        assert_eq!(tt.stats().used, 0);
        assert_eq!(tt.probe(1, 1, 1, BoundKind::Lower), Probe::Miss);
    }
}
