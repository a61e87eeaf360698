//! Zobrist hashing for position identification
//!
//! Every cell has one key per state (empty, computer, human). A position's
//! signature is the XOR of the keys of all 225 cell states, so placing or
//! removing a stone is two XORs and the result does not depend on move order.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::zobrist;
//!
//! let keys = zobrist::keys();
//! let mut board = Board::new();
//! assert_eq!(board.code(), keys.empty_board());
//!
//! board.apply(7, 7, Stone::Human);
//! let expected = keys.toggle(keys.empty_board(), Pos::new(7, 7), Stone::Empty, Stone::Human);
//! assert_eq!(board.code(), expected);
//! ```

use std::sync::OnceLock;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Pos, Stone, TOTAL_CELLS};

/// Fixed seed so signatures are reproducible across runs
const SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Per-cell random keys
pub struct ZobristTable {
    empty: [u64; TOTAL_CELLS],
    computer: [u64; TOTAL_CELLS],
    human: [u64; TOTAL_CELLS],
    /// XOR of all empty keys
    empty_board: u64,
}

impl ZobristTable {
    #[must_use]
    pub fn new() -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(SEED);

        let mut empty = [0u64; TOTAL_CELLS];
        let mut computer = [0u64; TOTAL_CELLS];
        let mut human = [0u64; TOTAL_CELLS];
        for i in 0..TOTAL_CELLS {
            empty[i] = rng.next_u64();
            computer[i] = rng.next_u64();
            human[i] = rng.next_u64();
        }
        let empty_board = empty.iter().fold(0, |acc, k| acc ^ k);

        Self {
            empty,
            computer,
            human,
            empty_board,
        }
    }

    /// Signature of the empty board
    #[inline]
    pub fn empty_board(&self) -> u64 {
        self.empty_board
    }

    #[inline]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        let idx = pos.to_index();
        match stone {
            Stone::Empty => self.empty[idx],
            Stone::Computer => self.computer[idx],
            Stone::Human => self.human[idx],
        }
    }

    /// Signature after the cell at `pos` changes from `old` to `new`.
    #[inline]
    #[must_use]
    pub fn toggle(&self, hash: u64, pos: Pos, old: Stone, new: Stone) -> u64 {
        hash ^ self.key(pos, old) ^ self.key(pos, new)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide key table
pub fn keys() -> &'static ZobristTable {
    static KEYS: OnceLock<ZobristTable> = OnceLock::new();
    KEYS.get_or_init(ZobristTable::new)
}
