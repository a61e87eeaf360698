//! Window snapshots and scoped moves
//!
//! Placing a stone only rescored empty cells on the four 9-cell lines through
//! it, so undo only has to put those entries back. [`MoveGuard`] ties the
//! snapshot to a borrow of the board and undoes the move when dropped, which
//! keeps make/unmake pairs balanced on every exit path of the search.

use std::ops::{Deref, DerefMut};

use super::{Board, Direction, Pos, Stone, WINDOW_LEN};
use crate::error::MoveError;

/// Saved cache entries of the four windows through one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    center: Pos,
    /// `[direction][slot]`, `None` for off-board slots
    entries: [[Option<[i64; 2]>; WINDOW_LEN]; 4],
}

impl WindowSnapshot {
    /// Cell the windows are centred on
    #[inline]
    pub fn center(&self) -> Pos {
        self.center
    }
}

impl Board {
    /// Capture the heuristic cache around `pos` before a move there.
    #[must_use]
    pub fn snapshot_window(&self, pos: Pos) -> WindowSnapshot {
        let mut entries = [[None; WINDOW_LEN]; 4];
        for dir in Direction::ALL {
            for (slot, cell) in pos.window(dir).into_iter().enumerate() {
                entries[dir.index()][slot] = cell.map(|p| self.cached(p, dir));
            }
        }
        WindowSnapshot {
            center: pos,
            entries,
        }
    }

    /// Put back the cache entries captured by `snapshot`.
    pub fn restore_window(&mut self, snapshot: &WindowSnapshot) {
        for dir in Direction::ALL {
            let cells = snapshot.center.window(dir);
            for (cell, saved) in cells.into_iter().zip(snapshot.entries[dir.index()]) {
                if let (Some(p), Some(values)) = (cell, saved) {
                    self.set_cached(p, dir, values);
                }
            }
        }
    }

    /// Place `side` at `pos` for the lifetime of the returned guard.
    pub fn play(&mut self, pos: Pos, side: Stone) -> Result<MoveGuard<'_>, MoveError> {
        let snapshot = self.snapshot_window(pos);
        self.place(pos, side)?;
        Ok(MoveGuard {
            board: self,
            pos,
            snapshot,
        })
    }
}

/// A move that is undone when the guard goes out of scope.
///
/// Derefs to the board so nested moves can be played through it.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    pos: Pos,
    snapshot: WindowSnapshot,
}

impl MoveGuard<'_> {
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        let undone = self.board.remove(self.pos, &self.snapshot);
        debug_assert!(undone.is_ok(), "unbalanced undo at {:?}: {:?}", self.pos, undone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_skips_off_board_slots() {
        let board = Board::new();
        let snap = board.snapshot_window(Pos::new(0, 0));
        assert_eq!(snap.center(), Pos::new(0, 0));
        // Vertical window from row -4 to row 4: first four slots are off board
        let vertical = &snap.entries[Direction::Vertical.index()];
        assert!(vertical[..4].iter().all(Option::is_none));
        assert!(vertical[4..].iter().all(Option::is_some));
    }

    #[test]
    fn test_guard_undoes_on_drop() {
        let mut board = Board::new();
        board.apply(7, 7, Stone::Human);
        let before = board.clone();
        {
            let guard = board.play(Pos::new(7, 8), Stone::Computer).unwrap();
            assert_eq!(guard.pos(), Pos::new(7, 8));
            assert_eq!(guard.stone_count(), 2);
            assert_eq!(guard.get(Pos::new(7, 8)), Stone::Computer);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_nested_guards_unwind_in_order() {
        let mut board = Board::new();
        let before = board.clone();
        {
            let mut outer = board.play(Pos::new(7, 7), Stone::Computer).unwrap();
            {
                let mut inner = outer.play(Pos::new(7, 8), Stone::Human).unwrap();
                let third = inner.play(Pos::new(8, 8), Stone::Computer).unwrap();
                assert_eq!(third.stone_count(), 3);
            }
            assert_eq!(outer.stone_count(), 1);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_play_rejects_occupied_cell() {
        let mut board = Board::new();
        board.apply(3, 3, Stone::Human);
        let before = board.clone();
        let err = board.play(Pos::new(3, 3), Stone::Computer).err();
        assert_eq!(err, Some(MoveError::Occupied { row: 3, col: 3 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_guard_restores_after_panic() {
        let mut board = Board::new();
        let before = board.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = board.play(Pos::new(5, 5), Stone::Human).unwrap();
            panic!("search aborted");
        }));
        assert!(result.is_err());
        assert_eq!(board, before);
    }
}
