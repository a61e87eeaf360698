//! Board state with incrementally maintained heuristics

use std::fmt;

use super::window::WindowSnapshot;
use super::{Direction, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::MoveError;
use crate::eval::heuristic;
use crate::eval::patterns::{score_line, LineCell, PatternScore, LINE_LEN};
use crate::search::zobrist;

/// Default bonus per own stone adjacent to a cell (10%)
pub const DEFAULT_CLOSENESS: f64 = 0.1;

/// Radius of the candidate-eligibility neighbourhood
const NEAR_RADIUS: i32 = 2;
/// Radius of the closeness-bonus neighbourhood
const CLOSE_RADIUS: i32 = 1;

/// Cached directional scores of one cell: `[side][direction]`
pub(crate) type CellScores = [[i64; 4]; 2];

/// Game board.
///
/// Besides the grid, the board keeps for every empty cell the score each side
/// would get from playing there, split by line direction. Only the cells
/// sharing a line window with the last move are rescored, and
/// [`WindowSnapshot`] brings exactly those back on undo.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [[Stone; BOARD_SIZE]; BOARD_SIZE],
    stone_count: usize,
    /// Directional scores, valid for empty cells only
    scores: [[CellScores; BOARD_SIZE]; BOARD_SIZE],
    /// Stones of either side within radius 2
    near: [[u8; BOARD_SIZE]; BOARD_SIZE],
    /// Stones of each side within radius 1: `[side][row][col]`
    close: [[[u8; BOARD_SIZE]; BOARD_SIZE]; 2],
    hash: u64,
    closeness: f64,
}

impl Board {
    pub fn new() -> Self {
        Self::with_closeness(DEFAULT_CLOSENESS)
    }

    /// Board with a custom closeness coefficient for [`Board::heuristic`]
    pub fn with_closeness(closeness: f64) -> Self {
        let mut board = Self {
            cells: [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE],
            stone_count: 0,
            scores: [[[[0; 4]; 2]; BOARD_SIZE]; BOARD_SIZE],
            near: [[0; BOARD_SIZE]; BOARD_SIZE],
            close: [[[0; BOARD_SIZE]; BOARD_SIZE]; 2],
            hash: zobrist::keys().empty_board(),
            closeness,
        };
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            for dir in Direction::ALL {
                board.rescore(pos, dir);
            }
        }
        board
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stone_count
    }

    /// Zobrist signature of the current stone set
    #[inline]
    pub fn code(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count == TOTAL_CELLS
    }

    #[inline]
    pub fn closeness(&self) -> f64 {
        self.closeness
    }

    /// Number of stones within radius 2 of `pos`
    #[inline]
    pub fn near_count(&self, pos: Pos) -> u8 {
        self.near[pos.row as usize][pos.col as usize]
    }

    /// Number of `side` stones adjacent to `pos`
    #[inline]
    pub fn close_count(&self, pos: Pos, side: Stone) -> u8 {
        match side.side_index() {
            Some(s) => self.close[s][pos.row as usize][pos.col as usize],
            None => 0,
        }
    }

    /// Empty and within reach of an existing stone
    #[inline]
    pub fn is_candidate(&self, pos: Pos) -> bool {
        self.is_empty(pos) && self.near_count(pos) > 0
    }

    /// Cached score of `pos` along one direction for `side`
    #[inline]
    pub fn directional(&self, pos: Pos, side: Stone, dir: Direction) -> i64 {
        match side.side_index() {
            Some(s) => self.scores[pos.row as usize][pos.col as usize][s][dir.index()],
            None => 0,
        }
    }

    /// Worth of `pos` to `side`: the four directional scores, scaled up by
    /// the number of `side` stones touching the cell.
    #[allow(clippy::cast_possible_truncation)]
    pub fn heuristic(&self, pos: Pos, side: Stone) -> i64 {
        let Some(s) = side.side_index() else {
            return 0;
        };
        let sum: i64 = self.scores[pos.row as usize][pos.col as usize][s]
            .iter()
            .sum();
        let bonus = 1.0 + f64::from(self.close_count(pos, side)) * self.closeness;
        (sum as f64 * bonus).round() as i64
    }

    /// Whether the stone at `pos` completed five.
    ///
    /// The cache of an occupied cell still holds its value from before the
    /// stone landed, which is exactly the worth of that move.
    pub fn is_win(&self, pos: Pos) -> bool {
        let side = self.get(pos);
        side != Stone::Empty && self.heuristic(pos, side) >= PatternScore::FIVE
    }

    /// Static evaluation from the computer's point of view after
    /// `last_mover` played.
    #[must_use]
    pub fn evaluate(&self, last_mover: Stone) -> i64 {
        heuristic::evaluate(self, last_mover)
    }

    /// Additive pressure of `side` over all empty cells
    #[must_use]
    pub fn score_one_side(&self, side: Stone) -> i64 {
        heuristic::score_one_side(self, side).total
    }

    /// Place a stone. Returns `false` for an illegal move.
    pub fn apply(&mut self, row: i32, col: i32, side: Stone) -> bool {
        self.try_apply(row, col, side).is_ok()
    }

    /// Place a stone, reporting why an illegal move was rejected.
    pub fn try_apply(&mut self, row: i32, col: i32, side: Stone) -> Result<Pos, MoveError> {
        let pos = Pos::try_new(row, col).ok_or(MoveError::OutOfBounds { row, col })?;
        self.place(pos, side)?;
        Ok(pos)
    }

    /// Remove a stone placed by [`Board::apply`]. `snapshot` must come from
    /// [`Board::snapshot_window`] taken right before that apply.
    pub fn undo(&mut self, row: i32, col: i32, snapshot: &WindowSnapshot) -> bool {
        self.try_undo(row, col, snapshot).is_ok()
    }

    /// Remove a stone, returning the side that stood there.
    pub fn try_undo(
        &mut self,
        row: i32,
        col: i32,
        snapshot: &WindowSnapshot,
    ) -> Result<Stone, MoveError> {
        let pos = Pos::try_new(row, col).ok_or(MoveError::OutOfBounds { row, col })?;
        self.remove(pos, snapshot)
    }

    pub(crate) fn place(&mut self, pos: Pos, side: Stone) -> Result<(), MoveError> {
        if side == Stone::Empty {
            return Err(MoveError::EmptyStone);
        }
        if !self.is_empty(pos) {
            return Err(MoveError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }

        self.cells[pos.row as usize][pos.col as usize] = side;
        self.stone_count += 1;
        self.update_proximity(pos, side, true);
        for dir in Direction::ALL {
            for cell in pos.window(dir).into_iter().flatten() {
                if self.is_empty(cell) {
                    self.rescore(cell, dir);
                }
            }
        }
        self.hash = zobrist::keys().toggle(self.hash, pos, Stone::Empty, side);
        Ok(())
    }

    pub(crate) fn remove(
        &mut self,
        pos: Pos,
        snapshot: &WindowSnapshot,
    ) -> Result<Stone, MoveError> {
        let side = self.get(pos);
        if side == Stone::Empty {
            return Err(MoveError::EmptyCell {
                row: pos.row,
                col: pos.col,
            });
        }
        if snapshot.center() != pos {
            let c = snapshot.center();
            return Err(MoveError::SnapshotMismatch { row: c.row, col: c.col });
        }

        self.cells[pos.row as usize][pos.col as usize] = Stone::Empty;
        self.stone_count -= 1;
        self.update_proximity(pos, side, false);
        self.restore_window(snapshot);
        self.hash = zobrist::keys().toggle(self.hash, pos, side, Stone::Empty);
        Ok(side)
    }

    /// Cache entries of `pos` for one direction, both sides
    #[inline]
    pub(crate) fn cached(&self, pos: Pos, dir: Direction) -> [i64; 2] {
        let s = &self.scores[pos.row as usize][pos.col as usize];
        [s[0][dir.index()], s[1][dir.index()]]
    }

    #[inline]
    pub(crate) fn set_cached(&mut self, pos: Pos, dir: Direction, values: [i64; 2]) {
        let s = &mut self.scores[pos.row as usize][pos.col as usize];
        s[0][dir.index()] = values[0];
        s[1][dir.index()] = values[1];
    }

    /// Recompute both sides' score of empty `pos` along `dir`
    fn rescore(&mut self, pos: Pos, dir: Direction) {
        let values = [
            score_line(&self.standardize(pos, dir, Stone::Computer)),
            score_line(&self.standardize(pos, dir, Stone::Human)),
        ];
        self.set_cached(pos, dir, values);
    }

    /// The window through `pos` along `dir` as `side` sees it, with `pos`
    /// itself counted as a `side` stone.
    fn standardize(&self, pos: Pos, dir: Direction, side: Stone) -> [LineCell; LINE_LEN] {
        let mut line = [LineCell::Blocked; LINE_LEN];
        for (k, cell) in pos.window(dir).into_iter().enumerate() {
            line[k + 1] = match cell {
                None => LineCell::Blocked,
                Some(p) if p == pos => LineCell::Own,
                Some(p) => match self.get(p) {
                    Stone::Empty => LineCell::Empty,
                    s if s == side => LineCell::Own,
                    _ => LineCell::Blocked,
                },
            };
        }
        line
    }

    fn update_proximity(&mut self, pos: Pos, side: Stone, placed: bool) {
        for p in pos.neighbors(NEAR_RADIUS) {
            let n = &mut self.near[p.row as usize][p.col as usize];
            *n = if placed { *n + 1 } else { *n - 1 };
        }
        if let Some(s) = side.side_index() {
            for p in pos.neighbors(CLOSE_RADIUS) {
                let n = &mut self.close[s][p.row as usize][p.col as usize];
                *n = if placed { *n + 1 } else { *n - 1 };
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{:>3}", row)?;
            for col in 0..BOARD_SIZE {
                let c = match self.cells[row][col] {
                    Stone::Empty => '.',
                    Stone::Computer => 'X',
                    Stone::Human => 'O',
                };
                write!(f, "{:>3}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
