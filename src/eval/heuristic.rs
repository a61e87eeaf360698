//! Whole-board evaluation
//!
//! The evaluation is additive positional pressure: every empty cell
//! contributes what it would be worth to a side if that side played there.
//! Scores are always from the computer's point of view (positive favours
//! the computer).

use crate::board::{Board, Pos, Stone, BOARD_SIZE};

use super::patterns::PatternScore;

/// Per-side summary of all empty cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideScore {
    /// Sum of cell heuristics
    pub total: i64,
    /// Best single cell
    pub best: i64,
}

impl SideScore {
    /// The side can complete five with its next stone
    #[inline]
    pub fn has_five(&self) -> bool {
        self.best >= PatternScore::FIVE
    }
}

/// Sum the heuristic of every empty cell for `side`.
#[must_use]
pub fn score_one_side(board: &Board, side: Stone) -> SideScore {
    let mut score = SideScore::default();
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            let pos = Pos::new(row, col);
            if !board.is_empty(pos) {
                continue;
            }
            let h = board.heuristic(pos, side);
            score.total += h;
            score.best = score.best.max(h);
        }
    }
    score
}

/// Evaluate the board from the viewpoint of `last_mover`, the side that has
/// just played.
///
/// A five-completing cell held by `last_mover` decides the position first;
/// one held only by the other side decides it the other way.
#[must_use]
pub fn evaluate(board: &Board, last_mover: Stone) -> i64 {
    let computer = score_one_side(board, Stone::Computer);
    let human = score_one_side(board, Stone::Human);

    for side in [last_mover, last_mover.opponent()] {
        match side {
            Stone::Computer if computer.has_five() => return PatternScore::INF,
            Stone::Human if human.has_five() => return -PatternScore::INF,
            _ => {}
        }
    }

    computer.total - human.total
}
