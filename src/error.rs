//! Error types for board operations.

use thiserror::Error;

use crate::board::Stone;

/// Reason a move could not be applied or undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Coordinate outside the 15x15 board
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    /// Apply on a cell that already holds a stone
    #[error("({row}, {col}) is already occupied")]
    Occupied { row: u8, col: u8 },

    /// Undo on a cell that holds no stone
    #[error("({row}, {col}) holds no stone")]
    EmptyCell { row: u8, col: u8 },

    /// Attempt to place `Stone::Empty`
    #[error("cannot place an empty stone")]
    EmptyStone,

    /// Move submitted for the side that is not to move
    #[error("it is not the {0:?} side's turn")]
    OutOfTurn(Stone),

    /// Move submitted after the game ended
    #[error("the game is already over")]
    GameOver,

    /// Undo was given a snapshot taken around a different cell
    #[error("window snapshot was taken at ({row}, {col})")]
    SnapshotMismatch { row: u8, col: u8 },
}
