//! Gomoku engine: a computer opponent for freestyle five-in-a-row
//!
//! The engine plays on a 15x15 board against a human. The first side to get
//! five or more stones in a row wins; there are no forbidden moves.
//!
//! # Architecture
//!
//! - [`board`]: Board with incrementally maintained per-cell heuristics and
//!   threat-ordered candidate generation
//! - [`eval`]: Pattern scorer and whole-board evaluation
//! - [`search`]: Alpha-beta search, transposition table and Zobrist keys
//! - [`config`]: Search settings
//! - [`game`]: Turn-keeping session used by the console binary
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Board, SearchConfig, Searcher, Stone};
//!
//! let mut board = Board::new();
//! board.apply(7, 7, Stone::Human);
//!
//! // Small depth and table for a fast doc test
//! let mut searcher = Searcher::new(SearchConfig::fixed(2, 8).with_tt_bits(12));
//! let pos = searcher.get_best_put(&mut board);
//! assert!(board.apply(pos.row.into(), pos.col.into(), Stone::Computer));
//! ```
//!
//! # Search
//!
//! Each computer move runs one alpha-beta search whose depth and width grow
//! as the board fills. Candidates come pre-ordered by threat level, and past
//! a configured ply only forcing moves are examined. Results are cached in a
//! transposition table that lives for the whole game.

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::SearchConfig;
pub use error::MoveError;
pub use game::{Game, Outcome};
pub use search::{SearchResult, Searcher};
