//! Search module for the Gomoku AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results and leaf evaluations
//! - Alpha-beta search over Max/Min floors with kill mode and a deadline

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{Floor, SearchResult, SearchStats, Searcher};
pub use tt::{BoundKind, Probe, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
