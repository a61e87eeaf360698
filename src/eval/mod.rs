//! Position evaluation
//!
//! Contains:
//! - Pattern weights and the standardized-line scorer
//! - Whole-board evaluation built on the board's per-cell cache

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, score_one_side, SideScore};
pub use patterns::{score_line, LineCell, PatternScore, LINE_LEN};
