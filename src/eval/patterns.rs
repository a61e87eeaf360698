//! Pattern scores and the line scorer
//!
//! A cell is scored one line at a time. The 9-cell window centred on the cell
//! is translated into a *standardized line* from one side's point of view and
//! padded with a blocked sentinel at both ends. Every fixed-width sub-window is
//! then matched against the pattern shapes below; overlapping matches are all
//! counted.

use crate::board::WINDOW_LEN;

/// Length of a standardized line: window plus one sentinel per end
pub const LINE_LEN: usize = WINDOW_LEN + 2;

/// Pattern weights
pub struct PatternScore;

impl PatternScore {
    /// Five in a row
    pub const FIVE: i64 = 10_000_000;
    /// Open four: _OOOO_
    pub const OPEN_FOUR: i64 = 100_000;
    /// Four with a single completion point
    pub const BLOCKED_FOUR: i64 = 10_000;
    /// Open three: three stones in a 6-window with both ends empty
    pub const OPEN_THREE: i64 = 1_000;
    /// Three stones and two gaps in a 5-window
    pub const BLOCKED_THREE: i64 = 100;
    /// Open two
    pub const OPEN_TWO: i64 = 20;

    /// Search infinity; a decided game
    pub const INF: i64 = 1_000_000_000;
}

/// One entry of a standardized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCell {
    /// Stone of the side being scored
    Own,
    Empty,
    /// Opponent stone, off-board, or sentinel
    Blocked,
}

/// Running counts of each cell kind over a line.
///
/// `own[i]` is the number of `Own` cells in `line[..i]`, so any window
/// count is a single subtraction.
struct PrefixCounts {
    own: [u8; LINE_LEN + 1],
    empty: [u8; LINE_LEN + 1],
}

impl PrefixCounts {
    fn new(line: &[LineCell; LINE_LEN]) -> Self {
        let mut own = [0u8; LINE_LEN + 1];
        let mut empty = [0u8; LINE_LEN + 1];
        for (i, cell) in line.iter().enumerate() {
            own[i + 1] = own[i] + u8::from(*cell == LineCell::Own);
            empty[i + 1] = empty[i] + u8::from(*cell == LineCell::Empty);
        }
        Self { own, empty }
    }

    /// (own, empty) counts in `line[start..start + width]`
    #[inline]
    fn window(&self, start: usize, width: usize) -> (u8, u8) {
        let end = start + width;
        (
            self.own[end] - self.own[start],
            self.empty[end] - self.empty[start],
        )
    }
}

/// Number of `width`-windows holding exactly `own` Own and `empty` Empty cells.
/// With `open_ends`, both window ends must be Empty as well.
fn count_windows(
    line: &[LineCell; LINE_LEN],
    counts: &PrefixCounts,
    width: usize,
    own: u8,
    empty: u8,
    open_ends: bool,
) -> i64 {
    let mut n = 0;
    for start in 0..=LINE_LEN - width {
        if open_ends
            && (line[start] != LineCell::Empty || line[start + width - 1] != LineCell::Empty)
        {
            continue;
        }
        if counts.window(start, width) == (own, empty) {
            n += 1;
        }
    }
    n
}

/// Score a standardized line.
///
/// Sum of weight × occurrences over all pattern shapes.
#[must_use]
pub fn score_line(line: &[LineCell; LINE_LEN]) -> i64 {
    let counts = PrefixCounts::new(line);

    let fives = count_windows(line, &counts, 5, 5, 0, false);
    let open_fours = count_windows(line, &counts, 6, 4, 2, true);
    let blocked_fours = count_windows(line, &counts, 5, 4, 1, false);
    let open_threes = count_windows(line, &counts, 6, 3, 3, true);
    let blocked_threes = count_windows(line, &counts, 5, 3, 2, false);
    let open_twos = count_windows(line, &counts, 6, 2, 4, true);

    fives * PatternScore::FIVE
        + open_fours * PatternScore::OPEN_FOUR
        + blocked_fours * PatternScore::BLOCKED_FOUR
        + open_threes * PatternScore::OPEN_THREE
        + blocked_threes * PatternScore::BLOCKED_THREE
        + open_twos * PatternScore::OPEN_TWO
}

#[cfg(test)]
mod tests {
    use super::*;
    use LineCell::{Blocked as B, Empty as E, Own as S};

    /// Build a line from the 9 window cells, adding sentinels
    fn line(window: [LineCell; WINDOW_LEN]) -> [LineCell; LINE_LEN] {
        let mut out = [B; LINE_LEN];
        out[1..=WINDOW_LEN].copy_from_slice(&window);
        out
    }

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::INF > PatternScore::FIVE);
        assert!(PatternScore::FIVE > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::BLOCKED_FOUR);
        assert!(PatternScore::BLOCKED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::BLOCKED_THREE);
        assert!(PatternScore::BLOCKED_THREE > PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_empty_line_scores_zero() {
        assert_eq!(score_line(&line([E; WINDOW_LEN])), 0);
        assert_eq!(score_line(&[B; LINE_LEN]), 0);
    }

    #[test]
    fn test_single_stone_scores_zero() {
        assert_eq!(score_line(&line([E, E, E, E, S, E, E, E, E])), 0);
    }

    #[test]
    fn test_five_dominates() {
        let five = score_line(&line([B, B, S, S, S, S, S, B, B]));
        assert!(five >= PatternScore::FIVE);

        let five_open = score_line(&line([E, E, S, S, S, S, S, E, E]));
        assert!(five_open >= PatternScore::FIVE);
    }

    #[test]
    fn test_overline_counts_every_five() {
        // Six in a row holds two overlapping fives
        let six = score_line(&line([E, S, S, S, S, S, S, E, E]));
        assert!(six >= 2 * PatternScore::FIVE);
    }

    #[test]
    fn test_open_four() {
        let open_four = score_line(&line([B, B, E, S, S, S, S, E, B]));
        assert!(open_four >= PatternScore::OPEN_FOUR);
        assert!(open_four < PatternScore::FIVE);
    }

    #[test]
    fn test_open_four_beats_any_line_without_four() {
        let open_four = score_line(&line([B, B, E, S, S, S, S, E, B]));

        // Densest three-only shapes a window can hold
        let candidates = [
            line([E, E, S, S, S, E, E, E, E]),
            line([E, S, E, S, S, E, S, E, E]),
            line([S, S, E, S, E, S, S, E, E]),
            line([E, S, S, E, S, E, S, S, E]),
            line([S, E, S, E, S, E, S, E, S]),
            line([E, E, S, S, E, S, S, E, E]),
        ];
        for c in &candidates {
            let s = score_line(c);
            assert!(s < PatternScore::BLOCKED_FOUR * 10, "{:?} -> {}", c, s);
            assert!(open_four > s, "{:?} -> {} >= {}", c, s, open_four);
        }
    }

    #[test]
    fn test_blocked_four() {
        // Blocked on the left by the opponent
        let closed = score_line(&line([E, B, S, S, S, S, E, E, E]));
        assert!(closed >= PatternScore::BLOCKED_FOUR);
        assert!(closed < PatternScore::OPEN_FOUR);

        // Split four: the gap is the only completion point
        let split = score_line(&line([B, E, S, S, E, S, S, E, B]));
        assert!(split >= PatternScore::BLOCKED_FOUR);
        assert!(split < PatternScore::OPEN_FOUR);
    }

    #[test]
    fn test_open_three() {
        let three = score_line(&line([E, E, S, S, S, E, E, B, B]));
        assert!(three >= PatternScore::OPEN_THREE);
        assert!(three < PatternScore::BLOCKED_FOUR);
    }

    #[test]
    fn test_blocked_three_is_not_open() {
        let blocked = score_line(&line([B, S, S, S, E, E, B, B, B]));
        assert_eq!(blocked, PatternScore::BLOCKED_THREE);
    }

    #[test]
    fn test_open_two() {
        // _ _ O O _ _ with room on both sides
        let two = score_line(&line([B, E, E, S, S, E, E, B, B]));
        assert_eq!(two, PatternScore::OPEN_TWO);
    }

    #[test]
    fn test_sentinels_block() {
        // Four against the window edge is closed by the sentinel
        let edge = score_line(&line([S, S, S, S, E, E, E, E, E]));
        assert!(edge >= PatternScore::BLOCKED_FOUR);
        assert!(edge < PatternScore::OPEN_FOUR);
    }
}
