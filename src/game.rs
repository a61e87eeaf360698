//! Game session for console play against the computer

use std::fmt;

use log::info;

use crate::board::{Board, Pos, Stone};
use crate::config::SearchConfig;
use crate::error::MoveError;
use crate::search::{SearchResult, Searcher};

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ComputerWin,
    HumanWin,
    /// Board filled without five in a row
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::ComputerWin => write!(f, "Computer wins"),
            Outcome::HumanWin => write!(f, "You win"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// One game: board, searcher and turn bookkeeping
pub struct Game {
    board: Board,
    searcher: Searcher,
    computer_first: bool,
    current_turn: Stone,
    outcome: Option<Outcome>,
    move_history: Vec<(Pos, Stone)>,
    last_search: Option<SearchResult>,
}

impl Game {
    pub fn new(config: SearchConfig, computer_first: bool) -> Self {
        let board = Board::with_closeness(config.closeness);
        Self {
            board,
            searcher: Searcher::new(config),
            computer_first,
            current_turn: Self::first_mover(computer_first),
            outcome: None,
            move_history: Vec::new(),
            last_search: None,
        }
    }

    fn first_mover(computer_first: bool) -> Stone {
        if computer_first {
            Stone::Computer
        } else {
            Stone::Human
        }
    }

    /// Start over with an empty board and a cleared table
    pub fn reset(&mut self) {
        self.board = Board::with_closeness(self.board.closeness());
        self.searcher.clear();
        self.current_turn = Self::first_mover(self.computer_first);
        self.outcome = None;
        self.move_history.clear();
        self.last_search = None;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn move_history(&self) -> &[(Pos, Stone)] {
        &self.move_history
    }

    /// Most recent move of `side`
    pub fn last_move(&self, side: Stone) -> Option<Pos> {
        self.move_history
            .iter()
            .rev()
            .find(|(_, s)| *s == side)
            .map(|(pos, _)| *pos)
    }

    /// Statistics of the computer's latest move
    pub fn last_search(&self) -> Option<&SearchResult> {
        self.last_search.as_ref()
    }

    /// Play the human's stone at (row, col).
    pub fn human_move(&mut self, row: i32, col: i32) -> Result<Option<Outcome>, MoveError> {
        self.check_turn(Stone::Human)?;
        let pos = self.board.try_apply(row, col, Stone::Human)?;
        Ok(self.finish_move(pos, Stone::Human))
    }

    /// Search and play the computer's reply.
    pub fn computer_move(&mut self) -> Result<(Pos, Option<Outcome>), MoveError> {
        self.check_turn(Stone::Computer)?;
        let result = self.searcher.get_best_put_with_stats(&mut self.board);
        let pos = result.best_move;
        info!(
            "computer plays ({}, {}) value={} nodes={} in {:?}",
            pos.row, pos.col, result.value, result.stats.nodes, result.elapsed
        );
        self.last_search = Some(result);

        self.board
            .try_apply(i32::from(pos.row), i32::from(pos.col), Stone::Computer)?;
        Ok((pos, self.finish_move(pos, Stone::Computer)))
    }

    /// Take back the last human move and the computer's reply to it.
    ///
    /// Returns the number of stones removed.
    pub fn undo(&mut self) -> usize {
        let mut keep = self.move_history.len();
        if keep > 0 && self.move_history[keep - 1].1 == Stone::Computer {
            keep -= 1;
        }
        if keep > 0 && self.move_history[keep - 1].1 == Stone::Human {
            keep -= 1;
        }
        let removed = self.move_history.len() - keep;
        if removed == 0 {
            return 0;
        }

        // Replay; window snapshots are not kept across turns
        let moves: Vec<_> = self.move_history.drain(..keep).collect();
        self.board = Board::with_closeness(self.board.closeness());
        self.move_history.clear();
        self.current_turn = Self::first_mover(self.computer_first);
        self.outcome = None;
        for (pos, side) in moves {
            if self.board.try_apply(i32::from(pos.row), i32::from(pos.col), side).is_ok() {
                self.move_history.push((pos, side));
                self.current_turn = side.opponent();
            }
        }
        removed
    }

    fn check_turn(&self, side: Stone) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.current_turn != side {
            return Err(MoveError::OutOfTurn(side));
        }
        Ok(())
    }

    fn finish_move(&mut self, pos: Pos, side: Stone) -> Option<Outcome> {
        self.move_history.push((pos, side));
        self.current_turn = side.opponent();

        self.outcome = if self.board.is_win(pos) {
            Some(match side {
                Stone::Computer => Outcome::ComputerWin,
                _ => Outcome::HumanWin,
            })
        } else if self.board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        };
        self.outcome
    }
}
