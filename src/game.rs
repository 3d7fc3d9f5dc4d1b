use log::{info, warn};
use serde::Serialize;

use crate::board::{Board, Player};
use crate::config::GameConfig;
use crate::engine::{Engine, SCORE_MAX, SCORE_MIN};
use crate::error::{BoardError, MoveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner(Player),
    Draw,
}

pub struct Game {
    board: Board,
    engine: Engine,
    to_move: Player,
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, BoardError> {
        let board = Board::with_size(config.rows, config.cols)?;
        Ok(Self::from_board(board, Engine::new(config.depth), config.first))
    }

    /// Resumes play on an existing position. A position that already holds a four in a
    /// row or a full board starts out decided.
    pub fn from_board(board: Board, engine: Engine, to_move: Player) -> Self {
        let outcome = [to_move.opponent(), to_move]
            .into_iter()
            .find(|&player| board.has_four_in_row(player))
            .map(Outcome::Winner)
            .or_else(|| board.is_full().then_some(Outcome::Draw));
        Self { board, engine, to_move, outcome }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn check_column(&self, column: usize) -> Result<(), MoveError> {
        if self.is_over() {
            Err(MoveError::GameOver)
        } else if column >= self.board.cols() {
            Err(MoveError::OutOfRange { column: column as i64 })
        } else if self.board.is_column_full(column) {
            Err(MoveError::ColumnFull { column })
        } else {
            Ok(())
        }
    }

    /// Plays `column` for the side to move.
    ///
    /// The mover's four in a row is checked before the full board, so a winning last
    /// piece is a win and not a draw. The turn only passes when the game goes on.
    pub fn play(&mut self, column: usize) -> Result<Option<Outcome>, MoveError> {
        self.check_column(column)?;
        let mover = self.to_move;
        let row = self.board.apply_move(column, mover);
        info!("{:?} played column {} (row {})", mover, column, row);

        self.outcome = if self.board.has_four_in_row(mover) {
            Some(Outcome::Winner(mover))
        } else if self.board.is_full() {
            Some(Outcome::Draw)
        } else {
            self.to_move = mover.opponent();
            None
        };
        if let Some(outcome) = self.outcome {
            info!("Game over after {} moves: {:?}", self.board.moves_played(), outcome);
        }
        Ok(self.outcome)
    }

    /// The engine's column for the side to move.
    ///
    /// When the search names no column (depth 0, a depth that reaches the end of the
    /// board, or every line lost) it is repeated one ply short of the end of the board
    /// and then at depth 1. The lowest legal column is the last resort.
    pub fn choose_column(&self) -> Option<usize> {
        let result = self.engine.best_move(&self.board);
        if result.column.is_some() {
            return result.column;
        }
        let reachable = self.engine.depth().min(self.board.empty_cells().saturating_sub(1) as u32);
        for depth in [reachable, 1] {
            if depth == 0 {
                continue;
            }
            let retry = self.engine.search(&self.board, depth, SCORE_MIN, SCORE_MAX, self.engine.maximizer());
            if let Some(column) = retry.column {
                warn!(
                    "Search at depth {} chose no column (score {}), depth {} chose {}",
                    self.engine.depth(), result.score, depth, column
                );
                return Some(column);
            }
        }
        let fallback = self.board.legal_columns().first().copied();
        warn!("No search chose a column, falling back to {:?}", fallback);
        fallback
    }

    pub fn play_computer(&mut self) -> Result<(usize, Option<Outcome>), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        debug_assert_eq!(self.to_move, self.engine.maximizer());
        let column = self.choose_column().ok_or(MoveError::GameOver)?;
        let outcome = self.play(column)?;
        Ok((column, outcome))
    }
}
