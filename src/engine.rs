use log::debug;

use crate::board::{Board, Player};

pub type Score = i32;

pub const SCORE_MIN: Score = Score::MIN;
pub const SCORE_MAX: Score = Score::MAX;
pub const DEFAULT_DEPTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Score,
    /// `None` when the node was a cutoff, an already-lost position, or no move beat the sentinel.
    pub column: Option<usize>,
}

/// Heuristic value of one window, given how many of its cells belong to the
/// evaluated player (`good`), the other player (`bad`) or nobody (`empty`).
pub fn score_window(good: usize, bad: usize, empty: usize) -> Score {
    match (good, bad, empty) {
        (4, _, _) => 500_001,
        (3, _, 1) => 5_000,
        (2, _, 2) => 500,
        (_, 2, 2) => -501,
        (_, 3, 1) => -5_001,
        (_, 4, _) => -500_000,
        _ => 0,
    }
}

/// Sum of [`score_window`] over every window of the board, from `perspective`'s point of view.
pub fn evaluate(board: &Board, perspective: Player) -> Score {
    board.windows().iter().map(|window| {
        let (mut good, mut bad, mut empty) = (0, 0, 0);
        for &idx in window {
            match board.cell_at(idx) {
                Some(player) if player == perspective => good += 1,
                Some(_) => bad += 1,
                None => empty += 1,
            }
        }
        score_window(good, bad, empty)
    }).sum()
}

pub struct Engine {
    depth: u32,
    maximizer: Player,
}

impl Engine {
    pub fn new(depth: u32) -> Self {
        Self::for_player(depth, Player::Computer)
    }

    pub fn for_player(depth: u32, maximizer: Player) -> Self {
        Self { depth, maximizer }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    pub fn eval(&self, board: &Board) -> Score {
        evaluate(board, self.maximizer)
    }

    /// Alpha-beta minimax from `to_move`'s turn on `board`.
    ///
    /// The search horizon is the number of empty cells on `board`: a depth at or beyond it
    /// is cut off with the static evaluation, at every level of the tree.
    pub fn search(&self, board: &Board, depth: u32, alpha: Score, beta: Score, to_move: Player) -> SearchResult {
        self.alpha_beta(board, depth, alpha, beta, to_move, board.empty_cells())
    }

    fn alpha_beta(
        &self,
        board: &Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        to_move: Player,
        horizon: usize,
    ) -> SearchResult {
        if depth == 0 || depth as usize >= horizon {
            return SearchResult { score: self.eval(board), column: None };
        }

        let maximizing = to_move == self.maximizer;
        let mut best = SearchResult {
            score: if maximizing { SCORE_MIN } else { SCORE_MAX },
            column: None,
        };
        // the previous ply already won the game
        if board.has_four_in_row(to_move.opponent()) {
            return best;
        }

        for column in 0..board.cols() {
            if board.is_column_full(column) {
                continue;
            }
            let mut child = board.clone();
            child.apply_move(column, to_move);
            let score = self.alpha_beta(&child, depth - 1, alpha, beta, to_move.opponent(), horizon).score;

            if maximizing {
                if score > best.score {
                    best = SearchResult { score, column: Some(column) };
                }
                alpha = alpha.max(best.score);
            } else {
                if score < best.score {
                    best = SearchResult { score, column: Some(column) };
                }
                beta = beta.min(best.score);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Full-window search at the configured depth, clamped to the board size.
    pub fn best_move(&self, board: &Board) -> SearchResult {
        let depth = self.depth.min(board.total_cells() as u32);
        let result = self.search(board, depth, SCORE_MIN, SCORE_MAX, self.maximizer);
        debug!(
            "depth {} search for {:?} after {} moves: column {:?}, score {}",
            depth, self.maximizer, board.moves_played(), result.column, result.score
        );
        result
    }
}
