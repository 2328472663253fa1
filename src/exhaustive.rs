//! Full-depth minimax without pruning, for games small enough to enumerate.
//!
//! Scores are depth-adjusted so quicker wins beat slower ones and slower losses beat quicker
//! ones: a win found `d` plies below the root's children scores `10 - d`, a loss `d - 10`, a
//! draw 0. Candidates are tried in ascending position order and the first strictly best one
//! is kept, so the result is fully deterministic.

use std::time::Instant;

use tracing::{debug, warn};

use crate::board::{Board, Position, Symbol};
use crate::error::SearchError;
use crate::limits::SearchLimits;
use crate::result::SearchResult;

const WIN_SCORE: i32 = 10;

/// Returns the best move for `ai`, or `None` if it has no legal move.
pub fn best_move<B: Board>(board: &mut B, ai: Symbol, opponent: Symbol) -> Option<Position> {
    search(board, ai, opponent, &SearchLimits::none())
        .ok()
        .and_then(|r| r.best_move)
}

/// Runs the search under `limits`. The board is left exactly as it was passed in.
pub fn search<B: Board>(
    board: &mut B,
    ai: Symbol,
    opponent: Symbol,
    limits: &SearchLimits,
) -> Result<SearchResult, SearchError> {
    let started = Instant::now();
    let mut run = ExhaustiveSearch {
        ai,
        opponent,
        limits,
        nodes: 0,
    };

    let result = run.root(board);
    match &result {
        Ok(r) => debug!(
            best_move = ?r.best_move,
            score = r.score,
            nodes = r.nodes,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "exhaustive search complete"
        ),
        Err(_) => warn!(nodes = run.nodes, "exhaustive search cancelled"),
    }
    result
}

struct ExhaustiveSearch<'a> {
    ai: Symbol,
    opponent: Symbol,
    limits: &'a SearchLimits,
    nodes: u64,
}

impl ExhaustiveSearch<'_> {
    fn root<B: Board>(&mut self, board: &mut B) -> Result<SearchResult, SearchError> {
        let mut best_move = None;
        let mut best_score = i32::MIN;

        for pos in board.legal_moves(self.ai) {
            let Some(mut child) = board.play(pos, self.ai) else {
                continue;
            };
            let score = self.minimax(&mut *child, 0, false)?;
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
        }

        Ok(SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            nodes: self.nodes,
        })
    }

    /// Scores the position just reached; `depth` counts plies below the root's children.
    fn minimax<B: Board>(
        &mut self,
        board: &mut B,
        depth: i32,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        self.nodes += 1;
        if self.limits.is_expired() {
            return Err(SearchError::Cancelled);
        }

        if board.is_win(self.ai) {
            return Ok(WIN_SCORE - depth);
        }
        if board.is_win(self.opponent) {
            return Ok(depth - WIN_SCORE);
        }
        if board.is_draw() {
            return Ok(0);
        }

        let side = if maximizing { self.ai } else { self.opponent };
        let moves = board.legal_moves(side);
        if moves.is_empty() {
            return Ok(0);
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for pos in moves {
            let Some(mut child) = board.play(pos, side) else {
                continue;
            };
            let score = self.minimax(&mut *child, depth + 1, !maximizing)?;
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::tic_tac_toe::TicTacToeBoard;
    use crate::limits::CancelToken;

    fn board(text: &str) -> TicTacToeBoard {
        text.parse().unwrap()
    }

    #[test]
    fn takes_the_only_winning_cell() {
        // arrange
        let mut b = board("XOX\nOXO\nOX.");
        let before = b.clone();

        // act
        let best = best_move(&mut b, Symbol::X, Symbol::O);

        // assert
        assert_eq!(best, Some(8));
        assert_eq!(b, before);
    }

    #[test]
    fn prefers_immediate_win_over_block() {
        let mut b = board("XX.\nOO.\n...");
        let result = search(&mut b, Symbol::X, Symbol::O, &SearchLimits::none()).unwrap();
        assert_eq!(result.best_move, Some(2));
        assert_eq!(result.score, 10);
    }

    #[test]
    fn blocks_the_opponent() {
        let mut b = board("OO.\nX..\n...");
        assert_eq!(best_move(&mut b, Symbol::X, Symbol::O), Some(2));
    }

    #[test]
    fn full_board_has_no_move() {
        let mut b = board("XOX\nXOO\nOXX");
        assert_eq!(best_move(&mut b, Symbol::X, Symbol::O), None);
    }

    #[test]
    fn empty_board_is_a_draw_and_leaves_board_untouched() {
        // arrange
        let mut b = TicTacToeBoard::default();

        // act
        let result = search(&mut b, Symbol::X, Symbol::O, &SearchLimits::none()).unwrap();

        // assert
        assert_eq!(result.score, 0);
        assert_eq!(result.best_move, Some(0));
        assert_eq!(b, TicTacToeBoard::default());
    }

    #[test]
    fn own_win_beats_blocking_a_double_threat() {
        // X threatens both row 0 and column 0
        let mut b = board("XX.\nX..\n.OO");
        let result = search(&mut b, Symbol::O, Symbol::X, &SearchLimits::none()).unwrap();
        assert_eq!(result.best_move, Some(6));
        assert_eq!(result.score, 10);
    }

    #[test]
    fn cancelled_search_restores_the_board() {
        let token = CancelToken::new();
        token.cancel();
        let limits = SearchLimits::none().with_cancel_token(token);
        let mut b = TicTacToeBoard::default();

        let result = search(&mut b, Symbol::X, Symbol::O, &limits);

        assert_eq!(result, Err(SearchError::Cancelled));
        assert_eq!(b, TicTacToeBoard::default());
    }
}
