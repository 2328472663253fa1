//! Depth-limited minimax with alpha-beta pruning for Reversi.
//!
//! # Features
//!
//! - Fixed search depth from [`AlphaBetaConfig`]
//! - Static move ordering (corners first, corner neighbours last) to tighten cutoffs early
//! - Pass handling: a side with no legal move hands the turn over, still consuming one ply
//! - Leaves scored by [`PositionEvaluator`]
//!
//! Move ordering and pruning only change how many nodes are visited, never the value found.
//! Turning pruning off in the config gives plain minimax through the same code path.

use std::cmp::Reverse;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::board::{Board, Position, Symbol};
use crate::boards::reversi::ReversiBoard;
use crate::config::AlphaBetaConfig;
use crate::error::SearchError;
use crate::evaluator::{PositionEvaluator, SCORE_LIMIT};
use crate::limits::SearchLimits;
use crate::result::SearchResult;

/// Infinity score for alpha-beta bounds. Validated weights keep every evaluation below it.
const INF: i32 = SCORE_LIMIT;

/// Alpha-beta searcher. Holds only its configuration, so one instance can serve any number
/// of boards.
#[derive(Debug, Clone, Default)]
pub struct AlphaBetaSearch {
    config: AlphaBetaConfig,
    evaluator: PositionEvaluator,
}

impl AlphaBetaSearch {
    /// Creates a searcher from its settings and the evaluator used at the leaves.
    pub fn new(config: AlphaBetaConfig, evaluator: PositionEvaluator) -> Self {
        Self { config, evaluator }
    }

    /// The depth and pruning settings.
    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    /// The evaluator scoring leaf positions.
    pub fn evaluator(&self) -> &PositionEvaluator {
        &self.evaluator
    }

    /// Returns the best move for `ai`, or `None` if `ai` has to pass.
    pub fn find_best_move(&self, board: &mut ReversiBoard, ai: Symbol) -> Option<Position> {
        self.search(board, ai, &SearchLimits::none())
            .ok()
            .and_then(|r| r.best_move)
    }

    /// Runs the search under `limits`. The board is left exactly as it was passed in.
    pub fn search(
        &self,
        board: &mut ReversiBoard,
        ai: Symbol,
        limits: &SearchLimits,
    ) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let mut worker = Worker {
            search: self,
            ai,
            opponent: ai.opponent(),
            limits,
            nodes: 0,
        };

        let result = worker.root(board, self.config.depth.max(1));
        match &result {
            Ok(r) => debug!(
                best_move = ?r.best_move,
                score = r.score,
                nodes = r.nodes,
                depth = self.config.depth,
                pruning = self.config.pruning,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "alpha-beta search complete"
            ),
            Err(_) => warn!(nodes = worker.nodes, "alpha-beta search cancelled"),
        }
        result
    }

    /// Candidate moves for `side`, best-looking first. Ties keep board order.
    fn ordered_moves(&self, board: &ReversiBoard, side: Symbol) -> Vec<Position> {
        let mut moves = board.legal_moves(side);
        moves.sort_by_key(|&p| Reverse(self.evaluator.move_order_score(p)));
        moves
    }
}

/// Per-call search state.
struct Worker<'a> {
    search: &'a AlphaBetaSearch,
    ai: Symbol,
    opponent: Symbol,
    limits: &'a SearchLimits,
    nodes: u64,
}

impl Worker<'_> {
    fn root(&mut self, board: &mut ReversiBoard, depth: u32) -> Result<SearchResult, SearchError> {
        let moves = self.search.ordered_moves(board, self.ai);
        if moves.is_empty() {
            // Passing: report the value of the position after the pass, but no move.
            let score = self.alpha_beta(board, depth, -INF, INF, true)?;
            return Ok(SearchResult {
                best_move: None,
                score,
                nodes: self.nodes,
            });
        }

        let mut alpha = -INF;
        let mut best_move = None;
        let mut best_score = -INF;
        for pos in moves {
            let Some(mut child) = board.play(pos, self.ai) else {
                continue;
            };
            let score = self.alpha_beta(&mut child, depth - 1, alpha, INF, false)?;
            trace!(pos, score, "root move scored");
            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            if self.search.config.pruning {
                alpha = alpha.max(best_score);
            }
        }

        Ok(SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
        })
    }

    fn alpha_beta(
        &mut self,
        board: &mut ReversiBoard,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        self.nodes += 1;
        if self.limits.is_expired() {
            return Err(SearchError::Cancelled);
        }

        let search = self.search;
        let evaluator = &search.evaluator;
        if depth == 0 {
            return Ok(evaluator.evaluate(board, self.ai, self.opponent));
        }

        let (side, other) = if maximizing {
            (self.ai, self.opponent)
        } else {
            (self.opponent, self.ai)
        };
        let moves = search.ordered_moves(board, side);
        if moves.is_empty() {
            if !board.has_legal_move(other) {
                return Ok(evaluator.terminal_score(board, self.ai, self.opponent));
            }
            return self.alpha_beta(board, depth - 1, alpha, beta, !maximizing);
        }

        let pruning = search.config.pruning;
        if maximizing {
            let mut value = -INF;
            for pos in moves {
                let Some(mut child) = board.play(pos, side) else {
                    continue;
                };
                value = value.max(self.alpha_beta(&mut child, depth - 1, alpha, beta, false)?);
                alpha = alpha.max(value);
                if pruning && beta <= alpha {
                    break;
                }
            }
            Ok(value)
        } else {
            let mut value = INF;
            for pos in moves {
                let Some(mut child) = board.play(pos, side) else {
                    continue;
                };
                value = value.min(self.alpha_beta(&mut child, depth - 1, alpha, beta, true)?);
                beta = beta.min(value);
                if pruning && beta <= alpha {
                    break;
                }
            }
            Ok(value)
        }
    }
}
