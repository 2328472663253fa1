//! Picks the search for a game and runs it.
//!
//! [`StrategySelector`] is what a game loop talks to: hand it a borrowed board, the AI's symbol
//! and the wanted [`Strategy`], get back a position or `None` for a pass. The free functions at
//! the bottom are the three one-shot entry points with default settings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alpha_beta::AlphaBetaSearch;
use crate::board::{Board, Coord, Position, Symbol};
use crate::boards::reversi::ReversiBoard;
use crate::boards::tic_tac_toe::TicTacToeBoard;
use crate::config::EngineConfig;
use crate::error::{ConfigError, SearchError};
use crate::evaluator::PositionEvaluator;
use crate::exhaustive;
use crate::limits::SearchLimits;
use crate::mcts::MonteCarloSearch;
use crate::random::RandomGenerator;

/// The games the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    TicTacToe,
    Reversi,
}

/// The available search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Exhaustive,
    AlphaBeta,
    MonteCarlo,
}

impl Strategy {
    /// The deterministic search suited to `game`.
    pub fn default_for(game: Game) -> Self {
        match game {
            Game::TicTacToe => Strategy::Exhaustive,
            Game::Reversi => Strategy::AlphaBeta,
        }
    }
}

/// A mutably borrowed board of either game.
#[derive(Debug)]
pub enum GameBoard<'a> {
    TicTacToe(&'a mut TicTacToeBoard),
    Reversi(&'a mut ReversiBoard),
}

impl GameBoard<'_> {
    /// Which game the borrowed board belongs to.
    pub fn game(&self) -> Game {
        match self {
            GameBoard::TicTacToe(_) => Game::TicTacToe,
            GameBoard::Reversi(_) => Game::Reversi,
        }
    }
}

/// Dispatches move requests to the configured searches. Holds no game state.
#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    alpha_beta: AlphaBetaSearch,
    mcts: MonteCarloSearch,
}

impl StrategySelector {
    /// Builds the searches from a validated `config`.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator = PositionEvaluator::new(config.weights.clone())?;
        Ok(Self {
            alpha_beta: AlphaBetaSearch::new(config.alpha_beta.clone(), evaluator),
            mcts: MonteCarloSearch::new(config.mcts.clone()),
        })
    }

    /// Computes a move for `ai` with `strategy`. `Ok(None)` means `ai` has to pass.
    pub fn best_move<R: RandomGenerator>(
        &self,
        board: GameBoard<'_>,
        ai: Symbol,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<Option<Position>, SearchError> {
        self.best_move_within(board, ai, strategy, rng, &SearchLimits::none())
    }

    /// Like [`best_move`](Self::best_move), giving up once `limits` expire.
    pub fn best_move_within<R: RandomGenerator>(
        &self,
        board: GameBoard<'_>,
        ai: Symbol,
        strategy: Strategy,
        rng: &mut R,
        limits: &SearchLimits,
    ) -> Result<Option<Position>, SearchError> {
        let game = board.game();
        debug!(?game, ?strategy, %ai, "dispatching search");

        match (board, strategy) {
            (GameBoard::TicTacToe(b), Strategy::Exhaustive) => {
                Ok(exhaustive::search(b, ai, ai.opponent(), limits)?.best_move)
            }
            (GameBoard::TicTacToe(b), Strategy::MonteCarlo) => {
                Ok(self.mcts.search(b, ai, rng, limits).best_move)
            }
            (GameBoard::Reversi(b), Strategy::AlphaBeta) => {
                Ok(self.alpha_beta.search(b, ai, limits)?.best_move)
            }
            (GameBoard::Reversi(b), Strategy::MonteCarlo) => {
                Ok(self.mcts.search(b, ai, rng, limits).best_move)
            }
            _ => Err(SearchError::Unsupported { game, strategy }),
        }
    }
}

/// Full-depth minimax move for `ai`, `None` if no cell is free.
pub fn best_move_exhaustive<B: Board>(
    board: &mut B,
    ai: Symbol,
    opponent: Symbol,
) -> Option<Position> {
    exhaustive::best_move(board, ai, opponent)
}

/// Alpha-beta move for `ai` with default depth and weights, `None` for a pass.
pub fn best_move_alpha_beta(board: &mut ReversiBoard, ai: Symbol) -> Option<Coord> {
    let pos = AlphaBetaSearch::default().find_best_move(board, ai)?;
    Some(board.grid().coord(pos))
}

/// Monte Carlo move for `ai` with the default simulation budget, `None` for a pass.
pub fn best_move_mcts<B: Board, R: RandomGenerator>(
    board: &mut B,
    ai: Symbol,
    rng: &mut R,
) -> Option<Coord> {
    let pos = MonteCarloSearch::default().best_move(board, ai, rng)?;
    Some(board.grid().coord(pos))
}
