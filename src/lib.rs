//! Move search for two grid games: tic-tac-toe and Reversi.
//!
//! The crate offers three searches over a shared [`Board`](board::Board) trait:
//! exhaustive minimax for games small enough to enumerate, depth-limited alpha-beta with a
//! heuristic [`PositionEvaluator`](evaluator::PositionEvaluator) for Reversi, and Monte Carlo
//! Tree Search with UCB1 selection for either game. Every search mutates the caller's board
//! in place and leaves it exactly as it was passed in.
//!
//! # Example
//!
//! ```rust
//! use board_search::board::Symbol;
//! use board_search::boards::reversi::ReversiBoard;
//! use board_search::config::MctsConfig;
//! use board_search::mcts::MonteCarloSearch;
//! use board_search::random::SeededRandomGenerator;
//! use board_search::selector::best_move_alpha_beta;
//!
//! // Create a Reversi board in the standard starting position
//! let mut board = ReversiBoard::default();
//!
//! // Ask alpha-beta for a move with default depth and weights
//! let coord = best_move_alpha_beta(&mut board, Symbol::X).unwrap();
//! println!("Alpha-beta plays {}", coord);
//!
//! // Run a small Monte Carlo search and look at the root statistics
//! let mcts = MonteCarloSearch::new(MctsConfig::default().with_simulations(100));
//! let mut rng = SeededRandomGenerator::default();
//! let result = mcts.search(&mut board, Symbol::X, &mut rng, &Default::default());
//! for child in &result.children {
//!     println!("Move: {:?} = {:.2}%", child.mv, child.win_rate() * 100.0);
//! }
//!
//! // The board is untouched
//! assert_eq!(board, ReversiBoard::default());
//! ```

/// The alpha-beta search used for Reversi.
pub mod alpha_beta;
/// Contains the `Board` trait and the shared `Symbol`, `Outcome` and `Coord` types.
pub mod board;
/// Contains pre-made implementations of the `Board` trait.
pub mod boards;
/// Search and evaluation settings, loadable from TOML.
pub mod config;
/// Error types for searches, configuration and board parsing.
pub mod error;
/// The static Reversi evaluator and its weights.
pub mod evaluator;
/// Full-depth minimax for tic-tac-toe.
pub mod exhaustive;
/// The cell array shared by both boards.
pub mod grid;
/// Guards that undo board mutations when dropped.
pub mod guard;
/// Deadlines and cancellation tokens.
pub mod limits;
/// The core Monte Carlo Tree Search implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Contains traits and implementations for random number generation.
pub mod random;
/// The result type shared by the minimax-family searches.
pub mod result;
/// Chooses and runs a search per game and strategy.
pub mod selector;
