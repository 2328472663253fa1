//! Contains pre-made implementations of the `Board` trait for the two supported games.

/// A `Board` implementation for the 8×8 game of Reversi.
pub mod reversi;
/// A `Board` implementation for the game of Tic-Tac-Toe.
pub mod tic_tac_toe;
