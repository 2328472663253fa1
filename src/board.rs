use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::guard::MoveGuard;

/// A flat cell index into a board, `row * width + col`.
pub type Position = usize;

/// The central trait of the library, defining the interface for a game state.
///
/// Boards are mutated in place. Every search pairs a `do_move` with exactly one later
/// `undo_move` of the record it returned, so a completed search leaves the board identical
/// to its input. The searches never call the two directly; they go through [`MoveGuard`] and
/// [`MovePath`](crate::guard::MovePath), which revert on drop.
pub trait Board: Clone {
    /// What `do_move` hands back so the move can be reverted exactly.
    type Undo;

    /// The underlying cell array.
    fn grid(&self) -> &Grid;

    /// Whether `symbol` may play at `pos` right now.
    fn is_legal(&self, pos: Position, symbol: Symbol) -> bool;

    /// Returns all legal positions for `symbol`, in ascending order.
    fn legal_moves(&self, symbol: Symbol) -> Vec<Position>;

    /// Applies a move. Returns `None` and leaves the board untouched if the move is not legal.
    fn do_move(&mut self, pos: Position, symbol: Symbol) -> Option<Self::Undo>;

    /// Reverts a move previously applied by `do_move`.
    ///
    /// Callers must only revert records produced by their own `do_move`, newest first.
    fn undo_move(&mut self, undo: Self::Undo);

    /// Whether `symbol` has won.
    fn is_win(&self, symbol: Symbol) -> bool;

    /// Whether the game ended without a winner.
    fn is_draw(&self) -> bool;

    /// Returns `true` if the cell exists and is empty.
    fn is_free(&self, pos: Position) -> bool {
        self.grid().is_free(pos)
    }

    /// Returns the current outcome of the game, `None` while it is still in progress.
    fn outcome(&self) -> Option<Outcome> {
        if self.is_win(Symbol::X) {
            Some(Outcome::Win(Symbol::X))
        } else if self.is_win(Symbol::O) {
            Some(Outcome::Win(Symbol::O))
        } else if self.is_draw() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Applies a move and returns a guard that reverts it when dropped.
    fn play(&mut self, pos: Position, symbol: Symbol) -> Option<MoveGuard<'_, Self>> {
        MoveGuard::new(self, pos, symbol)
    }
}

/// One of the two player symbols. In Reversi `X` plays black and moves first.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Returns the other symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Character used in the text form of a board.
    pub fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Represents the possible outcomes of a finished game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Outcome {
    Win(Symbol),
    Draw,
}

/// A row/column pair, the shape the Reversi entry points return.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert_eq!(Symbol::O.opponent(), Symbol::X);
        assert_eq!(Symbol::X.opponent().opponent(), Symbol::X);
    }

    #[test]
    fn symbols_render_as_letters() {
        assert_eq!(Symbol::X.to_string(), "X");
        assert_eq!(Symbol::O.to_string(), "O");
        assert_eq!(Coord::new(2, 5).to_string(), "(2, 5)");
    }
}
