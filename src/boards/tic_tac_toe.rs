use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::board::{Board, Position, Symbol};
use crate::error::ParseBoardError;
use crate::grid::Grid;

/// Side length of the board.
pub const SIZE: usize = 3;

/// Every winning line as three cell indices.
pub const LINES: [[Position; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// An implementation of the `Board` trait for the game of Tic-Tac-Toe.
///
/// The board is a 3×3 grid; a move is a cell index from 0 to 8. Any free cell is legal for
/// either symbol, so the board does not track whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToeBoard {
    grid: Grid,
}

impl Default for TicTacToeBoard {
    fn default() -> Self {
        Self {
            grid: Grid::new(SIZE, SIZE),
        }
    }
}

impl TicTacToeBoard {
    /// Returns `true` if some line still holds no `symbol.opponent()` mark, so `symbol` could
    /// in principle still complete it.
    ///
    /// This is only a hint that callers may use to stop a game early. The searches never
    /// depend on it.
    pub fn win_still_possible(&self, symbol: Symbol) -> bool {
        let blocker = Some(symbol.opponent());
        LINES
            .iter()
            .any(|line| line.iter().all(|&p| self.grid.get(p) != blocker))
    }

    /// Whether neither symbol can complete a line any more.
    pub fn is_dead(&self) -> bool {
        !self.win_still_possible(Symbol::X) && !self.win_still_possible(Symbol::O)
    }
}

impl Board for TicTacToeBoard {
    type Undo = Position;

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn is_legal(&self, pos: Position, _symbol: Symbol) -> bool {
        self.grid.is_free(pos)
    }

    fn legal_moves(&self, _symbol: Symbol) -> Vec<Position> {
        (0..self.grid.len())
            .filter(|&p| self.grid.is_free(p))
            .collect()
    }

    fn do_move(&mut self, pos: Position, symbol: Symbol) -> Option<Position> {
        if !self.grid.in_bounds(pos) {
            warn!(pos, "rejected move outside the board");
            return None;
        }
        if !self.grid.is_free(pos) {
            return None;
        }
        self.grid.set(pos, symbol);
        Some(pos)
    }

    fn undo_move(&mut self, pos: Position) {
        self.grid.clear(pos);
    }

    fn is_win(&self, symbol: Symbol) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&p| self.grid.get(p) == Some(symbol)))
    }

    fn is_draw(&self) -> bool {
        self.grid.is_full() && !self.is_win(Symbol::X) && !self.is_win(Symbol::O)
    }
}

impl FromStr for TicTacToeBoard {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            grid: Grid::parse(SIZE, SIZE, s)?,
        })
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Outcome, Symbol};
    use crate::boards::tic_tac_toe::TicTacToeBoard;

    fn board(text: &str) -> TicTacToeBoard {
        text.parse().unwrap()
    }

    #[test]
    fn do_move_only_fills_empty_cells() {
        // arrange
        let mut board = TicTacToeBoard::default();

        // act
        let first = board.do_move(4, Symbol::X);
        let second = board.do_move(4, Symbol::O);

        // assert
        assert_eq!(first, Some(4));
        assert_eq!(second, None);
        assert_eq!(board.grid().get(4), Some(Symbol::X));
    }

    #[test]
    fn out_of_range_move_is_a_no_op() {
        let mut board = TicTacToeBoard::default();
        assert_eq!(board.do_move(9, Symbol::X), None);
        assert!(!board.is_free(9));
        assert_eq!(board, TicTacToeBoard::default());
    }

    #[test]
    fn every_move_round_trips() {
        let base = board("X.O\n...\n.X.");
        for pos in base.legal_moves(Symbol::O) {
            for symbol in [Symbol::X, Symbol::O] {
                let mut b = base.clone();
                let undo = b.do_move(pos, symbol).unwrap();
                b.undo_move(undo);
                assert_eq!(b, base);
            }
        }
    }

    #[test]
    fn detects_all_line_kinds() {
        assert!(board("XXX\nOO.\n...").is_win(Symbol::X));
        assert!(board("O.X\nO.X\nO..").is_win(Symbol::O));
        assert!(board("X.O\n.XO\n..X").is_win(Symbol::X));
        assert!(board("X.O\n.O.\nO.X").is_win(Symbol::O));
        assert!(!board("XO.\n...\n...").is_win(Symbol::X));
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let b = board("XOX\nXOO\nOXX");
        assert!(b.is_draw());
        assert_eq!(b.outcome(), Some(Outcome::Draw));
        assert!(b.legal_moves(Symbol::X).is_empty());
    }

    #[test]
    fn full_board_with_line_is_not_a_draw() {
        let b = board("XXX\nOOX\nXOO");
        assert!(!b.is_draw());
        assert_eq!(b.outcome(), Some(Outcome::Win(Symbol::X)));
    }

    #[test]
    fn win_still_possible_tracks_blocked_lines() {
        // arrange
        let open = board("X..\n.O.\n...");
        let dead = board("XOX\nXOO\nOX.");

        // assert
        assert!(open.win_still_possible(Symbol::X));
        assert!(open.win_still_possible(Symbol::O));
        assert!(!open.is_dead());
        assert!(!dead.win_still_possible(Symbol::X));
        assert!(!dead.win_still_possible(Symbol::O));
        assert!(dead.is_dead());
    }
}
