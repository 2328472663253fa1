use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::board::{Board, Outcome, Position, Symbol};
use crate::error::ParseBoardError;
use crate::grid::{DIRECTIONS, Grid};

/// Side length of the board.
pub const SIZE: usize = 8;

/// The four corner cells.
pub const CORNERS: [Position; 4] = [0, SIZE - 1, SIZE * (SIZE - 1), SIZE * SIZE - 1];

/// Everything needed to take a Reversi move back: the placed disc and every disc it flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversiUndo {
    pub pos: Position,
    pub flipped: Vec<Position>,
}

/// An 8×8 Reversi board.
///
/// A move is legal when the cell is empty and brackets at least one straight run of opposing
/// discs between the new disc and another disc of the mover's colour. The game is over when
/// neither side has a legal move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReversiBoard {
    grid: Grid,
}

impl Default for ReversiBoard {
    /// Creates the standard starting position: `O` on d4/e5, `X` on d5/e4.
    fn default() -> Self {
        let mut grid = Self::empty().grid;
        grid.set(grid.index(3, 3), Symbol::O);
        grid.set(grid.index(4, 4), Symbol::O);
        grid.set(grid.index(3, 4), Symbol::X);
        grid.set(grid.index(4, 3), Symbol::X);
        Self { grid }
    }
}

impl ReversiBoard {
    /// Creates a board with no discs at all.
    pub fn empty() -> Self {
        Self {
            grid: Grid::new(SIZE, SIZE),
        }
    }

    /// Number of discs of `symbol` on the board.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.grid.count(symbol)
    }

    /// Whether neither side has a legal move.
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move(Symbol::X) && !self.has_legal_move(Symbol::O)
    }

    /// Cheaper than `!legal_moves(symbol).is_empty()`: stops at the first legal move.
    pub fn has_legal_move(&self, symbol: Symbol) -> bool {
        (0..self.grid.len()).any(|p| self.is_legal(p, symbol))
    }

    /// Length of the opposing run bracketed from `pos` in direction `dir`, 0 if none.
    fn bracketed_run(&self, pos: Position, dir: (isize, isize), symbol: Symbol) -> usize {
        let opponent = Some(symbol.opponent());
        let mut run = 0;
        for p in self.grid.ray(pos, dir) {
            match self.grid.get(p) {
                cell if cell == opponent => run += 1,
                Some(_) => return run,
                None => return 0,
            }
        }
        0
    }
}

impl Board for ReversiBoard {
    type Undo = ReversiUndo;

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn is_legal(&self, pos: Position, symbol: Symbol) -> bool {
        self.grid.is_free(pos)
            && DIRECTIONS
                .iter()
                .any(|&dir| self.bracketed_run(pos, dir, symbol) > 0)
    }

    fn legal_moves(&self, symbol: Symbol) -> Vec<Position> {
        (0..self.grid.len())
            .filter(|&p| self.is_legal(p, symbol))
            .collect()
    }

    fn do_move(&mut self, pos: Position, symbol: Symbol) -> Option<ReversiUndo> {
        if !self.grid.in_bounds(pos) {
            warn!(pos, "rejected move outside the board");
            return None;
        }
        if !self.grid.is_free(pos) {
            return None;
        }

        let mut flipped = Vec::new();
        for dir in DIRECTIONS {
            let run = self.bracketed_run(pos, dir, symbol);
            flipped.extend(self.grid.ray(pos, dir).take(run));
        }
        if flipped.is_empty() {
            return None;
        }

        self.grid.set(pos, symbol);
        for &p in &flipped {
            self.grid.set(p, symbol);
        }
        Some(ReversiUndo { pos, flipped })
    }

    fn undo_move(&mut self, undo: ReversiUndo) {
        let Some(mover) = self.grid.get(undo.pos) else {
            return;
        };
        let original = mover.opponent();
        for p in undo.flipped {
            self.grid.set(p, original);
        }
        self.grid.clear(undo.pos);
    }

    fn is_win(&self, symbol: Symbol) -> bool {
        self.is_game_over() && self.count(symbol) > self.count(symbol.opponent())
    }

    fn is_draw(&self) -> bool {
        self.is_game_over() && self.count(Symbol::X) == self.count(Symbol::O)
    }

    fn outcome(&self) -> Option<Outcome> {
        if !self.is_game_over() {
            return None;
        }
        let (x, o) = (self.count(Symbol::X), self.count(Symbol::O));
        Some(match x.cmp(&o) {
            Ordering::Greater => Outcome::Win(Symbol::X),
            Ordering::Less => Outcome::Win(Symbol::O),
            Ordering::Equal => Outcome::Draw,
        })
    }
}

impl FromStr for ReversiBoard {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            grid: Grid::parse(SIZE, SIZE, s)?,
        })
    }
}

impl fmt::Display for ReversiBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
