//! Fixed-size cell array shared by both boards.

use std::fmt;

use crate::board::{Coord, Position, Symbol};
use crate::error::ParseBoardError;

/// The eight compass directions as `(row, col)` steps.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const EMPTY_CHAR: char = '.';

/// A `width × height` board stored row-major. Every cell is empty or holds one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Symbol>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Option<Symbol>] {
        &self.cells
    }

    /// Returns the occupant of `pos`, `None` for empty or out-of-range cells.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Symbol> {
        self.cells.get(pos).copied().flatten()
    }

    /// Whether `pos` is a cell of this grid.
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos < self.cells.len()
    }

    /// Whether `pos` exists and is empty.
    #[inline]
    pub fn is_free(&self, pos: Position) -> bool {
        matches!(self.cells.get(pos), Some(None))
    }

    /// Writes `symbol` into `pos` unconditionally. Out-of-range positions are ignored.
    #[inline]
    pub fn set(&mut self, pos: Position, symbol: Symbol) {
        if let Some(cell) = self.cells.get_mut(pos) {
            *cell = Some(symbol);
        }
    }

    /// Resets `pos` to empty unconditionally. Out-of-range positions are ignored.
    #[inline]
    pub fn clear(&mut self, pos: Position) {
        if let Some(cell) = self.cells.get_mut(pos) {
            *cell = None;
        }
    }

    /// Flat index of `(row, col)`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> Position {
        row * self.width + col
    }

    /// Row and column of `pos`.
    #[inline]
    pub fn coord(&self, pos: Position) -> Coord {
        Coord::new(pos / self.width, pos % self.width)
    }

    /// Steps from `pos` by `(dr, dc)`, returning `None` when the step leaves the board.
    #[inline]
    pub fn offset(&self, pos: Position, (dr, dc): (isize, isize)) -> Option<Position> {
        let Coord { row, col } = self.coord(pos);
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < self.height && col < self.width).then(|| self.index(row, col))
    }

    /// Iterates over the up-to-8 cells adjacent to `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        DIRECTIONS
            .iter()
            .filter_map(move |&dir| self.offset(pos, dir))
    }

    /// Iterates over the cells from `pos` (exclusive) to the edge in direction `dir`.
    pub fn ray(&self, pos: Position, dir: (isize, isize)) -> impl Iterator<Item = Position> + '_ {
        std::iter::successors(self.offset(pos, dir), move |&p| self.offset(p, dir))
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&c| c == Some(symbol)).count()
    }

    /// Whether no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Parses rows of `X`, `O` and `.`; whitespace between cells is ignored, blank lines skipped.
    pub fn parse(width: usize, height: usize, text: &str) -> Result<Self, ParseBoardError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != height {
            return Err(ParseBoardError::RowCount {
                expected: height,
                actual: rows.len(),
            });
        }

        let mut grid = Grid::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != width {
                return Err(ParseBoardError::RowWidth {
                    row,
                    expected: width,
                    actual: cells.len(),
                });
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let pos = grid.index(row, col);
                match ch.to_ascii_uppercase() {
                    'X' => grid.set(pos, Symbol::X),
                    'O' => grid.set(pos, Symbol::O),
                    EMPTY_CHAR => {}
                    other => return Err(ParseBoardError::InvalidCell(other)),
                }
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row
                .iter()
                .map(|c| c.map_or(EMPTY_CHAR, Symbol::as_char))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
