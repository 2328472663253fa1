//! Static evaluation of Reversi positions.
//!
//! The score is a weighted sum of five terms, each a difference between the two sides:
//! - positional weight of every occupied cell
//! - mobility (legal move count)
//! - corner ownership
//! - stable discs (every ray to the edge is same-coloured)
//! - frontier discs (next to an empty cell), subtracted
//!
//! When neither side can move the position is scored as final instead.
//!
//! [`EvalWeights`] is the only definition of these constants. The alpha-beta search borrows
//! its move-ordering bonuses from here as well.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position, Symbol};
use crate::boards::reversi::{CORNERS, ReversiBoard, SIZE};
use crate::error::ConfigError;
use crate::grid::{DIRECTIONS, Grid};

/// Number of cells the positional table must cover.
pub const TABLE_LEN: usize = SIZE * SIZE;

/// Every score the evaluator produces stays strictly inside `-SCORE_LIMIT..SCORE_LIMIT`.
pub const SCORE_LIMIT: i32 = i32::MAX / 2;

#[rustfmt::skip]
const POSITIONAL: [i32; TABLE_LEN] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

/// Heuristic weights for Reversi evaluation and move ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Row-major per-cell weights, `TABLE_LEN` entries.
    pub positional: Vec<i32>,
    /// Multiplier for the legal-move count difference.
    pub mobility: i32,
    /// Multiplier for the corner count difference.
    pub corner: i32,
    /// Multiplier for the stable disc difference.
    pub stability: i32,
    /// Multiplier for the frontier disc difference. Subtracted.
    pub frontier: i32,
    /// Base score of a decided game, added to the final disc margin.
    pub terminal: i32,
    /// Move ordering: bonus for taking a corner.
    pub order_corner: i32,
    /// Move ordering: penalty for a cell touching a corner.
    pub order_corner_adjacent: i32,
    /// Move ordering: bonus for any other edge cell.
    pub order_edge: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            positional: POSITIONAL.to_vec(),
            mobility: 10,
            corner: 50,
            stability: 5,
            frontier: 3,
            terminal: 10_000,
            order_corner: 1_000,
            order_corner_adjacent: 500,
            order_edge: 50,
        }
    }
}

impl EvalWeights {
    /// Checks the table length and that no reachable score can leave `±SCORE_LIMIT`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.positional.len() != TABLE_LEN {
            return Err(ConfigError::InvalidWeights {
                expected: TABLE_LEN,
                actual: self.positional.len(),
            });
        }

        let non_negative = [
            ("mobility", self.mobility),
            ("corner", self.corner),
            ("stability", self.stability),
            ("frontier", self.frontier),
            ("terminal", self.terminal),
            ("order_corner", self.order_corner),
            ("order_corner_adjacent", self.order_corner_adjacent),
            ("order_edge", self.order_edge),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0) {
            return Err(ConfigError::InvalidValue(format!(
                "weights.{name} must not be negative, got {value}"
            )));
        }

        let cells = TABLE_LEN as i64;
        let limit = i64::from(SCORE_LIMIT);
        if i64::from(self.terminal) + cells >= limit {
            return Err(ConfigError::InvalidValue(format!(
                "weights.terminal must stay below {}, got {}",
                limit - cells,
                self.terminal
            )));
        }

        let max_positional = self
            .positional
            .iter()
            .map(|w| i64::from(*w).abs())
            .max()
            .unwrap_or(0);
        let heuristic = cells * max_positional
            + cells * i64::from(self.mobility)
            + CORNERS.len() as i64 * i64::from(self.corner)
            + cells * (i64::from(self.stability) + i64::from(self.frontier));
        if heuristic >= limit {
            return Err(ConfigError::InvalidValue(format!(
                "heuristic weights can reach {heuristic}, must stay below {limit}"
            )));
        }

        let ordering = max_positional
            + i64::from(self.order_corner).max(i64::from(self.order_corner_adjacent))
            + i64::from(self.order_edge);
        if ordering >= limit {
            return Err(ConfigError::InvalidValue(format!(
                "move-ordering weights can reach {ordering}, must stay below {limit}"
            )));
        }
        Ok(())
    }
}

/// Scores Reversi positions. Stateless apart from its weights; never mutates the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionEvaluator {
    weights: EvalWeights,
}

impl PositionEvaluator {
    /// Wraps validated `weights`.
    pub fn new(weights: EvalWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// The weights in use.
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Scores `board` for `ai`. Positive values favour `ai`.
    pub fn evaluate(&self, board: &ReversiBoard, ai: Symbol, opponent: Symbol) -> i32 {
        let ai_moves = board.legal_moves(ai).len() as i32;
        let opponent_moves = board.legal_moves(opponent).len() as i32;
        if ai_moves == 0 && opponent_moves == 0 {
            return self.terminal_score(board, ai, opponent);
        }

        let grid = board.grid();
        let w = &self.weights;

        let positional = self.positional(grid, ai, opponent);
        let mobility = (ai_moves - opponent_moves) * w.mobility;
        let corners = (corner_count(grid, ai) - corner_count(grid, opponent)) * w.corner;
        let stability = (stable_count(grid, ai) - stable_count(grid, opponent)) * w.stability;
        let frontier = (frontier_count(grid, ai) - frontier_count(grid, opponent)) * w.frontier;

        positional + mobility + corners + stability - frontier
    }

    /// Score of a finished game: `±(terminal + margin)`, or 0 on an exact tie.
    pub fn terminal_score(&self, board: &ReversiBoard, ai: Symbol, opponent: Symbol) -> i32 {
        let margin = board.count(ai) as i32 - board.count(opponent) as i32;
        match margin {
            0 => 0,
            m if m > 0 => self.weights.terminal.saturating_add(m),
            m => -self.weights.terminal.saturating_sub(m),
        }
    }

    /// Cheap static priority of playing at `pos`, used only to order candidate moves.
    pub fn move_order_score(&self, pos: Position) -> i32 {
        let w = &self.weights;
        let row = pos / SIZE;
        let col = pos % SIZE;
        let mut score = w.positional.get(pos).copied().unwrap_or(0);

        if CORNERS.contains(&pos) {
            score += w.order_corner;
        } else if is_corner_adjacent(row, col) {
            score -= w.order_corner_adjacent;
        } else if row == 0 || col == 0 || row == SIZE - 1 || col == SIZE - 1 {
            score += w.order_edge;
        }
        score
    }

    fn positional(&self, grid: &Grid, ai: Symbol, opponent: Symbol) -> i32 {
        grid.cells()
            .iter()
            .zip(&self.weights.positional)
            .map(|(&cell, &weight)| match cell {
                Some(s) if s == ai => weight,
                Some(s) if s == opponent => -weight,
                _ => 0,
            })
            .sum()
    }
}

fn is_corner_adjacent(row: usize, col: usize) -> bool {
    let near = |v: usize| v <= 1 || v >= SIZE - 2;
    near(row) && near(col)
}

fn corner_count(grid: &Grid, symbol: Symbol) -> i32 {
    CORNERS
        .iter()
        .filter(|&&p| grid.get(p) == Some(symbol))
        .count() as i32
}

/// Discs of `symbol` whose every ray to the edge holds only `symbol`.
pub(crate) fn stable_count(grid: &Grid, symbol: Symbol) -> i32 {
    discs(grid, symbol)
        .filter(|&p| {
            DIRECTIONS
                .iter()
                .all(|&dir| grid.ray(p, dir).all(|q| grid.get(q) == Some(symbol)))
        })
        .count() as i32
}

/// Discs of `symbol` with at least one empty neighbour.
pub(crate) fn frontier_count(grid: &Grid, symbol: Symbol) -> i32 {
    discs(grid, symbol)
        .filter(|&p| grid.neighbors(p).any(|q| grid.is_free(q)))
        .count() as i32
}

fn discs(grid: &Grid, symbol: Symbol) -> impl Iterator<Item = Position> + '_ {
    (0..grid.len()).filter(move |&p| grid.get(p) == Some(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ReversiBoard {
        text.parse().unwrap()
    }

    fn stuck_five_to_three() -> ReversiBoard {
        parse(
            "
            X......X
            ........
            ........
            ...X..O.
            ........
            .....O..
            ........
            X..O...X",
        )
    }

    #[test]
    fn opening_position_is_balanced() {
        let evaluator = PositionEvaluator::default();
        let board = ReversiBoard::default();
        assert_eq!(evaluator.evaluate(&board, Symbol::X, Symbol::O), 0);
        assert_eq!(evaluator.evaluate(&board, Symbol::O, Symbol::X), 0);
    }

    #[test]
    fn non_terminal_scores_are_antisymmetric() {
        // arrange
        let evaluator = PositionEvaluator::default();
        let mut board = ReversiBoard::default();
        board.do_move(19, Symbol::X).unwrap();
        board.do_move(18, Symbol::O).unwrap();

        // act
        let for_x = evaluator.evaluate(&board, Symbol::X, Symbol::O);
        let for_o = evaluator.evaluate(&board, Symbol::O, Symbol::X);

        // assert
        assert_ne!(for_x, 0);
        assert_eq!(for_x, -for_o);
    }

    #[test]
    fn stuck_position_gets_terminal_score() {
        let evaluator = PositionEvaluator::default();
        let board = stuck_five_to_three();
        assert_eq!(evaluator.evaluate(&board, Symbol::X, Symbol::O), 10_002);
        assert_eq!(evaluator.evaluate(&board, Symbol::O, Symbol::X), -10_002);
    }

    #[test]
    fn full_board_gets_terminal_score() {
        // 33 to 31
        let mut text = "XXXXXXXX\n".repeat(4);
        text.push_str("XOOOOOOO\n");
        text.push_str(&"OOOOOOOO\n".repeat(3));
        let board = parse(&text);

        assert_eq!(board.count(Symbol::X), 33);
        let evaluator = PositionEvaluator::default();
        assert_eq!(evaluator.evaluate(&board, Symbol::X, Symbol::O), 10_002);
    }

    #[test]
    fn tie_scores_zero() {
        let board = parse(
            "
            X.......
            ........
            ........
            ........
            ........
            ........
            ........
            .......O",
        );
        let evaluator = PositionEvaluator::default();
        assert_eq!(evaluator.terminal_score(&board, Symbol::X, Symbol::O), 0);
        assert_eq!(evaluator.evaluate(&board, Symbol::X, Symbol::O), 0);
    }

    #[test]
    fn stability_needs_every_ray_filled() {
        let full = parse(&"XXXXXXXX\n".repeat(SIZE));
        assert_eq!(stable_count(full.grid(), Symbol::X), 64);

        let mut holed = "XXXXXXXX\n".repeat(SIZE);
        // (3, 3) lies at offset 3 * 9 + 3 in the text
        holed.replace_range(30..31, ".");
        let holed = parse(&holed);
        assert_eq!(holed.count(Symbol::X), 63);
        assert_eq!(stable_count(holed.grid(), Symbol::X), 36);
    }

    #[test]
    fn opening_discs_are_all_frontier() {
        let board = ReversiBoard::default();
        assert_eq!(frontier_count(board.grid(), Symbol::X), 2);
        assert_eq!(frontier_count(board.grid(), Symbol::O), 2);
        assert_eq!(stable_count(board.grid(), Symbol::X), 0);
    }

    #[test]
    fn move_ordering_prefers_corners_and_avoids_their_neighbours() {
        let evaluator = PositionEvaluator::default();
        let corner = evaluator.move_order_score(0);
        let x_square = evaluator.move_order_score(9);
        let c_square = evaluator.move_order_score(1);
        let edge = evaluator.move_order_score(3);
        let center = evaluator.move_order_score(27);

        assert!(corner > edge);
        assert!(edge > center);
        assert!(center > c_square);
        assert!(c_square > x_square);
    }

    #[test]
    fn terminal_score_saturates_instead_of_overflowing() {
        // arrange
        let evaluator = PositionEvaluator {
            weights: EvalWeights {
                terminal: i32::MAX,
                ..EvalWeights::default()
            },
        };

        // act
        let board = stuck_five_to_three();

        // assert
        assert_eq!(evaluator.terminal_score(&board, Symbol::X, Symbol::O), i32::MAX);
        assert_eq!(evaluator.terminal_score(&board, Symbol::O, Symbol::X), -i32::MAX);
    }

    #[test]
    fn weights_that_can_leave_the_score_range_are_rejected() {
        let too_big_terminal = EvalWeights {
            terminal: i32::MAX,
            ..EvalWeights::default()
        };
        let negative_mobility = EvalWeights {
            mobility: -1,
            ..EvalWeights::default()
        };
        let huge_table = EvalWeights {
            positional: vec![SCORE_LIMIT / 32; TABLE_LEN],
            ..EvalWeights::default()
        };

        for weights in [too_big_terminal, negative_mobility, huge_table] {
            assert!(matches!(
                PositionEvaluator::new(weights),
                Err(ConfigError::InvalidValue(_))
            ));
        }
        assert!(EvalWeights::default().validate().is_ok());
    }

    #[test]
    fn short_table_is_rejected() {
        let weights = EvalWeights {
            positional: vec![0; 10],
            ..EvalWeights::default()
        };
        assert!(matches!(
            PositionEvaluator::new(weights),
            Err(ConfigError::InvalidWeights {
                expected: 64,
                actual: 10
            })
        ));
    }
}
