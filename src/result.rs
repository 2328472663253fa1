use crate::board::Position;

/// Outcome of a minimax-family search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` when the searching side has no legal move.
    pub best_move: Option<Position>,
    /// Minimax value of the position from the searching side's point of view.
    pub score: i32,
    /// Nodes visited, root excluded.
    pub nodes: u64,
}
