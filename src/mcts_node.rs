use crate::board::{Position, Symbol};

/// Represents a single node in the Monte Carlo search tree.
///
/// A node stands for the position reached after `player` played `mv`. Its statistics are kept
/// from `player`'s point of view, so a parent choosing among its children always maximises
/// for the side that is actually choosing. Nodes hold no board; the search replays moves from
/// the root onto the caller's board instead.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsNode {
    /// The move that led here from the parent. `None` for the root.
    pub mv: Option<Position>,
    /// The side that made `mv`. For the root, the side that moved last before the search.
    pub player: Symbol,
    /// Sum of simulation results for `player`: 1 per win, 0.5 per draw.
    pub score: f64,
    /// The number of simulations that passed through this node.
    pub visits: u32,
    /// Whether the children have been generated. An expanded node without children is terminal.
    pub expanded: bool,
}

impl MctsNode {
    /// Creates an unvisited node for `player` playing `mv`.
    pub fn new(mv: Position, player: Symbol) -> Self {
        Self {
            mv: Some(mv),
            player,
            score: 0.0,
            visits: 0,
            expanded: false,
        }
    }

    /// Root node for a search where `ai` is to move.
    pub fn root(ai: Symbol) -> Self {
        Self {
            mv: None,
            player: ai.opponent(),
            score: 0.0,
            visits: 0,
            expanded: false,
        }
    }

    /// Calculates the win rate of this node, draws counting half.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / (self.visits as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_node_has_zero_win_rate() {
        let node = MctsNode::new(4, Symbol::X);
        assert_eq!(node.win_rate(), 0.0);
        assert_eq!(node.mv, Some(4));
    }

    #[test]
    fn draws_count_half() {
        // arrange
        let mut node = MctsNode::new(0, Symbol::O);

        // act
        node.visits = 4;
        node.score = 1.0 + 0.5 + 0.5;

        // assert
        assert!((node.win_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn root_belongs_to_the_side_that_just_moved() {
        let root = MctsNode::root(Symbol::X);
        assert_eq!(root.mv, None);
        assert_eq!(root.player, Symbol::O);
    }
}
