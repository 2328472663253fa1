use std::time::Instant;

use ego_tree::{NodeId, Tree};
use tracing::{debug, trace, warn};

use crate::board::{Board, Outcome, Position, Symbol};
use crate::config::MctsConfig;
use crate::guard::MovePath;
use crate::limits::SearchLimits;
use crate::mcts_node::MctsNode;
use crate::random::RandomGenerator;

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// Each call to [`search`](Self::search) builds a fresh tree, runs the configured number of
/// simulations and throws the tree away. A simulation has four stages:
///
/// 1. **Selection**: from the root, repeatedly pick the child with the highest UCB1 value,
///    replaying its move onto the caller's board.
/// 2. **Expansion**: on reaching a node without children, generate one child per legal reply
///    (the other side's moves, or the same side's if the other side has to pass) and step
///    into a random one.
/// 3. **Simulation**: play random moves on a private copy of the board until the game ends.
/// 4. **Backpropagation**: walk back to the root adding the result to every node on the way.
///
/// The replayed moves are undone before the next simulation, so the caller's board is left
/// as it was passed in.
///
/// Backpropagation credits each node from the point of view of the side that made its move,
/// not always the searching side. Root children are the searching side's moves, so their
/// statistics are the same under either reading.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloSearch {
    config: MctsConfig,
}

/// What a Monte Carlo search found.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsResult {
    /// The most visited root move, `None` when the searching side has no legal move.
    pub best_move: Option<Position>,
    /// Simulations actually completed; fewer than configured if the limits expired.
    pub simulations: u32,
    /// Statistics of every root child, in board order.
    pub children: Vec<MctsNode>,
}

impl MonteCarloSearch {
    /// Creates a search with the given budget and exploration constant.
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    /// The simulation budget and exploration settings.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Returns the best move for `ai`, or `None` if `ai` has to pass.
    pub fn best_move<B: Board, R: RandomGenerator>(
        &self,
        board: &mut B,
        ai: Symbol,
        rng: &mut R,
    ) -> Option<Position> {
        self.search(board, ai, rng, &SearchLimits::none()).best_move
    }

    /// Runs up to the configured number of simulations.
    ///
    /// If `limits` expire first, the answer is built from the simulations completed so far.
    pub fn search<B: Board, R: RandomGenerator>(
        &self,
        board: &mut B,
        ai: Symbol,
        rng: &mut R,
        limits: &SearchLimits,
    ) -> MctsResult {
        let started = Instant::now();
        if board.legal_moves(ai).is_empty() {
            debug!(%ai, "no legal move, passing");
            return MctsResult {
                best_move: None,
                simulations: 0,
                children: Vec::new(),
            };
        }

        let mut tree = Tree::new(MctsNode::root(ai));
        let root_id = tree.root().id();
        expand(&mut tree, root_id, board);

        let mut simulations = 0;
        while simulations < self.config.simulations {
            if limits.is_expired() {
                warn!(
                    simulations,
                    budget = self.config.simulations,
                    "monte carlo search stopped early"
                );
                break;
            }
            self.run_simulation(&mut tree, board, rng);
            simulations += 1;
        }

        let children: Vec<MctsNode> = tree.root().children().map(|c| c.value().clone()).collect();
        let best_move = most_visited(&children);
        debug!(
            best_move = ?best_move,
            simulations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "monte carlo search complete"
        );

        MctsResult {
            best_move,
            simulations,
            children,
        }
    }

    /// One select/expand/simulate/backpropagate round.
    fn run_simulation<B: Board, R: RandomGenerator>(
        &self,
        tree: &mut Tree<MctsNode>,
        board: &mut B,
        rng: &mut R,
    ) {
        let mut path = MovePath::new(board);
        let mut id = tree.root().id();

        // Selection
        while let Some(child) = self.select_child(tree, id) {
            descend(tree, child, &mut path);
            id = child;
        }

        // Expansion
        if tree.get(id).is_some_and(|n| !n.value().expanded) {
            let children = expand(tree, id, &*path);
            if let Some(&child) = rng.choose(&children) {
                descend(tree, child, &mut path);
                id = child;
            }
        }

        // Simulation
        let Some(last) = tree.get(id).map(|n| n.value().player) else {
            return;
        };
        let outcome = rollout(&*path, last, rng);
        trace!(depth = path.depth(), ?outcome, "simulation finished");

        // Backpropagation
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(mut node) = tree.get_mut(current) else {
                break;
            };
            let stats = node.value();
            stats.visits += 1;
            stats.score += reward(outcome, stats.player);
            cursor = node.parent().map(|p| p.id());
        }
    }

    /// Selects the child of `id` with the highest UCB1 value, first one on ties.
    fn select_child(&self, tree: &Tree<MctsNode>, id: NodeId) -> Option<NodeId> {
        let node = tree.get(id)?;
        let parent_visits = node.value().visits;

        let mut best = None;
        let mut best_ucb = f64::NEG_INFINITY;
        for child in node.children() {
            let ucb = ucb_value(parent_visits, child.value(), self.config.exploration);
            if best.is_none() || ucb > best_ucb {
                best_ucb = ucb;
                best = Some(child.id());
            }
        }
        best
    }
}

/// Replays the move of `child` onto the path.
fn descend<B: Board>(tree: &Tree<MctsNode>, child: NodeId, path: &mut MovePath<'_, B>) {
    let Some(node) = tree.get(child) else {
        return;
    };
    if let Some(mv) = node.value().mv {
        let applied = path.push(mv, node.value().player);
        debug_assert!(applied, "tree move {mv} must be legal on the replayed board");
    }
}

/// Generates the children of `id` for the position on `board`. Returns their ids, none for a
/// finished game.
fn expand<B: Board>(tree: &mut Tree<MctsNode>, id: NodeId, board: &B) -> Vec<NodeId> {
    let Some(mut node) = tree.get_mut(id) else {
        return Vec::new();
    };
    node.value().expanded = true;
    if board.outcome().is_some() {
        return Vec::new();
    }

    let last = node.value().player;
    let (side, moves) = next_moves(board, last);
    moves
        .into_iter()
        .map(|mv| node.append(MctsNode::new(mv, side)).id())
        .collect()
}

/// The side to move after `last` and its legal moves. When the other side has no move it
/// passes and `last` moves again.
pub(crate) fn next_moves<B: Board>(board: &B, last: Symbol) -> (Symbol, Vec<Position>) {
    let next = last.opponent();
    let moves = board.legal_moves(next);
    if moves.is_empty() {
        (last, board.legal_moves(last))
    } else {
        (next, moves)
    }
}

/// Plays uniformly random moves on a copy of `board` until the game ends or both sides pass.
fn rollout<B: Board, R: RandomGenerator>(board: &B, last: Symbol, rng: &mut R) -> Option<Outcome> {
    let mut sim = board.clone();
    let mut side = last.opponent();
    let mut passes = 0;
    loop {
        if let Some(outcome) = sim.outcome() {
            return Some(outcome);
        }
        let moves = sim.legal_moves(side);
        match rng.choose(&moves) {
            Some(&pos) => {
                // the copy is discarded, no need to keep undo records
                let _ = sim.do_move(pos, side);
                passes = 0;
            }
            None => {
                passes += 1;
                if passes >= 2 {
                    return sim.outcome();
                }
            }
        }
        side = side.opponent();
    }
}

/// Result of a simulation from `player`'s point of view.
fn reward(outcome: Option<Outcome>, player: Symbol) -> f64 {
    match outcome {
        Some(Outcome::Win(winner)) if winner == player => 1.0,
        Some(Outcome::Win(_)) => 0.0,
        Some(Outcome::Draw) | None => 0.5,
    }
}

/// Calculates the UCB1 (Upper Confidence Bound 1) value for a node.
fn ucb_value(parent_visits: u32, node: &MctsNode, exploration: f64) -> f64 {
    if node.visits == 0 {
        f64::INFINITY
    } else {
        node.win_rate()
            + exploration * f64::sqrt(f64::ln(parent_visits as f64) / (node.visits as f64))
    }
}

/// The most visited node's move. Visit counts are steadier than win rates.
fn most_visited(children: &[MctsNode]) -> Option<Position> {
    let mut best: Option<&MctsNode> = None;
    for child in children {
        if best.is_none_or(|b| child.visits > b.visits) {
            best = Some(child);
        }
    }
    best.and_then(|b| b.mv)
}
