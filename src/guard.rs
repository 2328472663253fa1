//! Scoped board mutation.
//!
//! Searches never pair `do_move`/`undo_move` by hand. A [`MoveGuard`] reverts one move when it
//! goes out of scope, which covers every exit path of a recursive call including pruning
//! cutoffs. A [`MovePath`] does the same for a whole descent, reverting newest first.

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Position, Symbol};

/// A single applied move, reverted on drop.
pub struct MoveGuard<'a, B: Board> {
    board: &'a mut B,
    undo: Option<B::Undo>,
}

impl<'a, B: Board> MoveGuard<'a, B> {
    /// Applies `symbol` at `pos`. Returns `None` without touching the board if the move is illegal.
    pub fn new(board: &'a mut B, pos: Position, symbol: Symbol) -> Option<Self> {
        let undo = board.do_move(pos, symbol)?;
        Some(Self {
            board,
            undo: Some(undo),
        })
    }
}

impl<B: Board> Deref for MoveGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: Board> DerefMut for MoveGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: Board> Drop for MoveGuard<'_, B> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.undo_move(undo);
        }
    }
}

/// A stack of applied moves over one board, all reverted in reverse order on drop.
pub struct MovePath<'a, B: Board> {
    board: &'a mut B,
    undos: Vec<B::Undo>,
}

impl<'a, B: Board> MovePath<'a, B> {
    /// Starts an empty path over `board`.
    pub fn new(board: &'a mut B) -> Self {
        Self {
            board,
            undos: Vec::new(),
        }
    }

    /// Applies a move on top of the path. Returns `false` and leaves the board untouched if illegal.
    pub fn push(&mut self, pos: Position, symbol: Symbol) -> bool {
        match self.board.do_move(pos, symbol) {
            Some(undo) => {
                self.undos.push(undo);
                true
            }
            None => false,
        }
    }

    /// Number of moves currently applied.
    pub fn depth(&self) -> usize {
        self.undos.len()
    }
}

impl<B: Board> Deref for MovePath<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: Board> Drop for MovePath<'_, B> {
    fn drop(&mut self) {
        while let Some(undo) = self.undos.pop() {
            self.board.undo_move(undo);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Symbol};
    use crate::boards::reversi::ReversiBoard;
    use crate::boards::tic_tac_toe::TicTacToeBoard;
    use crate::guard::MovePath;

    #[test]
    fn guard_reverts_on_drop() {
        // arrange
        let mut board = ReversiBoard::default();
        let before = board.clone();

        // act
        {
            let guard = board.play(19, Symbol::X).unwrap();
            assert_eq!(guard.grid().count(Symbol::X), 4);
        }

        // assert
        assert_eq!(board, before);
    }

    #[test]
    fn illegal_move_yields_no_guard() {
        let mut board = TicTacToeBoard::default();
        board.do_move(4, Symbol::X);
        let before = board.clone();

        assert!(board.play(4, Symbol::O).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn path_unwinds_newest_first() {
        // arrange
        let mut board = ReversiBoard::default();
        let before = board.clone();

        // act
        {
            let mut path = MovePath::new(&mut board);
            assert!(path.push(19, Symbol::X));
            assert!(path.push(18, Symbol::O));
            assert!(path.push(17, Symbol::X));
            assert!(!path.push(0, Symbol::O));
            assert_eq!(path.depth(), 3);
        }

        // assert
        assert_eq!(board, before);
    }
}
