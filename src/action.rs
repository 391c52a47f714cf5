//! Action model: one ply of checkers, simple or capturing
//!
//! Actions are snapshots of the board they were generated from: the piece and
//! square fields describe that board only, and must never be applied to
//! another one. A capture carries the captures its piece is forced to make
//! next from the landing square (`further_actions`).

use crate::board::Piece;
use crate::utils::square_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub start_piece: Piece,
    pub start_pos: usize,
    /// Piece after the move; the crowned piece when the move promotes
    pub end_piece: Piece,
    pub end_pos: usize,
    /// `Piece::Empty` for a non-capturing move
    pub capture_piece: Piece,
    /// Jumped square; meaningless when `capture_piece` is empty
    pub capture_pos: usize,
    /// Captures available from `end_pos` right after this one. Always empty
    /// for simple moves and for captures that promote.
    pub further_actions: Vec<Action>,
}

impl Action {
    pub fn simple(start_piece: Piece, start_pos: usize, end_piece: Piece, end_pos: usize) -> Self {
        Self {
            start_piece,
            start_pos,
            end_piece,
            end_pos,
            capture_piece: Piece::Empty,
            capture_pos: end_pos,
            further_actions: Vec::new(),
        }
    }

    pub fn capture(
        start_piece: Piece,
        start_pos: usize,
        end_piece: Piece,
        end_pos: usize,
        capture_piece: Piece,
        capture_pos: usize,
    ) -> Self {
        Self {
            start_piece,
            start_pos,
            end_piece,
            end_pos,
            capture_piece,
            capture_pos,
            further_actions: Vec::new(),
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture_piece != Piece::Empty
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.end_piece != self.start_piece
    }

    /// The same piece must keep capturing after this action
    #[inline]
    pub fn continues_chain(&self) -> bool {
        self.is_capture() && !self.further_actions.is_empty()
    }

    /// Number of distinct complete capture paths starting with this action
    pub fn chain_count(&self) -> usize {
        if self.further_actions.is_empty() {
            1
        } else {
            self.further_actions.iter().map(Action::chain_count).sum()
        }
    }
}

// Notazione: "c3-d4" per le mosse semplici, "c3xe5" per le prese, "=K" se promuove
impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", square_name(self.start_pos), sep, square_name(self.end_pos))?;
        if self.is_promotion() {
            write!(f, "=K")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation() {
        let simple = Action::simple(Piece::WhiteMan, 9, Piece::WhiteMan, 13);
        assert_eq!(simple.to_string(), "c3-d4");
        assert!(!simple.is_capture());
        assert!(!simple.continues_chain());

        let jump = Action::capture(Piece::WhiteMan, 22, Piece::WhiteKing, 29, Piece::BlackMan, 26);
        assert_eq!(jump.to_string(), "f6xd8=K");
        assert!(jump.is_capture());
        assert!(jump.is_promotion());
        assert_eq!(jump.chain_count(), 1);
    }
}
