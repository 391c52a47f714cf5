//! Legal move generation
//!
//! Forced capture: as soon as one capture is found, every non-capturing action
//! gathered so far is dropped and no further ones are emitted. Chains: each
//! capture carries the captures reachable from its landing square, found by
//! applying it temporarily. A capture that crowns a man ends the chain.

use crate::action::Action;
use crate::board::{Board, Color, Piece};
use crate::utils::{self, Direction};

impl Piece {
    /// Directions this piece may move in: forward only for men, all four for kings
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Piece::WhiteMan => &Direction::UP,
            Piece::BlackMan => &Direction::DOWN,
            Piece::WhiteKing | Piece::BlackKing => &Direction::ALL,
            Piece::Empty => &[],
        }
    }
}

/// Piece after landing on `end_pos`: men crown on the opponent's back row
fn landing_piece(piece: Piece, end_pos: usize) -> Piece {
    match piece {
        Piece::WhiteMan if utils::is_black_back_row(end_pos) => piece.crowned(),
        Piece::BlackMan if utils::is_white_back_row(end_pos) => piece.crowned(),
        _ => piece,
    }
}

impl Board {
    /// Append the legal actions of the piece on `pos` to `actions`.
    ///
    /// With `capture_only == None` the mode is taken from the accumulator: if
    /// it already holds a capture, only captures are collected.
    pub fn piece_actions<'v>(
        &mut self,
        pos: usize,
        actions: &'v mut Vec<Action>,
        capture_only: Option<bool>,
    ) -> &'v mut Vec<Action> {
        let piece = self.piece_on(pos);
        let Some(color) = piece.color() else {
            return actions;
        };
        let mut capture_only =
            capture_only.unwrap_or_else(|| actions.first().is_some_and(Action::is_capture));

        for &dir in piece.directions() {
            let Some(adjacent) = utils::step(pos, dir) else {
                continue;
            };
            match self.piece_on(adjacent).color() {
                None => {
                    if !capture_only {
                        actions.push(Action::simple(piece, pos, landing_piece(piece, adjacent), adjacent));
                    }
                }
                Some(other) if other != color => {
                    let Some((_, landing)) = utils::jump(pos, dir) else {
                        continue;
                    };
                    if self.piece_on(landing) != Piece::Empty {
                        continue;
                    }
                    if !capture_only {
                        capture_only = true;
                        actions.clear();
                    }
                    let action = self.capture_action(pos, landing, adjacent);
                    actions.push(action);
                }
                Some(_) => {}
            }
        }
        actions
    }

    fn capture_action(&mut self, start_pos: usize, end_pos: usize, capture_pos: usize) -> Action {
        let start_piece = self.piece_on(start_pos);
        let mut action = Action::capture(
            start_piece,
            start_pos,
            landing_piece(start_piece, end_pos),
            end_pos,
            self.piece_on(capture_pos),
            capture_pos,
        );
        // la promozione chiude la catena
        if !action.is_promotion() {
            let mut further = Vec::new();
            {
                let mut board = self.scoped_apply(&action);
                board.piece_actions(end_pos, &mut further, Some(true));
            }
            action.further_actions = further;
        }
        action
    }

    /// All legal actions of `color`, scanning squares in index order.
    ///
    /// If any piece can capture, the result holds captures only.
    pub fn player_actions(&mut self, color: Color) -> Vec<Action> {
        let mut actions = Vec::with_capacity(16);
        for pos in 0..utils::NUM_SQUARES {
            if self.piece_on(pos).color() == Some(color) {
                self.piece_actions(pos, &mut actions, None);
            }
        }
        actions
    }
}

/// Count the leaves of the legal action tree `depth` turns deep.
///
/// A capture that continues its chain recurses for the same side without
/// consuming depth, the same way the search does.
pub fn perft(board: &mut Board, player: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let actions = board.player_actions(player);
    perft_actions(board, player, &actions, depth)
}

fn perft_actions(board: &mut Board, player: Color, actions: &[Action], depth: u8) -> u64 {
    let mut nodes = 0;
    for action in actions {
        let mut board = board.scoped_apply(action);
        nodes += if action.continues_chain() {
            perft_actions(&mut board, player, &action.further_actions, depth)
        } else {
            perft(&mut board, !player, depth - 1)
        };
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_square_is_a_no_op() {
        let mut board = Board::new();
        let mut actions = Vec::new();
        board.piece_actions(14, &mut actions, None);
        assert!(actions.is_empty());
    }

    #[test]
    fn men_move_forward_only() {
        let mut board = Board::from_layout("..../..../..../.w../..../..../..../....").unwrap();
        let mut actions = Vec::new();
        board.piece_actions(13, &mut actions, None);
        let ends: Vec<usize> = actions.iter().map(|a| a.end_pos).collect();
        assert_eq!(ends, vec![17, 18]);
    }

    #[test]
    fn kings_move_in_four_directions() {
        let mut board = Board::from_layout("..../..../..../.W../..../..../..../....").unwrap();
        let mut actions = Vec::new();
        board.piece_actions(13, &mut actions, None);
        let ends: Vec<usize> = actions.iter().map(|a| a.end_pos).collect();
        assert_eq!(ends, vec![17, 18, 9, 10]);
        assert!(actions.iter().all(|a| a.end_piece == Piece::WhiteKing));
    }

    #[test]
    fn explicit_capture_only_skips_simple_moves() {
        let mut board = Board::from_layout("..../..../..../.W../..../..../..../....").unwrap();
        let mut actions = Vec::new();
        board.piece_actions(13, &mut actions, Some(true));
        assert!(actions.is_empty());
    }

    #[test]
    fn capture_discards_earlier_simple_moves() {
        // uomo bianco in 9 (c3): a sinistra libero, a destra nero in 13 con 18 libero
        let mut board = Board::from_layout("..../..../.w../.b../..../..../..../....").unwrap();
        let mut actions = Vec::new();
        board.piece_actions(9, &mut actions, None);
        assert_eq!(actions.len(), 1);
        assert!(actions[0].is_capture());
        assert_eq!(actions[0].capture_pos, 13);
        assert_eq!(actions[0].end_pos, 18);
    }
}
