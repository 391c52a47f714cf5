//! Modulo di valutazione - euristica posizionale
//!
//! Utility is signed from White's point of view: positive favours White,
//! `+inf`/`-inf` mark a decided game. Per occupied square:
//!
//! - a man is worth `S0 + (S1 - S0) * (d / 7)^Sp`, `d` being the rows it has
//!   advanced from its own back row, plus a bonus for friendly men covering it
//!   from behind (1 → `P0`, 2 → `P1`);
//! - a king is worth `D0 + (D1 - D0) * (e / 3)^Dp`, `e` being its distance
//!   to the nearest edge.
//!
//! A back-row term `B0 * (w/4)^Bp - B0 * (b/4)^Bp` rewards each side for the
//! share of its own back row still held by its men.

use crate::board::{Board, Color, Piece};
use crate::utils::{self, Direction, NUM_SQUARES};

/// Static evaluation used by the search
pub trait Evaluator: Sync {
    /// Signed utility, positive favours White
    fn evaluate(&self, board: &Board) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, board: &Board) -> f64 {
        (**self).evaluate(board)
    }
}

/// Tunable constants of the heuristic
#[derive(Debug, Clone, PartialEq)]
pub struct EvalWeights {
    /// Man on its own back row
    pub man_base: f64,
    /// Man one step from crowning
    pub man_advanced: f64,
    pub man_exponent: f64,
    /// Bonus for one friendly man behind
    pub protection_single: f64,
    /// Bonus for two friendly men behind
    pub protection_double: f64,
    /// King on an edge square
    pub king_edge: f64,
    /// King in the centre
    pub king_centre: f64,
    pub king_exponent: f64,
    pub back_row: f64,
    pub back_row_exponent: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            man_base: 2.0,
            man_advanced: 3.5,
            man_exponent: 0.66,
            protection_single: 1.0,
            protection_double: 3.0,
            king_edge: 5.0,
            king_centre: 6.0,
            king_exponent: 0.66,
            back_row: 12.0,
            back_row_exponent: 2.0,
        }
    }
}

/// The default positional evaluator
#[derive(Debug, Clone, Default)]
pub struct Heuristic {
    pub weights: EvalWeights,
}

impl Heuristic {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    fn man_value(&self, pos: usize, color: Color) -> f64 {
        let w = &self.weights;
        let advanced = match color {
            Color::White => utils::row(pos),
            Color::Black => 7 - utils::row(pos),
        };
        w.man_base + (w.man_advanced - w.man_base) * (advanced as f64 / 7.0).powf(w.man_exponent)
    }

    fn king_value(&self, pos: usize) -> f64 {
        let w = &self.weights;
        let e = utils::edge_distance(pos) as f64;
        w.king_edge + (w.king_centre - w.king_edge) * (e / 3.0).powf(w.king_exponent)
    }

    fn protection_bonus(&self, board: &Board, pos: usize, color: Color) -> f64 {
        match protectors(board, pos, color) {
            1 => self.weights.protection_single,
            2 => self.weights.protection_double,
            _ => 0.0,
        }
    }

    fn back_row_term(&self, board: &Board) -> f64 {
        let w = &self.weights;
        let held = |range: std::ops::Range<usize>, man: Piece| {
            range.filter(|&pos| board.piece_on(pos) == man).count() as f64 / 4.0
        };
        let white = held(0..4, Piece::WhiteMan);
        let black = held(NUM_SQUARES - 4..NUM_SQUARES, Piece::BlackMan);
        w.back_row * white.powf(w.back_row_exponent) - w.back_row * black.powf(w.back_row_exponent)
    }
}

/// Friendly men on the two squares diagonally behind `pos`.
///
/// Uses the edge-checked neighbour functions, so edge columns and back rows
/// simply have fewer candidates.
pub fn protectors(board: &Board, pos: usize, color: Color) -> usize {
    let behind = match color {
        Color::White => Direction::DOWN,
        Color::Black => Direction::UP,
    };
    let man = Piece::man(color);
    behind
        .iter()
        .filter_map(|&dir| utils::step(pos, dir))
        .filter(|&sq| board.piece_on(sq) == man)
        .count()
}

impl Evaluator for Heuristic {
    fn evaluate(&self, board: &Board) -> f64 {
        match board.win_status() {
            Some(Color::White) => return f64::INFINITY,
            Some(Color::Black) => return f64::NEG_INFINITY,
            None => {}
        }

        let mut utility = 0.0;
        for (pos, &piece) in board.cells().iter().enumerate() {
            let Some(color) = piece.color() else {
                continue;
            };
            let value = if piece.is_king() {
                self.king_value(pos)
            } else {
                self.man_value(pos, color) + self.protection_bonus(board, pos, color)
            };
            match color {
                Color::White => utility += value,
                Color::Black => utility -= value,
            }
        }
        utility + self.back_row_term(board)
    }
}

/// Evaluate with the default weights
pub fn evaluate(board: &Board) -> f64 {
    Heuristic::default().evaluate(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn man_value_grows_with_advance() {
        let h = Heuristic::default();
        assert!((h.man_value(0, Color::White) - 2.0).abs() < EPS);
        assert!((h.man_value(28, Color::White) - 3.5).abs() < EPS);
        assert!((h.man_value(31, Color::Black) - 2.0).abs() < EPS);
        assert!((h.man_value(3, Color::Black) - 3.5).abs() < EPS);
        let mut last = 0.0;
        for row in 0..8 {
            let v = h.man_value(row * 4, Color::White);
            assert!(v > last);
            last = v;
        }
    }

    #[test]
    fn king_value_peaks_in_centre() {
        let h = Heuristic::default();
        let edge = h.king_value(utils::parse_square("a1").unwrap());
        let centre = h.king_value(utils::parse_square("d4").unwrap());
        assert!((edge - 5.0).abs() < EPS);
        assert!((centre - 6.0).abs() < EPS);
    }

    #[test]
    fn protection_at_edges_stays_on_board() {
        // colonna 0 e colonna 7, per entrambi i colori
        let board = Board::from_layout("w..w/w..w/w..w/w..w/b..b/b..b/b..b/b..b").unwrap();
        for pos in 0..NUM_SQUARES {
            if let Some(color) = board.piece_on(pos).color() {
                assert!(protectors(&board, pos, color) <= 2);
            }
        }
        // a3 (8) e' coperto solo da b2 (4)
        assert_eq!(protectors(&board, 8, Color::White), 1);
        // h4 (15) e' coperto solo da g3 (11)
        assert_eq!(protectors(&board, 15, Color::White), 1);
        assert_eq!(protectors(&board, 0, Color::White), 0);
        assert_eq!(protectors(&board, 31, Color::Black), 0);
    }

    #[test]
    fn back_row_term_is_antisymmetric() {
        let h = Heuristic::default();
        let board = Board::from_layout("wwww/..../..../..../..../..../..../bb..").unwrap();
        assert!((h.back_row_term(&board) - (12.0 - 12.0 * 0.25)).abs() < EPS);
    }
}
