//! Error types for Damista
//!
//! Invalid layouts and mismatched actions on the board side, misuse of the
//! search on a decided game on the engine side.

use crate::board::{Color, Piece};
use thiserror::Error;

/// Errors raised while building or mutating a board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Layout string does not describe exactly 32 cells
    #[error("Invalid layout: expected 32 cells, found {found}")]
    InvalidLayoutLength { found: usize },

    /// Layout holds no piece of either side
    #[error("Invalid layout: no pieces on the board")]
    NoPieces,

    /// Unknown symbol in a layout string
    #[error("Invalid layout symbol '{symbol}' at cell {index}")]
    InvalidCell { symbol: char, index: usize },

    /// Action was not generated from the current board
    #[error("Action does not match board at square {pos}: expected {expected:?}, found {found:?}")]
    ActionMismatch {
        pos: usize,
        expected: Piece,
        found: Piece,
    },
}

/// Errors raised by the search engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Search was asked for a move on a game that is already decided
    #[error("Game is already over: {winner:?} has won")]
    GameOver { winner: Color },
}
