pub mod action;
pub mod board;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod search;
pub mod utils;

pub use action::Action;
pub use board::{Board, Color, Piece, START_LAYOUT};
pub use error::{BoardError, SearchError};
pub use eval::{evaluate, EvalWeights, Evaluator, Heuristic};
pub use movegen::perft;
pub use search::{Search, SearchParams, SearchStats, Turn};
