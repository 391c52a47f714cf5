//! Search engine for Damista

pub mod parallel;
pub mod params;
pub mod search;
pub mod stats;

pub use self::params::SearchParams;
pub use self::search::{Search, Turn};
pub use self::stats::SearchStats;
