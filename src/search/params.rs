//! Search parameters and configuration
//!
//! Controls the depth budget, pruning, the random source used to break ties
//! and root-level parallelism.

/// Search parameters for the engine
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Default search depth in plies (turns); capture chains do not consume it
    pub max_depth: u8,

    /// Enable alpha-beta pruning (disabled = full-width minimax)
    pub alpha_beta: bool,

    /// Seed for tie-breaking (None = seeded from the OS)
    pub seed: Option<u64>,

    /// Worker threads for the root search (1 = sequential)
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            alpha_beta: true,
            seed: None,
            threads: 1,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable or disable alpha-beta pruning
    pub fn alpha_beta(mut self, enable: bool) -> Self {
        self.alpha_beta = enable;
        self
    }

    /// Fix the tie-breaking seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set number of root search threads
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}
