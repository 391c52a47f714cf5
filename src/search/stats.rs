//! Search statistics and performance metrics
//!
//! Tracks nodes visited, leaf evaluations, cutoffs, tie re-searches and
//! timing information.

use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes searched
    pub nodes: u64,

    /// Nodes evaluated statically (depth exhausted or terminal)
    pub leaf_evals: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Root children searched again with an open window to confirm a tie
    pub tie_researches: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and calculate NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    /// Increment node count
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    /// Increment leaf evaluation count
    pub fn inc_leaf_eval(&mut self) {
        self.leaf_evals += 1;
    }

    /// Increment cutoff count
    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    /// Increment tie re-search count
    pub fn inc_tie_research(&mut self) {
        self.tie_researches += 1;
    }

    /// Add the counters of a worker's search
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaf_evals += other.leaf_evals;
        self.cutoffs += other.cutoffs;
        self.tie_researches += other.tie_researches;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Print formatted summary
    pub fn print_summary(&self) {
        println!("=== Search Statistics ===");
        println!("Nodes searched: {}", self.nodes);
        println!(
            "Leaf evaluations: {} ({:.1}%)",
            self.leaf_evals,
            if self.nodes > 0 {
                (self.leaf_evals as f64 / self.nodes as f64) * 100.0
            } else {
                0.0
            }
        );
        println!("Alpha-Beta cutoffs: {}", self.cutoffs);
        println!("Tie re-searches: {}", self.tie_researches);
        println!("Search time: {} ms", self.search_time.as_millis());
        println!("Nodes per second: {}", self.nps);
    }
}
