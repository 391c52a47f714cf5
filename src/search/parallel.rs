//! Root-split parallel search
//!
//! Root actions are dealt round-robin to scoped worker threads. Each worker
//! owns a clone of the board, since apply/unapply mutates it in place, and
//! scores its actions with an open window, so the merged utilities are exact
//! and the caller can pick among ties exactly as the sequential search does.

use super::params::SearchParams;
use super::search::Search;
use super::stats::SearchStats;
use crate::action::Action;
use crate::board::{Board, Color};
use crate::eval::Evaluator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;

/// Exact utility of every root action, in order, plus the workers' merged statistics
pub fn root_utilities<E: Evaluator>(
    evaluator: &E,
    params: &SearchParams,
    board: &Board,
    player: Color,
    actions: &[Action],
    depth: u8,
) -> (Vec<f64>, SearchStats) {
    let workers = params.threads.clamp(1, actions.len().max(1));
    let mut utilities = vec![0.0; actions.len()];
    let mut stats = SearchStats::new();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let mut board = board.clone();
                let params = params.clone().threads(1);
                scope.spawn(move || {
                    // il generatore non viene usato: i pareggi si risolvono nel chiamante
                    let mut search = Search::with_parts(evaluator, params, StdRng::seed_from_u64(worker as u64));
                    let scored: Vec<(usize, f64)> = (worker..actions.len())
                        .step_by(workers)
                        .map(|i| (i, search.action_utility(&mut board, player, &actions[i], depth)))
                        .collect();
                    (scored, search.stats().clone())
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok((scored, worker_stats)) => {
                    for (i, utility) in scored {
                        utilities[i] = utility;
                    }
                    stats.merge(&worker_stats);
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    (utilities, stats)
}
