//! Main search engine implementation for Damista
//!
//! Depth-limited minimax with alpha-beta pruning over the move generator and
//! the evaluator. White maximises, Black minimises the same White-positive
//! utility. A capture that continues its chain is searched for the same side
//! at the same depth. Moves tied for the best utility are kept and one is
//! drawn at random.

use super::parallel;
use super::params::SearchParams;
use super::stats::SearchStats;
use crate::action::Action;
use crate::board::{Board, Color};
use crate::error::SearchError;
use crate::eval::{Evaluator, Heuristic};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Outcome of [`Search::play_turn`]
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// The side to move has no legal action and loses
    Blocked,
    /// Actions applied in order (a whole capture chain) and the win status afterwards
    Played {
        steps: Vec<Action>,
        winner: Option<Color>,
    },
}

/// Main search engine
pub struct Search<E = Heuristic, R = StdRng> {
    /// Static evaluation at the leaves
    evaluator: E,

    /// Search parameters
    params: SearchParams,

    /// Search statistics
    stats: SearchStats,

    /// Random source for tie-breaking
    rng: R,
}

fn seeded_rng(params: &SearchParams) -> StdRng {
    match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

impl Search {
    /// Create a search with the default heuristic
    pub fn new(params: SearchParams) -> Self {
        let rng = seeded_rng(&params);
        Self::with_parts(Heuristic::default(), params, rng)
    }
}

impl<E: Evaluator> Search<E, StdRng> {
    /// Create a search with a custom evaluator
    pub fn with_evaluator(evaluator: E, params: SearchParams) -> Self {
        let rng = seeded_rng(&params);
        Self::with_parts(evaluator, params, rng)
    }
}

#[inline]
fn worst(maximizing: bool) -> f64 {
    if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

#[inline]
fn improves(maximizing: bool, value: f64, utility: f64) -> bool {
    if maximizing {
        value > utility
    } else {
        value < utility
    }
}

/// Best utility for `player` and every index achieving it
fn best_of(player: Color, utilities: &[f64]) -> (f64, Vec<usize>) {
    let maximizing = player == Color::White;
    let mut utility = worst(maximizing);
    let mut best = Vec::new();
    for (i, &value) in utilities.iter().enumerate() {
        if improves(maximizing, value, utility) {
            utility = value;
            best.clear();
            best.push(i);
        } else if value == utility {
            best.push(i);
        }
    }
    (utility, best)
}

impl<E: Evaluator, R: Rng> Search<E, R> {
    /// Create a search from an evaluator, parameters and an explicit random source
    pub fn with_parts(evaluator: E, params: SearchParams, rng: R) -> Self {
        Self {
            evaluator,
            params,
            stats: SearchStats::new(),
            rng,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Get search statistics
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Choose an action for `player` among `actions`, searching `depth` turns.
    ///
    /// Fails if the game is already decided. Returns `None` for a zero depth
    /// or an empty action list. A single candidate is returned without
    /// searching. If the chosen action continues a capture chain, the caller
    /// searches again with its `further_actions` for the same player.
    pub fn best_action<'a>(
        &mut self,
        board: &mut Board,
        player: Color,
        actions: &'a [Action],
        depth: u8,
    ) -> Result<Option<&'a Action>, SearchError> {
        if let Some(winner) = board.win_status() {
            return Err(SearchError::GameOver { winner });
        }
        if depth == 0 || actions.is_empty() {
            return Ok(None);
        }
        if actions.len() == 1 {
            return Ok(actions.first());
        }

        self.stats.reset();
        self.stats.start_timing();

        let (utility, best) = if self.params.threads > 1 {
            let (utilities, worker_stats) =
                parallel::root_utilities(&self.evaluator, &self.params, board, player, actions, depth);
            self.stats.merge(&worker_stats);
            best_of(player, &utilities)
        } else {
            self.root(board, player, actions, depth)
        };

        self.stats.update_timing();

        let chosen = best.choose(&mut self.rng).map(|&i| &actions[i]);
        if let Some(action) = chosen {
            debug!(
                depth,
                utility,
                candidates = best.len(),
                nodes = self.stats.nodes,
                cutoffs = self.stats.cutoffs,
                chosen = %action,
                "search finished"
            );
        }
        Ok(chosen)
    }

    /// Utility of the position with `player` to move among `actions`
    pub fn utility(&mut self, board: &mut Board, player: Color, actions: &[Action], depth: u8) -> f64 {
        self.node(board, player, actions, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Exact utility of playing `action` (open window)
    pub fn action_utility(&mut self, board: &mut Board, player: Color, action: &Action, depth: u8) -> f64 {
        self.child(board, player, action, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Search and play one whole turn for `player`, following forced capture
    /// chains to their end.
    pub fn play_turn(&mut self, board: &mut Board, player: Color, depth: u8) -> Result<Turn, SearchError> {
        if let Some(winner) = board.win_status() {
            return Err(SearchError::GameOver { winner });
        }
        let depth = depth.max(1);
        let mut actions = board.player_actions(player);
        if actions.is_empty() {
            return Ok(Turn::Blocked);
        }

        let mut steps = Vec::new();
        while let Some(chosen) = self.best_action(board, player, &actions, depth)?.cloned() {
            board.apply(&chosen);
            trace!(action = %chosen, "applied");
            let next = if chosen.continues_chain() {
                chosen.further_actions.clone()
            } else {
                Vec::new()
            };
            steps.push(chosen);
            if next.is_empty() {
                break;
            }
            actions = next;
        }

        Ok(Turn::Played {
            steps,
            winner: board.win_status(),
        })
    }

    /// Root loop: like [`Self::node`] but keeps every action tied for best.
    fn root(&mut self, board: &mut Board, player: Color, actions: &[Action], depth: u8) -> (f64, Vec<usize>) {
        self.stats.inc_node();
        let maximizing = player == Color::White;
        let (mut alpha, mut beta) = (f64::NEG_INFINITY, f64::INFINITY);
        let mut utility = worst(maximizing);
        let mut best = Vec::new();

        for (i, action) in actions.iter().enumerate() {
            let mut value = self.child(board, player, action, depth, alpha, beta);
            // un valore uguale al bordo della finestra puo' essere solo un limite
            if self.params.alpha_beta && value == utility && value.is_finite() {
                self.stats.inc_tie_research();
                trace!(action = %action, value, "re-searching tie with open window");
                value = self.child(board, player, action, depth, f64::NEG_INFINITY, f64::INFINITY);
            }

            if improves(maximizing, value, utility) {
                utility = value;
                best.clear();
                best.push(i);
            } else if value == utility {
                best.push(i);
            }

            if self.params.alpha_beta {
                if (maximizing && utility >= beta) || (!maximizing && utility <= alpha) {
                    self.stats.inc_cutoff();
                    break;
                }
                if maximizing {
                    alpha = alpha.max(utility);
                } else {
                    beta = beta.min(utility);
                }
            }
        }
        (utility, best)
    }

    fn node(
        &mut self,
        board: &mut Board,
        player: Color,
        actions: &[Action],
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        self.stats.inc_node();
        if depth == 0 || actions.is_empty() || board.win_status().is_some() {
            self.stats.inc_leaf_eval();
            return self.evaluator.evaluate(board);
        }

        let maximizing = player == Color::White;
        let mut utility = worst(maximizing);
        for action in actions {
            let value = self.child(board, player, action, depth, alpha, beta);
            if improves(maximizing, value, utility) {
                utility = value;
            }
            if self.params.alpha_beta {
                if (maximizing && utility >= beta) || (!maximizing && utility <= alpha) {
                    self.stats.inc_cutoff();
                    break;
                }
                if maximizing {
                    alpha = alpha.max(utility);
                } else {
                    beta = beta.min(utility);
                }
            }
        }
        utility
    }

    /// Apply `action`, search what follows, unapply (via the scope guard)
    fn child(&mut self, board: &mut Board, player: Color, action: &Action, depth: u8, alpha: f64, beta: f64) -> f64 {
        let mut board = board.scoped_apply(action);
        if action.continues_chain() {
            self.node(&mut board, player, &action.further_actions, depth, alpha, beta)
        } else {
            let depth = depth.saturating_sub(1);
            // a profondita' zero le risposte non servono
            let replies = if depth > 0 {
                board.player_actions(!player)
            } else {
                Vec::new()
            };
            self.node(&mut board, !player, &replies, depth, alpha, beta)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_of_keeps_ties() {
        let (u, best) = best_of(Color::White, &[1.0, 3.0, 2.0, 3.0]);
        assert_eq!(u, 3.0);
        assert_eq!(best, vec![1, 3]);
        let (u, best) = best_of(Color::Black, &[1.0, 3.0, 1.0, 3.0]);
        assert_eq!(u, 1.0);
        assert_eq!(best, vec![0, 2]);
    }

    #[test]
    fn best_of_all_lost() {
        let (u, best) = best_of(Color::White, &[f64::NEG_INFINITY, f64::NEG_INFINITY]);
        assert_eq!(u, f64::NEG_INFINITY);
        assert_eq!(best, vec![0, 1]);
    }
}
