//! Raid planning strategies.
//!
//! Every strategy turns a fort graph into an attack ordering. The tree DP is
//! exact on forests; brute force is exact on tiny graphs; greedy and random
//! orders are baselines. [`evaluate_strategy`] re-scores any strategy's output
//! with the verifier so results are always comparable.

pub mod brute_force;
pub mod greedy;
pub mod random;
pub mod tree_dp;

use serde::{Deserialize, Serialize};

use crate::eval::{score, InvalidOrdering};
use crate::graph::{FortGraph, Gold};

pub use brute_force::BruteForce;
pub use greedy::Greedy;
pub use random::RandomOrder;
pub use tree_dp::TreeDp;

/// Errors raised while planning a raid.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("graph is not a forest: cycle reaches fort '{fort}'")]
    NotATree { fort: String },

    #[error("unknown root fort '{0}'")]
    UnknownRoot(String),

    #[error("brute force refuses {count} forts (limit {limit})")]
    TooManyForts { count: usize, limit: usize },

    #[error(transparent)]
    InvalidOrdering(#[from] InvalidOrdering),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Solver settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Worker threads for solving independent components (1 = sequential).
    pub threads: usize,
    /// Largest graph brute force will enumerate.
    pub brute_force_limit: usize,
    /// Random seed for the random-order baseline (0 = use entropy).
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            threads: 1,
            brute_force_limit: 10,
            seed: 0,
        }
    }
}

impl SolverConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// An attack ordering together with the gold it steals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaidPlan {
    pub order: Vec<String>,
    pub gold: Gold,
}

/// Something that can choose an order in which to attack every fort.
pub trait RaidStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns a permutation of all fort labels in `graph`.
    fn choose_order(&mut self, graph: &FortGraph) -> Result<Vec<String>, SearchError>;
}

/// Optimal plan for a forest, rooting each component at its first fort.
pub fn solve(graph: &FortGraph) -> Result<RaidPlan, SearchError> {
    TreeDp::new().solve(graph)
}

/// Optimal plan for a forest, rooting components at the given forts where possible.
pub fn solve_with_roots<S: AsRef<str>>(
    graph: &FortGraph,
    roots: &[S],
) -> Result<RaidPlan, SearchError> {
    TreeDp::new().solve_with_roots(graph, roots)
}

/// Runs `strategy` on a deep copy of `graph` and scores its ordering against
/// the original.
pub fn evaluate_strategy(
    strategy: &mut dyn RaidStrategy,
    graph: &FortGraph,
) -> Result<RaidPlan, SearchError> {
    let copy = graph.clone();
    let order = strategy.choose_order(&copy)?;
    let gold = score(graph, &order)?;
    tracing::debug!(strategy = strategy.name(), forts = graph.len(), %gold, "strategy evaluated");
    Ok(RaidPlan { order, gold })
}
