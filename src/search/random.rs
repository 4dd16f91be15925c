//! Random attack orderings, as a baseline for the other strategies.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{RaidStrategy, SearchError, SolverConfig};
use crate::graph::FortGraph;

/// Attacks forts in a uniformly random order.
pub struct RandomOrder {
    rng: SmallRng,
}

impl RandomOrder {
    /// Seeds from `config.seed`, or from entropy when it is 0.
    pub fn with_config(config: &SolverConfig) -> Self {
        let rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        RandomOrder { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomOrder {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RaidStrategy for RandomOrder {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_order(&mut self, graph: &FortGraph) -> Result<Vec<String>, SearchError> {
        let mut order: Vec<String> = graph.labels().into_iter().map(String::from).collect();
        order.shuffle(&mut self.rng);
        Ok(order)
    }
}
