//! Random forest generation for testing and benchmarking.
//!
//! Builds acyclic fort graphs with random values and flags. Fort `i` joins
//! the tree of a uniformly chosen earlier fort, or starts a new tree.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Fort, FortFlags, FortGraph};

/// Shape of a generated forest.
///
/// Probabilities are clamped into `[0, 1]`; a NaN probability never fires.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    /// Number of forts.
    pub forts: usize,
    /// Values are drawn uniformly from `1..=max_value`.
    pub max_value: u32,
    /// Probability that a fort attaches to an earlier one instead of
    /// starting a new tree.
    pub connect_prob: f64,
    pub self_alert_prob: f64,
    pub shield_prob: f64,
    pub immune_prob: f64,
}

impl Default for ForestParams {
    fn default() -> Self {
        ForestParams {
            forts: 1000,
            max_value: 10,
            connect_prob: 0.99,
            self_alert_prob: 0.2,
            shield_prob: 0.2,
            immune_prob: 0.2,
        }
    }
}

/// Seedable random forest builder.
pub struct ForestGenerator {
    rng: SmallRng,
}

impl ForestGenerator {
    pub fn new(seed: u64) -> Self {
        ForestGenerator {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        ForestGenerator {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Generates a forest. Labels are `f<i>` followed by the markers of the
    /// fort's flags, so the graph round-trips through the text format.
    pub fn random_forest(&mut self, params: &ForestParams) -> FortGraph {
        let mut graph = FortGraph::new();
        let max_value = params.max_value.max(1);

        for i in 0..params.forts {
            let flags = FortFlags {
                self_alert: self.chance(params.self_alert_prob),
                shield: self.chance(params.shield_prob),
                immune: self.chance(params.immune_prob),
            };
            // markers are never digits, so `f<i>` labels stay unique
            let id = graph.push_fort(Fort {
                label: flags.mark_label(&format!("f{i}")),
                value: self.rng.gen_range(1..=max_value),
                flags,
            });
            if id > 0 && self.chance(params.connect_prob) {
                let parent = self.rng.gen_range(0..id);
                graph.link_ids(parent, id);
            }
        }
        graph
    }

    fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_size_as_forest() {
        let params = ForestParams {
            forts: 300,
            ..ForestParams::default()
        };
        let g = ForestGenerator::new(11).random_forest(&params);
        assert_eq!(g.len(), 300);
        assert!(g.edge_count() < 300);
        assert!(crate::search::solve(&g).is_ok());
    }

    #[test]
    fn same_seed_same_forest() {
        let params = ForestParams {
            forts: 50,
            ..ForestParams::default()
        };
        let a = ForestGenerator::new(3).random_forest(&params);
        let b = ForestGenerator::new(3).random_forest(&params);
        assert_eq!(a, b);
    }

    #[test]
    fn disconnected_when_never_connecting() {
        let params = ForestParams {
            forts: 20,
            connect_prob: 0.0,
            ..ForestParams::default()
        };
        let g = ForestGenerator::new(5).random_forest(&params);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn nan_and_out_of_range_probabilities_are_tolerated() {
        let params = ForestParams {
            forts: 40,
            connect_prob: 7.5,
            self_alert_prob: -1.0,
            shield_prob: f64::NAN,
            immune_prob: f64::NAN,
            ..ForestParams::default()
        };
        let g = ForestGenerator::new(21).random_forest(&params);
        assert_eq!(g.len(), 40);
        assert_eq!(g.edge_count(), 39);
        assert!(g.forts().all(|f| f.flags == FortFlags::NONE));
    }

    #[test]
    fn labels_carry_flag_markers() {
        let params = ForestParams {
            forts: 100,
            ..ForestParams::default()
        };
        let g = ForestGenerator::new(9).random_forest(&params);
        for fort in g.forts() {
            assert_eq!(FortFlags::from_label_markers(&fort.label), fort.flags);
            assert!((1..=10).contains(&fort.value));
        }
    }
}
