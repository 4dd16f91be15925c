//! Exhaustive search over every attack ordering.
//!
//! Only usable on tiny graphs, but exact on any graph, cyclic or not, which
//! makes it the reference the tree DP is checked against.

use super::{RaidPlan, RaidStrategy, SearchError, SolverConfig};
use crate::eval::score_ids;
use crate::graph::{FortGraph, Gold};

/// Tries all `n!` orderings and keeps the first best one found.
#[derive(Debug, Clone)]
pub struct BruteForce {
    limit: usize,
}

impl Default for BruteForce {
    fn default() -> Self {
        BruteForce::with_config(&SolverConfig::default())
    }
}

impl BruteForce {
    pub fn new() -> Self {
        BruteForce::default()
    }

    pub fn with_config(config: &SolverConfig) -> Self {
        BruteForce {
            limit: config.brute_force_limit,
        }
    }

    pub fn search(&self, graph: &FortGraph) -> Result<RaidPlan, SearchError> {
        if graph.len() > self.limit {
            return Err(SearchError::TooManyForts {
                count: graph.len(),
                limit: self.limit,
            });
        }

        let mut best = Best {
            order: Vec::new(),
            gold: None,
            tried: 0,
        };
        let mut remaining: Vec<usize> = (0..graph.len()).collect();
        let mut chosen = Vec::with_capacity(graph.len());
        permute(graph, &mut remaining, &mut chosen, &mut best);

        tracing::debug!(forts = graph.len(), tried = best.tried, "brute force finished");
        Ok(RaidPlan {
            order: best
                .order
                .iter()
                .map(|&id| graph.fort_at(id).label.clone())
                .collect(),
            gold: best.gold.unwrap_or(Gold::ZERO),
        })
    }
}

impl RaidStrategy for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn choose_order(&mut self, graph: &FortGraph) -> Result<Vec<String>, SearchError> {
        Ok(self.search(graph)?.order)
    }
}

struct Best {
    order: Vec<usize>,
    gold: Option<Gold>,
    tried: u64,
}

fn permute(
    graph: &FortGraph,
    remaining: &mut Vec<usize>,
    chosen: &mut Vec<usize>,
    best: &mut Best,
) {
    if remaining.is_empty() {
        best.tried += 1;
        let gold = score_ids(graph, chosen);
        if best.gold.map_or(true, |held| gold > held) {
            best.gold = Some(gold);
            best.order.clone_from(chosen);
        }
        return;
    }
    for i in 0..remaining.len() {
        let id = remaining.remove(i);
        chosen.push(id);
        permute(graph, remaining, chosen, best);
        chosen.pop();
        remaining.insert(i, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::score;
    use crate::graph::FortFlags;

    #[test]
    fn finds_optimum_on_path() {
        let mut g = FortGraph::new();
        g.add_fort_plain("A", 10).unwrap();
        g.add_fort("B", 10, FortFlags::self_alert()).unwrap();
        g.add_fort_plain("C", 10).unwrap();
        g.add_edge("A", "B").unwrap();
        g.add_edge("B", "C").unwrap();

        let plan = BruteForce::new().search(&g).unwrap();
        assert_eq!(plan.gold, Gold::whole(25));
        assert_eq!(plan.order, vec!["A", "C", "B"]);
        assert_eq!(score(&g, &plan.order).unwrap(), plan.gold);
    }

    #[test]
    fn handles_cycles() {
        let mut g = FortGraph::new();
        for l in ["a", "b", "c"] {
            g.add_fort_plain(l, 4).unwrap();
        }
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "c").unwrap();
        g.add_edge("c", "a").unwrap();
        // first fort is whole, the other two are halved
        assert_eq!(BruteForce::new().search(&g).unwrap().gold, Gold::whole(8));
    }

    #[test]
    fn refuses_large_graphs() {
        let mut g = FortGraph::new();
        for i in 0..4 {
            g.add_fort_plain(&format!("f{i}"), 1).unwrap();
        }
        let config = SolverConfig {
            brute_force_limit: 3,
            ..SolverConfig::default()
        };
        let err = BruteForce::with_config(&config).search(&g).unwrap_err();
        assert!(matches!(err, SearchError::TooManyForts { count: 4, limit: 3 }));
    }

    #[test]
    fn empty_graph() {
        let plan = BruteForce::new().search(&FortGraph::new()).unwrap();
        assert!(plan.order.is_empty());
        assert_eq!(plan.gold, Gold::ZERO);
    }
}
