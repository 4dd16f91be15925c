//! Greedy raid heuristic.
//!
//! Repeatedly attacks the fort that looks best right now: the gold it would
//! yield minus half the value of every neighbour it would newly put on alert.
//! Scores change as alerts spread, so the queue uses lazy deletion: each fort
//! carries a version number, every rescore pushes a fresh entry, and entries
//! whose version is stale are dropped when popped.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::{RaidStrategy, SearchError};
use crate::graph::{FortGraph, Gold};

/// Greedy strategy. Fast on any graph, optimal on none in particular.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Greedy {
    pub fn new() -> Self {
        Greedy
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    /// Estimated net gain, in halves.
    score: i64,
    /// Shields win ties by degree; zero for everything else.
    shield_degree: usize,
    /// Earlier forts win remaining ties.
    id: Reverse<usize>,
    version: u32,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(self.shield_degree.cmp(&other.shield_degree))
            .then(self.id.cmp(&other.id))
            .then(self.version.cmp(&other.version))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Queue<'g> {
    graph: &'g FortGraph,
    heap: BinaryHeap<Entry>,
    versions: Vec<u32>,
    attacked: Vec<bool>,
    alerted: Vec<bool>,
}

impl<'g> Queue<'g> {
    fn new(graph: &'g FortGraph) -> Self {
        let mut queue = Queue {
            graph,
            heap: BinaryHeap::with_capacity(graph.len()),
            versions: vec![0; graph.len()],
            attacked: vec![false; graph.len()],
            alerted: vec![false; graph.len()],
        };
        for id in 0..graph.len() {
            queue.push(id);
        }
        queue
    }

    fn push(&mut self, id: usize) {
        let (score, shield_degree) = self.estimate(id);
        self.heap.push(Entry {
            score,
            shield_degree,
            id: Reverse(id),
            version: self.versions[id],
        });
    }

    fn estimate(&self, id: usize) -> (i64, usize) {
        let fort = self.graph.fort_at(id);
        let on_alert = self.alerted[id] || fort.flags.self_alert;
        let gold = Gold::collected(fort.value, on_alert, fort.flags.immune).halves() as i64;
        let neighbours = self.graph.adjacent_ids(id);
        if fort.flags.shield {
            return (gold, neighbours.len());
        }
        let penalty: i64 = neighbours
            .iter()
            .filter(|&&n| {
                let flags = self.graph.fort_at(n).flags;
                !self.alerted[n] && !flags.immune && !flags.self_alert
            })
            .map(|&n| Gold::half(self.graph.fort_at(n).value).halves() as i64)
            .sum();
        (gold - penalty, 0)
    }

    /// Rescores a newly alerted fort and its neighbours.
    fn refresh_around(&mut self, id: usize) {
        let graph = self.graph;
        for target in std::iter::once(id).chain(graph.adjacent_ids(id).iter().copied()) {
            self.versions[target] += 1;
            if !self.attacked[target] {
                self.push(target);
            }
        }
    }

    fn pop_current(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            let id = entry.id.0;
            if !self.attacked[id] && entry.version == self.versions[id] {
                return Some(id);
            }
        }
        None
    }

    fn attack(&mut self, id: usize) {
        self.attacked[id] = true;
        let graph = self.graph;
        let fort = graph.fort_at(id);
        if fort.flags.self_alert && !self.alerted[id] {
            self.alerted[id] = true;
            self.refresh_around(id);
        }
        if !fort.flags.shield {
            for &n in graph.adjacent_ids(id) {
                if !self.alerted[n] {
                    self.alerted[n] = true;
                    self.refresh_around(n);
                }
            }
        }
    }
}

impl RaidStrategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_order(&mut self, graph: &FortGraph) -> Result<Vec<String>, SearchError> {
        let mut queue = Queue::new(graph);
        let mut order = Vec::with_capacity(graph.len());
        while let Some(id) = queue.pop_current() {
            queue.attack(id);
            order.push(graph.fort_at(id).label.clone());
        }
        Ok(order)
    }
}
