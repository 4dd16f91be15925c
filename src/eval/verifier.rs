//! Attack ordering verifier.
//!
//! Replays an ordering fort by fort, tracking which forts are on high alert,
//! and totals the gold collected. This is the ground truth every strategy is
//! checked against.

use std::collections::HashSet;

use crate::graph::{FortGraph, Gold};

/// Why an ordering is not a permutation of the graph's forts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOrdering {
    #[error("invalid attack ordering: fort '{0}' appears more than once")]
    Duplicate(String),

    #[error("invalid attack ordering: unknown fort '{0}'")]
    Unknown(String),

    #[error("invalid attack ordering: expected {expected} forts, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// One step of a replayed raid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Steal {
    pub label: String,
    /// Whether the fort was on alert when attacked.
    pub alerted: bool,
    pub gold: Gold,
}

/// Total gold stolen by attacking forts in `ordering`.
pub fn score<S: AsRef<str>>(graph: &FortGraph, ordering: &[S]) -> Result<Gold, InvalidOrdering> {
    let ids = resolve_ordering(graph, ordering)?;
    Ok(score_ids(graph, &ids))
}

/// Replays `ordering` and returns what was stolen at each fort.
pub fn raid_log<S: AsRef<str>>(
    graph: &FortGraph,
    ordering: &[S],
) -> Result<Vec<Steal>, InvalidOrdering> {
    let ids = resolve_ordering(graph, ordering)?;
    let mut log = Vec::with_capacity(ids.len());
    replay(graph, &ids, |id, alerted, gold| {
        log.push(Steal {
            label: graph.fort_at(id).label.clone(),
            alerted,
            gold,
        });
    });
    Ok(log)
}

/// Maps labels to ids, rejecting anything that is not a permutation.
fn resolve_ordering<S: AsRef<str>>(
    graph: &FortGraph,
    ordering: &[S],
) -> Result<Vec<usize>, InvalidOrdering> {
    let mut seen = HashSet::with_capacity(ordering.len());
    let mut ids = Vec::with_capacity(ordering.len());
    for label in ordering {
        let label = label.as_ref();
        let id = graph
            .id_of(label)
            .ok_or_else(|| InvalidOrdering::Unknown(label.to_string()))?;
        if !seen.insert(id) {
            return Err(InvalidOrdering::Duplicate(label.to_string()));
        }
        ids.push(id);
    }
    if ids.len() != graph.len() {
        return Err(InvalidOrdering::WrongLength {
            expected: graph.len(),
            actual: ids.len(),
        });
    }
    Ok(ids)
}

/// Scores an ordering already known to be a permutation of fort ids.
pub(crate) fn score_ids(graph: &FortGraph, ids: &[usize]) -> Gold {
    let mut total = Gold::ZERO;
    replay(graph, ids, |_, _, gold| total += gold);
    total
}

fn replay<F>(graph: &FortGraph, ids: &[usize], mut on_steal: F)
where
    F: FnMut(usize, bool, Gold),
{
    let mut alerted = vec![false; graph.len()];
    for &id in ids {
        let fort = graph.fort_at(id);
        if fort.flags.self_alert {
            alerted[id] = true;
        }
        let gold = Gold::collected(fort.value, alerted[id], fort.flags.immune);
        tracing::trace!(fort = %fort.label, alerted = alerted[id], %gold, "stole");
        on_steal(id, alerted[id], gold);
        if !fort.flags.shield {
            for &n in graph.adjacent_ids(id) {
                alerted[n] = true;
            }
        }
    }
}
