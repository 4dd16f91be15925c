//! Labeled fort graph.
//!
//! Forts are stored in insertion order and addressed by label. Adjacency is
//! kept as per-fort lists of dense ids, stored symmetrically: if A lists B
//! then B lists A. All mutations validate first and only then write, so a
//! rejected call leaves the graph untouched.

use std::collections::HashMap;

use super::fort::{Fort, FortFlags};

/// Errors raised by graph mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("fort '{0}' already exists")]
    DuplicateFort(String),

    #[error("edge between '{0}' and '{1}' already exists")]
    DuplicateEdge(String, String),

    #[error("unknown fort '{0}'")]
    UnknownFort(String),

    #[error("fort '{0}' cannot be connected to itself")]
    SelfLoop(String),
}

/// A simple undirected graph of forts.
#[derive(Debug, Clone, Default)]
pub struct FortGraph {
    forts: Vec<Fort>,
    ids: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl FortGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        FortGraph::default()
    }

    /// Adds an isolated fort.
    pub fn add_fort(
        &mut self,
        label: &str,
        value: u32,
        flags: FortFlags,
    ) -> Result<(), GraphError> {
        if self.ids.contains_key(label) {
            return Err(GraphError::DuplicateFort(label.to_string()));
        }
        self.push_fort(Fort {
            label: label.to_string(),
            value,
            flags,
        });
        Ok(())
    }

    /// Adds an isolated fort with no flags set.
    pub fn add_fort_plain(&mut self, label: &str, value: u32) -> Result<(), GraphError> {
        self.add_fort(label, value, FortFlags::NONE)
    }

    /// Connects two existing forts.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        let (ia, ib) = (self.require(a)?, self.require(b)?);
        if ia == ib {
            return Err(GraphError::SelfLoop(a.to_string()));
        }
        if self.adjacency[ia].contains(&ib) {
            return Err(GraphError::DuplicateEdge(a.to_string(), b.to_string()));
        }
        self.link_ids(ia, ib);
        Ok(())
    }

    /// Removes the edge between two forts. Removing an absent edge is a no-op.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        let (ia, ib) = (self.require(a)?, self.require(b)?);
        self.adjacency[ia].retain(|&n| n != ib);
        self.adjacency[ib].retain(|&n| n != ia);
        Ok(())
    }

    /// Returns true if the two forts are adjacent. O(degree(a)).
    pub fn has_edge(&self, a: &str, b: &str) -> Result<bool, GraphError> {
        let (ia, ib) = (self.require(a)?, self.require(b)?);
        Ok(self.adjacency[ia].contains(&ib))
    }

    /// Removes a fort and every edge touching it.
    ///
    /// Ids above the removed one shift down by one, so this is O(V + E).
    pub fn remove_fort(&mut self, label: &str) -> Result<(), GraphError> {
        let gone = self.require(label)?;
        self.forts.remove(gone);
        self.adjacency.remove(gone);
        for list in &mut self.adjacency {
            list.retain(|&n| n != gone);
            for n in list.iter_mut() {
                if *n > gone {
                    *n -= 1;
                }
            }
        }
        self.ids.remove(label);
        for id in self.ids.values_mut() {
            if *id > gone {
                *id -= 1;
            }
        }
        Ok(())
    }

    /// Labels of the forts adjacent to `label`.
    pub fn neighbors(&self, label: &str) -> Result<Vec<&str>, GraphError> {
        let id = self.require(label)?;
        Ok(self.adjacency[id]
            .iter()
            .map(|&n| self.forts[n].label.as_str())
            .collect())
    }

    /// The value stored for `label`.
    pub fn value(&self, label: &str) -> Result<u32, GraphError> {
        Ok(self.forts[self.require(label)?].value)
    }

    /// The flags declared for `label`.
    pub fn flags(&self, label: &str) -> Result<FortFlags, GraphError> {
        Ok(self.forts[self.require(label)?].flags)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.ids.contains_key(label)
    }

    /// All labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.forts.iter().map(|f| f.label.as_str()).collect()
    }

    /// All forts in insertion order.
    pub fn forts(&self) -> impl Iterator<Item = &Fort> {
        self.forts.iter()
    }

    pub fn len(&self) -> usize {
        self.forts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forts.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    fn require(&self, label: &str) -> Result<usize, GraphError> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownFort(label.to_string()))
    }

    pub(crate) fn id_of(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    pub(crate) fn fort_at(&self, id: usize) -> &Fort {
        &self.forts[id]
    }

    pub(crate) fn adjacent_ids(&self, id: usize) -> &[usize] {
        &self.adjacency[id]
    }

    /// Appends a fort and returns its id. The label must be new.
    pub(crate) fn push_fort(&mut self, fort: Fort) -> usize {
        debug_assert!(!self.ids.contains_key(&fort.label));
        let id = self.forts.len();
        self.ids.insert(fort.label.clone(), id);
        self.forts.push(fort);
        self.adjacency.push(Vec::new());
        id
    }

    /// Connects two distinct, not yet adjacent forts by id.
    pub(crate) fn link_ids(&mut self, a: usize, b: usize) {
        debug_assert!(a != b && !self.adjacency[a].contains(&b));
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
    }
}

/// Structural equality: same forts in the same order and the same edge set,
/// regardless of the order in which edges were added.
impl PartialEq for FortGraph {
    fn eq(&self, other: &Self) -> bool {
        if self.forts != other.forts {
            return false;
        }
        self.adjacency.iter().zip(&other.adjacency).all(|(a, b)| {
            let mut a = a.clone();
            let mut b = b.clone();
            a.sort_unstable();
            b.sort_unstable();
            a == b
        })
    }
}

impl Eq for FortGraph {}
