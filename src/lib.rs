//! Sherwood raid planner library.
//!
//! Models forts as a labeled undirected graph, scores attack orderings
//! under alert-propagation rules, and finds optimal orderings on forests
//! with a linear-time tree DP.

pub mod eval;
pub mod generate;
pub mod graph;
pub mod protocol;
pub mod search;

pub use eval::{score, InvalidOrdering};
pub use graph::{Fort, FortFlags, FortGraph, Gold, GraphError};
pub use search::{solve, RaidPlan, SearchError};
