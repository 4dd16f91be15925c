//! Fort graph representation.
//!
//! Contains the fort attributes, the exact gold type, and the labeled
//! undirected graph every strategy reads from.

pub mod fort;
pub mod fort_graph;
pub mod gold;

pub use fort::{Fort, FortFlags, IMMUNE_MARKER, SELF_ALERT_MARKER, SHIELD_MARKER};
pub use fort_graph::{FortGraph, GraphError};
pub use gold::Gold;
