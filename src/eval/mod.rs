//! Ordering evaluation.
//!
//! Scores a complete attack ordering against the alert-propagation rules.

pub(crate) mod verifier;

pub use verifier::{raid_log, score, InvalidOrdering, Steal};
pub(crate) use verifier::score_ids;
