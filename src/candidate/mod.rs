//! Candidate pruning for raw correlation hits.
//!
//! Greedy, scan-order proximity clustering plus the cross-set exclusion used
//! by the anchor detector.

pub(crate) mod dedup;
