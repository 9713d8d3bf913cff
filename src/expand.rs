//! Expansion-query contract (external collaborator).
//!
//! Phase 1 yields the candidate record keys; the expander turns them into a
//! query matching every physical version document whose key is in the set,
//! re-scoped to the original query's selection criteria evaluated per
//! version row. This crate treats the result as an opaque predicate and does
//! not validate it.

use anyhow::Result;

use crate::accum::keys::CandidateKeys;
use crate::snapshot::TxSnapshot;

/// Builds the phase-2 query. `Q` is the host searcher's query type.
pub trait VersionExpander<Q> {
    /// `key_column` names the record-key column; `snapshot` supplies the
    /// bounds the expander may use to prune (notably `low`); `original` is
    /// the base query whose predicate must be re-scoped per version.
    fn expand(
        &self,
        key_column: &str,
        snapshot: &TxSnapshot,
        original: &Q,
        candidates: &CandidateKeys,
    ) -> Result<Q>;
}
