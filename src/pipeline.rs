//! Resolution entry point: candidate pass → expansion pass → resolve.
//!
//! Control flow:
//! 1. Run the base query with a CandidateKeyCollector. Empty candidate set
//!    short-circuits to the no-visible-results outcome; phase 2 and 3 never
//!    run.
//! 2. Ask the expander for the version query and run it with a
//!    VersionCollector (snapshot filtering happens at collect time).
//! 3. Resolve groups into per-segment bitmaps.
//!
//! Each call allocates fresh accumulators; concurrent calls share nothing
//! but the global metric counters. Any error aborts the call with no
//! partial result.

use anyhow::Result;
use log::debug;
use std::time::Instant;

use crate::collect::{CandidateKeyCollector, VersionCollector};
use crate::config::VisibilityConfig;
use crate::expand::VersionExpander;
use crate::index::Searcher;
use crate::metrics::{record_resolution, record_resolution_empty};
use crate::resolve::{resolve, VisibilityMap};
use crate::snapshot::TxSnapshot;

/// Determine, per record key matched by `query`, the single version document
/// visible under `snapshot`. Returns `None` when nothing is visible.
pub fn determine_visibility<S, E>(
    searcher: &S,
    key_column: &str,
    query: &S::Query,
    snapshot: &TxSnapshot,
    expander: &E,
    config: &VisibilityConfig,
) -> Result<Option<VisibilityMap>>
where
    S: Searcher,
    E: VersionExpander<S::Query>,
{
    record_resolution();

    // Phase 1: candidate record keys of the base query.
    let start = Instant::now();
    let collector = CandidateKeyCollector::new(key_column, config.accum_shards);
    searcher.search(query, &collector)?;
    let candidates = collector.into_keys()?;
    debug!(
        "candidate pass: {} keys in {:.3}s",
        candidates.len(),
        start.elapsed().as_secs_f64()
    );

    if candidates.is_empty() {
        record_resolution_empty();
        return Ok(None);
    }

    // Phase 2: expand to all version docs of those keys, snapshot-filtered.
    let start = Instant::now();
    let expanded = expander.expand(key_column, snapshot, query, &candidates)?;
    let collector = VersionCollector::new(
        key_column,
        config.txid_column.as_str(),
        snapshot,
        config.accum_shards,
    );
    searcher.search(&expanded, &collector)?;
    let groups = collector.into_groups()?;
    debug!(
        "expansion pass: {} grouped keys in {:.3}s ({})",
        groups.len(),
        start.elapsed().as_secs_f64(),
        snapshot
    );

    // Phase 3: one winner per key.
    let result = resolve(groups);
    if result.is_none() {
        record_resolution_empty();
    }
    Ok(result)
}
