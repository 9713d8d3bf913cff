//! Lightweight global metrics for visibility resolution.
//!
//! Thread-safe atomic counters per pipeline phase:
//! - Candidate collection (phase 1)
//! - Version collection + snapshot filtering (phase 2)
//! - Resolution (phase 3)

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Calls -----
static RESOLUTIONS_TOTAL: AtomicU64 = AtomicU64::new(0);
static RESOLUTIONS_EMPTY: AtomicU64 = AtomicU64::new(0);

// ----- Phase 1: candidates -----
static CANDIDATE_KEYS_COLLECTED: AtomicU64 = AtomicU64::new(0);
static CANDIDATE_DOCS_WITHOUT_KEY: AtomicU64 = AtomicU64::new(0);

// ----- Phase 2: versions -----
static VERSIONS_KEPT: AtomicU64 = AtomicU64::new(0);
static VERSIONS_EXCLUDED_BY_SNAPSHOT: AtomicU64 = AtomicU64::new(0);

// ----- Phase 3: resolution -----
static GROUPS_RESOLVED: AtomicU64 = AtomicU64::new(0);
static BITMAPS_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static EQUAL_TXID_COLLISIONS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub resolutions_total: u64,
    pub resolutions_empty: u64,

    pub candidate_keys_collected: u64,
    pub candidate_docs_without_key: u64,

    pub versions_kept: u64,
    pub versions_excluded_by_snapshot: u64,

    pub groups_resolved: u64,
    pub bitmaps_allocated: u64,
    pub equal_txid_collisions: u64,
}

impl MetricsSnapshot {
    /// Share of phase-2 matches discarded by the snapshot filter.
    pub fn exclusion_ratio(&self) -> f64 {
        let total = self.versions_kept + self.versions_excluded_by_snapshot;
        if total == 0 {
            0.0
        } else {
            self.versions_excluded_by_snapshot as f64 / total as f64
        }
    }

    /// JSON rendering for host debug endpoints.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ----- Recorders (calls) -----
pub fn record_resolution() {
    RESOLUTIONS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn record_resolution_empty() {
    RESOLUTIONS_EMPTY.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (phase 1) -----
pub fn record_candidate_keys(n: u64) {
    CANDIDATE_KEYS_COLLECTED.fetch_add(n, Ordering::Relaxed);
}

pub fn record_candidate_doc_without_key() {
    CANDIDATE_DOCS_WITHOUT_KEY.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (phase 2) -----
pub fn record_version_kept() {
    VERSIONS_KEPT.fetch_add(1, Ordering::Relaxed);
}

pub fn record_version_excluded() {
    VERSIONS_EXCLUDED_BY_SNAPSHOT.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (phase 3) -----
pub fn record_groups_resolved(n: u64) {
    GROUPS_RESOLVED.fetch_add(n, Ordering::Relaxed);
}

pub fn record_bitmap_allocated() {
    BITMAPS_ALLOCATED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_equal_txid_collision() {
    EQUAL_TXID_COLLISIONS.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        resolutions_total: RESOLUTIONS_TOTAL.load(Ordering::Relaxed),
        resolutions_empty: RESOLUTIONS_EMPTY.load(Ordering::Relaxed),

        candidate_keys_collected: CANDIDATE_KEYS_COLLECTED.load(Ordering::Relaxed),
        candidate_docs_without_key: CANDIDATE_DOCS_WITHOUT_KEY.load(Ordering::Relaxed),

        versions_kept: VERSIONS_KEPT.load(Ordering::Relaxed),
        versions_excluded_by_snapshot: VERSIONS_EXCLUDED_BY_SNAPSHOT.load(Ordering::Relaxed),

        groups_resolved: GROUPS_RESOLVED.load(Ordering::Relaxed),
        bitmaps_allocated: BITMAPS_ALLOCATED.load(Ordering::Relaxed),
        equal_txid_collisions: EQUAL_TXID_COLLISIONS.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    RESOLUTIONS_TOTAL.store(0, Ordering::Relaxed);
    RESOLUTIONS_EMPTY.store(0, Ordering::Relaxed);

    CANDIDATE_KEYS_COLLECTED.store(0, Ordering::Relaxed);
    CANDIDATE_DOCS_WITHOUT_KEY.store(0, Ordering::Relaxed);

    VERSIONS_KEPT.store(0, Ordering::Relaxed);
    VERSIONS_EXCLUDED_BY_SNAPSHOT.store(0, Ordering::Relaxed);

    GROUPS_RESOLVED.store(0, Ordering::Relaxed);
    BITMAPS_ALLOCATED.store(0, Ordering::Relaxed);
    EQUAL_TXID_COLLISIONS.store(0, Ordering::Relaxed);
}
