//! MVCC transaction snapshot: the (low, high, in-flight) triple that decides
//! which version documents are admissible during collection.
//!
//! Semantics:
//! - A version is admitted iff its txid is strictly below `high` and its txid
//!   is not a member of `in_flight`.
//! - `low` is carried for the expansion query (the external expander may use
//!   it to prune old versions) but is not enforced here.
//!
//! A snapshot is immutable for the duration of one resolution call.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Transaction identifier. Monotonically assigned by the transactional
/// source of truth; higher means more recent.
pub type TxId = u64;

/// Stable identifier of a logical record across all its physical versions.
pub type RecordKey = u64;

/// Visibility boundary for one resolution call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxSnapshot {
    /// Low watermark. Shapes the expansion query only.
    pub low: TxId,
    /// High watermark: versions with `txid >= high` are invisible.
    pub high: TxId,
    /// Transactions still running when the snapshot was taken.
    pub in_flight: HashSet<TxId>,
}

impl TxSnapshot {
    pub fn new(low: TxId, high: TxId, in_flight: HashSet<TxId>) -> Self {
        TxSnapshot {
            low,
            high,
            in_flight,
        }
    }

    /// Snapshot with no in-flight transactions.
    pub fn quiescent(low: TxId, high: TxId) -> Self {
        TxSnapshot::new(low, high, HashSet::new())
    }

    /// True if a version produced by `txid` must be discarded under this
    /// snapshot. Pure filter: an excluded version never reaches grouping.
    #[inline]
    pub fn excludes(&self, txid: TxId) -> bool {
        txid >= self.high || self.in_flight.contains(&txid)
    }

    /// Inverse of [`excludes`](Self::excludes).
    #[inline]
    pub fn admits(&self, txid: TxId) -> bool {
        !self.excludes(txid)
    }
}

impl fmt::Display for TxSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TxSnapshot {{ low: {}, high: {}, in_flight: {} txs }}",
            self.low,
            self.high,
            self.in_flight.len()
        )
    }
}
