//! One physical version document observed during phase-2 collection.

use serde::{Deserialize, Serialize};

use crate::snapshot::{RecordKey, TxId};

/// Ephemeral description of a version document. Built during collection,
/// consumed by the resolver, never persisted.
///
/// `segment` + `local_doc` form the document's identity; local ids repeat
/// across segments, so neither field is meaningful alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Ordinal of the segment the document lives in.
    pub segment: u32,
    /// Total doc count of that segment; sizes the output bitmap.
    pub segment_doc_count: u32,
    /// Document position within the segment.
    pub local_doc: u32,
    /// Logical record this version belongs to.
    pub key: RecordKey,
    /// Transaction that produced this version.
    pub txid: TxId,
}
