//! Phase 1: collect the record key of every document matched by the base
//! query into a deduplicated candidate set.

use anyhow::Result;

use crate::accum::keys::{CandidateKeys, ShardedKeySet};
use crate::index::{Collector, SegmentCollector, SegmentReader};
use crate::metrics::{record_candidate_doc_without_key, record_candidate_keys};
use crate::snapshot::RecordKey;

/// Collector over the record-key column. A matched document without a key
/// value is counted and skipped; well-formed indexing puts exactly one key
/// on every document.
pub struct CandidateKeyCollector {
    key_column: String,
    keys: ShardedKeySet,
}

impl CandidateKeyCollector {
    pub fn new<S: Into<String>>(key_column: S, shards: usize) -> Self {
        CandidateKeyCollector {
            key_column: key_column.into(),
            keys: ShardedKeySet::new(shards),
        }
    }

    /// Freeze the accumulated set for handoff to the expander.
    pub fn into_keys(self) -> Result<CandidateKeys> {
        let keys = self.keys.freeze()?;
        record_candidate_keys(keys.len() as u64);
        Ok(keys)
    }
}

impl Collector for CandidateKeyCollector {
    fn for_segment<'a>(
        &'a self,
        segment: &'a dyn SegmentReader,
    ) -> Result<Box<dyn SegmentCollector + 'a>> {
        Ok(Box::new(CandidateLeaf {
            key_column: &self.key_column,
            keys: &self.keys,
            segment,
            buf: Vec::new(),
        }))
    }
}

struct CandidateLeaf<'a> {
    key_column: &'a str,
    keys: &'a ShardedKeySet,
    segment: &'a dyn SegmentReader,
    buf: Vec<RecordKey>,
}

impl SegmentCollector for CandidateLeaf<'_> {
    fn collect(&mut self, local_doc: u32) -> Result<()> {
        match self.segment.numeric_value(self.key_column, local_doc)? {
            Some(key) => self.buf.push(key),
            None => record_candidate_doc_without_key(),
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.keys.merge(&self.buf)
    }
}
