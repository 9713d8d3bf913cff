//! Phase 2: collect version documents matched by the expansion query,
//! discard the ones the snapshot excludes, group the rest by record key.
//!
//! The snapshot check here is a pure filter, not a tie-break: an excluded
//! version never enters any group. Missing txid/key values abort the call —
//! silently dropping a version would fabricate visibility for an older one.

use anyhow::{bail, Result};

use crate::accum::groups::{ShardedVersionGroups, VersionGroups};
use crate::index::{Collector, SegmentCollector, SegmentReader};
use crate::metrics::{record_version_excluded, record_version_kept};
use crate::snapshot::TxSnapshot;
use crate::version::VersionRecord;

pub struct VersionCollector {
    key_column: String,
    txid_column: String,
    snapshot: TxSnapshot,
    groups: ShardedVersionGroups,
}

impl VersionCollector {
    pub fn new<S: Into<String>, T: Into<String>>(
        key_column: S,
        txid_column: T,
        snapshot: &TxSnapshot,
        shards: usize,
    ) -> Self {
        VersionCollector {
            key_column: key_column.into(),
            txid_column: txid_column.into(),
            snapshot: snapshot.clone(),
            groups: ShardedVersionGroups::new(shards),
        }
    }

    /// Freeze the grouped versions for handoff to the resolver.
    pub fn into_groups(self) -> Result<VersionGroups> {
        self.groups.freeze()
    }
}

impl Collector for VersionCollector {
    fn for_segment<'a>(
        &'a self,
        segment: &'a dyn SegmentReader,
    ) -> Result<Box<dyn SegmentCollector + 'a>> {
        Ok(Box::new(VersionLeaf {
            parent: self,
            segment,
            ordinal: segment.ordinal(),
            doc_count: segment.doc_count(),
            buf: Vec::new(),
        }))
    }
}

struct VersionLeaf<'a> {
    parent: &'a VersionCollector,
    segment: &'a dyn SegmentReader,
    ordinal: u32,
    doc_count: u32,
    buf: Vec<VersionRecord>,
}

impl SegmentCollector for VersionLeaf<'_> {
    fn collect(&mut self, local_doc: u32) -> Result<()> {
        let Some(txid) = self
            .segment
            .numeric_value(&self.parent.txid_column, local_doc)?
        else {
            bail!(
                "version doc {} in segment {} has no value in txid column '{}'",
                local_doc,
                self.ordinal,
                self.parent.txid_column
            );
        };

        if self.parent.snapshot.excludes(txid) {
            record_version_excluded();
            return Ok(());
        }

        let Some(key) = self
            .segment
            .numeric_value(&self.parent.key_column, local_doc)?
        else {
            bail!(
                "version doc {} in segment {} has no value in key column '{}'",
                local_doc,
                self.ordinal,
                self.parent.key_column
            );
        };

        record_version_kept();
        self.buf.push(VersionRecord {
            segment: self.ordinal,
            segment_doc_count: self.doc_count,
            local_doc,
            key,
            txid,
        });
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.parent.groups.merge(&self.buf)
    }
}
