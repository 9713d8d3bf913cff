//! Host-index abstractions: the seams between this crate and the search
//! framework that owns segments, columns and query execution.
//!
//! - SegmentReader: one immutable segment — ordinal, doc count, numeric
//!   column access.
//! - Collector / SegmentCollector: Lucene-style two-level collection. The
//!   host asks for one leaf per segment and drives `collect` with matching
//!   local doc ids; `finish` folds the leaf's partial result into the shared
//!   accumulator. Leaves are independent, so the host may deliver segments
//!   sequentially or from one thread per segment.
//! - Searcher: runs an opaque query, feeding every match into a collector.
//!
//! The crate never executes queries itself; it only supplies collectors.

use anyhow::Result;

/// Read access to one index segment. Implementations are expected to be
/// cheap views over host storage; column reads may hit a host-side cache.
pub trait SegmentReader {
    /// Segment ordinal, unique within one reader snapshot.
    fn ordinal(&self) -> u32;

    /// Total number of documents in the segment (sizes visibility bitmaps).
    fn doc_count(&self) -> u32;

    /// First numeric value of `column` for `local_doc`, or None when the
    /// document carries no value. Multi-valued storage yields its first
    /// value only.
    fn numeric_value(&self, column: &str, local_doc: u32) -> Result<Option<u64>>;
}

/// Per-segment collection state. Created by [`Collector::for_segment`],
/// driven by the host, then consumed by `finish`.
pub trait SegmentCollector {
    /// Called once per matching document with its segment-local id.
    fn collect(&mut self, local_doc: u32) -> Result<()>;

    /// Merge this leaf's partial result into the parent accumulator.
    /// Called exactly once, after the last `collect` for the segment.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Factory for per-segment leaves. `Sync` because a parallelizing host calls
/// `for_segment` from several segment threads at once.
pub trait Collector: Sync {
    fn for_segment<'a>(
        &'a self,
        segment: &'a dyn SegmentReader,
    ) -> Result<Box<dyn SegmentCollector + 'a>>;
}

/// Query execution surface of the host index.
///
/// `Query` is opaque to this crate: the pipeline only forwards the caller's
/// base query and the expander's derived query back into `search`.
pub trait Searcher {
    type Query;

    /// Run `query` to completion, obtaining one leaf per segment and calling
    /// it for every match. Must call `finish` on each leaf it created.
    /// Fails atomically: any error aborts the whole search.
    fn search(&self, query: &Self::Query, collector: &dyn Collector) -> Result<()>;
}
