#![allow(dead_code)] // each test binary uses a subset of the fixture

// Shared in-memory index fixture for the integration tests.
//
// MemIndex implements the host-side seams (SegmentReader, Searcher) over
// plain vectors, with an optional one-thread-per-segment search mode to
// exercise the concurrent collection path. MemExpander is the simplest
// conforming expansion-query builder: every version doc whose key is in the
// candidate set.

use anyhow::{anyhow, bail, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use snapvis::consts::DEFAULT_TXID_COLUMN;
use snapvis::{
    CandidateKeys, Collector, RecordKey, Searcher, SegmentReader, TxSnapshot, VersionExpander,
};

pub const KEY_COLUMN: &str = "record_key";

/// One indexed document: record key and txid columns, either possibly
/// absent to model malformed indexing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemDoc {
    pub key: Option<u64>,
    pub txid: Option<u64>,
}

pub fn doc(key: u64, txid: u64) -> MemDoc {
    MemDoc {
        key: Some(key),
        txid: Some(txid),
    }
}

/// Filler occupying a local doc id without participating in a scenario.
pub fn filler() -> MemDoc {
    doc(u64::MAX, 1)
}

#[derive(Debug, Clone, Default)]
pub struct MemSegment {
    pub docs: Vec<MemDoc>,
}

pub fn seg(docs: Vec<MemDoc>) -> MemSegment {
    MemSegment { docs }
}

struct SegmentView<'a> {
    seg: &'a MemSegment,
    ordinal: u32,
}

impl SegmentReader for SegmentView<'_> {
    fn ordinal(&self) -> u32 {
        self.ordinal
    }

    fn doc_count(&self) -> u32 {
        self.seg.docs.len() as u32
    }

    fn numeric_value(&self, column: &str, local_doc: u32) -> Result<Option<u64>> {
        let d = self
            .seg
            .docs
            .get(local_doc as usize)
            .ok_or_else(|| anyhow!("doc {local_doc} out of range in segment {}", self.ordinal))?;
        match column {
            KEY_COLUMN => Ok(d.key),
            DEFAULT_TXID_COLUMN => Ok(d.txid),
            other => bail!("unknown column '{other}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MemQuery {
    MatchAll,
    MatchNone,
    KeyEquals(u64),
    KeyIn(HashSet<u64>),
}

fn matches(query: &MemQuery, d: &MemDoc) -> bool {
    match query {
        MemQuery::MatchAll => true,
        MemQuery::MatchNone => false,
        MemQuery::KeyEquals(k) => d.key == Some(*k),
        MemQuery::KeyIn(set) => d.key.is_some_and(|k| set.contains(&k)),
    }
}

/// In-memory index. `parallel` switches search to one thread per segment.
#[derive(Debug, Default)]
pub struct MemIndex {
    pub segments: Vec<MemSegment>,
    pub parallel: bool,
}

impl MemIndex {
    pub fn new(segments: Vec<MemSegment>) -> Self {
        MemIndex {
            segments,
            parallel: false,
        }
    }

    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    fn search_segment(
        seg: &MemSegment,
        ordinal: u32,
        query: &MemQuery,
        collector: &dyn Collector,
    ) -> Result<()> {
        let view = SegmentView { seg, ordinal };
        let mut leaf = collector.for_segment(&view)?;
        for (local_doc, d) in seg.docs.iter().enumerate() {
            if matches(query, d) {
                leaf.collect(local_doc as u32)?;
            }
        }
        leaf.finish()
    }
}

impl Searcher for MemIndex {
    type Query = MemQuery;

    fn search(&self, query: &MemQuery, collector: &dyn Collector) -> Result<()> {
        if !self.parallel {
            for (i, seg) in self.segments.iter().enumerate() {
                Self::search_segment(seg, i as u32, query, collector)?;
            }
            return Ok(());
        }

        std::thread::scope(|scope| -> Result<()> {
            let mut handles = Vec::new();
            for (i, seg) in self.segments.iter().enumerate() {
                handles.push(
                    scope.spawn(move || Self::search_segment(seg, i as u32, query, collector)),
                );
            }
            for h in handles {
                h.join().map_err(|_| anyhow!("segment thread panicked"))??;
            }
            Ok(())
        })
    }
}

/// Expansion: all version docs whose key is in the candidate set. Counts
/// invocations so tests can assert the phase-1 short-circuit.
#[derive(Debug, Default)]
pub struct MemExpander {
    calls: AtomicUsize,
}

impl MemExpander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl VersionExpander<MemQuery> for MemExpander {
    fn expand(
        &self,
        _key_column: &str,
        _snapshot: &TxSnapshot,
        _original: &MemQuery,
        candidates: &CandidateKeys,
    ) -> Result<MemQuery> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(MemQuery::KeyIn(candidates.iter().collect()))
    }
}

/// Candidate keys of type RecordKey for ad-hoc assertions.
pub fn key_set(keys: &[RecordKey]) -> HashSet<u64> {
    keys.iter().copied().collect()
}
