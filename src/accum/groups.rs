//! Version groups: record key → surviving versions, sharded while
//! collecting, frozen for the resolver.
//!
//! Within one group, append order is the encounter order of collection.
//! Under sequential segment delivery that order is deterministic; a
//! parallelizing host interleaves segments nondeterministically, which only
//! matters for the (undefined) equal-txid tie-break.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use super::shard_of;
use crate::snapshot::RecordKey;
use crate::version::VersionRecord;

type GroupMap = HashMap<RecordKey, Vec<VersionRecord>>;

/// Shared accumulator for phase 2.
pub struct ShardedVersionGroups {
    shards: Vec<Mutex<GroupMap>>,
}

impl ShardedVersionGroups {
    pub fn new(shards: usize) -> Self {
        let n = shards.max(1);
        ShardedVersionGroups {
            shards: (0..n).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    /// Merge one leaf's buffered records, one lock acquisition per shard.
    pub fn merge(&self, records: &[VersionRecord]) -> Result<()> {
        let n = self.shards.len();
        let mut buckets: Vec<Vec<VersionRecord>> = vec![Vec::new(); n];
        for &r in records {
            buckets[shard_of(r.key, n)].push(r);
        }
        for (i, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let mut g = self.shards[i]
                .lock()
                .map_err(|_| anyhow!("version group shard poisoned"))?;
            for r in bucket {
                g.entry(r.key).or_default().push(r);
            }
        }
        Ok(())
    }

    /// Collapse the shards into the immutable handoff value for phase 3.
    pub fn freeze(self) -> Result<VersionGroups> {
        let mut groups: GroupMap = HashMap::new();
        for shard in self.shards {
            let g = shard
                .into_inner()
                .map_err(|_| anyhow!("version group shard poisoned"))?;
            for (key, mut versions) in g {
                groups.entry(key).or_default().append(&mut versions);
            }
        }
        Ok(VersionGroups { groups })
    }
}

/// Immutable record-key → versions mapping, consumed by the resolver.
/// Groups are never empty: a key only appears once at least one of its
/// versions survived the snapshot filter.
#[derive(Debug, Default)]
pub struct VersionGroups {
    groups: GroupMap,
}

impl VersionGroups {
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: RecordKey) -> Option<&[VersionRecord]> {
        self.groups.get(&key).map(|v| v.as_slice())
    }

    /// Consume the mapping, yielding each group once.
    pub fn into_iter(self) -> impl Iterator<Item = (RecordKey, Vec<VersionRecord>)> {
        self.groups.into_iter()
    }
}
