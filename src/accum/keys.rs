//! Candidate record-key set: sharded while collecting, frozen for handoff.

use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::sync::Mutex;

use super::shard_of;
use crate::snapshot::RecordKey;

/// Shared accumulator for phase 1. Safe to feed from concurrent per-segment
/// leaves; each merge locks a shard once.
pub struct ShardedKeySet {
    shards: Vec<Mutex<HashSet<RecordKey>>>,
}

impl ShardedKeySet {
    pub fn new(shards: usize) -> Self {
        let n = shards.max(1);
        ShardedKeySet {
            shards: (0..n).map(|_| Mutex::new(HashSet::new())).collect(),
        }
    }

    /// Merge one leaf's buffered keys. Keys are bucketed per shard first so
    /// each shard lock is taken at most once per call.
    pub fn merge(&self, keys: &[RecordKey]) -> Result<()> {
        let n = self.shards.len();
        let mut buckets: Vec<Vec<RecordKey>> = vec![Vec::new(); n];
        for &k in keys {
            buckets[shard_of(k, n)].push(k);
        }
        for (i, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let mut g = self.shards[i]
                .lock()
                .map_err(|_| anyhow!("key set shard poisoned"))?;
            g.extend(bucket);
        }
        Ok(())
    }

    /// Collapse the shards into an immutable candidate set.
    pub fn freeze(self) -> Result<CandidateKeys> {
        let mut keys = HashSet::new();
        for shard in self.shards {
            let g = shard
                .into_inner()
                .map_err(|_| anyhow!("key set shard poisoned"))?;
            keys.extend(g);
        }
        Ok(CandidateKeys { keys })
    }
}

/// Immutable candidate-key set handed from phase 1 to the expander.
/// Discarded after phase 2 begins.
#[derive(Debug, Clone, Default)]
pub struct CandidateKeys {
    keys: HashSet<RecordKey>,
}

impl CandidateKeys {
    #[inline]
    pub fn contains(&self, key: RecordKey) -> bool {
        self.keys.contains(&key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordKey> + '_ {
        self.keys.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_dedups_across_calls() -> Result<()> {
        let set = ShardedKeySet::new(4);
        set.merge(&[1, 2, 3])?;
        set.merge(&[3, 4])?;
        let frozen = set.freeze()?;
        assert_eq!(frozen.len(), 4);
        assert!(frozen.contains(1) && frozen.contains(4));
        assert!(!frozen.contains(5));
        Ok(())
    }

    #[test]
    fn empty_freeze() -> Result<()> {
        let frozen = ShardedKeySet::new(1).freeze()?;
        assert!(frozen.is_empty());
        Ok(())
    }
}
