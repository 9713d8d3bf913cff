//! Concurrency-safe accumulators for the collection phases.
//!
//! Segment leaves buffer matches locally and merge once per segment, so the
//! sharded structures here see one coarse-grained lock acquisition per
//! (segment, shard) pair rather than one per document. Shard selection uses
//! a stable explicit hash (xxhash64, seed 0) — never std::DefaultHasher —
//! to keep shard mapping invariant across toolchains/platforms.
//!
//! Both accumulators end with `freeze()`, producing an immutable handoff
//! value for the next pipeline stage.

pub mod groups;
pub mod keys;

pub use groups::{ShardedVersionGroups, VersionGroups};
pub use keys::{CandidateKeys, ShardedKeySet};

use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::snapshot::RecordKey;

/// Stable shard index for a record key.
#[inline]
pub(crate) fn shard_of(key: RecordKey, shards: usize) -> usize {
    debug_assert!(shards > 0, "shards must be > 0");
    let mut h = XxHash64::with_seed(0);
    h.write_u64(key);
    (h.finish() % shards as u64) as usize
}
