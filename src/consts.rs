//! Crate-wide constants.

/// Default name of the numeric column holding a version's transaction id.
/// Env override: SV_TXID_COLUMN.
pub const DEFAULT_TXID_COLUMN: &str = "_txid";

/// Default shard count for the concurrent accumulators.
/// Env override: SV_ACCUM_SHARDS.
pub const DEFAULT_ACCUM_SHARDS: usize = 16;
