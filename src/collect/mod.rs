//! Collectors for the two query passes:
//! - candidates.rs: phase 1 — record keys of every base-query match.
//! - versions.rs: phase 2 — snapshot-filtered version documents, grouped
//!   by record key.
//!
//! Both follow the same shape: the leaf buffers matches for its segment and
//! merges into a sharded accumulator in `finish`, so segment delivery may be
//! sequential or parallel.

pub mod candidates;
pub mod versions;

pub use candidates::CandidateKeyCollector;
pub use versions::VersionCollector;
