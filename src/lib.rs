// Base modules
pub mod consts;
pub mod config;
pub mod metrics;

// Core data model
pub mod bitmap;
pub mod snapshot;
pub mod version;

// Host-index seams
pub mod expand;
pub mod index;

// Pipeline (accumulators, collectors, resolver, entry point)
pub mod accum;
pub mod collect;
pub mod pipeline;
pub mod resolve;

// Convenience re-exports
pub use accum::{CandidateKeys, VersionGroups};
pub use bitmap::SegmentBitmap;
pub use config::{ConfigBuilder, VisibilityConfig};
pub use expand::VersionExpander;
pub use index::{Collector, Searcher, SegmentCollector, SegmentReader};
pub use pipeline::determine_visibility;
pub use resolve::VisibilityMap;
pub use snapshot::{RecordKey, TxId, TxSnapshot};
pub use version::VersionRecord;
