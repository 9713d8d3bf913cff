//! Centralized configuration and builder for visibility resolution.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - VisibilityConfig::from_env() reads SV_* env vars; the builder allows
//!   explicit overrides on top.
//!
//! Tunables:
//! - txid_column: name of the numeric column carrying version txids.
//! - accum_shards: shard count of the concurrent accumulators. Raise it for
//!   hosts that deliver many segments in parallel; 1 degenerates to a single
//!   mutex, which is fine for sequential delivery.
//!
//! The record-key column stays a per-call argument: it varies per index,
//! while these knobs vary per deployment.

use std::fmt;

use crate::consts::{DEFAULT_ACCUM_SHARDS, DEFAULT_TXID_COLUMN};

/// Top-level configuration for one resolution entry point.
#[derive(Clone, Debug)]
pub struct VisibilityConfig {
    /// Column holding a version's transaction id.
    /// Env: SV_TXID_COLUMN (default "_txid")
    pub txid_column: String,

    /// Shard count for candidate/group accumulators.
    /// Env: SV_ACCUM_SHARDS (default 16, min 1)
    pub accum_shards: usize,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        VisibilityConfig {
            txid_column: DEFAULT_TXID_COLUMN.to_string(),
            accum_shards: DEFAULT_ACCUM_SHARDS,
        }
    }
}

impl VisibilityConfig {
    /// Read configuration from environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut cfg = VisibilityConfig::default();

        if let Ok(v) = std::env::var("SV_TXID_COLUMN") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.txid_column = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("SV_ACCUM_SHARDS") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.accum_shards = n.max(1);
            }
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_txid_column<S: Into<String>>(mut self, column: S) -> Self {
        self.txid_column = column.into();
        self
    }

    pub fn with_accum_shards(mut self, shards: usize) -> Self {
        self.accum_shards = shards.max(1);
        self
    }
}

impl fmt::Display for VisibilityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VisibilityConfig {{ txid_column: {}, accum_shards: {} }}",
            self.txid_column, self.accum_shards
        )
    }
}

/// Lightweight builder that produces a VisibilityConfig.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    cfg: VisibilityConfig,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        // Start from env to preserve deploy-time overrides, then allow
        // explicit settings on top.
        ConfigBuilder {
            cfg: VisibilityConfig::from_env(),
        }
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn txid_column<S: Into<String>>(mut self, column: S) -> Self {
        self.cfg.txid_column = column.into();
        self
    }

    pub fn accum_shards(mut self, shards: usize) -> Self {
        self.cfg.accum_shards = shards.max(1);
        self
    }

    pub fn build(self) -> VisibilityConfig {
        self.cfg
    }
}
