//! src/config.rs
//!
//! Configuration for BPTT batch sampling.
//!
//! Example:
//! ```ignore
//! let config = BpttConfig::builder()
//!     .bptt_length(35)
//!     .batch_size(20)
//!     .drop_last(true)
//!     .build();
//! let sampler = BpttBatchSampler::from_config(tokens.len(), &config)?;
//! ```
//!
//! The config is `serde`-compatible so it can be embedded in a larger training
//! config. Missing fields fall back to their defaults.

use crate::error::{ensure_positive, Result};
use serde::{Deserialize, Serialize};

/// Window length used when none is configured.
pub const DEFAULT_BPTT_LENGTH: usize = 35;

/// Configuration for `BpttBatchSampler`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BpttConfig {
    /// Maximum number of positions in each source/target window (must be >= 1)
    pub bptt_length: usize,
    /// Number of chunks, i.e. rows per batch (must be >= 1)
    pub batch_size: usize,
    /// Whether to discard the `length % batch_size` trailing positions
    pub drop_last: bool,
}

impl Default for BpttConfig {
    fn default() -> Self {
        Self {
            bptt_length: DEFAULT_BPTT_LENGTH,
            batch_size: 1,
            drop_last: false,
        }
    }
}

impl BpttConfig {
    pub fn builder() -> BpttConfigBuilder {
        BpttConfigBuilder::default()
    }

    /// Checks that every field is in range.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("bptt_length", self.bptt_length)?;
        ensure_positive("batch_size", self.batch_size)
    }
}

/// Builder for BpttConfig with method chaining
#[derive(Debug, Default)]
pub struct BpttConfigBuilder {
    config: BpttConfig,
}

impl BpttConfigBuilder {
    /// Set the window length (must be > 0)
    pub fn bptt_length(mut self, length: usize) -> Self {
        self.config.bptt_length = length;
        self
    }

    /// Set the number of chunks per batch (must be > 0)
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    /// Set whether to drop the trailing positions that don't fill every chunk
    pub fn drop_last(mut self, drop: bool) -> Self {
        self.config.drop_last = drop;
        self
    }

    /// Build the final configuration.
    ///
    /// Validation happens when a sampler is built from the config.
    pub fn build(self) -> BpttConfig {
        self.config
    }
}
