//! Construction-time settings shared by every node.
//!
//! A `NodeConfig` is captured once when a node is built and never changes for
//! the lifetime of that node. Scratch buffers are sized from `max_block_size`
//! up front so nothing allocates on the audio thread.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::NodeError;
use crate::MAX_BLOCK_SIZE;

/// Lowest sample rate a node can be built for (Hz)
pub const MIN_SAMPLE_RATE: f32 = 8_000.0;
/// Highest sample rate a node can be built for (Hz)
pub const MAX_SAMPLE_RATE: f32 = 384_000.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeConfig {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Largest block the host will hand over in one call. Longer blocks are
    /// still accepted and processed in chunks of this size.
    pub max_block_size: usize,
}

impl NodeConfig {
    /// Build and validate a config.
    pub fn new(sample_rate: f32, max_block_size: usize) -> Result<Self, NodeError> {
        let config = Self {
            sample_rate,
            max_block_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    /// Check that the config describes something a node can run at.
    pub fn validate(&self) -> Result<(), NodeError> {
        if !self.sample_rate.is_finite()
            || self.sample_rate < MIN_SAMPLE_RATE
            || self.sample_rate > MAX_SAMPLE_RATE
        {
            tracing::warn!(sample_rate = self.sample_rate, "rejecting node config");
            return Err(NodeError::InvalidSampleRate {
                sample_rate: self.sample_rate,
            });
        }

        if self.max_block_size == 0 || self.max_block_size > MAX_BLOCK_SIZE {
            tracing::warn!(block_size = self.max_block_size, "rejecting node config");
            return Err(NodeError::InvalidBlockSize {
                block_size: self.max_block_size,
            });
        }

        Ok(())
    }

    /// Nyquist frequency for this sample rate.
    #[inline]
    pub fn nyquist(&self) -> f32 {
        self.sample_rate * 0.5
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_block_size: 512,
        }
    }
}
