//! Errors surfaced to the host at graph-build time.
//!
//! Nothing in the per-sample paths returns an error. These cover construction
//! (bad sample rate, bad block size) and host wiring mistakes (mismatched
//! buffers, setting an input that does not exist or has the wrong type).

use crate::graph::interface::ParamKind;

/// Errors that can occur when building or wiring a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeError {
    /// Sample rate is not finite or is outside the supported range
    InvalidSampleRate { sample_rate: f32 },
    /// Block size is zero or larger than `MAX_BLOCK_SIZE`
    InvalidBlockSize { block_size: usize },
    /// Two buffers that must be the same length are not
    BlockLengthMismatch { expected: usize, actual: usize },
    /// Input index past the end of the node's interface
    UnknownInput { index: usize },
    /// Input is an audio stream and cannot be set as a control value
    NotAControl { name: &'static str },
    /// Value kind does not match the declared input kind
    ParamTypeMismatch {
        name: &'static str,
        expected: ParamKind,
    },
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeError::InvalidSampleRate { sample_rate } => write!(
                f,
                "unsupported sample rate {} Hz (expected {}..={} Hz)",
                sample_rate,
                crate::config::MIN_SAMPLE_RATE,
                crate::config::MAX_SAMPLE_RATE
            ),
            NodeError::InvalidBlockSize { block_size } => write!(
                f,
                "unsupported block size {} (expected 1..={})",
                block_size,
                crate::MAX_BLOCK_SIZE
            ),
            NodeError::BlockLengthMismatch { expected, actual } => write!(
                f,
                "buffer length mismatch: expected {} samples, got {}",
                expected, actual
            ),
            NodeError::UnknownInput { index } => {
                write!(f, "no input at index {}", index)
            }
            NodeError::NotAControl { name } => {
                write!(f, "input '{}' is an audio stream, not a control", name)
            }
            NodeError::ParamTypeMismatch { name, expected } => {
                write!(f, "input '{}' expects a {:?} value", name, expected)
            }
        }
    }
}

impl std::error::Error for NodeError {}
