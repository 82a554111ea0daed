pub mod config;
pub mod dsp;
pub mod error;
pub mod graph; // Host-facing nodes and their interface descriptions

pub use config::NodeConfig;
pub use error::NodeError;

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Internal oversampling ratio used by the fold effect.
pub const OVERSAMPLE_FACTOR: usize = 4;
