//! Host-facing processing nodes.
//!
//! Graph nodes wrap the low-level DSP primitives with what a host graph needs:
//! construction from a validated config, a static interface description, and
//! a block-at-a-time processing entry point that keeps state across blocks.

/// Build nodes from a `NodeKind`.
pub mod factory;
/// Two-operator FM tone generator.
pub mod fm;
/// Oversampled wave folder with feedback saturation.
pub mod fold;
/// Pass-through gain.
pub mod gain;
/// Static input/output descriptions.
pub mod interface;
/// Core traits shared by all graph nodes.
pub mod node;

pub use factory::{create_node, NodeKind};
pub use fm::{FmNode, FmParam};
pub use fold::{FoldNode, FoldParam};
pub use gain::{GainNode, GainParam};
pub use interface::{NodeInterface, ParamKind, ParamSpec, ParamValue};
pub use node::{GraphNode, Parameterized};
