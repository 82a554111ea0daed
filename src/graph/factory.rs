//! Build nodes by kind.
//!
//! Hosts that wire graphs from data (rather than from Rust types) pick a
//! [`NodeKind`], inspect its interface, and call [`create_node`]. There is no
//! global registry: the set of kinds is closed and known at compile time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::graph::fm::{FmNode, FM_INTERFACE};
use crate::graph::fold::{FoldNode, FOLD_INTERFACE};
use crate::graph::gain::{GainNode, GAIN_INTERFACE};
use crate::graph::interface::NodeInterface;
use crate::graph::node::GraphNode;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    FmGenerator,
    WaveFolder,
    Gain,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::FmGenerator, NodeKind::WaveFolder, NodeKind::Gain];

    /// Interface description, available without building a node.
    pub fn interface(&self) -> &'static NodeInterface {
        match self {
            NodeKind::FmGenerator => &FM_INTERFACE,
            NodeKind::WaveFolder => &FOLD_INTERFACE,
            NodeKind::Gain => &GAIN_INTERFACE,
        }
    }

    /// Look a kind up by its interface class name.
    pub fn from_class_name(class_name: &str) -> Option<NodeKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.interface().class_name == class_name)
    }
}

/// Validate `config` and build a node of the given kind with default parameters.
pub fn create_node(kind: NodeKind, config: &NodeConfig) -> Result<Box<dyn GraphNode>, NodeError> {
    config.validate()?;

    let node: Box<dyn GraphNode> = match kind {
        NodeKind::FmGenerator => Box::new(FmNode::new(config)?),
        NodeKind::WaveFolder => Box::new(FoldNode::new(config)?),
        NodeKind::Gain => Box::new(GainNode::default()),
    };
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::interface::ParamValue;

    #[test]
    fn test_every_kind_builds() {
        let config = NodeConfig::default();
        for kind in NodeKind::ALL {
            let node = create_node(kind, &config).unwrap();
            assert_eq!(node.interface(), kind.interface());
            assert_eq!(node.interface().output, "Out");
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = NodeConfig::default().with_max_block_size(0);
        for kind in NodeKind::ALL {
            assert_eq!(
                create_node(kind, &config).err(),
                Some(NodeError::InvalidBlockSize { block_size: 0 })
            );
        }
    }

    #[test]
    fn test_class_name_roundtrip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_class_name(kind.interface().class_name), Some(kind));
        }
        assert_eq!(NodeKind::from_class_name("Reverb"), None);
    }

    #[test]
    fn test_boxed_node_renders_full_block() {
        let config = NodeConfig::default();
        let mut fm = create_node(NodeKind::FmGenerator, &config).unwrap();
        let amp = fm.interface().input_index("Amplitude Envelope").unwrap();
        fm.set_input(amp, ParamValue::Float(0.5)).unwrap();

        let mut block = vec![f32::NAN; 256];
        fm.render_block(&mut block);
        assert!(block.iter().all(|s| s.is_finite() && s.abs() <= 0.5));
    }
}
