//! Declarative node interfaces.
//!
//! Each node type publishes one `'static` [`NodeInterface`]: an ordered list
//! of named, typed inputs (with defaults) and a single audio output. Hosts read
//! it once at graph-build time to wire vertices and resolve input names to
//! indices; nothing here is touched per block.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Data type carried by an input vertex
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    Int,
    /// A full block of samples
    Audio,
}

/// Control value handed to a node between blocks
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Int(i32),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Int(_) => ParamKind::Int,
        }
    }

    /// Read as a float. Ints widen losslessly for the ranges nodes use.
    pub fn as_f32(&self) -> f32 {
        match *self {
            ParamValue::Float(value) => value,
            ParamValue::Int(value) => value as f32,
        }
    }

    /// Read as an int. Floats are not narrowed.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            ParamValue::Int(value) => Some(value),
            ParamValue::Float(_) => None,
        }
    }
}

/// One input vertex
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    /// Value used until the host sets one. `None` for audio inputs.
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    pub const fn float(name: &'static str, description: &'static str, default: f32) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::Float,
            default: Some(ParamValue::Float(default)),
        }
    }

    pub const fn int(name: &'static str, description: &'static str, default: i32) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::Int,
            default: Some(ParamValue::Int(default)),
        }
    }

    pub const fn audio(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::Audio,
            default: None,
        }
    }

    /// Whether `value` may be assigned to this input.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        matches!(
            (self.kind, value),
            (ParamKind::Float, _) | (ParamKind::Int, ParamValue::Int(_))
        )
    }
}

/// Static description of a node type
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInterface {
    /// Stable identifier used by hosts to refer to the node type
    pub class_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    /// (major, minor)
    pub version: (u32, u32),
    pub inputs: &'static [ParamSpec],
    /// Name of the single audio output
    pub output: &'static str,
}

impl NodeInterface {
    /// Position of the input called `name`.
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|spec| spec.name == name)
    }

    pub fn input(&self, index: usize) -> Option<&'static ParamSpec> {
        self.inputs.get(index)
    }
}
