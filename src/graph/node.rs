use crate::error::NodeError;
use crate::graph::interface::{NodeInterface, ParamKind, ParamSpec, ParamValue};

/// Typed access to a node's control parameters.
///
/// Values are plain floats; integer parameters round to the nearest whole
/// number. Set them between blocks: every parameter is read once at the start
/// of `render_block` and held for the rest of the block.
pub trait Parameterized: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    fn set_param(&mut self, param: Self::Param, value: f32);
}

/// Block-processing contract between a node and its host graph
///
/// The host builds a node once, calls `render_block` exactly once per audio
/// block from a single realtime thread, and drops the node when the graph is
/// rebuilt. Implementations must fill `out` completely, must not allocate or
/// block, and never fail mid-block.
pub trait GraphNode: Send {
    /// Static description of the node's inputs and output
    fn interface(&self) -> &'static NodeInterface;

    /// Produce one block into `out`.
    ///
    /// Effect nodes read their audio input from `out` and overwrite it in
    /// place, so the host copies the upstream block in first.
    fn render_block(&mut self, out: &mut [f32]);

    /// Refresh control input `index` (as listed in [`interface`](Self::interface)).
    fn set_input(&mut self, index: usize, value: ParamValue) -> Result<(), NodeError>;

    /// Return to the freshly constructed state without reallocating.
    ///
    /// Default implementation does nothing (stateless nodes).
    fn reset(&mut self) {
        // Default: do nothing
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn interface(&self) -> &'static NodeInterface {
        (**self).interface()
    }

    fn render_block(&mut self, out: &mut [f32]) {
        (**self).render_block(out)
    }

    fn set_input(&mut self, index: usize, value: ParamValue) -> Result<(), NodeError> {
        (**self).set_input(index, value)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Resolve and type-check a `set_input` call against an interface.
pub(crate) fn check_input(
    interface: &'static NodeInterface,
    index: usize,
    value: &ParamValue,
) -> Result<&'static ParamSpec, NodeError> {
    let spec = interface
        .input(index)
        .ok_or(NodeError::UnknownInput { index })?;

    if spec.kind == ParamKind::Audio {
        return Err(NodeError::NotAControl { name: spec.name });
    }

    if !spec.accepts(value) {
        return Err(NodeError::ParamTypeMismatch {
            name: spec.name,
            expected: spec.kind,
        });
    }

    Ok(spec)
}

/// Round a float control to an integer parameter.
#[inline]
pub(crate) fn to_int_param(value: f32) -> i32 {
    // `as` saturates and maps NaN to 0
    value.round() as i32
}
