//! Core trait for node models.

use ef_core::NodeId;
use ef_graph::EnergySystem;

use crate::constraint::{LinearRelation, VariableDecl};
use crate::error::ComponentResult;

/// Capability interface attached to a graph node.
///
/// Models are deterministic functions of the graph topology and their own
/// parameters, suitable for parallel problem assembly. Both methods default
/// to "nothing": a plain source, sink, or storage-less junction can go
/// entirely without overriding them.
pub trait NodeModel: Send + Sync {
    /// Model name for logs and violation reports.
    fn name(&self) -> &str;

    /// Node-internal decision variables beyond the per-edge flows.
    fn variables(&self, _node: NodeId) -> Vec<VariableDecl> {
        Vec::new()
    }

    /// Linear relations tying this node's flows together.
    ///
    /// Called with the node the model is attached to and the surrounding
    /// system; implementations read the node's input/output maps and must
    /// not rely on any other mutable state.
    fn relations(
        &self,
        _node: NodeId,
        _system: &EnergySystem,
    ) -> ComponentResult<Vec<LinearRelation>> {
        Ok(Vec::new())
    }
}
