//! Node: a vertex with mutually consistent input/output maps.

use std::collections::BTreeMap;

use ef_core::{FlowId, NodeId};

/// A vertex in the energy-system graph (a conversion unit, source, sink, or
/// bus).
///
/// A node holds two ordered maps: predecessors to incoming flows and
/// successors to outgoing flows. The maps are kept mutually consistent by
/// [`EnergySystem`](crate::EnergySystem) — `b` appears in `a`'s outputs with
/// flow `f` exactly when `a` appears in `b`'s inputs with the same `f`.
/// Callers get read-only views; all mutation goes through the system's
/// connect/disconnect/remove operations so neither side can be updated
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) label: String,
    pub(crate) inputs: BTreeMap<NodeId, FlowId>,
    pub(crate) outputs: BTreeMap<NodeId, FlowId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, label: String) -> Self {
        Self {
            id,
            label,
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Unique label, stable for the node's lifetime.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Predecessor nodes and the flow arriving from each.
    pub fn inputs(&self) -> impl Iterator<Item = (NodeId, FlowId)> + '_ {
        self.inputs.iter().map(|(n, f)| (*n, *f))
    }

    /// Successor nodes and the flow leaving toward each.
    pub fn outputs(&self) -> impl Iterator<Item = (NodeId, FlowId)> + '_ {
        self.outputs.iter().map(|(n, f)| (*n, *f))
    }

    pub fn has_input(&self, from: NodeId) -> bool {
        self.inputs.contains_key(&from)
    }

    pub fn has_output(&self, to: NodeId) -> bool {
        self.outputs.contains_key(&to)
    }

    pub fn in_degree(&self) -> usize {
        self.inputs.len()
    }

    pub fn out_degree(&self) -> usize {
        self.outputs.len()
    }
}
