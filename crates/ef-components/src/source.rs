//! Source: a pure producer.

use ef_core::NodeId;
use ef_graph::{EnergySystem, GraphError};

use crate::constraint::LinearRelation;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::NodeModel;

/// A node that only feeds the system (commodity import, PV field, ...).
///
/// Contributes no relations; its output flows are bounded by their own Flow
/// attributes. Attaching it to a node with inputs is a modeling error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    name: String,
}

impl Source {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl NodeModel for Source {
    fn name(&self) -> &str {
        &self.name
    }

    fn relations(
        &self,
        node: NodeId,
        system: &EnergySystem,
    ) -> ComponentResult<Vec<LinearRelation>> {
        let this = system
            .node(node)
            .ok_or(GraphError::UnknownNode { id: node })?;
        if this.in_degree() != 0 {
            return Err(ComponentError::InvalidStructure {
                node: this.label().to_owned(),
                what: "a source cannot have inputs",
            });
        }
        Ok(Vec::new())
    }
}
