//! Sink: a pure consumer.

use ef_core::NodeId;
use ef_graph::{EnergySystem, GraphError};

use crate::constraint::LinearRelation;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::NodeModel;

/// A node that only draws from the system (demand, export, ...).
///
/// The mirror of [`Source`](crate::Source): no relations, no outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sink {
    name: String,
}

impl Sink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl NodeModel for Sink {
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
        if this.out_degree() != 0 {
            return Err(ComponentError::InvalidStructure {
                node: this.label().to_owned(),
                what: "a sink cannot have outputs",
            });
        }
        Ok(Vec::new())
    }
}
