//! Bus: a balancing junction.

use ef_core::NodeId;
use ef_graph::{EnergySystem, GraphError};

use crate::constraint::{FlowRef, LinearRelation, Term};
use crate::error::ComponentResult;
use crate::traits::NodeModel;

/// A junction node enforcing Σ incoming == Σ outgoing at every time step.
///
/// Buses carry no parameters; the balance is read entirely from the node's
/// adjacency, so connecting another producer or consumer needs no change to
/// the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    name: String,
}

impl Bus {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl NodeModel for Bus {
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

        let lhs: Vec<Term> = this
            .inputs()
            .map(|(pred, _)| Term::new(1.0, FlowRef::new(pred, node)))
            .collect();
        let rhs: Vec<Term> = this
            .outputs()
            .map(|(succ, _)| Term::new(1.0, FlowRef::new(node, succ)))
            .collect();

        Ok(vec![LinearRelation {
            label: format!("{}:balance", self.name),
            lhs,
            rhs,
        }])
    }
}
