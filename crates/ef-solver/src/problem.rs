//! Problem definition handed to the external solver.

use std::collections::HashMap;

use ef_core::{NodeId, Series};
use ef_graph::{EnergySystem, Flow, GraphError};
use tracing::debug;

use ef_components::{FlowRef, LinearRelation, NodeModel, VariableDecl};

use crate::error::{SolverError, SolverResult};

/// An optimization problem over an energy system.
///
/// Borrows the graph and carries the node models attached to it. Nodes
/// without a model are plain topology and contribute only their edge flow
/// variables.
pub struct Problem<'a> {
    system: &'a EnergySystem,
    models: HashMap<NodeId, Box<dyn NodeModel>>,
}

impl<'a> Problem<'a> {
    pub fn new(system: &'a EnergySystem) -> Self {
        Self {
            system,
            models: HashMap::new(),
        }
    }

    pub fn system(&self) -> &EnergySystem {
        self.system
    }

    /// Attach a model to a node. At most one model per node.
    pub fn attach_model(&mut self, node: NodeId, model: Box<dyn NodeModel>) -> SolverResult<()> {
        if self.system.node(node).is_none() {
            return Err(GraphError::UnknownNode { id: node }.into());
        }
        if self.models.contains_key(&node) {
            return Err(SolverError::DuplicateModel {
                node: self.system.label_of(node),
            });
        }
        self.models.insert(node, model);
        Ok(())
    }

    pub fn model(&self, node: NodeId) -> Option<&dyn NodeModel> {
        self.models.get(&node).map(Box::as_ref)
    }

    /// Assemble everything the external solver needs.
    ///
    /// Flow variables come out sorted by `(from, to)`; node variables and
    /// relations follow node-id order. The ordering is deterministic so two
    /// assemblies of the same system are identical.
    pub fn assemble(&self) -> SolverResult<ConstraintSet> {
        let horizon = self.system.horizon();

        // Node arena order is ascending ids; each node's outputs map is
        // ordered by successor id. The result is sorted by (from, to).
        let mut flow_vars = Vec::with_capacity(self.system.edge_count());
        for node in self.system.nodes() {
            for (succ, flow) in self.system.outputs(node.id()) {
                flow_vars.push(FlowVariable::from_flow(
                    FlowRef::new(node.id(), succ),
                    flow,
                ));
            }
        }

        let mut model_nodes: Vec<NodeId> = self.models.keys().copied().collect();
        model_nodes.sort();

        let mut node_vars = Vec::new();
        let mut relations = Vec::new();
        for node in model_nodes {
            let model = &self.models[&node];
            for decl in model.variables(node) {
                node_vars.push((node, decl));
            }
            relations.extend(model.relations(node, self.system)?);
        }

        debug!(
            flows = flow_vars.len(),
            node_vars = node_vars.len(),
            relations = relations.len(),
            horizon,
            "assembled constraint set"
        );

        Ok(ConstraintSet {
            horizon,
            flow_vars,
            node_vars,
            relations,
        })
    }
}

/// One decision variable per directed edge and time step, with bounds
/// derived from the edge's Flow attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowVariable {
    pub flow: FlowRef,
    pub nominal_capacity: Option<f64>,
    pub min: Option<Series>,
    pub max: Option<Series>,
    pub fix: Option<Series>,
    pub binary: bool,
    pub investment: bool,
}

impl FlowVariable {
    fn from_flow(flow: FlowRef, attrs: &Flow) -> Self {
        Self {
            flow,
            nominal_capacity: attrs.nominal_capacity,
            min: attrs.min.clone(),
            max: attrs.max.clone(),
            fix: attrs.fixed.clone(),
            binary: attrs.binary,
            investment: attrs.investment,
        }
    }

    /// Lower bound at step `t` (0 unless a per-unit `min` scales a nominal
    /// capacity).
    pub fn lower_at(&self, t: usize) -> f64 {
        match (self.nominal_capacity, &self.min) {
            (Some(nominal), Some(min)) => min.value_at(t).map(|m| m * nominal).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Upper bound at step `t`. None means unbounded — no nominal capacity,
    /// or capacity is an investment decision left to the solver.
    pub fn upper_at(&self, t: usize) -> Option<f64> {
        if self.investment {
            return None;
        }
        let nominal = self.nominal_capacity?;
        let per_unit = match &self.max {
            Some(max) => max.value_at(t)?,
            None => 1.0,
        };
        Some(nominal * per_unit)
    }

    /// Pinned value at step `t` when the flow carries a fixed profile.
    pub fn fixed_at(&self, t: usize) -> Option<f64> {
        let nominal = self.nominal_capacity?;
        Some(nominal * self.fix.as_ref()?.value_at(t)?)
    }
}

/// Everything the external solver consumes: variables, bounds, relations,
/// and the horizon they are indexed against.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    pub horizon: usize,
    pub flow_vars: Vec<FlowVariable>,
    pub node_vars: Vec<(NodeId, VariableDecl)>,
    pub relations: Vec<LinearRelation>,
}

impl ConstraintSet {
    pub fn flow_var(&self, flow: FlowRef) -> Option<&FlowVariable> {
        self.flow_vars.iter().find(|v| v.flow == flow)
    }
}
