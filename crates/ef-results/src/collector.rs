//! The generic result collector.

use std::collections::BTreeMap;

use ef_core::NodeId;
use ef_graph::{EnergySystem, Node};
use ef_solver::SolvedValues;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{CollectionFailure, MissingSolutionError};
use crate::hash::fingerprint;
use crate::types::{CollectedResults, NodeResult, ResultTable};

/// Map solved values back onto the graph, one table per node.
///
/// The walk is keyed purely on the adjacency structure plus the lookup's key
/// shape, so new node kinds need no collector changes. Each node is
/// independent: the pass is parallel across nodes, and a node whose values
/// are missing is reported in `failures` while every other node still gets
/// its table. Neither the system nor the lookup is mutated.
pub fn collect(system: &EnergySystem, values: &SolvedValues) -> CollectedResults {
    let nodes: Vec<&Node> = system.nodes().collect();
    let per_node: Vec<(String, Result<NodeResult, MissingSolutionError>)> = nodes
        .par_iter()
        .map(|node| {
            (
                node.label().to_owned(),
                collect_node(system, values, node),
            )
        })
        .collect();

    let mut tables = BTreeMap::new();
    let mut failures = Vec::new();
    for (label, outcome) in per_node {
        match outcome {
            Ok(table) => {
                tables.insert(label, table);
            }
            Err(error) => {
                warn!(node = %label, %error, "result collection failed for node");
                failures.push(CollectionFailure { node: label, error });
            }
        }
    }

    debug!(
        collected = tables.len(),
        failed = failures.len(),
        "result collection finished"
    );

    CollectedResults {
        model_id: fingerprint(system),
        tables,
        failures,
    }
}

fn collect_node(
    system: &EnergySystem,
    values: &SolvedValues,
    node: &Node,
) -> Result<NodeResult, MissingSolutionError> {
    let horizon = system.horizon();
    let id = node.id();

    let mut inputs = ResultTable::new();
    for (pred, _) in node.inputs() {
        let series = edge_series(system, values, pred, id, horizon)?;
        inputs.insert(system.label_of(pred), series);
    }

    let mut outputs = ResultTable::new();
    for (succ, _) in node.outputs() {
        let series = edge_series(system, values, id, succ, horizon)?;
        outputs.insert(system.label_of(succ), series);
    }

    let mut own = ResultTable::new();
    for (name, series) in values.node_vars(id) {
        if series.len() != horizon {
            return Err(MissingSolutionError::VariableLength {
                name: name.to_owned(),
                expected: horizon,
                actual: series.len(),
            });
        }
        own.insert(name, series.to_vec());
    }

    Ok(NodeResult {
        inputs,
        outputs,
        own,
    })
}

fn edge_series(
    system: &EnergySystem,
    values: &SolvedValues,
    from: NodeId,
    to: NodeId,
    horizon: usize,
) -> Result<Vec<f64>, MissingSolutionError> {
    let series = values
        .edge_series(from, to)
        .ok_or_else(|| MissingSolutionError::Edge {
            from: system.label_of(from),
            to: system.label_of(to),
        })?;
    if series.len() != horizon {
        return Err(MissingSolutionError::EdgeLength {
            from: system.label_of(from),
            to: system.label_of(to),
            expected: horizon,
            actual: series.len(),
        });
    }
    Ok(series.to_vec())
}
