//! Full-graph consistency audit.

use crate::error::{GraphError, GraphResult};
use crate::system::EnergySystem;

/// Verify the bidirectional invariant and the arena cross-references.
///
/// Checked invariants:
/// - every label index entry points at a live node carrying that label
/// - every output entry is mirrored by an input entry holding the same flow
/// - every input entry is mirrored by an output entry holding the same flow
/// - every adjacency entry references a live flow slot
/// - the number of live flow slots equals the number of edges
pub(crate) fn check_consistency(system: &EnergySystem) -> GraphResult<()> {
    for (label, &id) in &system.by_label {
        match system.node(id) {
            Some(node) if node.label() == label => {}
            Some(node) => {
                return Err(invariant(format!(
                    "label index entry '{label}' points at node labeled '{}'",
                    node.label()
                )));
            }
            None => {
                return Err(invariant(format!(
                    "label index entry '{label}' points at a removed node"
                )));
            }
        }
    }

    let mut edge_entries = 0usize;
    for node in system.nodes() {
        for (succ, fid) in node.outputs() {
            let Some(other) = system.node(succ) else {
                return Err(invariant(format!(
                    "'{}' has an output to a removed node",
                    node.label()
                )));
            };
            match other.inputs.get(&node.id()) {
                Some(&mirror) if mirror == fid => {}
                Some(_) => {
                    return Err(invariant(format!(
                        "edge '{}' -> '{}' holds different flows on its two sides",
                        node.label(),
                        other.label()
                    )));
                }
                None => {
                    return Err(invariant(format!(
                        "edge '{}' -> '{}' is missing its input-side entry",
                        node.label(),
                        other.label()
                    )));
                }
            }
            if system.flow(fid).is_none() {
                return Err(invariant(format!(
                    "edge '{}' -> '{}' references a freed flow slot",
                    node.label(),
                    other.label()
                )));
            }
            edge_entries += 1;
        }

        for (pred, fid) in node.inputs() {
            let Some(other) = system.node(pred) else {
                return Err(invariant(format!(
                    "'{}' has an input from a removed node",
                    node.label()
                )));
            };
            match other.outputs.get(&node.id()) {
                Some(&mirror) if mirror == fid => {}
                _ => {
                    return Err(invariant(format!(
                        "edge '{}' -> '{}' is missing its output-side entry",
                        other.label(),
                        node.label()
                    )));
                }
            }
        }
    }

    if edge_entries != system.edge_count() {
        return Err(invariant(format!(
            "{} adjacency edges but {} live flow slots",
            edge_entries,
            system.edge_count()
        )));
    }
    Ok(())
}

fn invariant(what: String) -> GraphError {
    GraphError::Invariant { what }
}
