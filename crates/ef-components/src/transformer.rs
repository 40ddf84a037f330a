//! Transformer: n-input/m-output energy conversion.

use std::collections::BTreeMap;

use ef_core::NodeId;
use ef_graph::{EnergySystem, GraphError};

use crate::constraint::{FlowRef, LinearRelation, Term};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::NodeModel;

/// Converts n input flows into m output flows via fixed conversion factors.
///
/// The factor table is keyed by (input, output) and must carry an entry for
/// every declared pair; factors are interpreted relative to the designated
/// reference input. For each declared input `i` and output `o` the model
/// contributes
///
/// ```text
/// flow(i -> self, t) * factor(i, o) == flow(self -> o, t)
/// ```
///
/// With one input and one output this degenerates to the plain
/// single-conversion case; there is no special casing.
///
/// Factors are tied to the reference input and are NOT interchangeable
/// across references: use [`Transformer::with_reference`] to move the
/// reference, which re-validates the table instead of silently
/// reinterpreting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformer {
    name: String,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    reference: NodeId,
    factors: BTreeMap<(NodeId, NodeId), f64>,
}

impl Transformer {
    /// Build a transformer and validate its conversion table.
    ///
    /// Fails if inputs or outputs are empty or contain duplicates, if the
    /// reference is not a declared input, if any declared (input, output)
    /// pair lacks a factor, if a factor is given for an undeclared pair, or
    /// if a factor is not finite and positive.
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<NodeId>,
        outputs: Vec<NodeId>,
        reference: NodeId,
        factors: impl IntoIterator<Item = ((NodeId, NodeId), f64)>,
    ) -> ComponentResult<Self> {
        let name = name.into();
        if inputs.is_empty() {
            return Err(ComponentError::InvalidArg {
                what: "transformer needs at least one input",
            });
        }
        if outputs.is_empty() {
            return Err(ComponentError::InvalidArg {
                what: "transformer needs at least one output",
            });
        }
        if has_duplicates(&inputs) {
            return Err(ComponentError::InvalidArg {
                what: "duplicate transformer input",
            });
        }
        if has_duplicates(&outputs) {
            return Err(ComponentError::InvalidArg {
                what: "duplicate transformer output",
            });
        }
        if !inputs.contains(&reference) {
            return Err(ComponentError::UnknownReference {
                transformer: name,
                reference,
            });
        }

        let factors: BTreeMap<(NodeId, NodeId), f64> = factors.into_iter().collect();
        for (&(input, output), &value) in &factors {
            if !inputs.contains(&input) || !outputs.contains(&output) {
                return Err(ComponentError::InvalidArg {
                    what: "conversion factor given for an undeclared input/output pair",
                });
            }
            if !value.is_finite() || value <= 0.0 {
                return Err(ComponentError::InvalidFactor {
                    transformer: name.clone(),
                    input,
                    output,
                    value,
                });
            }
        }
        for &input in &inputs {
            for &output in &outputs {
                if !factors.contains_key(&(input, output)) {
                    return Err(ComponentError::IncompleteConversionTable {
                        transformer: name.clone(),
                        input,
                        output,
                    });
                }
            }
        }

        Ok(Self {
            name,
            inputs,
            outputs,
            reference,
            factors,
        })
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn reference(&self) -> NodeId {
        self.reference
    }

    pub fn factor(&self, input: NodeId, output: NodeId) -> Option<f64> {
        self.factors.get(&(input, output)).copied()
    }

    /// Move the reference to another declared input.
    ///
    /// The table keeps its (input, output) entries; what changes is which
    /// input the factors are anchored to, so the whole table is re-validated
    /// against the new reference rather than reinterpreted.
    pub fn with_reference(self, reference: NodeId) -> ComponentResult<Self> {
        Self::new(self.name, self.inputs, self.outputs, reference, self.factors)
    }
}

impl NodeModel for Transformer {
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

        // Every declared connection must exist as a real edge.
        for &input in &self.inputs {
            if !this.has_input(input) {
                return Err(GraphError::MissingEdge {
                    from: system.label_of(input),
                    to: this.label().to_owned(),
                }
                .into());
            }
        }
        for &output in &self.outputs {
            if !this.has_output(output) {
                return Err(GraphError::MissingEdge {
                    from: this.label().to_owned(),
                    to: system.label_of(output),
                }
                .into());
            }
        }

        let mut relations = Vec::with_capacity(self.inputs.len() * self.outputs.len());
        for &input in &self.inputs {
            for &output in &self.outputs {
                let factor = self.factor(input, output).ok_or(
                    ComponentError::IncompleteConversionTable {
                        transformer: self.name.clone(),
                        input,
                        output,
                    },
                )?;
                relations.push(LinearRelation {
                    label: format!(
                        "{}:{}->{}",
                        self.name,
                        system.label_of(input),
                        system.label_of(output)
                    ),
                    lhs: vec![Term::new(factor, FlowRef::new(input, node))],
                    rhs: vec![Term::new(1.0, FlowRef::new(node, output))],
                });
            }
        }
        Ok(relations)
    }
}

fn has_duplicates(nodes: &[NodeId]) -> bool {
    let mut sorted = nodes.to_vec();
    sorted.sort();
    sorted.windows(2).any(|w| w[0] == w[1])
}
