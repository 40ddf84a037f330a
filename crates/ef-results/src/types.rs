//! Result data types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CollectionFailure;

/// Named series for one node; rows are time steps.
///
/// Columns live in a `BTreeMap`, so iteration is lexicographic by name no
/// matter the insertion order. That ordering is an external contract:
/// downstream consumers (plotting, CSV export) rely on stable column order
/// across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    columns: BTreeMap<String, Vec<f64>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(name.into(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names in lexicographic order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns in lexicographic name order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// All series collected for one node.
///
/// Flow series are named by the neighbor's label; direction is distinguished
/// by which table a series sits in. `own` holds node-internal variable
/// series found under the node's identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeResult {
    pub inputs: ResultTable,
    pub outputs: ResultTable,
    pub own: ResultTable,
}

/// The outcome of one collection pass.
#[derive(Debug, Clone, Serialize)]
pub struct CollectedResults {
    /// Content hash of the system structure the values were collected for.
    pub model_id: String,
    /// Per-node tables, keyed by node label.
    pub tables: BTreeMap<String, NodeResult>,
    /// Nodes that could not be collected, with reasons.
    pub failures: Vec<CollectionFailure>,
}

impl CollectedResults {
    pub fn table(&self, label: &str) -> Option<&NodeResult> {
        self.tables.get(label)
    }

    /// True when every node produced a table.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
