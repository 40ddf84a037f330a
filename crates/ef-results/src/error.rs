//! Per-node collection failures.

use serde::Serialize;
use thiserror::Error;

/// Why one node's result table could not be produced.
///
/// Reported per node and aggregated; a failure here never aborts collection
/// for the other nodes.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MissingSolutionError {
    #[error("no solved series for edge '{from}' -> '{to}'")]
    Edge { from: String, to: String },

    #[error("solved series for edge '{from}' -> '{to}' has {actual} steps, expected {expected}")]
    EdgeLength {
        from: String,
        to: String,
        expected: usize,
        actual: usize,
    },

    #[error("node series '{name}' has {actual} steps, expected {expected}")]
    VariableLength {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// One failed node with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionFailure {
    pub node: String,
    pub error: MissingSolutionError,
}
