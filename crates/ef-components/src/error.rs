//! Error types for node models.

use ef_core::NodeId;
use ef_graph::GraphError;
use thiserror::Error;

/// Errors raised when constructing a model or asking it for relations.
///
/// Conversion-table problems are construction errors; they are never
/// deferred to solve time.
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error(
        "conversion table of '{transformer}' has no factor for input {input} / output {output}"
    )]
    IncompleteConversionTable {
        transformer: String,
        input: NodeId,
        output: NodeId,
    },

    #[error("'{transformer}': reference input {reference} is not among the declared inputs")]
    UnknownReference {
        transformer: String,
        reference: NodeId,
    },

    #[error(
        "'{transformer}': factor for input {input} / output {output} must be finite and positive, got {value}"
    )]
    InvalidFactor {
        transformer: String,
        input: NodeId,
        output: NodeId,
        value: f64,
    },

    #[error("'{node}': {what}")]
    InvalidStructure { node: String, what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;
