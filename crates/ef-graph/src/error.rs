//! Graph-specific error types.

use ef_core::{EfError, NodeId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised by energy-system graph operations.
///
/// Structural errors are raised immediately at the operation that detects
/// them. `Invariant` means the two adjacency maps disagree, which is a bug
/// in this crate, never caller-recoverable.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("node '{node}' cannot be connected to itself")]
    SelfLoop { node: String },

    #[error("edge '{from}' -> '{to}' already exists; disconnect it first")]
    DuplicateEdge { from: String, to: String },

    #[error("no edge '{from}' -> '{to}'")]
    MissingEdge { from: String, to: String },

    #[error("unknown node id {id}")]
    UnknownNode { id: NodeId },

    #[error("a node labeled '{label}' already exists")]
    DuplicateNode { label: String },

    #[error("series length mismatch for {what}: expected {expected}, got {actual}")]
    SeriesLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("inputs/outputs invariant violated: {what}")]
    Invariant { what: String },

    #[error(transparent)]
    Core(#[from] EfError),
}
