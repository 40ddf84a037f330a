//! ef-components: node models for energyflow.
//!
//! A node in the graph is plain topology; what it *means* is supplied by a
//! model implementing [`NodeModel`]. Models declare node-internal decision
//! variables and contribute linear relations over the node's flows; a plain
//! node needs no model and contributes nothing. New node kinds plug in
//! without touching the graph or the result collector.

pub mod bus;
pub mod constraint;
pub mod error;
pub mod sink;
pub mod source;
pub mod traits;
pub mod transformer;

// Re-exports for ergonomics
pub use bus::Bus;
pub use constraint::{FlowRef, LinearRelation, Term, VariableDecl};
pub use error::{ComponentError, ComponentResult};
pub use sink::Sink;
pub use source::Source;
pub use traits::NodeModel;
pub use transformer::Transformer;
