//! ef-results: post-solve result collection.
//!
//! One generic walk over the graph's adjacency turns the solver's value
//! lookup into per-node tables — no node kind writes its own extraction
//! code. Collection is a pure read, parallel across nodes, and partial:
//! nodes whose values are missing fail individually while the rest of the
//! system still produces tables.

pub mod collector;
pub mod error;
pub mod hash;
pub mod types;

// Re-exports for ergonomics
pub use collector::collect;
pub use error::{CollectionFailure, MissingSolutionError};
pub use hash::fingerprint;
pub use types::{CollectedResults, NodeResult, ResultTable};
