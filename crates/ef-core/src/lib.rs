//! ef-core: stable foundation for energyflow.
//!
//! Contains:
//! - ids (stable compact IDs for graph objects)
//! - error (shared error types)
//! - timeindex (the ordered time axis shared by every time-varying value)
//! - series (fixed-or-per-step attribute values)

pub mod error;
pub mod ids;
pub mod series;
pub mod timeindex;

// Re-exports: nice ergonomics for downstream crates
pub use error::{EfError, EfResult};
pub use ids::*;
pub use series::Series;
pub use timeindex::TimeIndex;
