//! ef-graph: graph/model layer for energyflow.
//!
//! Provides:
//! - The mutable energy-system graph (`EnergySystem`, `Node`, `Flow`)
//! - Atomic edge operations keeping input/output maps mutually consistent
//! - Full-graph consistency validation
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ef_core::TimeIndex;
//! use ef_graph::{EnergySystem, Flow};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let mut system = EnergySystem::new(TimeIndex::hourly(start, 24));
//! let gas = system.add_node("gas").unwrap();
//! let plant = system.add_node("plant").unwrap();
//! system.connect(gas, plant, Flow::new()).unwrap();
//!
//! assert!(system.node(plant).unwrap().has_input(gas));
//! assert!(system.node(gas).unwrap().has_output(plant));
//! ```

pub mod error;
pub mod flow;
pub mod node;
pub mod system;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use flow::Flow;
pub use node::Node;
pub use system::EnergySystem;
