//! Deterministic simulation testing.
//!
//! Drives a [`crate::BTree`] with a random but reproducible stream of inserts
//! and deletes, mirrors every operation on a `std::collections::BTreeSet`,
//! and checks after each step that:
//! - both agree on the outcome of the operation
//! - the tree still satisfies every structural invariant
//! - enumeration matches the model
//!
//! Given the same seed, a run is identical.
//!
//! # Usage
//!
//! ```
//! use keytree::simulation::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(12345).with_degree(3).with_delete_rate(0.4);
//! let mut sim = Simulator::new(config).expect("valid config");
//! let result = sim.run(500);
//!
//! assert!(result.passed(), "{:?}", result.invariant_violations);
//! ```

mod simulator;
mod workload;

pub use simulator::{SimulationResult, Simulator, SimulatorConfig};
pub use workload::{WorkloadConfig, WorkloadGenerator};
