//! Synthetic benchmarks for the hypergraph method.
//!
//! Ring lattices have an obvious community structure (the rings) and a single
//! knob to destroy it (rewiring). This module generates them, perturbs them,
//! calibrates thresholds and runs the rewiring sweep. Everything returns plain
//! data; progress is reported through `tracing`.
//!
//! ```rust
//! use hypercommon::experiments::RewiringSweep;
//!
//! let curves = RewiringSweep::new()
//!     .with_steps(4)
//!     .with_repetitions(1)
//!     .with_thresholds([0.4])
//!     .run(40, 4, 2)
//!     .unwrap();
//! assert_eq!(curves[0].scores.len(), 5);
//! ```

mod lattice;
mod rewiring;
mod sweep;
mod threshold;

pub use lattice::{ring_ground_truth, ring_lattice, ring_lattice_edge_count};
pub use rewiring::{rewire_one_edge, rewire_step};
pub use sweep::{validate_rewiring_plan, RewiringSweep, SweepCurve};
pub use threshold::{average_commonality, representative_thresholds, threshold_table, ThresholdRow};

use std::convert::Infallible;

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
