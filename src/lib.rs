//! # hypercommon
//!
//! Overlapping community detection by triangle hypergraphs, plus the Omega index
//! to score overlapping partitions against ground truth.
//!
//! - [`community`]: node views, commonality predicates, the hypergraph builder
//!   and community extraction.
//! - [`metrics`]: co-membership pair counts and the adjusted Omega index.
//! - [`experiments`] (feature `experiments`, on by default): ring lattices,
//!   rewiring, threshold calibration and the rewiring-vs-truth sweep.
//!
//! ```rust
//! use hypercommon::community::{closed_jaccard_predicate, Hypercommon};
//! use hypercommon::metrics::omega_index;
//! use petgraph::graphmap::UnGraphMap;
//!
//! let graph = UnGraphMap::<u32, ()>::from_edges([
//!     (0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3),
//! ]);
//! let detected = Hypercommon::new(closed_jaccard_predicate(0.3))
//!     .detect(&graph)
//!     .unwrap();
//!
//! let truth = vec![vec![0, 1, 2], vec![3, 4, 5]];
//! let detected: Vec<Vec<u32>> = detected.into_iter().map(|c| c.into_iter().collect()).collect();
//! assert_eq!(omega_index(&truth, &detected, 6).unwrap(), 1.0);
//! ```

pub mod community;
/// Error types used across `hypercommon`.
pub mod error;
#[cfg(feature = "experiments")]
pub mod experiments;
pub mod metrics;


pub use community::{
    build_hypergraph, detect_communities, extract_communities, CommonalityPredicate, Community,
    GraphProvider, Hypercommon, Hypergraph, HypergraphBuilder, Hypernode, NodeView,
};
pub use error::{Error, Result};
pub use metrics::{omega, omega_index, pair_counts, total_pairs, PairCounts};

#[cfg(feature = "experiments")]
pub use experiments::{ring_lattice, RewiringSweep, SweepCurve};
