//! Overlapping community detection with triangle hypergraphs.
//!
//! Dense groups in a graph are full of triangles, and neighboring triangles in
//! the same group share edges. The method lifts every triangle that passes a
//! *commonality predicate* into a hypernode, joins hypernodes that share an
//! edge, and reads communities off the connected components:
//!
//! ```text
//! Graph + Predicate → HypergraphBuilder → Hypergraph → extract_communities → Communities
//! ```
//!
//! A node belongs to every triangle it is part of, and those triangles can fall
//! into different components, so communities may overlap.
//!
//! ## The Commonality Predicate
//!
//! The predicate is asked about the three pairs of each candidate triangle and
//! must accept all of them. It sees a [`NodeView`] of both endpoints (id, open
//! neighborhood, degree). Any `Fn(&NodeView, &NodeView) -> bool` closure works;
//! [`Threshold`] turns a scalar [`CommonalityMeasure`] such as
//! [`ClosedJaccard`] into a predicate.
//!
//! Structural checks always run first, so the predicate only ever sees pairs
//! that are edges of a real triangle, and each pair at most once per build.
//!
//! ## Usage
//!
//! ```rust
//! use hypercommon::community::{closed_jaccard_predicate, Hypercommon};
//! use petgraph::graphmap::UnGraphMap;
//!
//! let graph = UnGraphMap::<u32, ()>::from_edges([
//!     (0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5),
//! ]);
//! let communities = Hypercommon::new(closed_jaccard_predicate(0.3))
//!     .detect(&graph)
//!     .unwrap();
//! assert_eq!(communities.len(), 2);
//! ```
//!
//! ## References
//!
//! - Palla, Derényi, Farkas, Vicsek (2005). "Uncovering the overlapping
//!   community structure of complex networks in nature and society." (k-clique
//!   percolation, of which k = 3 with a predicate is a filtered variant.)

mod extract;
mod hypergraph;
mod node_view;
mod predicate;
mod traits;

pub use extract::{detect_communities, extract_communities, Community, Hypercommon};
pub use hypergraph::{
    build_hypergraph, HyperedgeMode, Hypergraph, HypergraphBuilder, HypergraphStats, Hypernode,
};
pub use node_view::{Neighborhoods, NodeView};
pub use predicate::{
    closed_jaccard_predicate, ClosedJaccard, CommonNeighbors, CommonalityMeasure, Fallible,
    OpenJaccard, Threshold,
};
pub use traits::{CommonalityPredicate, GraphProvider};
