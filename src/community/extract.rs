//! Communities as connected components of the triangle hypergraph.

use super::hypergraph::{HyperedgeMode, Hypergraph, HypergraphBuilder};
use super::traits::{CommonalityPredicate, GraphProvider};
use petgraph::visit::Bfs;
use std::collections::BTreeSet;
use std::hash::Hash;

/// A community: the original node ids covered by one hypergraph component.
pub type Community<Id> = BTreeSet<Id>;

/// Flatten each connected component of `hypergraph` into a community.
///
/// Components are discovered in hypernode insertion order, so the output is
/// ordered by each community's smallest triangle. A node that belongs to
/// triangles in two components shows up in both communities.
pub fn extract_communities<Id>(hypergraph: &Hypergraph<Id>) -> Vec<Community<Id>>
where
    Id: Copy + Ord + Hash,
{
    let graph = hypergraph.as_graph();
    let mut seen = vec![false; graph.node_count()];
    let mut communities = Vec::new();

    for start in graph.node_indices() {
        if seen[start.index()] {
            continue;
        }
        let mut community = Community::new();
        let mut bfs = Bfs::new(graph, start);
        while let Some(ix) = bfs.next(graph) {
            seen[ix.index()] = true;
            community.extend(graph[ix].members());
        }
        communities.push(community);
    }

    communities
}

/// Overlapping community detection by triangle hypergraphs.
///
/// ```rust
/// use hypercommon::community::{Hypercommon, NodeView};
/// use petgraph::graphmap::UnGraphMap;
///
/// // Two K4s glued at node 4.
/// let graph = UnGraphMap::<u32, ()>::from_edges([
///     (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4),
///     (4, 5), (4, 6), (4, 7), (5, 6), (5, 7), (6, 7),
/// ]);
/// let shares_neighbor = |u: &NodeView<u32>, v: &NodeView<u32>| u.common_neighbors(v) >= 1;
///
/// let communities = Hypercommon::new(shares_neighbor).detect(&graph).unwrap();
/// assert_eq!(communities.len(), 2);
/// assert!(communities.iter().all(|c| c.contains(&4)));
/// ```
#[derive(Debug, Clone)]
pub struct Hypercommon<P> {
    predicate: P,
    builder: HypergraphBuilder,
}

impl<P> Hypercommon<P> {
    /// Create a detector with the default builder configuration.
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            builder: HypergraphBuilder::new(),
        }
    }

    /// Replace the builder configuration.
    pub fn with_builder(mut self, builder: HypergraphBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Set the hyperedge mode.
    pub fn with_hyperedge_mode(mut self, mode: HyperedgeMode) -> Self {
        self.builder = self.builder.with_hyperedge_mode(mode);
        self
    }

    /// Restrict the triangle search to the 2-core of the graph.
    pub fn with_two_core(mut self, two_core: bool) -> Self {
        self.builder = self.builder.with_two_core(two_core);
        self
    }

    /// The commonality predicate.
    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Build the hypergraph of `graph`.
    ///
    /// # Errors
    ///
    /// The first error returned by the predicate, unchanged.
    pub fn hypergraph<G>(&self, graph: &G) -> Result<Hypergraph<G::NodeId>, P::Error>
    where
        G: GraphProvider,
        P: CommonalityPredicate<G::NodeId>,
    {
        self.builder.build(graph, &self.predicate)
    }

    /// Detect overlapping communities in `graph`.
    ///
    /// # Errors
    ///
    /// The first error returned by the predicate, unchanged.
    pub fn detect<G>(&self, graph: &G) -> Result<Vec<Community<G::NodeId>>, P::Error>
    where
        G: GraphProvider,
        P: CommonalityPredicate<G::NodeId>,
    {
        let hypergraph = self.hypergraph(graph)?;
        let communities = extract_communities(&hypergraph);
        tracing::debug!(
            communities = communities.len(),
            hypernodes = hypergraph.node_count(),
            "extracted communities"
        );
        Ok(communities)
    }
}

/// Build the hypergraph with the default configuration and extract its communities.
///
/// # Errors
///
/// The first error returned by `predicate`, unchanged.
pub fn detect_communities<G, P>(
    graph: &G,
    predicate: &P,
) -> Result<Vec<Community<G::NodeId>>, P::Error>
where
    G: GraphProvider,
    P: CommonalityPredicate<G::NodeId> + ?Sized,
{
    let hypergraph = HypergraphBuilder::new().build(graph, predicate)?;
    Ok(extract_communities(&hypergraph))
}
