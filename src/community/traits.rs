//! Seams of the hypergraph builder: where graphs come from and how node pairs are judged.

use super::node_view::NodeView;
use petgraph::graph::{IndexType, NodeIndex, UnGraph};
use petgraph::graphmap::{NodeTrait, UnGraphMap};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only access to a simple undirected graph.
///
/// Node ids must form a single totally ordered type: the builder sorts them
/// and uses `(min, max)` as the key of every unordered pair.
pub trait GraphProvider {
    /// Node identifier.
    type NodeId: Copy + Ord + Hash + Debug;

    /// All node ids, in any order.
    fn node_ids(&self) -> Vec<Self::NodeId>;

    /// Open neighborhood of `node`. Must not contain `node` itself.
    fn neighbors(&self, node: Self::NodeId) -> BTreeSet<Self::NodeId>;

    /// Whether `a` and `b` are adjacent.
    fn has_edge(&self, a: Self::NodeId, b: Self::NodeId) -> bool;
}

impl<N, E> GraphProvider for UnGraphMap<N, E>
where
    N: NodeTrait + Debug,
{
    type NodeId = N;

    fn node_ids(&self) -> Vec<N> {
        self.nodes().collect()
    }

    fn neighbors(&self, node: N) -> BTreeSet<N> {
        if !self.contains_node(node) {
            return BTreeSet::new();
        }
        UnGraphMap::neighbors(self, node)
            .filter(|&v| v != node)
            .collect()
    }

    fn has_edge(&self, a: N, b: N) -> bool {
        a != b && self.contains_edge(a, b)
    }
}

impl<N, E, Ix> GraphProvider for UnGraph<N, E, Ix>
where
    Ix: IndexType,
{
    type NodeId = NodeIndex<Ix>;

    fn node_ids(&self) -> Vec<NodeIndex<Ix>> {
        self.node_indices().collect()
    }

    fn neighbors(&self, node: NodeIndex<Ix>) -> BTreeSet<NodeIndex<Ix>> {
        if node.index() >= self.node_count() {
            return BTreeSet::new();
        }
        // Parallel edges collapse in the set; self-loops are dropped.
        petgraph::graph::Graph::neighbors(self, node)
            .filter(|&v| v != node)
            .collect()
    }

    fn has_edge(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> bool {
        a != b && self.find_edge(a, b).is_some()
    }
}

/// Pairwise commonality test used to admit triangles as hypernodes.
///
/// Implementations must be total over every pair the builder submits and must
/// not mutate anything the views were built from. An `Err` aborts the build and
/// is handed back to the caller untouched.
///
/// Any closure `Fn(&NodeView<Id>, &NodeView<Id>) -> bool` is a predicate that
/// cannot fail; wrap a closure returning `Result<bool, E>` in
/// [`Fallible`](super::Fallible) to surface its errors.
pub trait CommonalityPredicate<Id> {
    /// Error raised by the predicate.
    type Error;

    /// Whether `u` and `v` have enough in common to share a hypernode.
    fn holds(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> Result<bool, Self::Error>;
}

impl<Id, F> CommonalityPredicate<Id> for F
where
    F: Fn(&NodeView<Id>, &NodeView<Id>) -> bool,
{
    type Error = Infallible;

    fn holds(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> Result<bool, Infallible> {
        Ok(self(u, v))
    }
}
