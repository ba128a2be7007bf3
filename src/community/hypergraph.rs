//! Triangle hypergraph construction.
//!
//! Every triangle of the input graph whose three edges pass the commonality
//! predicate becomes a *hypernode*. Two hypernodes are joined by a *hyperedge*
//! when they share one edge of the input graph (two of their three members).
//!
//! ```text
//!   1 --- 2            (1,2,3) ===== (2,3,4)
//!   | \ / |                  share {2,3}
//!   |  X  |    ──►
//!   | / \ |            (1,2,4) ===== (1,3,4) ...
//!   3 --- 4
//! ```
//!
//! ## Search
//!
//! Candidate triples `(i, j, k)`, `i < j < k`, are drawn from the forward
//! 2-hop lists: `j, k` both within two hops of `i`, `k` within two hops of `j`.
//! The three edges are then checked on the graph, and only real triangles reach
//! the predicate. Predicate results are memoized per unordered pair for the
//! duration of one build.
//!
//! ## Hyperedge modes
//!
//! When three or more hypernodes share a pair, [`HyperedgeMode::Clique`]
//! connects all of them pairwise while [`HyperedgeMode::Star`] links each
//! newcomer only to the first hypernode registered under that pair. Both
//! produce the same connected components, so the same communities.

use super::node_view::Neighborhoods;
use super::traits::{CommonalityPredicate, GraphProvider};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// A triangle of the input graph, stored as its sorted member triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hypernode<Id>([Id; 3]);

impl<Id: Copy + Ord> Hypernode<Id> {
    /// Create a hypernode from three members in any order.
    pub fn new(a: Id, b: Id, c: Id) -> Self {
        let mut members = [a, b, c];
        members.sort_unstable();
        Self(members)
    }

    /// Members in ascending order.
    pub fn members(&self) -> [Id; 3] {
        self.0
    }

    /// The three member pairs `(i, j)`, `(i, k)`, `(j, k)`.
    pub fn pairs(&self) -> [(Id, Id); 3] {
        let [i, j, k] = self.0;
        [(i, j), (i, k), (j, k)]
    }

    /// Whether `id` is a member.
    pub fn contains(&self, id: Id) -> bool {
        self.0.contains(&id)
    }

    /// The member pair shared with `other`, if they share exactly one.
    pub fn shared_pair(&self, other: &Hypernode<Id>) -> Option<(Id, Id)> {
        let mut shared = self
            .pairs()
            .into_iter()
            .filter(|p| other.pairs().contains(p));
        match (shared.next(), shared.next()) {
            (Some(pair), None) => Some(pair),
            _ => None,
        }
    }
}

impl<Id> From<[Id; 3]> for Hypernode<Id>
where
    Id: Copy + Ord,
{
    fn from([a, b, c]: [Id; 3]) -> Self {
        Hypernode::new(a, b, c)
    }
}

/// How hypernodes sharing a member pair are connected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HyperedgeMode {
    /// Every two hypernodes sharing a pair are adjacent.
    #[default]
    Clique,
    /// Each hypernode links to the first hypernode registered under a shared pair.
    Star,
}

/// Counters collected while building a hypergraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HypergraphStats {
    /// Nodes in the searched snapshot (after 2-core peeling, if enabled).
    pub searched_nodes: usize,
    /// Candidate triples drawn from the 2-hop lists.
    pub candidate_triples: usize,
    /// Candidates that are real triangles.
    pub triangles: usize,
    /// Distinct pairs handed to the predicate.
    pub predicate_evaluations: usize,
}

/// Hypernodes and hyperedges produced by one build. Read-only.
#[derive(Debug, Clone)]
pub struct Hypergraph<Id> {
    graph: UnGraph<Hypernode<Id>, ()>,
    index: HashMap<Hypernode<Id>, NodeIndex>,
    stats: HypergraphStats,
}

impl<Id: Copy + Ord + Hash> Hypergraph<Id> {
    fn empty() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            index: HashMap::new(),
            stats: HypergraphStats::default(),
        }
    }

    /// Number of hypernodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of hyperedges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when no triangle was admitted.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Hypernodes in insertion order (ascending member triple).
    pub fn hypernodes(&self) -> impl Iterator<Item = &Hypernode<Id>> {
        self.graph.node_weights()
    }

    /// Hyperedges as hypernode pairs.
    pub fn hyperedges(&self) -> impl Iterator<Item = (Hypernode<Id>, Hypernode<Id>)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
    }

    /// Whether `hypernode` is present.
    pub fn contains(&self, hypernode: &Hypernode<Id>) -> bool {
        self.index.contains_key(hypernode)
    }

    /// Whether `a` and `b` are joined by a hyperedge.
    pub fn are_adjacent(&self, a: &Hypernode<Id>, b: &Hypernode<Id>) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.contains_edge(ia, ib),
            _ => false,
        }
    }

    /// Hypernodes adjacent to `hypernode`.
    pub fn neighbors(&self, hypernode: &Hypernode<Id>) -> Vec<Hypernode<Id>> {
        self.index
            .get(hypernode)
            .map(|&ix| self.graph.neighbors(ix).map(|n| self.graph[n]).collect())
            .unwrap_or_default()
    }

    /// Distinct hypernode degrees, ascending.
    pub fn degree_set(&self) -> BTreeSet<usize> {
        self.graph
            .node_indices()
            .map(|ix| self.graph.neighbors(ix).count())
            .collect()
    }

    /// Build counters.
    pub fn stats(&self) -> &HypergraphStats {
        &self.stats
    }

    /// Underlying petgraph storage.
    pub fn as_graph(&self) -> &UnGraph<Hypernode<Id>, ()> {
        &self.graph
    }
}

/// Hypergraph builder configuration.
///
/// ```rust
/// use hypercommon::community::{HyperedgeMode, HypergraphBuilder, NodeView};
/// use petgraph::graphmap::UnGraphMap;
///
/// let graph = UnGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (1, 3), (3, 4)]);
/// let always = |_: &NodeView<u32>, _: &NodeView<u32>| true;
///
/// let hypergraph = HypergraphBuilder::new()
///     .with_hyperedge_mode(HyperedgeMode::Star)
///     .with_two_core(true)
///     .build(&graph, &always)
///     .unwrap();
/// assert_eq!(hypergraph.node_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HypergraphBuilder {
    mode: HyperedgeMode,
    two_core: bool,
}

impl HypergraphBuilder {
    /// Create a builder: clique hyperedges, full graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how hypernodes sharing a pair are connected.
    pub fn with_hyperedge_mode(mut self, mode: HyperedgeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Restrict the triangle search to the 2-core of the graph.
    ///
    /// Predicates still see full neighborhoods, so the hypergraph is the same
    /// as without the reduction; only the search gets smaller.
    pub fn with_two_core(mut self, two_core: bool) -> Self {
        self.two_core = two_core;
        self
    }

    /// Hyperedge mode.
    pub fn hyperedge_mode(&self) -> HyperedgeMode {
        self.mode
    }

    /// Whether the 2-core reduction is enabled.
    pub fn two_core(&self) -> bool {
        self.two_core
    }

    /// Build the hypergraph of `graph` under `predicate`.
    ///
    /// # Errors
    ///
    /// The first error returned by `predicate`, unchanged.
    pub fn build<G, P>(
        &self,
        graph: &G,
        predicate: &P,
    ) -> Result<Hypergraph<G::NodeId>, P::Error>
    where
        G: GraphProvider,
        P: CommonalityPredicate<G::NodeId> + ?Sized,
    {
        let hood = if self.two_core {
            Neighborhoods::two_core_of(graph)
        } else {
            Neighborhoods::of(graph)
        };

        let mut ctx = BuildContext {
            hood: &hood,
            predicate,
            mode: self.mode,
            cache: HashMap::new(),
            registry: HashMap::new(),
            hypergraph: Hypergraph::empty(),
        };
        ctx.hypergraph.stats.searched_nodes = hood.searched_len();

        for i in 0..hood.len() {
            let candidates = hood.forward_at(i);
            for (pos, &j) in candidates.iter().enumerate() {
                let reach_j = hood.forward_at(j);
                for &k in &candidates[pos + 1..] {
                    ctx.hypergraph.stats.candidate_triples += 1;
                    if reach_j.binary_search(&k).is_err() {
                        continue;
                    }

                    let (vi, vj, vk) = (
                        hood.view_at(i).id(),
                        hood.view_at(j).id(),
                        hood.view_at(k).id(),
                    );
                    if !(graph.has_edge(vi, vj) && graph.has_edge(vi, vk) && graph.has_edge(vj, vk))
                    {
                        continue;
                    }
                    ctx.hypergraph.stats.triangles += 1;

                    if !(ctx.check(i, j)? && ctx.check(i, k)? && ctx.check(j, k)?) {
                        continue;
                    }
                    ctx.promote(i, j, k);
                }
            }
        }

        let hypergraph = ctx.hypergraph;
        tracing::debug!(
            hypernodes = hypergraph.node_count(),
            hyperedges = hypergraph.edge_count(),
            triangles = hypergraph.stats.triangles,
            predicate_evaluations = hypergraph.stats.predicate_evaluations,
            "built hypergraph"
        );
        Ok(hypergraph)
    }
}

/// Build a hypergraph with the default configuration.
///
/// # Errors
///
/// The first error returned by `predicate`, unchanged.
pub fn build_hypergraph<G, P>(graph: &G, predicate: &P) -> Result<Hypergraph<G::NodeId>, P::Error>
where
    G: GraphProvider,
    P: CommonalityPredicate<G::NodeId> + ?Sized,
{
    HypergraphBuilder::new().build(graph, predicate)
}

/// State owned by a single build call. Pairs are keyed by snapshot rank.
struct BuildContext<'a, Id, P: ?Sized> {
    hood: &'a Neighborhoods<Id>,
    predicate: &'a P,
    mode: HyperedgeMode,
    cache: HashMap<(usize, usize), bool>,
    registry: HashMap<(usize, usize), Vec<NodeIndex>>,
    hypergraph: Hypergraph<Id>,
}

impl<Id, P> BuildContext<'_, Id, P>
where
    Id: Copy + Ord + Hash + std::fmt::Debug,
    P: CommonalityPredicate<Id> + ?Sized,
{
    fn check(&mut self, a: usize, b: usize) -> Result<bool, P::Error> {
        let key = (a.min(b), a.max(b));
        if let Some(&hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let (u, v) = (self.hood.view_at(key.0), self.hood.view_at(key.1));
        self.hypergraph.stats.predicate_evaluations += 1;
        let verdict = match self.predicate.holds(u, v) {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::debug!(u = ?u.id(), v = ?v.id(), "commonality predicate failed");
                return Err(e);
            }
        };
        tracing::trace!(u = ?u.id(), v = ?v.id(), verdict, "commonality");

        self.cache.insert(key, verdict);
        Ok(verdict)
    }

    fn promote(&mut self, i: usize, j: usize, k: usize) {
        let hypernode = Hypernode::new(
            self.hood.view_at(i).id(),
            self.hood.view_at(j).id(),
            self.hood.view_at(k).id(),
        );
        let graph = &mut self.hypergraph.graph;
        let ix = graph.add_node(hypernode);
        self.hypergraph.index.insert(hypernode, ix);

        for pair in [(i, j), (i, k), (j, k)] {
            let sharing = self.registry.entry(pair).or_default();
            match self.mode {
                HyperedgeMode::Clique => {
                    for &other in sharing.iter() {
                        graph.add_edge(ix, other, ());
                    }
                }
                HyperedgeMode::Star => {
                    if let Some(&first) = sharing.first() {
                        graph.add_edge(ix, first, ());
                    }
                }
            }
            sharing.push(ix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::{closed_jaccard_predicate, Fallible, NodeView};
    use petgraph::graphmap::UnGraphMap;
    use std::cell::RefCell;

    fn always(_: &NodeView<u32>, _: &NodeView<u32>) -> bool {
        true
    }

    fn graph(edges: &[(u32, u32)]) -> UnGraphMap<u32, ()> {
        UnGraphMap::from_edges(edges.iter().copied())
    }

    #[test]
    fn test_hypernode_is_order_independent() {
        assert_eq!(Hypernode::new(3, 1, 2), Hypernode::new(1, 2, 3));
        assert_eq!(Hypernode::from([2, 3, 1]).members(), [1, 2, 3]);
        assert!(Hypernode::new(3, 1, 2).contains(2));
        assert!(!Hypernode::new(3, 1, 2).contains(4));
    }

    #[test]
    fn test_shared_pair() {
        let a = Hypernode::new(1, 2, 3);
        assert_eq!(a.shared_pair(&Hypernode::new(2, 3, 4)), Some((2, 3)));
        assert_eq!(a.shared_pair(&Hypernode::new(3, 4, 5)), None);
        assert_eq!(a.shared_pair(&a), None);
    }

    #[test]
    fn test_empty_and_tiny_graphs() {
        let empty = UnGraphMap::<u32, ()>::new();
        assert!(build_hypergraph(&empty, &always).unwrap().is_empty());

        let mut single = UnGraphMap::<u32, ()>::new();
        single.add_node(0);
        assert!(build_hypergraph(&single, &always).unwrap().is_empty());

        let pair = graph(&[(0, 1)]);
        let h = build_hypergraph(&pair, &always).unwrap();
        assert_eq!((h.node_count(), h.edge_count()), (0, 0));
    }

    #[test]
    fn test_wedge_is_not_a_hypernode() {
        let h = build_hypergraph(&graph(&[(1, 2), (2, 3)]), &always).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.stats().candidate_triples, 1);
        assert_eq!(h.stats().predicate_evaluations, 0);
    }

    #[test]
    fn test_triangle_is_one_hypernode() {
        let h = build_hypergraph(&graph(&[(3, 1), (2, 3), (1, 2)]), &always).unwrap();
        assert_eq!(
            h.hypernodes().copied().collect::<Vec<_>>(),
            vec![Hypernode::new(1, 2, 3)]
        );
        assert_eq!(h.edge_count(), 0);
    }

    #[test]
    fn test_always_false_admits_nothing() {
        let never = |_: &NodeView<u32>, _: &NodeView<u32>| false;
        let h = build_hypergraph(&graph(&[(1, 2), (2, 3), (1, 3)]), &never).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.stats().triangles, 1);
        // Short-circuits after the first rejected pair.
        assert_eq!(h.stats().predicate_evaluations, 1);
    }

    #[test]
    fn test_k4_clique_mode_connects_all_sharing_pairs() {
        let k4 = graph(&[(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
        let h = build_hypergraph(&k4, &always).unwrap();

        // Four triangles; each pair of them shares exactly one edge.
        assert_eq!(h.node_count(), 4);
        assert_eq!(h.edge_count(), 6);
        for (a, b) in h.hyperedges() {
            assert!(a.shared_pair(&b).is_some());
        }
    }

    #[test]
    fn test_hub_pair_clique_vs_star() {
        // Book graph: pair (1,2) shared by triangles with 3, 4, 5.
        let book = graph(&[(1, 2), (1, 3), (2, 3), (1, 4), (2, 4), (1, 5), (2, 5)]);

        let clique = build_hypergraph(&book, &always).unwrap();
        let star = HypergraphBuilder::new()
            .with_hyperedge_mode(HyperedgeMode::Star)
            .build(&book, &always)
            .unwrap();

        let (a, b, c) = (
            Hypernode::new(1, 2, 3),
            Hypernode::new(1, 2, 4),
            Hypernode::new(1, 2, 5),
        );
        assert_eq!(clique.edge_count(), 3);
        assert!(clique.are_adjacent(&b, &c));

        let mut around_b = clique.neighbors(&b);
        around_b.sort_unstable();
        assert_eq!(around_b, vec![a, c]);

        assert_eq!(star.edge_count(), 2);
        assert_eq!(star.neighbors(&b), vec![a]);
        assert!(star.neighbors(&Hypernode::new(7, 8, 9)).is_empty());
        assert!(star.are_adjacent(&a, &b));
        assert!(star.are_adjacent(&a, &c));
        assert!(!star.are_adjacent(&b, &c));
    }

    #[test]
    fn test_predicate_memoized_per_pair() {
        let k4 = graph(&[(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
        let calls = RefCell::new(Vec::new());
        let counting = |u: &NodeView<u32>, v: &NodeView<u32>| {
            calls.borrow_mut().push((u.id(), v.id()));
            true
        };

        let h = build_hypergraph(&k4, &counting).unwrap();
        assert_eq!(h.node_count(), 4);

        let mut seen = calls.into_inner();
        // Every pair of K4 once, always as (min, max).
        assert_eq!(seen.len(), 6);
        assert!(seen.iter().all(|(u, v)| u < v));
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 6);
        assert_eq!(h.stats().predicate_evaluations, 6);
    }

    #[test]
    fn test_predicate_only_sees_triangle_pairs() {
        // Triangle 1-2-3 plus wedge 3-4-5: pairs on the wedge are never asked.
        let g = graph(&[(1, 2), (2, 3), (1, 3), (3, 4), (4, 5)]);
        let calls = RefCell::new(Vec::new());
        let counting = |u: &NodeView<u32>, v: &NodeView<u32>| {
            calls.borrow_mut().push((u.id(), v.id()));
            true
        };

        build_hypergraph(&g, &counting).unwrap();
        assert_eq!(calls.into_inner(), vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[derive(Debug, PartialEq)]
    struct PairRejected(u32, u32);

    #[test]
    fn test_predicate_error_propagates_unchanged() {
        let g = graph(&[(1, 2), (2, 3), (1, 3)]);
        let bad = Fallible(|u: &NodeView<u32>, v: &NodeView<u32>| {
            if (u.id(), v.id()) == (1, 3) {
                Err(PairRejected(u.id(), v.id()))
            } else {
                Ok(true)
            }
        });

        let err = build_hypergraph(&g, &bad).unwrap_err();
        assert_eq!(err, PairRejected(1, 3));
    }

    #[test]
    fn test_two_core_keeps_triangles() {
        let g = graph(&[(1, 2), (2, 3), (1, 3), (3, 4), (4, 5), (5, 6), (4, 6), (6, 7)]);
        let full = build_hypergraph(&g, &always).unwrap();
        let core = HypergraphBuilder::new()
            .with_two_core(true)
            .build(&g, &always)
            .unwrap();

        let full_nodes: Vec<_> = full.hypernodes().copied().collect();
        let core_nodes: Vec<_> = core.hypernodes().copied().collect();
        assert_eq!(full_nodes, core_nodes);
        assert_eq!(core.stats().searched_nodes, 6);
    }

    #[test]
    fn test_two_core_keeps_full_neighborhoods_for_predicate() {
        // Triangle 1-2-3 plus a pendant 1-4. Closed Jaccard of (1, 2) is 3/4,
        // and would be 1 if node 4 were peeled from node 1's view.
        let g = graph(&[(1, 2), (2, 3), (1, 3), (1, 4)]);
        let predicate = closed_jaccard_predicate(0.8);
        let builder = HypergraphBuilder::new().with_two_core(true);
        assert!(builder.two_core());
        assert_eq!(builder.hyperedge_mode(), HyperedgeMode::Clique);

        let full = build_hypergraph(&g, &predicate).unwrap();
        let core = builder.build(&g, &predicate).unwrap();
        assert!(full.is_empty());
        assert!(core.is_empty());
        assert_eq!(core.stats().searched_nodes, 3);

        let lenient = closed_jaccard_predicate(0.7);
        let core = builder.build(&g, &lenient).unwrap();
        assert!(core.contains(&Hypernode::new(1, 2, 3)));
    }

    #[test]
    fn test_works_on_petgraph_ungraph() {
        let mut g = UnGraph::<&str, ()>::new_undirected();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());
        g.add_edge(c, a, ());

        let any = |_: &NodeView<NodeIndex>, _: &NodeView<NodeIndex>| true;
        let h = build_hypergraph(&g, &any).unwrap();
        assert!(h.contains(&Hypernode::new(a, b, c)));
    }
}
