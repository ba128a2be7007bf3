//! Per-node snapshots and bounded 2-hop neighborhoods.

use super::traits::GraphProvider;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::hash::Hash;

/// Immutable view of one node, as seen by a commonality predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView<Id> {
    id: Id,
    neighbors: BTreeSet<Id>,
    degree: usize,
}

impl<Id: Copy + Ord> NodeView<Id> {
    /// Create a view from a node id and its open neighborhood.
    pub fn new(id: Id, mut neighbors: BTreeSet<Id>) -> Self {
        neighbors.remove(&id);
        let degree = neighbors.len();
        Self {
            id,
            neighbors,
            degree,
        }
    }

    /// Node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Open neighborhood (the node itself is never included).
    pub fn neighbors(&self) -> &BTreeSet<Id> {
        &self.neighbors
    }

    /// Number of neighbors.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether `other` is a neighbor of this node.
    pub fn is_adjacent(&self, other: Id) -> bool {
        self.neighbors.contains(&other)
    }

    /// Size of the intersection of both open neighborhoods.
    pub fn common_neighbors(&self, other: &NodeView<Id>) -> usize {
        self.neighbors.intersection(&other.neighbors).count()
    }
}

/// Node views plus the forward 2-hop candidate lists of one graph snapshot.
///
/// Nodes are addressed by their rank in ascending id order, so `a < b` on
/// ranks is the same as `a < b` on ids. Views always carry the full
/// neighborhood; only the candidate lists may be restricted to the 2-core.
#[derive(Debug, Clone)]
pub struct Neighborhoods<Id> {
    views: Vec<NodeView<Id>>,
    forward: Vec<Vec<usize>>,
    rank: HashMap<Id, usize>,
    searched: usize,
}

impl<Id: Copy + Ord + Hash> Neighborhoods<Id> {
    /// Snapshot the current adjacency of `graph`.
    pub fn of<G>(graph: &G) -> Self
    where
        G: GraphProvider<NodeId = Id>,
    {
        let adj = adjacency(graph);
        Self::from_adjacency(&adj, &adj)
    }

    /// Snapshot `graph`, searching only its 2-core: nodes are peeled until
    /// every remaining node has at least two neighbors. Peeled nodes keep
    /// their views but get no forward candidates, and forward lists only
    /// follow 2-core edges. Every triangle lies in the 2-core, so no triangle
    /// is lost.
    pub fn two_core_of<G>(graph: &G) -> Self
    where
        G: GraphProvider<NodeId = Id>,
    {
        let adj = adjacency(graph);
        let mut core = adj.clone();
        peel_to_two_core(&mut core);
        Self::from_adjacency(&adj, &core)
    }

    fn from_adjacency(
        adj: &BTreeMap<Id, BTreeSet<Id>>,
        search: &BTreeMap<Id, BTreeSet<Id>>,
    ) -> Self {
        let rank: HashMap<Id, usize> = adj
            .keys()
            .enumerate()
            .map(|(r, &id)| (id, r))
            .collect();

        let views: Vec<NodeView<Id>> = adj
            .iter()
            .map(|(&id, neighbors)| {
                let neighbors = neighbors
                    .iter()
                    .copied()
                    .filter(|v| rank.contains_key(v))
                    .collect();
                NodeView::new(id, neighbors)
            })
            .collect();

        let search_ranks: Vec<Vec<usize>> = views
            .iter()
            .map(|view| {
                search
                    .get(&view.id)
                    .map(|neighbors| {
                        neighbors
                            .iter()
                            .filter_map(|v| rank.get(v).copied())
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();

        // Distance 1 or 2 in the searched graph, strictly greater rank, ascending.
        let forward = (0..views.len())
            .map(|u| {
                let mut reach = BTreeSet::new();
                for &v in &search_ranks[u] {
                    if v > u {
                        reach.insert(v);
                    }
                    reach.extend(search_ranks[v].iter().copied().filter(|&w| w > u));
                }
                reach.into_iter().collect()
            })
            .collect();

        Self {
            views,
            forward,
            rank,
            searched: search.len(),
        }
    }

    /// Number of nodes the triangle search runs over (the 2-core, if peeled).
    pub fn searched_len(&self) -> usize {
        self.searched
    }

    /// Number of nodes in the snapshot.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the snapshot has no nodes.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Views in ascending id order.
    pub fn views(&self) -> &[NodeView<Id>] {
        &self.views
    }

    /// View of a node by id.
    pub fn view(&self, id: Id) -> Option<&NodeView<Id>> {
        self.rank.get(&id).map(|&r| &self.views[r])
    }

    /// Ids of nodes `v > id` within two hops of `id`, ascending.
    pub fn forward_candidates(&self, id: Id) -> Vec<Id> {
        self.rank
            .get(&id)
            .map(|&r| self.forward[r].iter().map(|&v| self.views[v].id).collect())
            .unwrap_or_default()
    }

    /// Every unordered pair `(u, v)`, `u < v`, at distance 1 or 2.
    pub fn pairs_within_two_hops(&self) -> impl Iterator<Item = (&NodeView<Id>, &NodeView<Id>)> {
        self.forward.iter().enumerate().flat_map(move |(u, reach)| {
            reach.iter().map(move |&v| (&self.views[u], &self.views[v]))
        })
    }

    pub(crate) fn view_at(&self, rank: usize) -> &NodeView<Id> {
        &self.views[rank]
    }

    pub(crate) fn forward_at(&self, rank: usize) -> &[usize] {
        &self.forward[rank]
    }
}

fn adjacency<G: GraphProvider>(graph: &G) -> BTreeMap<G::NodeId, BTreeSet<G::NodeId>> {
    graph
        .node_ids()
        .into_iter()
        .map(|u| {
            let mut neighbors = graph.neighbors(u);
            neighbors.remove(&u);
            (u, neighbors)
        })
        .collect()
}

fn peel_to_two_core<Id: Copy + Ord>(adj: &mut BTreeMap<Id, BTreeSet<Id>>) {
    let mut queue: VecDeque<Id> = adj
        .iter()
        .filter(|(_, neighbors)| neighbors.len() < 2)
        .map(|(&id, _)| id)
        .collect();

    while let Some(u) = queue.pop_front() {
        let Some(neighbors) = adj.remove(&u) else {
            continue;
        };
        for v in neighbors {
            if let Some(nv) = adj.get_mut(&v) {
                nv.remove(&u);
                // Nodes already below 2 are queued; only the 2 -> 1 drop is new.
                if nv.len() == 1 {
                    queue.push_back(v);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graphmap::UnGraphMap;

    fn path(n: u32) -> UnGraphMap<u32, ()> {
        UnGraphMap::from_edges((1..n).map(|i| (i, i + 1)))
    }

    #[test]
    fn test_view_degree_matches_neighbors() {
        let view = NodeView::new(3u32, BTreeSet::from([1, 2, 3, 7]));
        assert_eq!(view.degree(), 3);
        assert!(!view.is_adjacent(3));
        assert!(view.is_adjacent(7));
    }

    #[test]
    fn test_forward_candidates_on_path() {
        // 1 - 2 - 3 - 4 - 5
        let hood = Neighborhoods::of(&path(5));

        assert_eq!(hood.forward_candidates(1), vec![2, 3]);
        assert_eq!(hood.forward_candidates(3), vec![4, 5]);
        assert_eq!(hood.forward_candidates(5), Vec::<u32>::new());
        assert_eq!(hood.view(3).map(NodeView::degree), Some(2));
    }

    #[test]
    fn test_isolated_node_has_empty_sets() {
        let mut graph = UnGraphMap::<u32, ()>::new();
        graph.add_node(42);
        let hood = Neighborhoods::of(&graph);

        assert_eq!(hood.len(), 1);
        assert!(hood.forward_candidates(42).is_empty());
        assert_eq!(hood.view(42).map(NodeView::degree), Some(0));
    }

    #[test]
    fn test_pairs_within_two_hops() {
        let hood = Neighborhoods::of(&path(4));
        let pairs: Vec<(u32, u32)> = hood
            .pairs_within_two_hops()
            .map(|(u, v)| (u.id(), v.id()))
            .collect();

        assert_eq!(pairs, vec![(1, 2), (1, 3), (2, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_two_core_restricts_search_not_views() {
        // Triangle 1-2-3 with a tail 3-4-5.
        let graph = UnGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (1, 3), (3, 4), (4, 5)]);
        let hood = Neighborhoods::two_core_of(&graph);

        assert_eq!(hood.len(), 5);
        assert_eq!(hood.searched_len(), 3);
        assert_eq!(hood.view(3).map(NodeView::degree), Some(3));
        assert_eq!(hood.forward_candidates(1), vec![2, 3]);
        assert!(hood.forward_candidates(3).is_empty());
        assert!(hood.forward_candidates(4).is_empty());
    }

    #[test]
    fn test_two_core_of_tree_searches_nothing() {
        let hood = Neighborhoods::two_core_of(&path(6));
        assert_eq!(hood.len(), 6);
        assert_eq!(hood.searched_len(), 0);
        assert_eq!(hood.pairs_within_two_hops().count(), 0);
    }
}
