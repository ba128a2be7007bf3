//! Degrading a graph by rewiring edges one endpoint at a time.

use petgraph::graphmap::{NodeTrait, UnGraphMap};
use rand::prelude::*;
use std::fmt::Debug;

/// Replace edge `(keep, replace)` with `(keep, w)` for a random `w`.
///
/// `w` is drawn uniformly from the nodes that are neither `keep` nor a current
/// neighbor of `keep`, so no self-loop or parallel edge is ever created.
/// Returns `false`, leaving the graph unchanged, when `(keep, replace)` is not
/// an edge or `keep` is already adjacent to every other node.
pub fn rewire_one_edge<N, E, R>(
    graph: &mut UnGraphMap<N, E>,
    keep: N,
    replace: N,
    rng: &mut R,
) -> bool
where
    N: NodeTrait + Debug,
    E: Default,
    R: Rng + ?Sized,
{
    if !graph.contains_edge(keep, replace) {
        tracing::warn!(?keep, ?replace, "edge to rewire is not in the graph");
        return false;
    }

    let candidates: Vec<N> = graph
        .nodes()
        .filter(|&w| w != keep && !graph.contains_edge(keep, w))
        .collect();
    let Some(&target) = candidates.choose(rng) else {
        tracing::warn!(?keep, "no candidate endpoint to rewire to");
        return false;
    };

    graph.remove_edge(keep, replace);
    graph.add_edge(keep, target, E::default());
    true
}

/// Pop `k` edges off `edge_stack` and rewire each, keeping a random endpoint.
///
/// Returns the number of edges actually rewired; stops early if the stack
/// runs out.
pub fn rewire_step<N, E, R>(
    graph: &mut UnGraphMap<N, E>,
    edge_stack: &mut Vec<(N, N)>,
    k: usize,
    rng: &mut R,
) -> usize
where
    N: NodeTrait + Debug,
    E: Default,
    R: Rng + ?Sized,
{
    let mut rewired = 0;
    for _ in 0..k {
        let Some((u, v)) = edge_stack.pop() else {
            break;
        };
        let (keep, replace) = if rng.random_bool(0.5) { (u, v) } else { (v, u) };
        if rewire_one_edge(graph, keep, replace, rng) {
            rewired += 1;
        }
    }
    rewired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::ring_lattice;

    #[test]
    fn test_rewire_one_edge_moves_endpoint() {
        let mut graph = UnGraphMap::<u32, ()>::from_edges([(0, 1), (1, 2), (2, 3)]);
        let mut rng = StdRng::seed_from_u64(7);

        assert!(rewire_one_edge(&mut graph, 0, 1, &mut rng));
        assert!(!graph.contains_edge(0, 1));
        // Only 2 and 3 were eligible for node 0.
        assert!(graph.contains_edge(0, 2) || graph.contains_edge(0, 3));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_rewire_saturated_node_is_noop() {
        let mut graph = UnGraphMap::<u32, ()>::from_edges([(0, 1), (0, 2), (1, 2)]);
        let mut rng = StdRng::seed_from_u64(7);

        assert!(!rewire_one_edge(&mut graph, 0, 1, &mut rng));
        assert!(graph.contains_edge(0, 1));
        assert!(!rewire_one_edge(&mut graph, 1, 9, &mut rng));
    }

    #[test]
    fn test_rewire_step_keeps_graph_simple() {
        let mut graph = ring_lattice(40, 4, 1).unwrap();
        let mut stack: Vec<(usize, usize)> =
            graph.all_edges().map(|(a, b, _)| (a, b)).collect();
        let mut rng = StdRng::seed_from_u64(42);
        stack.shuffle(&mut rng);

        let rewired = rewire_step(&mut graph, &mut stack, 30, &mut rng);

        assert_eq!(rewired, 30);
        assert_eq!(stack.len(), 50);
        assert_eq!(graph.edge_count(), 80);
        assert!(graph.nodes().all(|u| !graph.contains_edge(u, u)));
    }

    #[test]
    fn test_rewire_step_stops_on_empty_stack() {
        let mut graph = ring_lattice(10, 2, 1).unwrap();
        let mut stack = vec![(0, 1)];
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(rewire_step(&mut graph, &mut stack, 5, &mut rng), 1);
        assert!(stack.is_empty());
    }
}
