//! Picking commonality thresholds for a graph.

use super::infallible;
use crate::community::{
    CommonalityMeasure, GraphProvider, HypergraphBuilder, Neighborhoods, Threshold,
};
use std::collections::BTreeSet;

/// Mean commonality over all pairs `u < v` within two hops, times `multiplier`.
///
/// `None` when no two nodes are within two hops of each other.
pub fn average_commonality<G, M>(graph: &G, measure: &M, multiplier: f64) -> Option<f64>
where
    G: GraphProvider,
    M: CommonalityMeasure<G::NodeId>,
{
    let hood = Neighborhoods::of(graph);
    let (sum, count) = hood
        .pairs_within_two_hops()
        .fold((0.0, 0usize), |(sum, count), (u, v)| {
            (sum + measure.value(u, v), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(sum / count as f64 * multiplier)
    }
}

/// Thresholds worth trying on `graph`, ascending and deduplicated.
///
/// The commonality values between the smallest node and everything within two
/// hops of it, plus 0.0, 1.0 and [`average_commonality`].
pub fn representative_thresholds<G, M>(graph: &G, measure: &M, multiplier: f64) -> Vec<f64>
where
    G: GraphProvider,
    M: CommonalityMeasure<G::NodeId>,
{
    let hood = Neighborhoods::of(graph);
    let mut values = vec![0.0, 1.0];

    if let Some(probe) = hood.views().first() {
        // The smallest node reaches nothing smaller, so its forward list is its
        // whole 2-hop neighborhood.
        values.extend(
            hood.forward_candidates(probe.id())
                .into_iter()
                .filter_map(|v| hood.view(v))
                .map(|v| measure.value(probe, v)),
        );
    }
    values.extend(average_commonality(graph, measure, multiplier));

    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
    values
}

/// Hypergraph size at one threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRow {
    /// Threshold applied to the measure.
    pub threshold: f64,
    /// Number of hypernodes.
    pub hypernodes: usize,
    /// Number of hyperedges.
    pub hyperedges: usize,
    /// Distinct hypernode degrees.
    pub degree_set: BTreeSet<usize>,
}

/// Hypergraph statistics of `graph` for each threshold over `measure`.
pub fn threshold_table<G, M>(
    graph: &G,
    measure: &M,
    thresholds: &[f64],
    builder: HypergraphBuilder,
) -> Vec<ThresholdRow>
where
    G: GraphProvider,
    M: CommonalityMeasure<G::NodeId> + Clone,
{
    thresholds
        .iter()
        .map(|&threshold| {
            let predicate = Threshold::new(measure.clone(), threshold);
            let hypergraph = infallible(builder.build(graph, &predicate));
            ThresholdRow {
                threshold,
                hypernodes: hypergraph.node_count(),
                hyperedges: hypergraph.edge_count(),
                degree_set: hypergraph.degree_set(),
            }
        })
        .collect()
}
