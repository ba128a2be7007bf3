//! Ready-made commonality predicates.
//!
//! A predicate is usually a threshold over a scalar *measure* of how much two
//! nodes have in common. The measures here only look at neighborhoods:
//!
//! | Measure | Value |
//! |---------|-------|
//! | [`ClosedJaccard`] | `|N[u] ∩ N[v]| / |N[u] ∪ N[v]|`, closed neighborhoods |
//! | [`OpenJaccard`] | `|N(u) ∩ N(v)| / |N(u) ∪ N(v)|`, open neighborhoods |
//! | [`CommonNeighbors`] | `|N(u) ∩ N(v)|` |
//!
//! Closed neighborhoods include the node itself, so two adjacent nodes with no
//! other neighbors score 1.0 under [`ClosedJaccard`] and 0.0 under
//! [`OpenJaccard`].

use super::node_view::NodeView;
use super::traits::CommonalityPredicate;
use std::convert::Infallible;

/// Scalar commonality between two nodes. Higher means more alike.
pub trait CommonalityMeasure<Id> {
    /// Commonality of `u` and `v`.
    fn value(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> f64;
}

/// Jaccard similarity of closed neighborhoods.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedJaccard;

impl<Id: Copy + Ord> CommonalityMeasure<Id> for ClosedJaccard {
    fn value(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> f64 {
        if u.id() == v.id() {
            return 1.0;
        }
        // u and v each land in the other's closed neighborhood iff adjacent.
        let mut inter = u.common_neighbors(v);
        if u.is_adjacent(v.id()) {
            inter += 1;
        }
        if v.is_adjacent(u.id()) {
            inter += 1;
        }
        let union = (u.degree() + 1) + (v.degree() + 1) - inter;
        inter as f64 / union as f64
    }
}

/// Jaccard similarity of open neighborhoods. Two isolated nodes score 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenJaccard;

impl<Id: Copy + Ord> CommonalityMeasure<Id> for OpenJaccard {
    fn value(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> f64 {
        let inter = u.common_neighbors(v);
        let union = u.degree() + v.degree() - inter;
        if union == 0 {
            0.0
        } else {
            inter as f64 / union as f64
        }
    }
}

/// Number of shared neighbors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonNeighbors;

impl<Id: Copy + Ord> CommonalityMeasure<Id> for CommonNeighbors {
    fn value(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> f64 {
        u.common_neighbors(v) as f64
    }
}

/// Predicate that holds when a measure reaches a threshold (`value >= threshold`).
#[derive(Debug, Clone, Copy)]
pub struct Threshold<M> {
    measure: M,
    threshold: f64,
}

impl<M> Threshold<M> {
    /// Create a thresholded predicate.
    pub fn new(measure: M, threshold: f64) -> Self {
        Self { measure, threshold }
    }

    /// The threshold value.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The underlying measure.
    pub fn measure(&self) -> &M {
        &self.measure
    }
}

impl<Id, M> CommonalityPredicate<Id> for Threshold<M>
where
    M: CommonalityMeasure<Id>,
{
    type Error = Infallible;

    fn holds(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> Result<bool, Infallible> {
        Ok(self.measure.value(u, v) >= self.threshold)
    }
}

/// `ClosedJaccard >= threshold`, the predicate used for ring-lattice experiments.
pub fn closed_jaccard_predicate(threshold: f64) -> Threshold<ClosedJaccard> {
    Threshold::new(ClosedJaccard, threshold)
}

/// Adapter for predicates that can fail.
///
/// ```rust
/// use hypercommon::community::{build_hypergraph, Fallible, NodeView};
/// use petgraph::graphmap::UnGraphMap;
///
/// let graph = UnGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (1, 3)]);
/// let strict = Fallible(|u: &NodeView<u32>, v: &NodeView<u32>| {
///     if u.degree() == 0 || v.degree() == 0 {
///         Err("isolated node")
///     } else {
///         Ok(true)
///     }
/// });
/// let hypergraph = build_hypergraph(&graph, &strict).unwrap();
/// assert_eq!(hypergraph.node_count(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<Id, F, E> CommonalityPredicate<Id> for Fallible<F>
where
    F: Fn(&NodeView<Id>, &NodeView<Id>) -> Result<bool, E>,
{
    type Error = E;

    fn holds(&self, u: &NodeView<Id>, v: &NodeView<Id>) -> Result<bool, E> {
        (self.0)(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn view(id: u32, neighbors: &[u32]) -> NodeView<u32> {
        NodeView::new(id, neighbors.iter().copied().collect::<BTreeSet<_>>())
    }

    #[test]
    fn test_closed_jaccard_adjacent_leaves() {
        let u = view(1, &[2]);
        let v = view(2, &[1]);
        assert!((ClosedJaccard.value(&u, &v) - 1.0).abs() < 1e-12);
        assert_eq!(OpenJaccard.value(&u, &v), 0.0);
    }

    #[test]
    fn test_closed_jaccard_ring_neighbors() {
        // Ring lattice z = 4: N[0] = {0,1,2,8,9}, N[1] = {1,0,2,3,9}.
        let u = view(0, &[1, 2, 8, 9]);
        let v = view(1, &[0, 2, 3, 9]);
        // Intersection {0,1,2,9} = 4, union {0,1,2,3,8,9} = 6.
        assert!((ClosedJaccard.value(&u, &v) - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_open_jaccard_matches_definition() {
        let u = view(1, &[2, 3, 4]);
        let v = view(4, &[1, 2, 3, 5, 6, 7]);
        // {2,3} / {1,2,3,4,5,6,7}
        assert!((OpenJaccard.value(&u, &v) - 2.0 / 7.0).abs() < 1e-12);
        assert_eq!(CommonNeighbors.value(&u, &v), 2.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let u = view(1, &[2, 3]);
        let v = view(2, &[1, 3]);
        let at = Threshold::new(CommonNeighbors, 1.0);
        let above = Threshold::new(CommonNeighbors, 1.5);

        assert_eq!(at.holds(&u, &v), Ok(true));
        assert_eq!(above.holds(&u, &v), Ok(false));
        assert_eq!(above.threshold(), 1.5);
        assert_eq!(above.measure().value(&u, &v), 1.0);
    }

    #[test]
    fn test_fallible_passes_error_through() {
        let u = view(1, &[]);
        let v = view(2, &[]);
        let failing = Fallible(|_: &NodeView<u32>, _: &NodeView<u32>| Err::<bool, _>("boom"));
        assert_eq!(failing.holds(&u, &v), Err("boom"));
    }
}
