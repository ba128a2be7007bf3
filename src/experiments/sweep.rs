//! Recognition of ring-lattice communities as edges are rewired.
//!
//! Start from `rings` disjoint ring lattices whose rings are the ground truth,
//! then rewire a fixed share of the original edges per step until all of them
//! have been rewired once. At every step the detected communities are scored
//! against the rings with the Omega index. The curve of score against the
//! rewired fraction `p` shows how long the structure stays recognizable.

use super::infallible;
use super::lattice::{ring_ground_truth, ring_lattice, ring_lattice_edge_count};
use super::rewiring::rewire_step;
use crate::community::{closed_jaccard_predicate, Hypercommon, HypergraphBuilder};
use crate::error::{Error, Result};
use crate::metrics::{omega, pair_counts, total_pairs};
use rand::prelude::*;

/// Edges to rewire per step so that `edges` are all rewired in `steps` steps.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `steps == 0` or `steps` does not divide `edges`.
pub fn validate_rewiring_plan(edges: usize, steps: usize) -> Result<usize> {
    if steps == 0 {
        return Err(Error::invalid("steps", "must be >= 1"));
    }
    if edges % steps != 0 {
        return Err(Error::invalid(
            "steps",
            format!("{edges} edges cannot be rewired in {steps} equal steps"),
        ));
    }
    Ok(edges / steps)
}

/// Mean Omega score against the rewired fraction, for one threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepCurve {
    /// Closed-Jaccard threshold of the predicate.
    pub threshold: f64,
    /// Rewired fractions `0, 1/steps, ..., 1`.
    pub fractions: Vec<f64>,
    /// Mean score at each fraction.
    pub scores: Vec<f64>,
}

impl SweepCurve {
    /// `(p, score)` points.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fractions.iter().copied().zip(self.scores.iter().copied())
    }
}

/// Configuration of a rewiring-vs-truth sweep.
#[derive(Debug, Clone)]
pub struct RewiringSweep {
    steps: usize,
    repetitions: usize,
    seed: u64,
    thresholds: Vec<f64>,
    builder: HypergraphBuilder,
}

impl RewiringSweep {
    /// 100 steps, 10 repetitions, seed 42, no thresholds yet.
    pub fn new() -> Self {
        Self {
            steps: 100,
            repetitions: 10,
            seed: 42,
            thresholds: Vec::new(),
            builder: HypergraphBuilder::new(),
        }
    }

    /// Number of rewiring steps (`p` advances by `1 / steps`).
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Number of independent runs averaged per threshold.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Random seed for edge order and rewiring.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Closed-Jaccard thresholds to sweep.
    pub fn with_thresholds(mut self, thresholds: impl Into<Vec<f64>>) -> Self {
        self.thresholds = thresholds.into();
        self
    }

    /// Hypergraph builder configuration used for detection.
    pub fn with_builder(mut self, builder: HypergraphBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Run the sweep on `rings` ring lattices of `n` nodes in total and degree `z`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for an invalid lattice, no thresholds, zero
    /// repetitions, or a step count that does not divide the edge count.
    pub fn run(&self, n: usize, z: usize, rings: usize) -> Result<Vec<SweepCurve>> {
        if self.thresholds.is_empty() {
            return Err(Error::invalid("thresholds", "at least one threshold is required"));
        }
        if self.repetitions == 0 {
            return Err(Error::invalid("repetitions", "must be >= 1"));
        }

        // Validates the lattice parameters once, up front.
        ring_lattice(n, z, rings)?;
        let truth = pair_counts(&ring_ground_truth(n, rings)?);
        let universe = total_pairs(n);
        let edges = ring_lattice_edge_count(n, z, rings);
        let per_step = validate_rewiring_plan(edges, self.steps)?;

        tracing::info!(
            n,
            z,
            rings,
            edges,
            per_step,
            steps = self.steps,
            "starting rewiring sweep"
        );

        let fractions: Vec<f64> = (0..=self.steps)
            .map(|s| s as f64 / self.steps as f64)
            .collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut curves = Vec::with_capacity(self.thresholds.len());

        for &threshold in &self.thresholds {
            let detector =
                Hypercommon::new(closed_jaccard_predicate(threshold)).with_builder(self.builder);
            let mut sums = vec![0.0; self.steps + 1];

            for run in 0..self.repetitions {
                let mut graph = ring_lattice(n, z, rings)?;
                let mut stack: Vec<(usize, usize)> =
                    graph.all_edges().map(|(a, b, _)| (a, b)).collect();
                stack.shuffle(&mut rng);

                for (step, sum) in sums.iter_mut().enumerate() {
                    let detected = infallible(detector.detect(&graph));
                    let score = omega(&truth, &pair_counts(&detected), universe)?;
                    *sum += score;
                    tracing::debug!(
                        threshold,
                        run,
                        step,
                        communities = detected.len(),
                        score,
                        "scored"
                    );

                    if step < self.steps {
                        rewire_step(&mut graph, &mut stack, per_step, &mut rng);
                    }
                }
            }

            let scores: Vec<f64> = sums
                .into_iter()
                .map(|s| s / self.repetitions as f64)
                .collect();
            tracing::info!(
                threshold,
                initial = scores[0],
                last = scores[self.steps],
                "threshold done"
            );

            curves.push(SweepCurve {
                threshold,
                fractions: fractions.clone(),
                scores,
            });
        }

        Ok(curves)
    }
}

impl Default for RewiringSweep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rewiring_plan() {
        assert_eq!(validate_rewiring_plan(4000, 100).unwrap(), 40);
        assert!(validate_rewiring_plan(4000, 0).is_err());
        assert!(validate_rewiring_plan(4000, 300).is_err());
    }

    #[test]
    fn test_sweep_recovers_unperturbed_rings() {
        // Ring z = 4: J(i, i+1) = 4/6 and J(i, i+2) = 3/7 both pass 0.4.
        let curves = RewiringSweep::new()
            .with_steps(2)
            .with_repetitions(2)
            .with_seed(7)
            .with_thresholds([0.4])
            .run(20, 4, 2)
            .unwrap();

        assert_eq!(curves.len(), 1);
        let curve = &curves[0];
        assert_eq!(curve.fractions, vec![0.0, 0.5, 1.0]);
        assert!((curve.scores[0] - 1.0).abs() < 1e-12);
        assert!(curve.points().all(|(_, s)| s <= 1.0 + 1e-12));
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let sweep = RewiringSweep::new()
            .with_steps(4)
            .with_repetitions(1)
            .with_thresholds([0.3]);
        assert_eq!(sweep.run(24, 4, 2).unwrap(), sweep.run(24, 4, 2).unwrap());
    }

    #[test]
    fn test_sweep_rejects_bad_plans() {
        let sweep = RewiringSweep::new().with_thresholds([0.4]);
        // 20 nodes, z = 4: 40 edges, not divisible by 100 steps.
        assert!(matches!(
            sweep.run(20, 4, 2),
            Err(Error::InvalidParameter { name: "steps", .. })
        ));
        assert!(RewiringSweep::new().with_steps(2).run(20, 4, 2).is_err());
        assert!(RewiringSweep::new()
            .with_steps(2)
            .with_thresholds([0.4])
            .run(20, 5, 2)
            .is_err());
    }
}
