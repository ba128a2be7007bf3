//! Agreement between overlapping partitions.
//!
//! Classic partition metrics (ARI, NMI) assume every node sits in exactly one
//! cluster. With overlapping communities a pair of nodes can share zero, one
//! or several communities, so the comparison is done on *co-membership
//! counts* instead.
//!
//! # The Omega Index
//!
//! For the `T = N(N-1)/2` unordered pairs of an `N`-node universe, let
//! `t(a,b)` and `d(a,b)` be the number of ground-truth and detected
//! communities containing both `a` and `b`.
//!
//! ```text
//! Omega_u = |{pairs : t = d}| / T
//! Omega_e = Σ_k  (|{t = k}| / T) · (|{d = k}| / T)
//! Omega   = (Omega_u - Omega_e) / (1 - Omega_e)
//! ```
//!
//! `Omega_e` is the agreement expected if the two count distributions were
//! independent. Like ARI, Omega is 1 for identical partitions, around 0 at
//! chance level, and negative when agreement is worse than chance. When both
//! partitions give every pair the same count, `Omega_e = 1` and the score is
//! defined as 1.
//!
//! Counts are stored sparsely: pairs that share no community are absent and
//! folded back in as a single zero-count mass.
//!
//! # Example
//!
//! ```rust
//! use hypercommon::metrics::{omega, pair_counts, total_pairs};
//!
//! let truth = pair_counts(&[vec![1, 2, 3], vec![4, 5, 6]]);
//! let detected = pair_counts(&[vec![1, 2, 3]]);
//!
//! let score = omega(&truth, &detected, total_pairs(6)).unwrap();
//! assert!((score - 6.0 / 11.0).abs() < 1e-12);
//! ```
//!
//! # References
//!
//! - Collins & Dent (1988). "Omega: A general formulation of the Rand index of
//!   cluster recovery suitable for non-disjoint solutions."
//! - Xie, Kelley, Szymanski (2013). "Overlapping community detection in
//!   networks: the state of the art and comparative study."

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Sparse co-membership counts of one partition, keyed by `(min, max)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCounts<Id: Hash + Eq> {
    counts: HashMap<(Id, Id), usize>,
}

impl<Id: Hash + Eq> Default for PairCounts<Id> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<Id: Copy + Ord + Hash> PairCounts<Id> {
    /// Empty counts (every pair at zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more community. Repeated members are counted once.
    pub fn add_community<'a, C>(&mut self, community: C)
    where
        C: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let members: Vec<Id> = community
            .into_iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        for (pos, &a) in members.iter().enumerate() {
            for &b in &members[pos + 1..] {
                *self.counts.entry((a, b)).or_insert(0) += 1;
            }
        }
    }

    /// Number of communities containing both `a` and `b`.
    pub fn get(&self, a: Id, b: Id) -> usize {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Number of pairs with a nonzero count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no pair shares a community.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Nonzero entries, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = ((Id, Id), usize)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Co-membership counts of a list of communities.
///
/// Accepts anything that iterates by reference: `&[Vec<Id>]`,
/// `&Vec<BTreeSet<Id>>`, `&[[Id; 3]]`, ...
pub fn pair_counts<'a, Id, C>(communities: impl IntoIterator<Item = &'a C>) -> PairCounts<Id>
where
    Id: Copy + Ord + Hash + 'a,
    C: 'a + ?Sized,
    &'a C: IntoIterator<Item = &'a Id>,
{
    let mut counts = PairCounts::new();
    for community in communities {
        counts.add_community(community);
    }
    counts
}

/// Number of unordered pairs in an `n`-node universe.
pub fn total_pairs(n: usize) -> usize {
    comb2(n)
}

/// Adjusted Omega Index between two co-membership count maps.
///
/// Symmetric in its two partitions. See the module docs for the definition.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `total_pairs == 0`.
/// - [`Error::InconsistentUniverse`] if fewer pairs are declared than appear
///   in the two maps together.
pub fn omega<Id>(
    ground_truth: &PairCounts<Id>,
    detected: &PairCounts<Id>,
    total_pairs: usize,
) -> Result<f64>
where
    Id: Copy + Ord + Hash,
{
    if total_pairs == 0 {
        return Err(Error::EmptyInput);
    }

    let keys: HashSet<(Id, Id)> = ground_truth
        .counts
        .keys()
        .chain(detected.counts.keys())
        .copied()
        .collect();

    let remaining = total_pairs
        .checked_sub(keys.len())
        .ok_or(Error::InconsistentUniverse {
            total_pairs,
            observed: keys.len(),
        })?;

    // Histograms: count value -> number of pairs with that count.
    let mut freq_truth: BTreeMap<usize, usize> = BTreeMap::new();
    let mut freq_detected: BTreeMap<usize, usize> = BTreeMap::new();
    let mut agreeing = 0usize;

    for &(a, b) in &keys {
        let t = ground_truth.get(a, b);
        let d = detected.get(a, b);
        if t == d {
            agreeing += 1;
        }
        *freq_truth.entry(t).or_insert(0) += 1;
        *freq_detected.entry(d).or_insert(0) += 1;
    }

    // Pairs in neither map are (0, 0): they agree.
    agreeing += remaining;
    *freq_truth.entry(0).or_insert(0) += remaining;
    *freq_detected.entry(0).or_insert(0) += remaining;

    let n = total_pairs as f64;
    let omega_u = agreeing as f64 / n;
    let omega_e: f64 = freq_truth
        .iter()
        .filter_map(|(k, &ft)| {
            freq_detected
                .get(k)
                .map(|&fd| (ft as f64 / n) * (fd as f64 / n))
        })
        .sum();

    if (1.0 - omega_e).abs() < f64::EPSILON {
        return Ok(1.0);
    }

    Ok((omega_u - omega_e) / (1.0 - omega_e))
}

/// Omega Index of two community lists over an `n`-node universe.
///
/// # Errors
///
/// As [`omega`]; `n < 2` gives [`Error::EmptyInput`].
pub fn omega_index<'a, Id, C>(
    ground_truth: impl IntoIterator<Item = &'a C>,
    detected: impl IntoIterator<Item = &'a C>,
    n: usize,
) -> Result<f64>
where
    Id: Copy + Ord + Hash + 'a,
    C: 'a + ?Sized,
    &'a C: IntoIterator<Item = &'a Id>,
{
    omega(&pair_counts(ground_truth), &pair_counts(detected), total_pairs(n))
}

fn comb2(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}
