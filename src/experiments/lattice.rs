//! Ring lattices with known community structure.

use crate::error::{Error, Result};
use petgraph::graphmap::UnGraphMap;
use std::collections::BTreeSet;

/// `rings` disjoint ring lattices over nodes `0..n`.
///
/// Each ring holds `n / rings` consecutive ids; every node is linked to its
/// `z / 2` successors (and so to `z / 2` predecessors) within its ring, giving
/// a `z`-regular graph.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `rings < 1`, `n` is not divisible by
/// `rings`, `z` is odd, or `z >= n / rings`.
pub fn ring_lattice(n: usize, z: usize, rings: usize) -> Result<UnGraphMap<usize, ()>> {
    let n_per_ring = ring_size(n, rings)?;
    if z % 2 != 0 {
        return Err(Error::invalid("z", format!("degree must be even, got {z}")));
    }
    if z >= n_per_ring {
        return Err(Error::invalid(
            "z",
            format!("degree {z} must be less than nodes per ring ({n_per_ring})"),
        ));
    }

    let mut graph = UnGraphMap::with_capacity(n, n * z / 2);
    for u in 0..n {
        graph.add_node(u);
    }

    let half = z / 2;
    for r in 0..rings {
        let offset = r * n_per_ring;
        for i in 0..n_per_ring {
            for k in 1..=half {
                graph.add_edge(offset + i, offset + (i + k) % n_per_ring, ());
            }
        }
    }

    Ok(graph)
}

/// The rings of [`ring_lattice`] as communities.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `rings < 1` or `n` is not divisible by `rings`.
pub fn ring_ground_truth(n: usize, rings: usize) -> Result<Vec<BTreeSet<usize>>> {
    let n_per_ring = ring_size(n, rings)?;
    Ok((0..rings)
        .map(|r| (r * n_per_ring..(r + 1) * n_per_ring).collect())
        .collect())
}

/// Edge count of a ring lattice: `rings * (n / rings) * z / 2`.
pub fn ring_lattice_edge_count(n: usize, z: usize, rings: usize) -> usize {
    if rings == 0 {
        return 0;
    }
    rings * (n / rings * z / 2)
}

fn ring_size(n: usize, rings: usize) -> Result<usize> {
    if rings < 1 {
        return Err(Error::invalid("rings", "must be >= 1"));
    }
    if n % rings != 0 {
        return Err(Error::invalid(
            "n",
            format!("{n} nodes cannot be split into {rings} equal rings"),
        ));
    }
    Ok(n / rings)
}
