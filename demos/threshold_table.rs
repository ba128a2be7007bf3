use hypercommon::community::{ClosedJaccard, HypergraphBuilder};
use hypercommon::experiments::{representative_thresholds, ring_lattice, threshold_table};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Hypergraph size across candidate thresholds, for single rings of growing degree.
    for z in (2..=10).step_by(2) {
        let graph = ring_lattice(40, z, 1)?;
        let thresholds = representative_thresholds(&graph, &ClosedJaccard, 0.6);
        let rows = threshold_table(
            &graph,
            &ClosedJaccard,
            &thresholds,
            HypergraphBuilder::new(),
        );

        println!("n=40 e={} z={z}", graph.edge_count());
        for row in rows {
            println!(
                "  t={:.6} hypernodes={} hyperedges={} degrees={:?}",
                row.threshold, row.hypernodes, row.hyperedges, row.degree_set
            );
        }
    }

    Ok(())
}
