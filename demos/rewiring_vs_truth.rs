use hypercommon::experiments::RewiringSweep;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Ring lattices -> rewiring -> hypergraph communities -> Omega vs the rings.
    //
    // RUST_LOG=hypercommon=debug shows every scored step.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Two rings of 100 nodes, degree 8. 800 edges, rewired 40 per step.
    let (n, z, rings) = (200, 8, 2);
    let curves = RewiringSweep::new()
        .with_steps(20)
        .with_repetitions(3)
        .with_seed(42)
        .with_thresholds([0.25, 0.3, 0.35])
        .run(n, z, rings)?;

    println!("n={n} z={z} rings={rings}");
    for curve in &curves {
        println!("threshold {:.3}", curve.threshold);
        for (p, score) in curve.points() {
            println!("  p={p:.2} omega={score:.4}");
        }
    }

    Ok(())
}
