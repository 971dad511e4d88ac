//! Quadtree bench - fills a tree with random points and runs range queries.

use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod workload;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Quadtree bench v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH));
    let config = config::Config::load(&path)?;
    info!("Loaded configuration from {}", path.display());
    info!(
        "  Boundary: center {} half extent {}",
        config.tree.boundary.center, config.tree.boundary.half_extent
    );
    info!("  Capacity: {}", config.tree.capacity);
    info!("  Max depth: {}", config.tree.max_depth);
    info!("  Points: {} (seed {})", config.workload.points, config.workload.seed);

    let report = workload::run(&config)?;
    info!(
        "Inserted {} points in {:?} ({} outside, {} at depth limit)",
        report.inserted, report.insert_time, report.out_of_bounds, report.depth_limited
    );
    info!(
        "Tree has {} nodes, {} leaves, depth {}",
        report.nodes, report.leaves, report.depth
    );

    let mut mismatches = 0;
    for query in &report.queries {
        info!(
            "Query center {} half extent {}: {} points in {:?}",
            query.view.center, query.view.half_extent, query.found, query.elapsed
        );
        if !query.matches() {
            mismatches += 1;
        }
    }

    if mismatches > 0 {
        warn!("{} queries disagreed with the linear scan", mismatches);
        anyhow::bail!("{} range queries returned wrong results", mismatches);
    }

    Ok(())
}
