//! Driver configuration.

use quadtree::{Aabb, Point, TreeConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Path used when no config file is given on the command line.
pub const DEFAULT_PATH: &str = "quadtree.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Load configuration from `path`, writing the defaults there if it is missing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }
}

/// Points to insert and ranges to query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkloadConfig {
    /// Number of random points to insert.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Seed for the point generator, so runs are repeatable.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Range queries run after the tree is filled.
    #[serde(default = "default_queries")]
    pub queries: Vec<Aabb>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            points: default_points(),
            seed: default_seed(),
            queries: default_queries(),
        }
    }
}

fn default_points() -> usize {
    10_000
}
fn default_seed() -> u64 {
    1
}
fn default_queries() -> Vec<Aabb> {
    vec![
        Aabb::new(Point::ZERO, Point::splat(1000.0)),
        Aabb::new(Point::new(250.0, 250.0), Point::splat(100.0)),
        Aabb::new(Point::new(-600.0, 100.0), Point::new(50.0, 400.0)),
        Aabb::new(Point::new(5000.0, 5000.0), Point::splat(10.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [tree]
            capacity = 8

            [workload]
            points = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.tree.capacity, 8);
        assert_eq!(config.tree.max_depth, TreeConfig::DEFAULT_MAX_DEPTH);
        assert_eq!(config.tree.boundary, TreeConfig::default().boundary);
        assert_eq!(config.workload.points, 50);
        assert_eq!(config.workload.seed, 1);
        assert_eq!(config.workload.queries.len(), 4);
    }

    #[test]
    fn test_query_tables() {
        let config: Config = toml::from_str(
            r#"
            [tree.boundary]
            center = [0.0, 0.0]
            half_extent = [10.0, 10.0]

            [[workload.queries]]
            center = [5.0, 5.0]
            half_extent = [1.0, 2.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.tree.boundary.half_extent, Point::new(10.0, 10.0));
        assert_eq!(
            config.workload.queries,
            vec![Aabb::new(Point::new(5.0, 5.0), Point::new(1.0, 2.0))]
        );
    }

    #[test]
    fn test_default_config_file_parses() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.tree, TreeConfig::default());
        assert_eq!(parsed.workload.queries, default_queries());
    }
}
