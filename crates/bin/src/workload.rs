//! Random fill and range-query workload.
//!
//! Every query result is checked against a linear scan over the points the
//! tree accepted.

use crate::config::Config;
use quadtree::{Aabb, Point, QuadTree, QuadTreeError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Outcome of one configured range query.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub view: Aabb,
    pub found: usize,
    pub expected: usize,
    /// Whether the tree returned the same points as the linear scan.
    pub matched: bool,
    pub elapsed: Duration,
}

impl QueryReport {
    pub fn matches(&self) -> bool {
        self.matched
    }
}

/// Summary of a full workload run.
#[derive(Debug, Clone)]
pub struct Report {
    pub inserted: usize,
    pub out_of_bounds: usize,
    pub depth_limited: usize,
    pub insert_time: Duration,
    pub depth: u32,
    pub nodes: usize,
    pub leaves: usize,
    pub queries: Vec<QueryReport>,
}

/// Build a tree from `config`, fill it and run every configured query.
pub fn run(config: &Config) -> Result<Report, QuadTreeError> {
    let mut tree = QuadTree::with_config(&config.tree)?;
    let mut rng = StdRng::seed_from_u64(config.workload.seed);
    let points = random_points(&mut rng, &config.tree.boundary, config.workload.points);

    let mut stored = Vec::with_capacity(points.len());
    let mut out_of_bounds = 0;
    let mut depth_limited = 0;

    let start = Instant::now();
    for p in points {
        match tree.try_insert(p) {
            Ok(()) => stored.push(p),
            Err(QuadTreeError::DepthLimit { .. }) => depth_limited += 1,
            Err(e) => {
                debug!("Skipped point: {}", e);
                out_of_bounds += 1;
            }
        }
    }
    let insert_time = start.elapsed();

    let queries = config
        .workload
        .queries
        .iter()
        .map(|view| run_query(&tree, &stored, view))
        .collect();

    Ok(Report {
        inserted: tree.len(),
        out_of_bounds,
        depth_limited,
        insert_time,
        depth: tree.depth(),
        nodes: tree.node_count(),
        leaves: tree.leaf_count(),
        queries,
    })
}

fn run_query(tree: &QuadTree, stored: &[Point], view: &Aabb) -> QueryReport {
    let start = Instant::now();
    let found = tree.query_range(view);
    let elapsed = start.elapsed();

    let expected: Vec<Point> = stored.iter().copied().filter(|p| view.contains(*p)).collect();
    let (found_len, expected_len) = (found.len(), expected.len());
    let matched = same_points(found, expected);
    if !matched {
        warn!(
            found = found_len,
            expected = expected_len,
            "Range query disagrees with linear scan"
        );
    }

    QueryReport {
        view: *view,
        found: found_len,
        expected: expected_len,
        matched,
        elapsed,
    }
}

/// Compare two point lists as multisets.
pub fn same_points(mut a: Vec<Point>, mut b: Vec<Point>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let by_coords = |p: &Point, q: &Point| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y));
    a.sort_by(by_coords);
    b.sort_by(by_coords);
    a == b
}

/// Uniform random points over the boundary.
///
/// Offsets are drawn as a fraction of the half extent in `[-1, 1]`, so the
/// sample range never spans more than the box itself. A few points can land on
/// an edge and be refused by the tree.
pub fn random_points(rng: &mut impl Rng, boundary: &Aabb, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| {
            let offset = Point::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
            boundary.center + boundary.half_extent * offset
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkloadConfig;
    use quadtree::TreeConfig;

    fn small_config() -> Config {
        Config {
            tree: TreeConfig::new(Aabb::new(Point::ZERO, Point::splat(100.0)), 4),
            workload: WorkloadConfig {
                points: 500,
                seed: 7,
                queries: vec![
                    Aabb::new(Point::ZERO, Point::splat(100.0)),
                    Aabb::new(Point::new(20.0, -30.0), Point::new(15.0, 40.0)),
                    Aabb::new(Point::new(500.0, 500.0), Point::splat(10.0)),
                ],
            },
        }
    }

    #[test]
    fn test_random_points_stay_in_boundary() {
        let boundary = Aabb::new(Point::new(3.0, -2.0), Point::new(1.0, 5.0));
        let mut rng = StdRng::seed_from_u64(1);
        let points = random_points(&mut rng, &boundary, 200);

        assert_eq!(points.len(), 200);
        for p in points {
            assert!(p.x >= boundary.left() && p.x <= boundary.right());
            assert!(p.y >= boundary.bottom() && p.y <= boundary.top());
        }
    }

    #[test]
    fn test_random_points_over_huge_boundary() {
        let boundary = Aabb::new(Point::new(-1e300, 0.0), Point::splat(5e307));
        let mut rng = StdRng::seed_from_u64(3);
        let points = random_points(&mut rng, &boundary, 100);

        assert!(points.iter().all(|p| p.is_finite()));
        assert!(points.iter().all(|p| p.x >= boundary.left() && p.x <= boundary.right()));
    }

    #[test]
    fn test_same_points_compares_contents() {
        let a = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(1.0, 1.0)];
        let shuffled = vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let same_count = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)];

        assert!(same_points(a.clone(), shuffled));
        assert!(!same_points(a.clone(), same_count));
        assert!(!same_points(a, vec![Point::new(1.0, 1.0)]));
    }

    #[test]
    fn test_run_agrees_with_linear_scan() {
        let report = run(&small_config()).unwrap();

        assert_eq!(report.inserted + report.out_of_bounds + report.depth_limited, 500);
        assert_eq!(report.depth_limited, 0);
        assert!(report.nodes > 1);
        assert_eq!(report.queries.len(), 3);
        assert!(report.queries.iter().all(QueryReport::matches));
        assert_eq!(report.queries[0].found, report.inserted);
        assert_eq!(report.queries[2].found, 0);
    }

    #[test]
    fn test_run_rejects_invalid_tree() {
        let mut config = small_config();
        config.tree.capacity = 0;
        assert_eq!(run(&config).unwrap_err(), QuadTreeError::ZeroCapacity);
    }
}
