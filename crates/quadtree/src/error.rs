//! Quadtree error types.

use crate::Point;
use thiserror::Error;

/// Errors that can occur while building or filling a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    #[error("Node capacity must be at least 1")]
    ZeroCapacity,

    #[error("Max depth {max_depth} exceeds the limit of {limit}")]
    DepthTooLarge { max_depth: u32, limit: u32 },

    #[error("Invalid boundary: center {center}, half extent {half_extent}")]
    InvalidBoundary { center: Point, half_extent: Point },

    #[error("Point has a non-finite coordinate: {0}")]
    NonFinitePoint(Point),

    #[error("Point {0} lies outside the tree boundary")]
    OutOfBounds(Point),

    /// A full leaf at the maximum depth cannot split any further.
    #[error("Leaf at depth {depth} is full and cannot subdivide")]
    DepthLimit { depth: u32 },
}
