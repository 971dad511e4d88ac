//! Tree construction parameters.

use crate::{Aabb, Point, QuadTreeError};
use serde::{Deserialize, Serialize};

/// Parameters shared by every node of one tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TreeConfig {
    /// Region covered by the root node.
    #[serde(default = "default_boundary")]
    pub boundary: Aabb,
    /// Points a leaf holds before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Deepest level a node may be created at. The root is depth 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl TreeConfig {
    pub const DEFAULT_MAX_DEPTH: u32 = 24;
    /// Largest accepted `max_depth`. Node operations recurse once per level,
    /// and f64 cells stop shrinking in a useful way well before this.
    pub const MAX_DEPTH_LIMIT: u32 = 64;

    pub fn new(boundary: Aabb, capacity: usize) -> Self {
        Self {
            boundary,
            capacity,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Check that the parameters can build a tree.
    pub fn validate(&self) -> Result<(), QuadTreeError> {
        if self.capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        if self.max_depth > Self::MAX_DEPTH_LIMIT {
            return Err(QuadTreeError::DepthTooLarge {
                max_depth: self.max_depth,
                limit: Self::MAX_DEPTH_LIMIT,
            });
        }
        if !self.boundary.is_valid() {
            return Err(QuadTreeError::InvalidBoundary {
                center: self.boundary.center,
                half_extent: self.boundary.half_extent,
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            boundary: default_boundary(),
            capacity: default_capacity(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_boundary() -> Aabb {
    Aabb::new(Point::ZERO, Point::splat(1000.0))
}
fn default_capacity() -> usize {
    4
}
fn default_max_depth() -> u32 {
    TreeConfig::DEFAULT_MAX_DEPTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TreeConfig::default();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.max_depth, TreeConfig::DEFAULT_MAX_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = TreeConfig {
            capacity: 0,
            ..TreeConfig::default()
        };
        assert_eq!(config.validate(), Err(QuadTreeError::ZeroCapacity));
    }

    #[test]
    fn test_validate_rejects_flat_boundary() {
        let config = TreeConfig::new(Aabb::new(Point::ZERO, Point::new(10.0, 0.0)), 4);
        assert!(matches!(
            config.validate(),
            Err(QuadTreeError::InvalidBoundary { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_huge_max_depth() {
        let config = TreeConfig {
            max_depth: 2_000_000,
            ..TreeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(QuadTreeError::DepthTooLarge {
                max_depth: 2_000_000,
                limit: TreeConfig::MAX_DEPTH_LIMIT,
            })
        );

        let config = TreeConfig {
            max_depth: TreeConfig::MAX_DEPTH_LIMIT,
            ..TreeConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_boundary() {
        let config = TreeConfig::new(Aabb::new(Point::ZERO, Point::splat(1e308)), 4);
        assert!(matches!(
            config.validate(),
            Err(QuadTreeError::InvalidBoundary { .. })
        ));
    }
}
