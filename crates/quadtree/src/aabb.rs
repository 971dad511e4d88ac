//! Axis-aligned bounding box.

use crate::Point;
use serde::{Deserialize, Serialize};

/// One of the four children of a subdivided node.
///
/// `ALL` lists them in the order children are stored and visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Slot of this quadrant in a node's child array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }

    /// Unit direction of the quadrant's center relative to its parent's center.
    #[inline]
    fn direction(self) -> Point {
        match self {
            Quadrant::NorthWest => Point::new(-1.0, 1.0),
            Quadrant::NorthEast => Point::new(1.0, 1.0),
            Quadrant::SouthWest => Point::new(-1.0, -1.0),
            Quadrant::SouthEast => Point::new(1.0, -1.0),
        }
    }
}

/// Axis-aligned rectangle described by its center and half extent.
///
/// `half_extent.x` is the half width, `half_extent.y` the half height.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Aabb {
    pub center: Point,
    pub half_extent: Point,
}

impl Aabb {
    pub const fn new(center: Point, half_extent: Point) -> Self {
        Self { center, half_extent }
    }

    /// Create a box from its four edges.
    #[inline]
    pub fn from_edges(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            center: Point::new((left + right) / 2.0, (bottom + top) / 2.0),
            half_extent: Point::new((right - left) / 2.0, (top - bottom) / 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.center.x - self.half_extent.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.center.x + self.half_extent.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.center.y - self.half_extent.y
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.center.y + self.half_extent.y
    }

    /// Get the width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.half_extent.x * 2.0
    }

    /// Get the height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.half_extent.y * 2.0
    }

    /// True when both half extents are positive and the edges, width and
    /// height are all finite.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.half_extent.x > 0.0
            && self.half_extent.y > 0.0
            && self.width().is_finite()
            && self.height().is_finite()
            && self.left().is_finite()
            && self.right().is_finite()
            && self.bottom().is_finite()
            && self.top().is_finite()
    }

    /// Check if a point lies strictly inside the box.
    ///
    /// Points exactly on an edge are not contained. Two boxes sharing an edge
    /// therefore both reject a point on that edge.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.bottom() && p.y < self.top()
    }

    /// Check if two boxes overlap with positive area.
    ///
    /// Boxes that only touch along an edge or at a corner do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() < self.half_extent.x + other.half_extent.x
            && (self.center.y - other.center.y).abs() < self.half_extent.y + other.half_extent.y
    }

    /// Boundary of one quadrant of this box.
    #[inline]
    pub fn quadrant(&self, quadrant: Quadrant) -> Aabb {
        let half = self.half_extent * 0.5;
        Aabb::new(self.center + half * quadrant.direction(), half)
    }

    /// Quadrant a point falls in, using a half-open split at the center.
    ///
    /// Points on the vertical center line go east and points on the
    /// horizontal center line go north, so every point maps to one quadrant.
    #[inline]
    pub fn quadrant_of(&self, p: Point) -> Quadrant {
        match (p.x >= self.center.x, p.y >= self.center.y) {
            (false, true) => Quadrant::NorthWest,
            (true, true) => Quadrant::NorthEast,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::SouthEast,
        }
    }
}
