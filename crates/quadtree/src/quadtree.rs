//! QuadTree for spatial indexing of points.
//!
//! Each node is either a leaf holding up to `capacity` points or an internal
//! node owning exactly four children. A leaf splits the first time it would
//! overflow and never merges back.
//!
//! The root only accepts points strictly inside its boundary (see
//! [`Aabb::contains`]). Below the root, points are routed with
//! [`Aabb::quadrant_of`], which splits at the node center half-open, so a point
//! lying on an internal quadrant edge still ends up in exactly one leaf.

use crate::aabb::{Aabb, Quadrant};
use crate::config::TreeConfig;
use crate::error::QuadTreeError;
use crate::Point;
use tracing::{debug, trace, warn};

/// Parameters every node needs while inserting.
#[derive(Debug, Clone, Copy)]
struct Limits {
    capacity: usize,
    max_depth: u32,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(Vec<Point>),
    Internal(Box<[QuadNode; 4]>),
}

#[derive(Debug, Clone)]
struct QuadNode {
    boundary: Aabb,
    depth: u32,
    kind: NodeKind,
}

impl QuadNode {
    fn leaf(boundary: Aabb, depth: u32, capacity: usize) -> Self {
        Self {
            boundary,
            depth,
            kind: NodeKind::Leaf(Vec::with_capacity(capacity)),
        }
    }

    /// Store a point that already falls in this node's region.
    fn insert(&mut self, p: Point, limits: Limits) -> Result<(), QuadTreeError> {
        if let NodeKind::Leaf(points) = &mut self.kind {
            if points.len() < limits.capacity {
                points.push(p);
                return Ok(());
            }
            if self.depth >= limits.max_depth {
                warn!(
                    depth = self.depth,
                    x = p.x,
                    y = p.y,
                    "Leaf at max depth is full, point rejected"
                );
                return Err(QuadTreeError::DepthLimit { depth: self.depth });
            }
            self.subdivide(limits);
        }

        let quadrant = self.boundary.quadrant_of(p);
        match &mut self.kind {
            NodeKind::Internal(children) => children[quadrant.index()].insert(p, limits),
            NodeKind::Leaf(_) => unreachable!("subdivide leaves an internal node"),
        }
    }

    /// Split a full leaf into four children and hand its points down.
    fn subdivide(&mut self, limits: Limits) {
        let NodeKind::Leaf(points) = &mut self.kind else {
            return;
        };
        let points = std::mem::take(points);
        let moved = points.len();

        let child_depth = self.depth + 1;
        let mut children = Box::new(
            Quadrant::ALL.map(|q| QuadNode::leaf(self.boundary.quadrant(q), child_depth, limits.capacity)),
        );

        // Each child receives at most `capacity` of these, so none can overflow.
        for p in points {
            let quadrant = self.boundary.quadrant_of(p);
            let stored = children[quadrant.index()].insert(p, limits);
            debug_assert!(stored.is_ok());
        }
        debug_assert_eq!(children.iter().map(QuadNode::len).sum::<usize>(), moved);

        debug!(
            depth = self.depth,
            cx = self.boundary.center.x,
            cy = self.boundary.center.y,
            points = moved,
            "Subdivided node"
        );
        self.kind = NodeKind::Internal(children);
    }

    fn query(&self, view: &Aabb, out: &mut Vec<Point>) {
        if !self.boundary.intersects(view) {
            trace!(depth = self.depth, "Pruned node outside query view");
            return;
        }
        match &self.kind {
            NodeKind::Leaf(points) => {
                out.extend(points.iter().copied().filter(|p| view.contains(*p)));
            }
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.query(view, out);
                }
            }
        }
    }

    fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(points) => points.len(),
            NodeKind::Internal(children) => children.iter().map(QuadNode::len).sum(),
        }
    }

    fn deepest(&self) -> u32 {
        match &self.kind {
            NodeKind::Leaf(_) => self.depth,
            NodeKind::Internal(children) => children
                .iter()
                .map(QuadNode::deepest)
                .max()
                .unwrap_or(self.depth),
        }
    }

    fn node_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal(children) => 1 + children.iter().map(QuadNode::node_count).sum::<usize>(),
        }
    }

    fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal(children) => children.iter().map(QuadNode::leaf_count).sum(),
        }
    }

    fn collect(&self, out: &mut Vec<Point>) {
        match &self.kind {
            NodeKind::Leaf(points) => out.extend_from_slice(points),
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.collect(out);
                }
            }
        }
    }
}

/// Bucketed point quadtree.
///
/// Capacity and maximum depth are fixed at construction and shared by every
/// node the tree creates.
///
/// # Depth limit
///
/// Inserting many identical (or nearly identical) points would otherwise split
/// forever, since they all keep falling into the same child. Once a full leaf
/// sits at `max_depth`, further points routed to it are refused with
/// [`QuadTreeError::DepthLimit`] and [`QuadTree::insert`] returns `false`.
/// Nodes split on the way down to that leaf stay split.
#[derive(Clone)]
pub struct QuadTree {
    root: QuadNode,
    limits: Limits,
    len: usize,
}

impl QuadTree {
    /// Create an empty tree with the default maximum depth.
    pub fn new(boundary: Aabb, capacity: usize) -> Result<Self, QuadTreeError> {
        Self::with_config(&TreeConfig::new(boundary, capacity))
    }

    /// Create an empty tree from a full set of parameters.
    pub fn with_config(config: &TreeConfig) -> Result<Self, QuadTreeError> {
        config.validate()?;
        Ok(Self {
            root: QuadNode::leaf(config.boundary, 0, config.capacity),
            limits: Limits {
                capacity: config.capacity,
                max_depth: config.max_depth,
            },
            len: 0,
        })
    }

    /// Insert a point, returning whether it was stored.
    ///
    /// `false` means the point lies outside the root boundary (edges
    /// included), is not finite, or hit the depth limit.
    #[inline]
    pub fn insert(&mut self, p: Point) -> bool {
        self.try_insert(p).is_ok()
    }

    /// Insert a point, reporting why it was refused.
    ///
    /// The tree is left untouched unless the error is
    /// [`QuadTreeError::DepthLimit`].
    pub fn try_insert(&mut self, p: Point) -> Result<(), QuadTreeError> {
        if !p.is_finite() {
            return Err(QuadTreeError::NonFinitePoint(p));
        }
        if !self.root.boundary.contains(p) {
            trace!(x = p.x, y = p.y, "Point outside tree boundary");
            return Err(QuadTreeError::OutOfBounds(p));
        }
        self.root.insert(p, self.limits)?;
        self.len += 1;
        Ok(())
    }

    /// Insert every point from an iterator, returning how many were stored.
    pub fn insert_all<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().filter(|&p| self.insert(p)).count()
    }

    /// Find all stored points strictly inside `view`.
    ///
    /// Results come in NW, NE, SW, SE tree order; callers should treat them as
    /// an unordered set.
    pub fn query_range(&self, view: &Aabb) -> Vec<Point> {
        let mut result = Vec::new();
        self.query_range_into(view, &mut result);
        result
    }

    /// Like [`QuadTree::query_range`], appending to an existing buffer.
    pub fn query_range_into(&self, view: &Aabb, out: &mut Vec<Point>) {
        self.root.query(view, out);
    }

    /// Get all stored points.
    pub fn points(&self) -> Vec<Point> {
        let mut result = Vec::with_capacity(self.len);
        self.root.collect(&mut result);
        result
    }

    /// Get the number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn boundary(&self) -> &Aabb {
        &self.root.boundary
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.limits.max_depth
    }

    /// Depth of the deepest node. A tree that never split has depth 0.
    pub fn depth(&self) -> u32 {
        self.root.deepest()
    }

    /// Number of nodes, internal and leaf.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Whether the root has split into children.
    pub fn is_subdivided(&self) -> bool {
        matches!(self.root.kind, NodeKind::Internal(_))
    }
}

impl Extend<Point> for QuadTree {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl std::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("points", &self.len)
            .field("boundary", &self.root.boundary)
            .field("capacity", &self.limits.capacity)
            .field("max_depth", &self.limits.max_depth)
            .finish()
    }
}
