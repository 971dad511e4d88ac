//! Point region quadtree.
//!
//! This crate contains:
//! - [`Aabb`], the center/half-extent rectangle and its predicates
//! - [`QuadTree`], a bucketed point quadtree with range queries
//! - [`TreeConfig`], serde-friendly construction parameters

mod aabb;
mod config;
mod error;
mod quadtree;

pub use aabb::{Aabb, Quadrant};
pub use config::TreeConfig;
pub use error::QuadTreeError;
pub use quadtree::QuadTree;

/// A 2D point using glam's DVec2.
pub type Point = glam::DVec2;
