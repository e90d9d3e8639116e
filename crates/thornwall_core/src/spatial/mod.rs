//! # Spatial Index
//!
//! A uniform grid over axis-aligned bounding boxes. Entity sizes in this
//! game are roughly uniform and per-frame motion is bounded, so grid
//! maintenance beats tree rebalancing; with the cell size tuned near the
//! median entity extent, average cell occupancy stays a small constant and
//! total collision-candidate work is near linear.
//!
//! Consumes only `(id, aabb)` pairs - it knows nothing about the ECS.

mod aabb;
mod grid;

pub use aabb::Aabb;
pub use grid::{GridStats, SpatialHash};
