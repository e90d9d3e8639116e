//! # Collision Detection
//!
//! Two-phase pipeline: the spatial hash supplies cheap over-approximate
//! candidates (broad phase), exact AABB overlap plus layer filtering
//! confirms them (narrow phase), and registered callbacks are notified
//! exactly once per colliding pair per frame. The pipeline never applies
//! gameplay consequence itself - damage and destruction belong to the
//! systems subscribing to it.

pub mod layer;
mod pipeline;

pub use pipeline::{CollisionPipeline, PipelineStats};
