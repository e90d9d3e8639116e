//! # Stock Systems
//!
//! The conventional frame pipeline: movement, firing, collision (owned by
//! the core), damage, culling. Each system is self-contained and talks to
//! the world only through the public component API.

mod cull;
mod damage;
mod firing;
mod movement;

pub use cull::CullSystem;
pub use damage::DamageSystem;
pub use firing::{FiringSpec, FiringSystem};
pub use movement::MovementSystem;
