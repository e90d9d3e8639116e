//! # Thornwall Core
//!
//! Single-threaded simulation substrate for a tower-defense-style game:
//! hundreds of independently behaving entities updated once per frame.
//!
//! ## Architecture
//!
//! 1. **Entities are indices** - an [`EntityId`] is a slot index plus a
//!    generation counter; stale handles never alias a reused slot
//! 2. **Components are plain data** - dense per-kind arrays, presence
//!    tracked by a per-entity bitmask
//! 3. **Systems run in priority order** - one [`SystemScheduler::tick`]
//!    drives the whole frame; structural destruction is deferred to a
//!    single flush point at end of tick
//! 4. **Collision is two-phase** - a uniform-grid [`SpatialHash`] produces
//!    broad-phase candidates, the [`CollisionPipeline`] narrows them and
//!    notifies subscribers exactly once per overlapping pair
//!
//! ## Example
//!
//! ```rust,ignore
//! use thornwall_core::{World, SystemScheduler, CollisionPipeline};
//!
//! let mut world = World::with_capacity(1024);
//! let mut scheduler = SystemScheduler::new();
//! scheduler.add_system(Box::new(CollisionPipeline::new(100.0)), 20);
//! scheduler.tick(&mut world, 1.0 / 60.0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod collision;
pub mod ecs;
pub mod error;
pub mod memory;
pub mod schedule;
pub mod spatial;

pub use collision::{layer, CollisionPipeline};
pub use ecs::{
    Collider, Component, ComponentMask, ComponentStore, EntityId, Health, Melee, Projectile,
    Shooter, StoreAccess, SunPickup, Transform, Velocity, World,
};
pub use error::{CoreError, CoreResult};
pub use memory::{ObjectPool, PoolHandle, PoolStats};
pub use schedule::{System, SystemScheduler};
pub use spatial::{Aabb, GridStats, SpatialHash};
