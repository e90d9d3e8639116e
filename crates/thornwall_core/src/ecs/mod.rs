//! # Entity Component System
//!
//! ## Design
//!
//! - Entities are slot indices with generation counters for safe reuse
//! - Components are stored in dense per-kind arrays
//! - Presence is a per-entity `u64` bitmask over a closed component set
//! - Queries snapshot matching entity ids, so structural mutation never
//!   invalidates an in-progress iteration

mod component;
mod entity;
mod query;
mod storage;
mod world;

pub use component::{
    Collider, Component, Health, Melee, Projectile, Shooter, SunPickup, Transform, Velocity,
};
pub use entity::EntityId;
pub use query::ComponentMask;
pub use storage::ComponentStore;
pub use world::{StoreAccess, World};
