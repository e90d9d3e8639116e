//! # Thornwall Sim
//!
//! Stock gameplay systems layered on the core runtime. Everything in this
//! crate is an ordinary consumer of the core contracts - component
//! read/write, mask queries, and collision-event subscription. The
//! conventional frame ordering is movement, firing, collision, damage,
//! culling; the scheduler priorities in [`priority`] encode it.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod events;
pub mod spawn;
pub mod systems;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use events::{subscribe_hits, HitEvent};
pub use systems::{CullSystem, DamageSystem, FiringSpec, FiringSystem, MovementSystem};

/// Conventional scheduler priorities for the stock systems.
///
/// Lower runs earlier; the gaps leave room for game-specific systems.
pub mod priority {
    /// Velocity integration.
    pub const MOVEMENT: i32 = 10;
    /// Cooldowns and projectile spawning.
    pub const FIRING: i32 = 15;
    /// Broad/narrow collision detection.
    pub const COLLISION: i32 = 20;
    /// Collision-consequence resolution.
    pub const DAMAGE: i32 = 30;
    /// Out-of-field and expired-pickup cleanup.
    pub const CULL: i32 = 40;
}
