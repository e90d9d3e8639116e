//! # Components
//!
//! Components are plain data records with no behavior and no owning
//! references to other entities - cross-entity links are carried as
//! [`EntityId`](super::EntityId) values resolved through the world at use
//! time. The set of kinds is closed; each kind claims one bit in the
//! per-entity presence mask.

use bytemuck::{Pod, Zeroable};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy` + `Pod` + `Zeroable`: bitwise-copyable plain old data
/// - `Default`: the canonical reset value used by the dense stores
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// Unique identifier for this component kind (0-63).
    const ID: u8;

    /// This kind's bit in the per-entity presence mask.
    const MASK: u64 = 1 << Self::ID;
}

/// World position, the anchor every spatial component derives from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// X coordinate in world units.
    pub x: f32,
    /// Y coordinate in world units.
    pub y: f32,
}

impl Component for Transform {
    const ID: u8 = 0;
}

impl Transform {
    /// Creates a transform at the given position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Movement in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// X velocity.
    pub dx: f32,
    /// Y velocity.
    pub dy: f32,
}

impl Component for Velocity {
    const ID: u8 = 1;
}

impl Velocity {
    /// Creates a velocity.
    #[inline]
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// Collision extent and layer filtering.
///
/// The box is centered on the entity's [`Transform`]. `layer` is the single
/// layer bit this entity occupies; `mask` is the set of layer bits it wants
/// to collide with (see [`crate::collision::layer`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Collider {
    /// Box width in world units.
    pub width: f32,
    /// Box height in world units.
    pub height: f32,
    /// Layer bit this entity occupies.
    pub layer: u8,
    /// Layer bits this entity collides with.
    pub mask: u8,
    /// Non-zero while collision detection is active for this entity.
    pub active: u8,
    _pad: u8,
}

impl Component for Collider {
    const ID: u8 = 2;
}

impl Collider {
    /// Creates an active collider on `layer` colliding with `mask`.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32, layer: u8, mask: u8) -> Self {
        Self {
            width,
            height,
            layer,
            mask,
            active: 1,
            _pad: 0,
        }
    }

    /// Whether collision detection is active for this collider.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.active != 0
    }
}

/// Hit points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Health {
    /// Current hit points.
    pub current: f32,
    /// Maximum hit points.
    pub max: f32,
}

impl Component for Health {
    const ID: u8 = 3;
}

impl Health {
    /// Creates a health record at full hit points.
    #[inline]
    #[must_use]
    pub const fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Whether this entity has run out of hit points.
    #[inline]
    #[must_use]
    pub fn is_dead(self) -> bool {
        self.current <= 0.0
    }
}

/// Instant damage carried by a fired shot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Projectile {
    /// Damage applied on hit.
    pub damage: f32,
}

impl Component for Projectile {
    const ID: u8 = 4;
}

/// Collectible currency drop with a limited lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct SunPickup {
    /// Currency value granted on collection.
    pub value: u32,
    /// Seconds until the pickup expires.
    pub ttl: f32,
}

impl Component for SunPickup {
    const ID: u8 = 5;
}

/// Ranged attacker state.
///
/// `kind` indexes the firing strategy table owned by the firing system;
/// behavior per kind is data, not a subclass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Shooter {
    /// Index into the firing strategy table.
    pub kind: u32,
    /// Seconds until the next shot is allowed.
    pub cooldown_remaining: f32,
}

impl Component for Shooter {
    const ID: u8 = 6;
}

/// Contact damage per second (a bite, not a shot).
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Melee {
    /// Damage per second applied while overlapping a target.
    pub dps: f32,
}

impl Component for Melee {
    const ID: u8 = 7;
}
