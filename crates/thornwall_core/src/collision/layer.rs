//! # Collision Layers
//!
//! Each collidable entity occupies one layer bit and carries a mask of
//! layer bits it wants to collide with. The compatibility rule is the
//! **union** of both sides' intent: a pair collides when either side's
//! mask lists the other's layer. One-way masks are therefore sufficient -
//! a projectile that lists zombies collides with zombies even though
//! zombies list nobody.

use crate::ecs::Collider;

/// Defensive plants rooted in the lawn.
pub const PLANT: u8 = 1;
/// The shambling horde.
pub const ZOMBIE: u8 = 2;
/// Shots fired by plants.
pub const PROJECTILE: u8 = 4;
/// Collectible currency drops.
pub const SUN: u8 = 8;

/// Union layer-compatibility rule.
#[inline]
#[must_use]
pub fn compatible(a: &Collider, b: &Collider) -> bool {
    a.mask & b.layer != 0 || b.mask & a.layer != 0
}
