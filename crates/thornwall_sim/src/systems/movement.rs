//! Velocity integration.

use thornwall_core::{ComponentMask, System, Transform, Velocity, World};

/// Integrates `Transform += Velocity * dt` for every moving entity.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Creates the movement system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        for id in world.query(ComponentMask::of::<Transform>().and::<Velocity>()) {
            let Some(velocity) = world.get::<Velocity>(id).copied() else {
                continue;
            };
            if let Some(transform) = world.get_mut::<Transform>(id) {
                transform.x += velocity.dx * dt;
                transform.y += velocity.dy * dt;
            }
        }
    }
}
