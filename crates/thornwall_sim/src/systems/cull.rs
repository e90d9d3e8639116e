//! Out-of-field and lifetime cleanup.

use tracing::trace;

use thornwall_core::{ComponentMask, Projectile, SunPickup, System, Transform, Velocity, World};

use crate::config::SimConfig;

/// How far past the field edge a projectile may fly before removal.
const FIELD_MARGIN: f32 = 50.0;

/// Removes projectiles that left the field and expires sun pickups.
///
/// Sun pickups also stop falling once they reach the ground.
pub struct CullSystem {
    field_width: f32,
    field_height: f32,
}

impl CullSystem {
    /// Creates a cull system for the configured playfield.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            field_width: config.field_width,
            field_height: config.field_height,
        }
    }

    fn out_of_field(&self, x: f32, y: f32) -> bool {
        x < -FIELD_MARGIN
            || x > self.field_width + FIELD_MARGIN
            || y < -FIELD_MARGIN
            || y > self.field_height + FIELD_MARGIN
    }
}

impl System for CullSystem {
    fn name(&self) -> &'static str {
        "cull"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        for id in world.query(ComponentMask::of::<Transform>().and::<Projectile>()) {
            let Some(transform) = world.get::<Transform>(id) else {
                continue;
            };
            if self.out_of_field(transform.x, transform.y) {
                trace!(%id, "projectile left the field");
                world.queue_destroy(id);
            }
        }

        for id in world.query(ComponentMask::of::<SunPickup>()) {
            let grounded = world.get::<Transform>(id).is_some_and(|t| t.y <= 0.0);
            if grounded {
                if let Some(velocity) = world.get_mut::<Velocity>(id) {
                    *velocity = Velocity::default();
                }
            }
            if let Some(pickup) = world.get_mut::<SunPickup>(id) {
                pickup.ttl -= dt;
                if pickup.ttl <= 0.0 {
                    trace!(%id, "sun pickup expired");
                    world.queue_destroy(id);
                }
            }
        }
    }
}
