//! Cooldown ticking and projectile spawning.
//!
//! Shooter behavior is a row in a strategy table, not a type: a
//! [`Shooter`]'s `kind` field indexes the table registered here. Adding a
//! new attacker archetype means registering a new row, never a new system.

use tracing::warn;

use thornwall_core::{layer, Collider, ComponentMask, Shooter, System, Transform, World};

use crate::spawn::spawn_projectile;

/// One firing strategy: the data that used to be a subclass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiringSpec {
    /// Seconds between shots.
    pub cooldown: f32,
    /// Projectile speed in world units per second.
    pub projectile_speed: f32,
    /// Damage carried by each projectile.
    pub damage: f32,
    /// Maximum distance at which a target triggers a shot.
    pub range: f32,
}

/// Ticks shooter cooldowns and spawns projectiles at in-lane targets.
///
/// A shooter fires when its cooldown has elapsed and a zombie stands
/// ahead of it in the same lane (within `lane_tolerance` vertically and
/// its spec's `range` horizontally).
pub struct FiringSystem {
    specs: Vec<FiringSpec>,
    lane_tolerance: f32,
}

impl FiringSystem {
    /// Creates a firing system with an empty strategy table.
    #[must_use]
    pub fn new(lane_tolerance: f32) -> Self {
        Self {
            specs: Vec::new(),
            lane_tolerance,
        }
    }

    /// Registers a strategy row, returning the `kind` that selects it.
    pub fn register_spec(&mut self, spec: FiringSpec) -> u32 {
        self.specs.push(spec);
        u32::try_from(self.specs.len() - 1).unwrap_or(u32::MAX)
    }

    /// Looks up the strategy row for a shooter kind.
    #[must_use]
    pub fn spec(&self, kind: u32) -> Option<&FiringSpec> {
        self.specs.get(kind as usize)
    }

    fn target_in_lane(&self, targets: &[(f32, f32)], x: f32, y: f32, range: f32) -> bool {
        targets
            .iter()
            .any(|&(tx, ty)| (ty - y).abs() <= self.lane_tolerance && tx > x && tx - x <= range)
    }
}

impl System for FiringSystem {
    fn name(&self) -> &'static str {
        "firing"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        // Snapshot target positions once; shooters only need lane geometry.
        let targets: Vec<(f32, f32)> = world
            .query(ComponentMask::of::<Transform>().and::<Collider>())
            .into_iter()
            .filter(|&id| {
                world
                    .get::<Collider>(id)
                    .is_some_and(|c| c.layer == layer::ZOMBIE)
            })
            .filter_map(|id| world.get::<Transform>(id).map(|t| (t.x, t.y)))
            .collect();

        for id in world.query(ComponentMask::of::<Transform>().and::<Shooter>()) {
            let (Some(&transform), Some(&shooter)) =
                (world.get::<Transform>(id), world.get::<Shooter>(id))
            else {
                continue;
            };
            let Some(&spec) = self.spec(shooter.kind) else {
                warn!(%id, kind = shooter.kind, "shooter kind has no registered spec");
                continue;
            };

            let remaining = (shooter.cooldown_remaining - dt).max(0.0);
            let ready = remaining <= 0.0
                && self.target_in_lane(&targets, transform.x, transform.y, spec.range);

            if let Some(state) = world.get_mut::<Shooter>(id) {
                state.cooldown_remaining = if ready { spec.cooldown } else { remaining };
            }
            if ready {
                if let Err(error) = spawn_projectile(
                    world,
                    transform.x,
                    transform.y,
                    spec.projectile_speed,
                    spec.damage,
                ) {
                    warn!(%id, %error, "projectile spawn failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thornwall_core::Projectile;

    use crate::spawn::{spawn_plant, spawn_zombie};

    fn pea_spec() -> FiringSpec {
        FiringSpec {
            cooldown: 1.5,
            projectile_speed: 300.0,
            damage: 20.0,
            range: 800.0,
        }
    }

    fn projectile_count(world: &World) -> usize {
        world.query(ComponentMask::of::<Projectile>()).len()
    }

    #[test]
    fn fires_at_in_lane_target_and_enters_cooldown() {
        let mut world = World::with_capacity(16);
        let mut firing = FiringSystem::new(30.0);
        let kind = firing.register_spec(pea_spec());

        let plant = spawn_plant(&mut world, 100.0, 250.0, kind, 100.0).unwrap();
        spawn_zombie(&mut world, 700.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        firing.update(&mut world, 0.016);
        assert_eq!(projectile_count(&world), 1);
        assert!(world.get::<Shooter>(plant).unwrap().cooldown_remaining > 0.0);

        // Cooldown gates the next shot.
        firing.update(&mut world, 0.016);
        assert_eq!(projectile_count(&world), 1);
    }

    #[test]
    fn holds_fire_with_no_target_in_lane() {
        let mut world = World::with_capacity(16);
        let mut firing = FiringSystem::new(30.0);
        let kind = firing.register_spec(pea_spec());

        spawn_plant(&mut world, 100.0, 250.0, kind, 100.0).unwrap();
        // Different lane, and one behind the plant.
        spawn_zombie(&mut world, 700.0, 350.0, 25.0, 100.0, 20.0).unwrap();
        spawn_zombie(&mut world, 20.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        firing.update(&mut world, 0.016);
        assert_eq!(projectile_count(&world), 0);
    }

    #[test]
    fn cooldown_elapses_across_ticks() {
        let mut world = World::with_capacity(16);
        let mut firing = FiringSystem::new(30.0);
        let kind = firing.register_spec(pea_spec());

        spawn_plant(&mut world, 100.0, 250.0, kind, 100.0).unwrap();
        spawn_zombie(&mut world, 700.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        firing.update(&mut world, 0.016);
        assert_eq!(projectile_count(&world), 1);

        // 1.5 s cooldown at 0.5 s per tick: fires again on the third tick.
        firing.update(&mut world, 0.5);
        firing.update(&mut world, 0.5);
        assert_eq!(projectile_count(&world), 1);
        firing.update(&mut world, 0.5);
        assert_eq!(projectile_count(&world), 2);
    }

    #[test]
    fn unregistered_kind_is_skipped() {
        let mut world = World::with_capacity(16);
        let mut firing = FiringSystem::new(30.0);

        spawn_plant(&mut world, 100.0, 250.0, 7, 100.0).unwrap();
        spawn_zombie(&mut world, 700.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        firing.update(&mut world, 0.016);
        assert_eq!(projectile_count(&world), 0);
    }
}
