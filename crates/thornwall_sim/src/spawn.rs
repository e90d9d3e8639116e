//! # Spawn Factories
//!
//! Canonical component bundles for the four archetypes. Factories are the
//! only place layer/mask pairings are written down, so a projectile can
//! never ship with a plant's filter by accident.

use thornwall_core::{
    layer, Collider, CoreResult, EntityId, Health, Melee, Projectile, Shooter, SunPickup,
    Transform, Velocity, World,
};

/// Collision box edge for plants and zombies, in world units.
const UNIT_SIZE: f32 = 60.0;
/// Collision box edge for projectiles.
const SHOT_SIZE: f32 = 16.0;
/// Collision box edge for sun pickups.
const SUN_SIZE: f32 = 40.0;
/// Sun pickups drift downward at this speed.
const SUN_FALL_SPEED: f32 = 30.0;

/// Spawns a stationary shooter on the plant layer.
///
/// `kind` selects the row of the firing strategy table.
///
/// # Errors
///
/// Propagates component-attach failures from the world.
pub fn spawn_plant(world: &mut World, x: f32, y: f32, kind: u32, max_health: f32) -> CoreResult<EntityId> {
    let id = world.create();
    world.add(id, Transform::new(x, y))?;
    world.add(id, Collider::new(UNIT_SIZE, UNIT_SIZE, layer::PLANT, 0))?;
    world.add(id, Health::full(max_health))?;
    world.add(
        id,
        Shooter {
            kind,
            cooldown_remaining: 0.0,
        },
    )?;
    Ok(id)
}

/// Spawns a leftward-walking attacker that bites plants on contact.
///
/// # Errors
///
/// Propagates component-attach failures from the world.
pub fn spawn_zombie(
    world: &mut World,
    x: f32,
    y: f32,
    speed: f32,
    max_health: f32,
    dps: f32,
) -> CoreResult<EntityId> {
    let id = world.create();
    world.add(id, Transform::new(x, y))?;
    world.add(id, Velocity::new(-speed, 0.0))?;
    world.add(id, Collider::new(UNIT_SIZE, UNIT_SIZE, layer::ZOMBIE, layer::PLANT))?;
    world.add(id, Health::full(max_health))?;
    world.add(id, Melee { dps })?;
    Ok(id)
}

/// Spawns a rightward shot that damages the first zombie it overlaps.
///
/// # Errors
///
/// Propagates component-attach failures from the world.
pub fn spawn_projectile(
    world: &mut World,
    x: f32,
    y: f32,
    speed: f32,
    damage: f32,
) -> CoreResult<EntityId> {
    let id = world.create();
    world.add(id, Transform::new(x, y))?;
    world.add(id, Velocity::new(speed, 0.0))?;
    world.add(id, Collider::new(SHOT_SIZE, SHOT_SIZE, layer::PROJECTILE, layer::ZOMBIE))?;
    world.add(id, Projectile { damage })?;
    Ok(id)
}

/// Spawns a falling currency pickup with a limited lifetime.
///
/// # Errors
///
/// Propagates component-attach failures from the world.
pub fn spawn_sun(world: &mut World, x: f32, y: f32, value: u32, ttl: f32) -> CoreResult<EntityId> {
    let id = world.create();
    world.add(id, Transform::new(x, y))?;
    world.add(id, Velocity::new(0.0, -SUN_FALL_SPEED))?;
    world.add(id, Collider::new(SUN_SIZE, SUN_SIZE, layer::SUN, 0))?;
    world.add(id, SunPickup { value, ttl })?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zombie_bundle_walks_left_and_targets_plants() {
        let mut world = World::with_capacity(8);
        let id = spawn_zombie(&mut world, 800.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        assert!(world.get::<Velocity>(id).unwrap().dx < 0.0);
        let collider = world.get::<Collider>(id).unwrap();
        assert_eq!(collider.layer, layer::ZOMBIE);
        assert_eq!(collider.mask, layer::PLANT);
        assert!(world.has::<Melee>(id));
    }

    #[test]
    fn projectile_bundle_targets_zombies_only() {
        let mut world = World::with_capacity(8);
        let id = spawn_projectile(&mut world, 100.0, 250.0, 300.0, 20.0).unwrap();

        let collider = world.get::<Collider>(id).unwrap();
        assert_eq!(collider.layer, layer::PROJECTILE);
        assert_eq!(collider.mask, layer::ZOMBIE);
        assert!((world.get::<Projectile>(id).unwrap().damage - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn plant_bundle_starts_ready_to_fire() {
        let mut world = World::with_capacity(8);
        let id = spawn_plant(&mut world, 100.0, 250.0, 0, 120.0).unwrap();

        let shooter = world.get::<Shooter>(id).unwrap();
        assert!(shooter.cooldown_remaining <= 0.0);
        assert!((world.get::<Health>(id).unwrap().current - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn sun_bundle_falls_and_expires() {
        let mut world = World::with_capacity(8);
        let id = spawn_sun(&mut world, 400.0, 480.0, 25, 8.0).unwrap();

        assert!(world.get::<Velocity>(id).unwrap().dy < 0.0);
        assert_eq!(world.get::<SunPickup>(id).unwrap().value, 25);
    }
}
