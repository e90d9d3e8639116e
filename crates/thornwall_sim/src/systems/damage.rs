//! Collision-consequence resolution.
//!
//! Drains the hit channel the collision pipeline feeds and applies the
//! consequences: projectiles deal instant damage and are consumed, melee
//! attackers chew at `dps * dt`, and anything at zero health is queued for
//! end-of-tick destruction. Detection and consequence stay decoupled.

use std::collections::HashSet;

use crossbeam_channel::Receiver;
use tracing::trace;

use thornwall_core::{ComponentMask, EntityId, Health, Melee, Projectile, System, World};

use crate::events::HitEvent;

/// Applies damage from collision events and reaps dead entities.
pub struct DamageSystem {
    hits: Receiver<HitEvent>,
    // Projectiles consumed this tick; destruction is deferred, so without
    // this a shot overlapping two targets would damage both.
    spent: HashSet<EntityId>,
}

impl DamageSystem {
    /// Creates a damage system draining the given hit channel.
    #[must_use]
    pub fn new(hits: Receiver<HitEvent>) -> Self {
        Self {
            hits,
            spent: HashSet::new(),
        }
    }

    fn resolve(&mut self, world: &mut World, source: EntityId, target: EntityId, dt: f32) {
        if !world.is_alive(source) || !world.is_alive(target) {
            return;
        }
        if let Some(&Projectile { damage }) = world.get::<Projectile>(source) {
            if self.spent.contains(&source) {
                return;
            }
            if let Some(health) = world.get_mut::<Health>(target) {
                health.current -= damage;
                trace!(%source, %target, damage, "projectile hit");
                self.spent.insert(source);
                world.queue_destroy(source);
            }
        } else if let Some(&Melee { dps }) = world.get::<Melee>(source) {
            if let Some(health) = world.get_mut::<Health>(target) {
                health.current -= dps * dt;
            }
        }
    }
}

impl System for DamageSystem {
    fn name(&self) -> &'static str {
        "damage"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        self.spent.clear();

        let events: Vec<HitEvent> = self.hits.try_iter().collect();
        for hit in events {
            self.resolve(world, hit.a, hit.b, dt);
            self.resolve(world, hit.b, hit.a, dt);
        }

        // Reap: zero health means destruction at the end of this tick.
        for id in world.query(ComponentMask::of::<Health>()) {
            if world.get::<Health>(id).is_some_and(|h| h.is_dead()) {
                world.queue_destroy(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use thornwall_core::Transform;

    use crate::spawn::{spawn_projectile, spawn_zombie};

    #[test]
    fn projectile_hit_damages_and_consumes_the_shot() {
        let mut world = World::with_capacity(8);
        let (tx, rx) = unbounded();
        let mut damage = DamageSystem::new(rx);

        let shot = spawn_projectile(&mut world, 100.0, 250.0, 300.0, 20.0).unwrap();
        let zombie = spawn_zombie(&mut world, 100.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        tx.send(HitEvent { a: shot, b: zombie }).unwrap();
        damage.update(&mut world, 0.016);
        world.flush_deferred();

        assert!(!world.is_alive(shot));
        assert!((world.get::<Health>(zombie).unwrap().current - 80.0).abs() < 1e-4);
    }

    #[test]
    fn one_projectile_spends_itself_on_one_target() {
        let mut world = World::with_capacity(8);
        let (tx, rx) = unbounded();
        let mut damage = DamageSystem::new(rx);

        let shot = spawn_projectile(&mut world, 100.0, 250.0, 300.0, 20.0).unwrap();
        let first = spawn_zombie(&mut world, 100.0, 250.0, 25.0, 100.0, 20.0).unwrap();
        let second = spawn_zombie(&mut world, 105.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        tx.send(HitEvent { a: shot, b: first }).unwrap();
        tx.send(HitEvent { a: shot, b: second }).unwrap();
        damage.update(&mut world, 0.016);

        let hurt = [first, second]
            .iter()
            .filter(|&&id| world.get::<Health>(id).unwrap().current < 100.0)
            .count();
        assert_eq!(hurt, 1);
    }

    #[test]
    fn melee_damage_scales_with_dt() {
        let mut world = World::with_capacity(8);
        let (tx, rx) = unbounded();
        let mut damage = DamageSystem::new(rx);

        let zombie = spawn_zombie(&mut world, 100.0, 250.0, 25.0, 100.0, 40.0).unwrap();
        let plant = world.create();
        world.add(plant, Transform::new(100.0, 250.0)).unwrap();
        world.add(plant, Health::full(100.0)).unwrap();

        tx.send(HitEvent { a: zombie, b: plant }).unwrap();
        damage.update(&mut world, 0.25);

        // 40 dps for a quarter second.
        assert!((world.get::<Health>(plant).unwrap().current - 90.0).abs() < 1e-4);
    }

    #[test]
    fn dead_entities_are_reaped_at_flush() {
        let mut world = World::with_capacity(8);
        let (tx, rx) = unbounded();
        let mut damage = DamageSystem::new(rx);

        let shot = spawn_projectile(&mut world, 100.0, 250.0, 300.0, 150.0).unwrap();
        let zombie = spawn_zombie(&mut world, 100.0, 250.0, 25.0, 100.0, 20.0).unwrap();

        tx.send(HitEvent { a: shot, b: zombie }).unwrap();
        damage.update(&mut world, 0.016);

        assert!(world.is_alive(zombie), "destruction is deferred to flush");
        world.flush_deferred();
        assert!(!world.is_alive(zombie));
    }

    #[test]
    fn stale_handles_in_events_are_ignored() {
        let mut world = World::with_capacity(8);
        let (tx, rx) = unbounded();
        let mut damage = DamageSystem::new(rx);

        let shot = spawn_projectile(&mut world, 100.0, 250.0, 300.0, 20.0).unwrap();
        let zombie = spawn_zombie(&mut world, 100.0, 250.0, 25.0, 100.0, 20.0).unwrap();
        world.destroy(shot);

        tx.send(HitEvent { a: shot, b: zombie }).unwrap();
        damage.update(&mut world, 0.016);

        assert!((world.get::<Health>(zombie).unwrap().current - 100.0).abs() < f32::EPSILON);
    }
}
