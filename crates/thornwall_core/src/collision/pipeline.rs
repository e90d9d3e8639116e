//! # Collision Pipeline
//!
//! A [`System`] owning the spatial hash (it is the grid's only writer;
//! see the crate docs on the single-writer-per-phase discipline). Each
//! tick it refreshes grid entries from transforms, gathers broad-phase
//! candidates per entity, narrows them by layer compatibility and exact
//! AABB overlap, deduplicates symmetric pairs, and fires every registered
//! callback exactly once per colliding pair.

use std::collections::HashSet;

use tracing::debug;

use super::layer;
use crate::ecs::{Collider, ComponentMask, EntityId, Transform, World};
use crate::memory::ObjectPool;
use crate::schedule::System;
use crate::spatial::{Aabb, SpatialHash};

/// Notification fired once per colliding pair per tick.
///
/// Callbacks are pure notifications: the pipeline applies no damage and
/// destroys nothing. Subscribing systems decide the consequence.
pub type CollisionCallback = Box<dyn FnMut(&mut World, EntityId, EntityId)>;

/// Per-tick counters, refreshed on every update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Broad-phase candidates gathered across all entities.
    pub broad_candidates: usize,
    /// Unordered pairs that reached the narrow phase.
    pub pairs_tested: usize,
    /// Pairs confirmed and dispatched to callbacks.
    pub hits: usize,
}

/// Broad/narrow collision system over the uniform grid.
pub struct CollisionPipeline {
    grid: SpatialHash,
    callbacks: Vec<CollisionCallback>,
    seen: HashSet<(EntityId, EntityId)>,
    candidates: Vec<EntityId>,
    pairs: ObjectPool<Vec<(EntityId, EntityId)>>,
    stats: PipelineStats,
}

impl CollisionPipeline {
    /// Creates a pipeline over a grid with the given cell size.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not a positive finite number.
    #[must_use]
    pub fn new(cell_size: f32) -> Self {
        Self {
            grid: SpatialHash::new(cell_size),
            callbacks: Vec::new(),
            seen: HashSet::new(),
            candidates: Vec::new(),
            pairs: ObjectPool::with_capacity(1, Vec::new, Vec::clear),
            stats: PipelineStats::default(),
        }
    }

    /// Subscribes a callback to confirmed collisions.
    pub fn register_callback(
        &mut self,
        callback: impl FnMut(&mut World, EntityId, EntityId) + 'static,
    ) {
        self.callbacks.push(Box::new(callback));
    }

    /// Read access to the underlying grid (inspection only; the pipeline
    /// is its sole writer).
    #[must_use]
    pub fn grid(&self) -> &SpatialHash {
        &self.grid
    }

    /// Counters from the most recent tick.
    #[must_use]
    pub fn last_stats(&self) -> PipelineStats {
        self.stats
    }

    fn entity_aabb(world: &World, id: EntityId) -> Option<(Aabb, Collider)> {
        let transform = world.get::<Transform>(id).copied()?;
        let collider = world.get::<Collider>(id).copied()?;
        let aabb = Aabb::from_center(transform.x, transform.y, collider.width, collider.height);
        Some((aabb, collider))
    }

    /// Drops grid entries whose entity died or lost its collider since
    /// the previous tick (a destroyed entity must leave the index).
    fn prune_stale(&mut self, world: &World) {
        let stale: Vec<EntityId> = self
            .grid
            .tracked()
            .filter(|&id| !world.has::<Collider>(id) || !world.has::<Transform>(id))
            .collect();
        for id in stale {
            self.grid.remove(id);
        }
    }
}

impl System for CollisionPipeline {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        self.seen.clear();
        self.prune_stale(world);

        let collidable = world.query(ComponentMask::of::<Transform>().and::<Collider>());

        // Phase 1: refresh the grid from this frame's transforms.
        for &id in &collidable {
            if let Some((aabb, _)) = Self::entity_aabb(world, id) {
                self.grid.update(id, aabb);
            }
        }

        // Phase 2: broad-phase query per entity, narrow-phase per pair.
        // Confirmed pairs are buffered so callbacks (which may mutate the
        // world) run after all world reads are done.
        let buffer = self.pairs.acquire();
        let mut broad_candidates = 0;
        let mut pairs_tested = 0;

        for &a in &collidable {
            let Some((aabb_a, collider_a)) = Self::entity_aabb(world, a) else {
                continue;
            };
            if !collider_a.is_active() {
                continue;
            }

            self.grid.query_aabb_into(&aabb_a, &mut self.candidates);
            broad_candidates += self.candidates.len();

            for idx in 0..self.candidates.len() {
                let b = self.candidates[idx];
                if b == a {
                    continue;
                }
                let key = if a < b { (a, b) } else { (b, a) };
                if !self.seen.insert(key) {
                    continue;
                }
                pairs_tested += 1;

                let Some((aabb_b, collider_b)) = Self::entity_aabb(world, b) else {
                    continue;
                };
                if !collider_b.is_active()
                    || !layer::compatible(&collider_a, &collider_b)
                    || !aabb_a.intersects(&aabb_b)
                {
                    continue;
                }
                if let Some(buf) = self.pairs.get_mut(buffer) {
                    buf.push(key);
                }
            }
        }

        // Phase 3: dispatch, exactly once per confirmed pair.
        let hits = self.pairs.get(buffer).map_or(0, Vec::len);
        for i in 0..hits {
            let Some(&(a, b)) = self.pairs.get(buffer).and_then(|buf| buf.get(i)) else {
                break;
            };
            for callback in &mut self.callbacks {
                callback(world, a, b);
            }
        }
        self.pairs.release(buffer);

        self.stats = PipelineStats {
            broad_candidates,
            pairs_tested,
            hits,
        };
        debug!(broad_candidates, pairs_tested, hits, "collision tick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn spawn_box(world: &mut World, x: f32, y: f32, size: f32, layer_bit: u8, mask: u8) -> EntityId {
        let id = world.create();
        world.add(id, Transform::new(x, y)).unwrap();
        world.add(id, Collider::new(size, size, layer_bit, mask)).unwrap();
        id
    }

    fn hit_log(pipeline: &mut CollisionPipeline) -> Rc<RefCell<Vec<(EntityId, EntityId)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let probe = Rc::clone(&log);
        pipeline.register_callback(move |_world, a, b| {
            probe.borrow_mut().push(if a < b { (a, b) } else { (b, a) });
        });
        log
    }

    #[test]
    fn overlapping_pair_reported_exactly_once() {
        let mut world = World::with_capacity(8);
        let mut pipeline = CollisionPipeline::new(100.0);
        let log = hit_log(&mut pipeline);

        let a = spawn_box(&mut world, 5.0, 5.0, 10.0, layer::PLANT, layer::ZOMBIE);
        let b = spawn_box(&mut world, 10.0, 10.0, 10.0, layer::ZOMBIE, layer::PLANT);

        pipeline.update(&mut world, 0.016);

        let key = if a < b { (a, b) } else { (b, a) };
        assert_eq!(*log.borrow(), vec![key]);
        assert_eq!(pipeline.last_stats().hits, 1);

        // Next tick reports the still-overlapping pair again, still once.
        log.borrow_mut().clear();
        pipeline.update(&mut world, 0.016);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn end_to_end_three_entities_one_hit() {
        let mut world = World::with_capacity(8);
        let mut pipeline = CollisionPipeline::new(100.0);
        let log = hit_log(&mut pipeline);

        // Boxes (0,0,10,10), (5,5,10,10), (100,100,10,10) - centers.
        let a = spawn_box(&mut world, 5.0, 5.0, 10.0, layer::ZOMBIE, layer::ZOMBIE);
        let b = spawn_box(&mut world, 10.0, 10.0, 10.0, layer::ZOMBIE, layer::ZOMBIE);
        let c = spawn_box(&mut world, 105.0, 105.0, 10.0, layer::ZOMBIE, layer::ZOMBIE);

        pipeline.update(&mut world, 0.016);

        let hits = log.borrow();
        assert_eq!(hits.len(), 1);
        let key = if a < b { (a, b) } else { (b, a) };
        assert_eq!(hits[0], key);
        assert!(!hits.iter().any(|&(x, y)| x == c || y == c));
    }

    #[test]
    fn union_rule_lets_one_sided_masks_collide() {
        let mut world = World::with_capacity(8);
        let mut pipeline = CollisionPipeline::new(100.0);
        let log = hit_log(&mut pipeline);

        // Only the projectile lists the zombie; the zombie lists nobody.
        spawn_box(&mut world, 0.0, 0.0, 10.0, layer::PROJECTILE, layer::ZOMBIE);
        spawn_box(&mut world, 3.0, 0.0, 10.0, layer::ZOMBIE, 0);

        pipeline.update(&mut world, 0.016);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn incompatible_layers_never_collide() {
        let mut world = World::with_capacity(8);
        let mut pipeline = CollisionPipeline::new(100.0);
        let log = hit_log(&mut pipeline);

        spawn_box(&mut world, 0.0, 0.0, 10.0, layer::PROJECTILE, layer::ZOMBIE);
        spawn_box(&mut world, 3.0, 0.0, 10.0, layer::SUN, 0);

        pipeline.update(&mut world, 0.016);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn inactive_colliders_are_skipped() {
        let mut world = World::with_capacity(8);
        let mut pipeline = CollisionPipeline::new(100.0);
        let log = hit_log(&mut pipeline);

        let a = spawn_box(&mut world, 0.0, 0.0, 10.0, layer::PLANT, layer::ZOMBIE);
        spawn_box(&mut world, 3.0, 0.0, 10.0, layer::ZOMBIE, layer::PLANT);

        world.get_mut::<Collider>(a).unwrap().active = 0;
        pipeline.update(&mut world, 0.016);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn destroyed_entities_leave_the_grid() {
        let mut world = World::with_capacity(8);
        let mut pipeline = CollisionPipeline::new(100.0);
        let log = hit_log(&mut pipeline);

        let a = spawn_box(&mut world, 0.0, 0.0, 10.0, layer::PLANT, layer::ZOMBIE);
        spawn_box(&mut world, 3.0, 0.0, 10.0, layer::ZOMBIE, layer::PLANT);

        pipeline.update(&mut world, 0.016);
        assert_eq!(log.borrow().len(), 1);

        world.destroy(a);
        log.borrow_mut().clear();
        pipeline.update(&mut world, 0.016);

        assert!(log.borrow().is_empty());
        assert!(!pipeline.grid().contains(a));
    }
}
