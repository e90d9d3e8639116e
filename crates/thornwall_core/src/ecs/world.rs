//! # World
//!
//! The world owns the entity allocator and every component store, and is
//! the single API surface systems use: handle lifecycle, typed component
//! access, mask queries, and the deferred-destruction queue that keeps
//! structural mutation out of in-progress iterations.

use super::component::{
    Collider, Component, Health, Melee, Projectile, Shooter, SunPickup, Transform, Velocity,
};
use super::entity::{EntityId, Slot};
use super::query::ComponentMask;
use super::storage::ComponentStore;
use crate::error::{CoreError, CoreResult};

/// Typed access to the store for one component kind.
///
/// Implemented by [`World`] once per kind in the closed set; it is what
/// lets `world.add::<Health>(..)` reach the right dense array without
/// runtime type inspection.
pub trait StoreAccess<C: Component> {
    /// The store holding all `C` instances.
    fn store(&self) -> &ComponentStore<C>;
    /// Mutable access to the store holding all `C` instances.
    fn store_mut(&mut self) -> &mut ComponentStore<C>;
}

macro_rules! impl_store_access {
    ($($field:ident: $kind:ty),+ $(,)?) => {
        $(impl StoreAccess<$kind> for World {
            #[inline]
            fn store(&self) -> &ComponentStore<$kind> {
                &self.$field
            }
            #[inline]
            fn store_mut(&mut self) -> &mut ComponentStore<$kind> {
                &mut self.$field
            }
        })+
    };
}

/// Container for all entities and components.
///
/// Strictly single-threaded: one writer context per tick phase by
/// construction, no locking anywhere.
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    alive_count: usize,
    pending_destroy: Vec<EntityId>,

    transforms: ComponentStore<Transform>,
    velocities: ComponentStore<Velocity>,
    colliders: ComponentStore<Collider>,
    healths: ComponentStore<Health>,
    projectiles: ComponentStore<Projectile>,
    sun_pickups: ComponentStore<SunPickup>,
    shooters: ComponentStore<Shooter>,
    melees: ComponentStore<Melee>,
}

impl_store_access!(
    transforms: Transform,
    velocities: Velocity,
    colliders: Collider,
    healths: Health,
    projectiles: Projectile,
    sun_pickups: SunPickup,
    shooters: Shooter,
    melees: Melee,
);

impl World {
    /// Creates a world with room reserved for `capacity` entities.
    ///
    /// The world grows past `capacity` on demand; reserving up front keeps
    /// the steady-state hot path free of reallocation.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            alive_count: 0,
            pending_destroy: Vec::new(),
            transforms: ComponentStore::with_capacity(capacity),
            velocities: ComponentStore::with_capacity(capacity),
            colliders: ComponentStore::with_capacity(capacity),
            healths: ComponentStore::with_capacity(capacity),
            projectiles: ComponentStore::with_capacity(capacity),
            sun_pickups: ComponentStore::with_capacity(capacity),
            shooters: ComponentStore::with_capacity(capacity),
            melees: ComponentStore::with_capacity(capacity),
        }
    }

    /// Number of currently live entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates a new entity, reusing the most recently freed slot if any.
    ///
    /// O(1) amortized; component stores grow alongside the slot array.
    pub fn create(&mut self) -> EntityId {
        let index = if let Some(index) = self.free.pop() {
            index
        } else {
            let index = u32::try_from(self.slots.len()).expect("entity slot index overflow");
            self.slots.push(Slot::vacant());
            self.grow_stores(self.slots.len());
            index
        };

        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.mask = 0;
        slot.alive = true;
        self.alive_count += 1;

        EntityId::new(index, slot.generation)
    }

    /// Destroys an entity immediately.
    ///
    /// All of its components are reset and become unreachable via
    /// `get`/`query`. Returns false (no-op) for stale or already-destroyed
    /// handles. During a tick prefer [`World::queue_destroy`].
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let idx = id.index() as usize;
        let Some(slot) = self.slots.get_mut(idx) else {
            return false;
        };
        if !slot.alive || slot.generation != id.generation() {
            return false;
        }

        slot.alive = false;
        slot.mask = 0;
        self.alive_count -= 1;
        self.free.push(id.index());
        self.reset_components(idx);
        true
    }

    /// Whether `id` refers to a currently live entity.
    ///
    /// O(1); the single source of truth other modules consult before
    /// trusting a handle.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index() as usize)
            .is_some_and(|slot| slot.alive && slot.generation == id.generation())
    }

    // =========================================================================
    // Deferred structural mutation
    // =========================================================================

    /// Requests destruction of `id` at the next flush point.
    ///
    /// Queued requests are applied by [`World::flush_deferred`], which the
    /// scheduler calls at end of tick so no query result set changes
    /// mid-iteration.
    pub fn queue_destroy(&mut self, id: EntityId) {
        self.pending_destroy.push(id);
    }

    /// Applies every queued destruction. Stale and duplicate requests are
    /// skipped. Returns the number of entities destroyed.
    pub fn flush_deferred(&mut self) -> usize {
        let mut destroyed = 0;
        while let Some(id) = self.pending_destroy.pop() {
            if self.destroy(id) {
                destroyed += 1;
            }
        }
        destroyed
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// Attaches a component to a live entity.
    ///
    /// # Errors
    ///
    /// [`CoreError::DeadEntity`] for a stale handle,
    /// [`CoreError::DuplicateComponent`] if the entity already holds this
    /// kind (remove first, or use [`World::replace`]).
    pub fn add<C: Component>(&mut self, id: EntityId, component: C) -> CoreResult<()>
    where
        Self: StoreAccess<C>,
    {
        if !self.is_alive(id) {
            return Err(CoreError::DeadEntity(id));
        }
        let idx = id.index() as usize;
        if self.slots[idx].mask & C::MASK != 0 {
            return Err(CoreError::DuplicateComponent {
                entity: id,
                component: core::any::type_name::<C>(),
            });
        }
        self.slots[idx].mask |= C::MASK;
        self.store_mut().set(idx, component);
        Ok(())
    }

    /// Attaches or overwrites a component on a live entity.
    ///
    /// # Errors
    ///
    /// [`CoreError::DeadEntity`] for a stale handle.
    pub fn replace<C: Component>(&mut self, id: EntityId, component: C) -> CoreResult<()>
    where
        Self: StoreAccess<C>,
    {
        if !self.is_alive(id) {
            return Err(CoreError::DeadEntity(id));
        }
        let idx = id.index() as usize;
        self.slots[idx].mask |= C::MASK;
        self.store_mut().set(idx, component);
        Ok(())
    }

    /// Reads a component. Absence (dead entity or kind not held) is `None`,
    /// never an error.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C>
    where
        Self: StoreAccess<C>,
    {
        if !self.has::<C>(id) {
            return None;
        }
        self.store().get(id.index() as usize)
    }

    /// Mutable variant of [`World::get`].
    #[inline]
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C>
    where
        Self: StoreAccess<C>,
    {
        if !self.has::<C>(id) {
            return None;
        }
        self.store_mut().get_mut(id.index() as usize)
    }

    /// Detaches a component. Idempotent: removing an absent kind (or from a
    /// dead entity) is a no-op returning false.
    pub fn remove<C: Component>(&mut self, id: EntityId) -> bool
    where
        Self: StoreAccess<C>,
    {
        if !self.has::<C>(id) {
            return false;
        }
        let idx = id.index() as usize;
        self.slots[idx].mask &= !C::MASK;
        self.store_mut().reset(idx);
        true
    }

    /// Whether a live entity holds component kind `C`.
    #[inline]
    #[must_use]
    pub fn has<C: Component>(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index() as usize)
            .is_some_and(|slot| {
                slot.alive && slot.generation == id.generation() && slot.mask & C::MASK != 0
            })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every live entity holding all kinds in `mask`, as an owned snapshot.
    ///
    /// The snapshot is stable for the duration of the call (no entity
    /// skipped or duplicated); order is unspecified across calls. Entities
    /// created after the snapshot is taken do not appear in it. The empty
    /// mask matches nothing.
    #[must_use]
    pub fn query(&self, mask: ComponentMask) -> Vec<EntityId> {
        if mask.is_empty() {
            return Vec::new();
        }
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive && mask.matched_by(slot.mask))
            .map(|(idx, slot)| EntityId::new(idx as u32, slot.generation))
            .collect()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn grow_stores(&mut self, len: usize) {
        self.transforms.grow_to(len);
        self.velocities.grow_to(len);
        self.colliders.grow_to(len);
        self.healths.grow_to(len);
        self.projectiles.grow_to(len);
        self.sun_pickups.grow_to(len);
        self.shooters.grow_to(len);
        self.melees.grow_to(len);
    }

    fn reset_components(&mut self, idx: usize) {
        self.transforms.reset(idx);
        self.velocities.reset(idx);
        self.colliders.reset(idx);
        self.healths.reset(idx);
        self.projectiles.reset(idx);
        self.sun_pickups.reset(idx);
        self.shooters.reset(idx);
        self.melees.reset(idx);
    }
}
