//! # Object Pool
//!
//! A generic reusable-instance pool built from two closures: a factory
//! that produces fresh instances and a reset that restores a recycled one
//! to its canonical state. Instances stay owned by the pool; callers hold
//! [`PoolHandle`]s while an instance is borrowed.

/// Handle to a borrowed pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    index: usize,
}

impl PoolHandle {
    /// Slot index, stable for the pool's lifetime.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Idle/borrowed counters for a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolStats {
    /// Slots currently available for acquisition.
    pub idle: usize,
    /// Slots currently borrowed by callers.
    pub borrowed: usize,
    /// Total slots ever created (high-water mark).
    pub capacity: usize,
}

struct PoolSlot<T> {
    value: T,
    borrowed: bool,
}

/// Generic object pool with unbounded growth.
///
/// An instance is never borrowed twice concurrently, and a recycled
/// instance is reset exactly once between its release and the next
/// acquisition. Factory-fresh instances are handed out as built.
pub struct ObjectPool<T> {
    slots: Vec<PoolSlot<T>>,
    free: Vec<usize>,
    factory: Box<dyn FnMut() -> T>,
    reset: Box<dyn FnMut(&mut T)>,
}

impl<T> ObjectPool<T> {
    /// Creates an empty pool from a factory and a reset function.
    pub fn new(
        factory: impl FnMut() -> T + 'static,
        reset: impl FnMut(&mut T) + 'static,
    ) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            factory: Box::new(factory),
            reset: Box::new(reset),
        }
    }

    /// Creates a pool pre-warmed with `count` idle instances.
    pub fn with_capacity(
        count: usize,
        mut factory: impl FnMut() -> T + 'static,
        reset: impl FnMut(&mut T) + 'static,
    ) -> Self {
        let mut slots = Vec::with_capacity(count);
        for _ in 0..count {
            slots.push(PoolSlot {
                value: factory(),
                borrowed: false,
            });
        }
        let free = (0..count).rev().collect();
        Self {
            slots,
            free,
            factory: Box::new(factory),
            reset: Box::new(reset),
        }
    }

    /// Borrows an instance: an idle slot if one exists (reset first),
    /// otherwise a fresh slot built by the factory. O(1) either way.
    pub fn acquire(&mut self) -> PoolHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            (self.reset)(&mut slot.value);
            slot.borrowed = true;
            PoolHandle { index }
        } else {
            let index = self.slots.len();
            self.slots.push(PoolSlot {
                value: (self.factory)(),
                borrowed: true,
            });
            PoolHandle { index }
        }
    }

    /// Reads a borrowed instance; `None` for handles already released.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.borrowed)
            .map(|slot| &slot.value)
    }

    /// Mutable variant of [`ObjectPool::get`].
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.borrowed)
            .map(|slot| &mut slot.value)
    }

    /// Returns an instance to the pool. The handle must not be used to
    /// access the instance afterward. Idempotent: releasing an already
    /// idle slot is a no-op returning false.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index) else {
            return false;
        };
        if !slot.borrowed {
            return false;
        }
        slot.borrowed = false;
        self.free.push(handle.index);
        true
    }

    /// Reclaims every outstanding instance (scene/level teardown).
    /// Returns the number reclaimed.
    pub fn release_all(&mut self) -> usize {
        let mut reclaimed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.borrowed {
                slot.borrowed = false;
                self.free.push(index);
                reclaimed += 1;
            }
        }
        reclaimed
    }

    /// Current idle/borrowed counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let idle = self.free.len();
        PoolStats {
            idle,
            borrowed: self.slots.len() - idle,
            capacity: self.slots.len(),
        }
    }
}
