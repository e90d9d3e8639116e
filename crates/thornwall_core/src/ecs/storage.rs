//! # Component Storage
//!
//! One dense array per component kind, indexed by entity slot. Slots are
//! always materialized (a removed component is simply reset to the kind's
//! default and its mask bit cleared), so access is O(1) and iteration is
//! over contiguous memory.

use super::component::Component;

/// Dense storage for a single component kind.
///
/// The store grows in lockstep with the world's slot array; it never
/// shrinks, trading memory for stable indices.
pub struct ComponentStore<C: Component> {
    data: Vec<C>,
}

impl<C: Component> ComponentStore<C> {
    /// Creates an empty store with room reserved for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of materialized slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no slots have been materialized yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extends the store with default values up to `len` slots.
    pub(crate) fn grow_to(&mut self, len: usize) {
        if self.data.len() < len {
            self.data.resize(len, C::default());
        }
    }

    /// Gets a component by slot index, `None` past the end.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Gets a mutable component by slot index.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.data.get_mut(index)
    }

    /// Overwrites the slot at `index`; returns false if out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Resets a slot to the kind's default value.
    #[inline]
    pub fn reset(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = C::default();
        }
    }

    /// All slots as a contiguous slice (batch processing).
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// All slots as a mutable contiguous slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }
}
