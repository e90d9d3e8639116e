//! # Entity Handles
//!
//! An entity is an opaque handle: a slot index into the component arrays
//! plus a generation counter. While a slot is alive no other live entity
//! shares its index; after destruction the slot may be reused, but the
//! generation is bumped so handles captured before the destroy never
//! alias the newcomer.

use std::fmt;

/// Unique identifier for an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    /// Creates an entity id from a slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index into the component arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation counter detecting stale handles.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}v{}", self.index, self.generation)
    }
}

/// Per-slot bookkeeping held by the world.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot {
    /// Generation of the entity currently (or last) occupying this slot.
    pub generation: u32,
    /// Bitmask of attached component kinds.
    pub mask: u64,
    /// Whether the slot currently holds a live entity.
    pub alive: bool,
}

impl Slot {
    pub(crate) const fn vacant() -> Self {
        Self {
            generation: 0,
            mask: 0,
            alive: false,
        }
    }
}
