//! # Query Masks
//!
//! A query over N component kinds collapses to one bitmask superset test
//! per entity slot: the per-entity presence mask must contain every bit of
//! the query mask.

use super::component::Component;

/// A set of component kinds, used to filter entities.
///
/// # Example
///
/// ```rust,ignore
/// let movable = ComponentMask::of::<Transform>().and::<Velocity>();
/// for id in world.query(movable) { /* ... */ }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComponentMask(u64);

impl ComponentMask {
    /// The empty kind set. Queries over it match nothing.
    pub const EMPTY: Self = Self(0);

    /// Mask containing a single kind.
    #[inline]
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self(C::MASK)
    }

    /// Returns this mask with `C` added.
    #[inline]
    #[must_use]
    pub fn and<C: Component>(self) -> Self {
        Self(self.0 | C::MASK)
    }

    /// Whether every bit of this mask is present in `bits`.
    #[inline]
    #[must_use]
    pub fn matched_by(self, bits: u64) -> bool {
        bits & self.0 == self.0
    }

    /// Raw bit representation.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether no kinds are requested.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}
