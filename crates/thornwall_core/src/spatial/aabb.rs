//! # Axis-Aligned Bounding Boxes
//!
//! Derived data: systems recompute an entity's box from its transform and
//! collider each frame; the box itself is never a source of truth.

/// Axis-aligned bounding box: origin corner plus non-negative extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width, non-negative.
    pub width: f32,
    /// Height, non-negative.
    pub height: f32,
}

impl Aabb {
    /// Creates a box from its bottom-left corner and extent.
    ///
    /// Extents must be non-negative (checked in debug builds).
    #[inline]
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "negative AABB extent");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a box of the given extent centered on `(cx, cy)`.
    #[inline]
    #[must_use]
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test: boxes that merely touch do not intersect.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.bottom() < other.top()
            && self.top() > other.bottom()
    }

    /// Whether the point lies inside or on the boundary of the box.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.left() <= x && x <= self.right() && self.bottom() <= y && y <= self.top()
    }
}
