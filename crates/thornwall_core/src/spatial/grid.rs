//! # Uniform-Grid Spatial Hash
//!
//! Entities occupy every cell their AABB overlaps. Queries return
//! *broad-phase* candidates: entities sharing a cell with the query
//! region, which may include false positives. Callers needing exact
//! results must narrow-phase against the true AABBs.

use std::collections::HashMap;

use super::aabb::Aabb;
use crate::ecs::EntityId;
use crate::error::{CoreError, CoreResult};

type Cell = (i32, i32);

/// Inclusive rectangle of cells covered by an AABB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellRange {
    min: Cell,
    max: Cell,
}

impl CellRange {
    fn cells(self) -> impl Iterator<Item = Cell> {
        (self.min.0..=self.max.0)
            .flat_map(move |cx| (self.min.1..=self.max.1).map(move |cy| (cx, cy)))
    }
}

/// Counters describing the current grid occupancy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStats {
    /// Configured cell edge length.
    pub cell_size: f32,
    /// Cells currently holding at least one entity.
    pub occupied_cells: usize,
    /// Entities currently tracked.
    pub tracked_entities: usize,
}

/// Uniform-grid broad-phase index over `(id, aabb)` pairs.
///
/// The cell size is fixed at construction; there is no runtime
/// rebalancing. Tune it to roughly the median entity extent so average
/// occupancy per cell stays near a small constant.
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<Cell, Vec<EntityId>>,
    tracked: HashMap<EntityId, (CellRange, Aabb)>,
}

impl SpatialHash {
    /// Creates an empty grid with the given cell edge length.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not a positive finite number.
    #[must_use]
    pub fn new(cell_size: f32) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be a positive finite number"
        );
        Self {
            cell_size,
            cells: HashMap::new(),
            tracked: HashMap::new(),
        }
    }

    /// Configured cell edge length.
    #[inline]
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Whether `id` is currently tracked.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.tracked.contains_key(&id)
    }

    /// Ids of every tracked entity, in unspecified order.
    pub fn tracked(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.tracked.keys().copied()
    }

    /// Starts tracking `id` with the given box.
    ///
    /// # Errors
    ///
    /// [`CoreError::AlreadyTracked`] if `id` is already present - callers
    /// must use [`SpatialHash::update`] to move an entity.
    pub fn insert(&mut self, id: EntityId, aabb: Aabb) -> CoreResult<()> {
        if self.tracked.contains_key(&id) {
            return Err(CoreError::AlreadyTracked(id));
        }
        let range = self.range_of(&aabb);
        for cell in range.cells() {
            self.cells.entry(cell).or_default().push(id);
        }
        self.tracked.insert(id, (range, aabb));
        Ok(())
    }

    /// Moves `id` to a new box, touching only the cells near the old and
    /// new positions; inserts if `id` was not tracked.
    ///
    /// When movement is local (the typical case) the covered cell range is
    /// often unchanged and only the stored box is refreshed.
    pub fn update(&mut self, id: EntityId, aabb: Aabb) {
        let range = self.range_of(&aabb);
        if let Some(&(old_range, _)) = self.tracked.get(&id) {
            if old_range == range {
                // Same cells as before: only the stored box changes.
                self.tracked.insert(id, (range, aabb));
                return;
            }
            self.evict_from_cells(id, old_range);
        }
        self.tracked.insert(id, (range, aabb));
        for cell in range.cells() {
            self.cells.entry(cell).or_default().push(id);
        }
    }

    /// Stops tracking `id`, clearing every cell membership. Removing an
    /// absent id is a no-op returning false.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some((range, _)) = self.tracked.remove(&id) else {
            return false;
        };
        self.evict_from_cells(id, range);
        true
    }

    /// Broad-phase candidates for the cell containing `(x, y)`.
    #[must_use]
    pub fn query_point(&self, x: f32, y: f32) -> Vec<EntityId> {
        self.cells
            .get(&self.cell_of(x, y))
            .cloned()
            .unwrap_or_default()
    }

    /// Deduplicated broad-phase candidates for every cell the box overlaps.
    #[must_use]
    pub fn query_aabb(&self, aabb: &Aabb) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.query_aabb_into(aabb, &mut out);
        out
    }

    /// Allocation-free variant of [`SpatialHash::query_aabb`]: clears and
    /// fills `out` with the deduplicated candidate set.
    pub fn query_aabb_into(&self, aabb: &Aabb, out: &mut Vec<EntityId>) {
        out.clear();
        for cell in self.range_of(aabb).cells() {
            if let Some(ids) = self.cells.get(&cell) {
                out.extend_from_slice(ids);
            }
        }
        out.sort_unstable();
        out.dedup();
    }

    /// Broad-phase candidates within `radius` of `(x, y)`, approximated by
    /// the covering box.
    #[must_use]
    pub fn query_radius(&self, x: f32, y: f32, radius: f32) -> Vec<EntityId> {
        let covering = Aabb::new(x - radius, y - radius, radius * 2.0, radius * 2.0);
        self.query_aabb(&covering)
    }

    /// Forgets every entity; O(occupied cells).
    pub fn clear(&mut self) {
        self.cells.clear();
        self.tracked.clear();
    }

    /// Current occupancy counters.
    #[must_use]
    pub fn stats(&self) -> GridStats {
        GridStats {
            cell_size: self.cell_size,
            occupied_cells: self.cells.len(),
            tracked_entities: self.tracked.len(),
        }
    }

    fn cell_of(&self, x: f32, y: f32) -> Cell {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    fn range_of(&self, aabb: &Aabb) -> CellRange {
        CellRange {
            min: self.cell_of(aabb.left(), aabb.bottom()),
            max: self.cell_of(aabb.right(), aabb.top()),
        }
    }

    fn evict_from_cells(&mut self, id: EntityId, range: CellRange) {
        for cell in range.cells() {
            if let Some(ids) = self.cells.get_mut(&cell) {
                if let Some(pos) = ids.iter().position(|&other| other == id) {
                    ids.swap_remove(pos);
                }
                if ids.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> EntityId {
        EntityId::new(n, 1)
    }

    #[test]
    fn point_query_roundtrip() {
        let mut grid = SpatialHash::new(100.0);
        grid.insert(id(1), Aabb::new(10.0, 10.0, 5.0, 5.0)).unwrap();

        assert_eq!(grid.query_point(11.0, 11.0), vec![id(1)]);

        assert!(grid.remove(id(1)));
        assert!(grid.query_point(11.0, 11.0).is_empty());
        assert!(!grid.remove(id(1)), "removing an absent id is a no-op");
    }

    #[test]
    fn duplicate_insert_is_reported() {
        let mut grid = SpatialHash::new(50.0);
        let aabb = Aabb::new(0.0, 0.0, 10.0, 10.0);
        grid.insert(id(1), aabb).unwrap();
        assert_eq!(grid.insert(id(1), aabb), Err(CoreError::AlreadyTracked(id(1))));
    }

    #[test]
    fn spanning_aabb_occupies_all_overlapped_cells() {
        let mut grid = SpatialHash::new(10.0);
        // Spans cells (0,0) through (2,0).
        grid.insert(id(1), Aabb::new(5.0, 2.0, 20.0, 4.0)).unwrap();

        assert_eq!(grid.query_point(6.0, 3.0), vec![id(1)]);
        assert_eq!(grid.query_point(15.0, 3.0), vec![id(1)]);
        assert_eq!(grid.query_point(25.0, 3.0), vec![id(1)]);
        assert!(grid.query_point(35.0, 3.0).is_empty());
    }

    #[test]
    fn aabb_query_deduplicates_across_cells() {
        let mut grid = SpatialHash::new(10.0);
        grid.insert(id(1), Aabb::new(5.0, 5.0, 20.0, 20.0)).unwrap();
        grid.insert(id(2), Aabb::new(50.0, 50.0, 5.0, 5.0)).unwrap();

        let hits = grid.query_aabb(&Aabb::new(0.0, 0.0, 30.0, 30.0));
        assert_eq!(hits, vec![id(1)]);
    }

    #[test]
    fn update_moves_between_cells() {
        let mut grid = SpatialHash::new(10.0);
        grid.insert(id(1), Aabb::new(1.0, 1.0, 2.0, 2.0)).unwrap();

        grid.update(id(1), Aabb::new(91.0, 91.0, 2.0, 2.0));
        assert!(grid.query_point(2.0, 2.0).is_empty());
        assert_eq!(grid.query_point(92.0, 92.0), vec![id(1)]);

        // Local motion within the same cell keeps memberships intact.
        grid.update(id(1), Aabb::new(93.0, 93.0, 2.0, 2.0));
        assert_eq!(grid.query_point(92.0, 92.0), vec![id(1)]);
        assert_eq!(grid.stats().tracked_entities, 1);
    }

    #[test]
    fn update_on_untracked_id_inserts() {
        let mut grid = SpatialHash::new(10.0);
        grid.update(id(7), Aabb::new(0.0, 0.0, 2.0, 2.0));
        assert!(grid.contains(id(7)));
    }

    #[test]
    fn radius_query_uses_covering_box() {
        let mut grid = SpatialHash::new(10.0);
        grid.insert(id(1), Aabb::new(18.0, 0.0, 2.0, 2.0)).unwrap();

        // Broad phase may over-approximate but must not miss.
        let hits = grid.query_radius(10.0, 1.0, 9.0);
        assert_eq!(hits, vec![id(1)]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut grid = SpatialHash::new(10.0);
        grid.insert(id(1), Aabb::new(0.0, 0.0, 2.0, 2.0)).unwrap();
        grid.insert(id(2), Aabb::new(20.0, 20.0, 2.0, 2.0)).unwrap();

        grid.clear();
        let stats = grid.stats();
        assert_eq!(stats.occupied_cells, 0);
        assert_eq!(stats.tracked_entities, 0);
    }

    #[test]
    #[should_panic(expected = "cell size")]
    fn zero_cell_size_is_fatal() {
        let _ = SpatialHash::new(0.0);
    }
}
