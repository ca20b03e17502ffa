//! Overlap tests and a uniform-grid broadphase.

use std::collections::{HashMap, HashSet};

use letter_siege_core::Vec2;

/// Cell size used by [`SpatialHash::default`].
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Axis-aligned box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Aabb {
    /// Creates a box from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a box of `size` centered on `center`.
    #[must_use]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }
}

/// Circle described by its center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Center point.
    pub center: Vec2,
    /// Radius.
    pub radius: f32,
}

/// Whether two boxes overlap once `b` is grown by `forgiveness` on every side.
#[must_use]
pub fn aabb_intersect(a: &Aabb, b: &Aabb, forgiveness: f32) -> bool {
    a.x + a.w > b.x - forgiveness
        && a.x < b.x + b.w + forgiveness
        && a.y + a.h > b.y - forgiveness
        && a.y < b.y + b.h + forgiveness
}

/// Whether a circle grown by `forgiveness` touches a box.
#[must_use]
pub fn circle_vs_aabb(circle: &Circle, aabb: &Aabb, forgiveness: f32) -> bool {
    let closest = Vec2::new(
        circle.center.x.clamp(aabb.x, aabb.x + aabb.w.max(0.0)),
        circle.center.y.clamp(aabb.y, aabb.y + aabb.h.max(0.0)),
    );
    let reach = (circle.radius + forgiveness).max(0.0);
    circle.center.distance_squared(closest) <= reach * reach
}

/// Uniform-grid broadphase mapping cells to the identifiers overlapping them.
#[derive(Clone, Debug)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<u32>>,
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl SpatialHash {
    /// Creates an empty hash. Non-positive cell sizes fall back to [`DEFAULT_CELL_SIZE`].
    #[must_use]
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size > 0.0 && cell_size.is_finite() {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Registers `id` in every cell `aabb` overlaps.
    pub fn insert(&mut self, id: u32, aabb: &Aabb) {
        for key in self.covered_cells(aabb) {
            self.cells.entry(key).or_default().push(id);
        }
    }

    /// Identifiers registered in any cell `aabb` overlaps, each reported once
    /// in the order first encountered.
    #[must_use]
    pub fn query(&self, aabb: &Aabb) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for key in self.covered_cells(aabb) {
            let Some(ids) = self.cells.get(&key) else {
                continue;
            };
            for id in ids {
                if seen.insert(*id) {
                    found.push(*id);
                }
            }
        }
        found
    }

    fn covered_cells(&self, aabb: &Aabb) -> impl Iterator<Item = (i32, i32)> {
        let cell = self.cell_size;
        let x0 = (aabb.x / cell).floor() as i32;
        let y0 = (aabb.y / cell).floor() as i32;
        let x1 = ((aabb.x + aabb.w.max(0.0)) / cell).floor() as i32;
        let y1 = ((aabb.y + aabb.h.max(0.0)) / cell).floor() as i32;
        (y0..=y1).flat_map(move |iy| (x0..=x1).map(move |ix| (ix, iy)))
    }
}
