//! Slot positions for wave formations.

use letter_siege_core::Vec2;
use serde::Deserialize;

/// Row-major grid used to place a wave.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridLayout {
    /// Horizontal position of the first slot.
    pub origin_x: f32,
    /// Vertical position of the first slot.
    pub origin_y: f32,
    /// Slots per row. Zero is treated as one.
    pub columns: usize,
    /// Horizontal spacing between slots.
    pub dx: f32,
    /// Vertical spacing between rows.
    pub dy: f32,
}

impl GridLayout {
    /// Creates a layout from its origin, column count and spacing.
    #[must_use]
    pub const fn new(origin_x: f32, origin_y: f32, columns: usize, dx: f32, dy: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            columns,
            dx,
            dy,
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(80.0, 60.0, 8, 80.0, 60.0)
    }
}

/// Generates `n` slot positions filling rows left to right, top to bottom.
#[must_use]
pub fn generate_grid_slots(n: usize, layout: &GridLayout) -> Vec<Vec2> {
    let columns = layout.columns.max(1);
    (0..n)
        .map(|index| {
            let column = (index % columns) as f32;
            let row = (index / columns) as f32;
            Vec2::new(
                layout.origin_x + column * layout.dx,
                layout.origin_y + row * layout.dy,
            )
        })
        .collect()
}
