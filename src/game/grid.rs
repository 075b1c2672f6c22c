//! Grid cell positions.

use rand::Rng;

use crate::config::{GRID_HEIGHT, GRID_SIZE, GRID_WIDTH, HUD_HEIGHT};

use super::direction::Direction;

/// A position on the playfield grid, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Centre of the playfield.
    pub fn center() -> Self {
        Self::new(GRID_WIDTH / 2, GRID_HEIGHT / 2)
    }

    /// The neighbouring cell in the given heading.  No wrapping; the
    /// result may be out of bounds and must be checked.
    pub fn offset(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// True when the cell lies on the playfield.
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH && self.y >= 0 && self.y < GRID_HEIGHT
    }

    /// A uniformly random cell inside the one-cell border margin, where
    /// food may spawn.
    pub fn random_interior(rng: &mut impl Rng) -> Cell {
        Cell::new(
            rng.gen_range(1..GRID_WIDTH - 1),
            rng.gen_range(1..GRID_HEIGHT - 1),
        )
    }

    /// Top-left corner of the cell in screen pixels (the playfield sits
    /// below the HUD bar).
    pub fn to_px(self) -> (i32, i32) {
        (self.x * GRID_SIZE, self.y * GRID_SIZE + HUD_HEIGHT)
    }

    /// Centre of the cell in screen pixels, for particle spawns.
    pub fn center_px(self) -> (f32, f32) {
        let (px, py) = self.to_px();
        (
            px as f32 + GRID_SIZE as f32 / 2.0,
            py as f32 + GRID_SIZE as f32 / 2.0,
        )
    }
}
