//! Food items on the playfield.

use rand::Rng;

use crate::config::BONUS_LIFETIME_FRAMES;

use super::grid::Cell;
use super::snake::Snake;

/// What the snake just ate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Regular,
    Bonus,
}

/// The always-present regular food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
}

impl Food {
    /// Spawn on a random interior cell that is free of the snake and of
    /// `avoid` (the other food item, when present).
    pub fn spawn(rng: &mut impl Rng, snake: &Snake, avoid: Option<Cell>) -> Self {
        Self {
            cell: free_cell(rng, snake, avoid),
        }
    }
}

/// A timed bonus item; disappears uneaten after its countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusFood {
    pub cell: Cell,
    pub frames_left: u32,
}

impl BonusFood {
    pub fn spawn(rng: &mut impl Rng, snake: &Snake, avoid: Cell) -> Self {
        Self {
            cell: free_cell(rng, snake, Some(avoid)),
            frames_left: BONUS_LIFETIME_FRAMES,
        }
    }

    /// Count down one frame; returns true once expired.
    pub fn age(&mut self) -> bool {
        self.frames_left = self.frames_left.saturating_sub(1);
        self.frames_left == 0
    }
}

/// Rejection-sample an unoccupied interior cell.  The playfield dwarfs
/// the snake (level completion caps its length well below the cell
/// count), so this terminates quickly.
fn free_cell(rng: &mut impl Rng, snake: &Snake, avoid: Option<Cell>) -> Cell {
    loop {
        let cell = Cell::random_interior(rng);
        if !snake.occupies(cell) && Some(cell) != avoid {
            return cell;
        }
    }
}
