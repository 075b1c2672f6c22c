//! The per-tick snake simulation.
//!
//! `step` is a pure transform: it takes the current world by reference
//! plus an injected RNG and returns a brand-new world together with
//! the events the tick raised, so tests drive it deterministically.
//! Scoring, lives and state transitions are the state machine's
//! business; this module only knows about cells, food and collisions.

use rand::Rng;

use crate::config::{
    BONUS_FOOD_GROWTH, BONUS_SPAWN_CHANCE, LEVEL_TARGET_LENGTH, REGULAR_FOOD_GROWTH,
};

use super::food::{BonusFood, Food, FoodKind};
use super::grid::Cell;
use super::snake::Snake;

/// Everything a movement tick reads and rewrites.
#[derive(Debug, Clone)]
pub struct World {
    pub snake: Snake,
    pub food: Food,
    pub bonus: Option<BonusFood>,
}

impl World {
    /// A fresh life: centred snake, one regular food item, no bonus.
    pub fn new(rng: &mut impl Rng) -> Self {
        let snake = Snake::spawn_centered();
        let food = Food::spawn(rng, &snake, None);
        Self {
            snake,
            food,
            bonus: None,
        }
    }

    pub fn occupied(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
            || self.food.cell == cell
            || self.bonus.map_or(false, |b| b.cell == cell)
    }
}

/// What a movement tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The candidate head cell held food of the given kind.
    AteFood(FoodKind),
    /// The candidate head cell was a wall or a live body cell.
    Collided,
    /// Growth carried the body to the level target length.
    LevelComplete,
}

/// A tick's result: the world after the move and the raised events.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub world: World,
    pub events: Vec<SimEvent>,
}

/// Advance the simulation by one movement tick.
///
/// On a collision the returned world is the input world unchanged; the
/// state machine decides what a lost life resets.
pub fn step(world: &World, rng: &mut impl Rng) -> StepOutcome {
    let mut next = world.clone();

    let candidate = next.snake.head().offset(next.snake.next_heading());

    // Wall check.
    if !candidate.in_bounds() {
        return StepOutcome {
            world: world.clone(),
            events: vec![SimEvent::Collided],
        };
    }

    // Food is resolved before the move so the tail-vacating rule below
    // sees the growth this tick causes.
    let eats_regular = candidate == next.food.cell;
    let eats_bonus = next.bonus.map_or(false, |b| b.cell == candidate);
    if eats_regular {
        next.snake.grow(REGULAR_FOOD_GROWTH);
    }
    if eats_bonus {
        next.snake.grow(BONUS_FOOD_GROWTH);
    }

    // Self-collision: the candidate may enter the tail cell only when
    // the tail moves out this very tick.
    let tail_vacates = next.snake.will_vacate_tail();
    let tail = next.snake.tail();
    let hits_self = next
        .snake
        .body()
        .iter()
        .any(|&cell| cell == candidate && !(tail_vacates && cell == tail));
    if hits_self {
        return StepOutcome {
            world: world.clone(),
            events: vec![SimEvent::Collided],
        };
    }

    next.snake.advance();

    let mut events = Vec::new();
    if eats_regular {
        events.push(SimEvent::AteFood(FoodKind::Regular));
        next.food = Food::spawn(rng, &next.snake, next.bonus.map(|b| b.cell));
        if next.bonus.is_none() && rng.gen_bool(BONUS_SPAWN_CHANCE) {
            next.bonus = Some(BonusFood::spawn(rng, &next.snake, next.food.cell));
        }
    }
    if eats_bonus {
        events.push(SimEvent::AteFood(FoodKind::Bonus));
        next.bonus = None;
    }

    if next.snake.len() >= LEVEL_TARGET_LENGTH {
        events.push(SimEvent::LevelComplete);
    }

    StepOutcome {
        world: next,
        events,
    }
}

/// Age the bonus countdown by one frame, dropping it on expiry.
/// Runs every frame, including skipped movement ticks.
pub fn age_bonus(world: &World) -> World {
    let mut next = world.clone();
    if let Some(bonus) = next.bonus.as_mut() {
        if bonus.age() {
            next.bonus = None;
        }
    }
    next
}
