use hatchling::config::{
    BONUS_LIFETIME_FRAMES, GRID_HEIGHT, GRID_WIDTH, INITIAL_SNAKE_LENGTH, LEVEL_TARGET_LENGTH,
};
use hatchling::game::direction::Direction;
use hatchling::game::food::{BonusFood, Food, FoodKind};
use hatchling::game::grid::Cell;
use hatchling::game::sim::{age_bonus, step, SimEvent, World};
use hatchling::game::snake::Snake;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A world with a hand-placed snake and the food parked out of the way.
fn make_world(head: Cell, heading: Direction, length: usize) -> World {
    World {
        snake: Snake::new(head, heading, length),
        food: Food { cell: Cell::new(1, 1) },
        bonus: None,
    }
}

// ── Plain movement ────────────────────────────────────────────────────────────

#[test]
fn normal_move_advances_head_one_cell() {
    let w = make_world(Cell::new(10, 10), Direction::Right, 3);
    let out = step(&w, &mut seeded_rng());
    assert!(out.events.is_empty());
    assert_eq!(out.world.snake.head(), Cell::new(11, 10));
    assert_eq!(out.world.snake.len(), 3);
}

#[test]
fn steered_move_turns_ninety_degrees() {
    let mut w = make_world(Cell::new(10, 10), Direction::Right, 3);
    assert!(w.snake.steer(Direction::Up));
    let out = step(&w, &mut seeded_rng());
    assert_eq!(out.world.snake.head(), Cell::new(10, 9));
}

#[test]
fn reversal_is_rejected_while_long() {
    let mut w = make_world(Cell::new(10, 10), Direction::Right, 3);
    assert!(!w.snake.steer(Direction::Left));
    let out = step(&w, &mut seeded_rng());
    // The snake keeps going right.
    assert_eq!(out.world.snake.head(), Cell::new(11, 10));
}

// ── Wall collisions ───────────────────────────────────────────────────────────

#[test]
fn right_wall_collision() {
    let w = make_world(Cell::new(GRID_WIDTH - 1, 10), Direction::Right, 3);
    let out = step(&w, &mut seeded_rng());
    assert_eq!(out.events, vec![SimEvent::Collided]);
    // The world is handed back unchanged.
    assert_eq!(out.world.snake.head(), Cell::new(GRID_WIDTH - 1, 10));
    assert_eq!(out.world.snake.len(), 3);
}

#[test]
fn top_wall_collision() {
    let w = make_world(Cell::new(10, 0), Direction::Up, 5);
    let out = step(&w, &mut seeded_rng());
    assert_eq!(out.events, vec![SimEvent::Collided]);
}

#[test]
fn bottom_and_left_wall_collisions() {
    let bottom = make_world(Cell::new(10, GRID_HEIGHT - 1), Direction::Down, 3);
    assert_eq!(
        step(&bottom, &mut seeded_rng()).events,
        vec![SimEvent::Collided]
    );
    let left = make_world(Cell::new(0, 10), Direction::Left, 3);
    assert_eq!(
        step(&left, &mut seeded_rng()).events,
        vec![SimEvent::Collided]
    );
}

// ── Self collisions ───────────────────────────────────────────────────────────

/// Walk the snake into a hook so the head faces its own body.
#[test]
fn self_collision_detected() {
    let mut w = make_world(Cell::new(10, 10), Direction::Right, 5);
    let mut rng = seeded_rng();

    w.snake.steer(Direction::Up);
    w = step(&w, &mut rng).world;
    w.snake.steer(Direction::Left);
    w = step(&w, &mut rng).world;
    w.snake.steer(Direction::Down);
    // The cell below the head is the snake's own body, not its tail.
    let out = step(&w, &mut rng);
    assert_eq!(out.events, vec![SimEvent::Collided]);
}

/// Chasing the tail is legal: the tail cell is vacated the same tick.
#[test]
fn moving_into_vacating_tail_is_not_a_collision() {
    let mut w = make_world(Cell::new(5, 5), Direction::Right, 4);
    let mut rng = seeded_rng();

    w.snake.steer(Direction::Up);
    w = step(&w, &mut rng).world;
    w.snake.steer(Direction::Left);
    w = step(&w, &mut rng).world;
    w.snake.steer(Direction::Down);
    // Candidate equals the tail cell, which pops this very tick.
    let out = step(&w, &mut rng);
    assert!(out.events.is_empty());
    assert_eq!(out.world.snake.len(), 4);
}

/// The same move is fatal while growth keeps the tail in place.
#[test]
fn tail_cell_is_solid_while_growing() {
    let mut w = make_world(Cell::new(5, 5), Direction::Right, 4);
    let mut rng = seeded_rng();

    w.snake.steer(Direction::Up);
    w = step(&w, &mut rng).world;
    w.snake.steer(Direction::Left);
    w = step(&w, &mut rng).world;
    w.snake.steer(Direction::Down);
    w.snake.grow(1);
    let out = step(&w, &mut rng);
    assert_eq!(out.events, vec![SimEvent::Collided]);
}

// ── Food ──────────────────────────────────────────────────────────────────────

#[test]
fn regular_food_grows_three_and_respawns() {
    let mut w = make_world(Cell::new(10, 10), Direction::Right, 3);
    w.food = Food { cell: Cell::new(11, 10) };
    let mut rng = seeded_rng();

    let out = step(&w, &mut rng);
    assert_eq!(out.events, vec![SimEvent::AteFood(FoodKind::Regular)]);
    // One growth cell lands on the eat tick, the rest pay out after.
    assert_eq!(out.world.snake.len(), 4);
    let mut w = out.world;
    for _ in 0..2 {
        w = step(&w, &mut rng).world;
    }
    assert_eq!(w.snake.len(), 6);
    // No more pending growth.
    w = step(&w, &mut rng).world;
    assert_eq!(w.snake.len(), 6);
}

#[test]
fn eaten_food_respawns_off_the_snake() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut w = make_world(Cell::new(10, 10), Direction::Right, 6);
        w.food = Food { cell: Cell::new(11, 10) };
        let out = step(&w, &mut rng);
        let food = out.world.food.cell;
        assert_ne!(food, Cell::new(11, 10));
        assert!(!out.world.snake.occupies(food));
        if let Some(bonus) = out.world.bonus {
            assert_ne!(bonus.cell, food);
            assert!(!out.world.snake.occupies(bonus.cell));
        }
    }
}

#[test]
fn bonus_food_grows_one_and_clears() {
    let mut w = make_world(Cell::new(10, 10), Direction::Right, 3);
    w.bonus = Some(BonusFood {
        cell: Cell::new(11, 10),
        frames_left: 100,
    });
    let mut rng = seeded_rng();

    let out = step(&w, &mut rng);
    assert_eq!(out.events, vec![SimEvent::AteFood(FoodKind::Bonus)]);
    assert_eq!(out.world.snake.len(), 4);
    assert!(out.world.bonus.is_none());
    // Exactly one cell of growth, nothing pending.
    let w = step(&out.world, &mut rng).world;
    assert_eq!(w.snake.len(), 4);
}

#[test]
fn bonus_spawns_eventually_and_lands_clear() {
    // Across seeds the 0.3 roll must fire at least once, and every
    // spawn must be disjoint from snake and food.
    let mut spawned = 0;
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut w = make_world(Cell::new(10, 10), Direction::Right, 3);
        w.food = Food { cell: Cell::new(11, 10) };
        let out = step(&w, &mut rng);
        if let Some(bonus) = out.world.bonus {
            spawned += 1;
            assert!(!out.world.snake.occupies(bonus.cell));
            assert_ne!(bonus.cell, out.world.food.cell);
            assert_eq!(bonus.frames_left, BONUS_LIFETIME_FRAMES);
        }
    }
    assert!(spawned > 0);
}

#[test]
fn bonus_expires_on_countdown() {
    let mut w = make_world(Cell::new(10, 10), Direction::Right, 3);
    w.bonus = Some(BonusFood {
        cell: Cell::new(20, 20),
        frames_left: 3,
    });
    w = age_bonus(&w);
    w = age_bonus(&w);
    assert!(w.bonus.is_some());
    w = age_bonus(&w);
    assert!(w.bonus.is_none());
}

// ── Level completion ──────────────────────────────────────────────────────────

#[test]
fn reaching_target_length_raises_level_complete() {
    let mut w = make_world(Cell::new(20, 10), Direction::Right, LEVEL_TARGET_LENGTH - 1);
    w.food = Food { cell: Cell::new(21, 10) };
    let out = step(&w, &mut seeded_rng());
    assert!(out.events.contains(&SimEvent::AteFood(FoodKind::Regular)));
    assert!(out.events.contains(&SimEvent::LevelComplete));
    assert_eq!(out.world.snake.len(), LEVEL_TARGET_LENGTH);
}

#[test]
fn below_target_length_stays_quiet() {
    let w = make_world(Cell::new(20, 10), Direction::Right, LEVEL_TARGET_LENGTH - 1);
    let out = step(&w, &mut seeded_rng());
    assert!(!out.events.contains(&SimEvent::LevelComplete));
}

// ── Fresh worlds ──────────────────────────────────────────────────────────────

#[test]
fn new_world_is_well_formed() {
    let mut rng = seeded_rng();
    let w = World::new(&mut rng);
    assert_eq!(w.snake.len(), INITIAL_SNAKE_LENGTH);
    assert_eq!(w.snake.heading(), Direction::Right);
    assert!(w.bonus.is_none());
    assert!(!w.snake.occupies(w.food.cell));
    assert!(w.food.cell.in_bounds());
}
