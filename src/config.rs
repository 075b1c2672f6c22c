//! Game tuning constants.
//!
//! Every policy number the game runs on is named here so tests can pin
//! behaviour against the constant rather than a magic literal.

// ── Display geometry ─────────────────────────────────────────────────────────

/// Target display width in pixels.
pub const SCREEN_WIDTH: i32 = 480;

/// Target display height in pixels.
pub const SCREEN_HEIGHT: i32 = 480;

/// Height of the HUD bar at the top of the screen, in pixels.
pub const HUD_HEIGHT: i32 = 32;

/// Side of one grid cell in pixels.
pub const GRID_SIZE: i32 = 16;

/// Playfield width in grid cells.
pub const GRID_WIDTH: i32 = SCREEN_WIDTH / GRID_SIZE;

/// Playfield height in grid cells (the HUD row is not playable).
pub const GRID_HEIGHT: i32 = (SCREEN_HEIGHT - HUD_HEIGHT) / GRID_SIZE;

// ── Snake & food ─────────────────────────────────────────────────────────────

/// Body length of a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Body length that completes the current level.
pub const LEVEL_TARGET_LENGTH: usize = 50;

/// Cells gained per regular food item.
pub const REGULAR_FOOD_GROWTH: u32 = 3;

/// Cells gained per bonus food item.
pub const BONUS_FOOD_GROWTH: u32 = 1;

/// Base points for regular food, multiplied by the level multiplier.
pub const REGULAR_FOOD_POINTS: u32 = 10;

/// Base points for bonus food, multiplied by the level multiplier.
pub const BONUS_FOOD_POINTS: u32 = 50;

/// Chance that eating regular food spawns a bonus item.
pub const BONUS_SPAWN_CHANCE: f64 = 0.3;

/// Frames an uneaten bonus item stays on the field.
pub const BONUS_LIFETIME_FRAMES: u32 = 600;

// ── Session ──────────────────────────────────────────────────────────────────

/// Lives at the start of a session.
pub const INITIAL_LIVES: u32 = 3;

/// Life cap; level completion grants +1 up to this.
pub const MAX_LIVES: u32 = 5;

/// Frames the game-over screen holds before advancing.
pub const GAME_OVER_DELAY_FRAMES: u32 = 180;

/// Frames before the level-complete screen advances on its own.
pub const LEVEL_COMPLETE_AUTO_FRAMES: u32 = 300;

// ── Speed curve ──────────────────────────────────────────────────────────────

/// Frames between movement ticks at level 1.  The snake moves on one
/// frame out of every `move_interval`; the rest are skipped ticks.
pub const BASE_MOVE_INTERVAL: u32 = 16;

/// Frames between movement ticks at the given level.  Shrinks by one
/// every other level, floored at full speed.
pub fn move_interval(level: u32) -> u32 {
    BASE_MOVE_INTERVAL.saturating_sub(level / 2).max(1)
}

/// Score multiplier for the given level.
pub fn score_multiplier(level: u32) -> u32 {
    level.max(1)
}

// ── High scores ──────────────────────────────────────────────────────────────

/// Maximum entries in the persisted high-score table.
pub const HIGH_SCORE_CAP: usize = 10;

/// Characters in a high-score name.
pub const NAME_LEN: usize = 3;

// ── Effects ──────────────────────────────────────────────────────────────────

/// Particles in the burst when regular food is eaten.
pub const FOOD_BURST_PARTICLES: u32 = 10;

/// Particles per body segment when the snake dies.
pub const DEATH_BURST_PARTICLES: u32 = 6;

/// Particles in the burst when bonus food is eaten.
pub const RAINBOW_BURST_PARTICLES: u32 = 12;

/// Frames between animation frame advances for sprite sheets.
pub const ANIMATION_PERIOD: u64 = 5;

// ── Input ────────────────────────────────────────────────────────────────────

/// Analog stick deflection below this is treated as neutral.
pub const AXIS_DEADZONE: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_interval_shrinks_with_level() {
        assert_eq!(move_interval(1), 16);
        assert_eq!(move_interval(2), 15);
        assert_eq!(move_interval(10), 11);
        assert!(move_interval(1) > move_interval(20));
    }

    #[test]
    fn move_interval_floors_at_one() {
        assert_eq!(move_interval(100), 1);
        assert_eq!(move_interval(u32::MAX), 1);
    }

    #[test]
    fn multiplier_tracks_level() {
        assert_eq!(score_multiplier(1), 1);
        assert_eq!(score_multiplier(7), 7);
        // Level 0 never occurs in play but must not zero out scoring.
        assert_eq!(score_multiplier(0), 1);
    }

    #[test]
    fn grid_fits_display() {
        assert_eq!(GRID_WIDTH, 30);
        assert_eq!(GRID_HEIGHT, 28);
        assert!(GRID_HEIGHT * GRID_SIZE + HUD_HEIGHT <= SCREEN_HEIGHT);
    }
}
