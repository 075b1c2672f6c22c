//! Draw-list emission.
//!
//! Each frame the core describes what is visible as a flat list of
//! sprite and text items in screen pixel coordinates.  The display
//! layer turns the list into terminal output; nothing here touches the
//! terminal, so every screen is testable as data.

use rand::Rng;

use crate::assets::{AssetCatalog, AssetGroup};
use crate::config::{
    ANIMATION_PERIOD, GRID_SIZE, GRID_WIDTH, LEVEL_TARGET_LENGTH, SCREEN_WIDTH,
};
use crate::game::{Game, GameState, MENU_OPTIONS};
use crate::particles::ParticleKind;

/// Handle of a drawable asset; the display layer owns the actual
/// pixels (or glyphs) behind each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetId {
    Background,
    TitleScreen,
    GameOverScreen,
    HighScoreScreen,
    SnakeHead,
    SnakeBody,
    Worm,
    BonusFruit,
    ParticleFood,
    ParticleCollision,
    ParticleRainbow,
}

/// Emphasis hint for text items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Normal,
    Dim,
    Highlight,
}

/// One visible thing, in screen pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Sprite {
        asset: AssetId,
        x: i32,
        y: i32,
        frame: usize,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        style: TextStyle,
    },
}

/// Current animation frame for a sheet, honouring the loaded (possibly
/// strided) frame count.
pub fn animation_frame(catalog: &AssetCatalog, group: AssetGroup, frame_counter: u64) -> usize {
    let frames = catalog.frames(group);
    ((frame_counter / ANIMATION_PERIOD) % frames as u64) as usize
}

/// Pixel x that centres `text` on screen, one cell per character.
fn centered_x(text: &str) -> i32 {
    let cells = text.chars().count() as i32;
    ((GRID_WIDTH - cells).max(0) / 2) * GRID_SIZE
}

fn row_px(row: i32) -> i32 {
    row * GRID_SIZE
}

/// Build the frame's draw list for the current state.
pub fn draw_list<R: Rng>(game: &Game<R>, catalog: &AssetCatalog) -> Vec<DrawItem> {
    let mut items = Vec::new();
    match game.state() {
        GameState::MainMenu => menu_items(game, catalog, &mut items),
        GameState::Playing => playfield_items(game, catalog, &mut items),
        GameState::Paused => {
            playfield_items(game, catalog, &mut items);
            overlay(&mut items, 12, "P A U S E D", TextStyle::Title);
            overlay(&mut items, 14, "Enter resumes", TextStyle::Dim);
        }
        GameState::LevelComplete => level_complete_items(game, &mut items),
        GameState::GameOver => game_over_items(game, catalog, &mut items),
        GameState::HighScoreEntry => entry_items(game, &mut items),
        GameState::HighScoreDisplay => table_items(game, catalog, &mut items),
    }
    items
}

fn overlay(items: &mut Vec<DrawItem>, row: i32, text: &str, style: TextStyle) {
    items.push(DrawItem::Text {
        x: centered_x(text),
        y: row_px(row),
        text: text.to_string(),
        style,
    });
}

// ── Screens ──────────────────────────────────────────────────────────────────

fn menu_items<R: Rng>(game: &Game<R>, catalog: &AssetCatalog, items: &mut Vec<DrawItem>) {
    if catalog.screens_loaded() {
        items.push(DrawItem::Sprite {
            asset: AssetId::TitleScreen,
            x: 0,
            y: 0,
            frame: 0,
        });
    }
    overlay(items, 5, "H A T C H L I N G", TextStyle::Title);

    if let Some(best) = game.scoreboard().entries().first() {
        let line = format!("Best: {} {}", best.name, best.score);
        overlay(items, 8, &line, TextStyle::Dim);
    }

    for (i, option) in MENU_OPTIONS.iter().enumerate() {
        let marker = if i == game.menu_cursor() { "> " } else { "  " };
        let line = format!("{marker}{option}");
        items.push(DrawItem::Text {
            x: centered_x(&line),
            y: row_px(12 + 2 * i as i32),
            text: line,
            style: if i == game.menu_cursor() {
                TextStyle::Highlight
            } else {
                TextStyle::Normal
            },
        });
    }
    overlay(items, 24, "Arrows move, Enter selects", TextStyle::Dim);
}

fn playfield_items<R: Rng>(game: &Game<R>, catalog: &AssetCatalog, items: &mut Vec<DrawItem>) {
    items.push(DrawItem::Sprite {
        asset: AssetId::Background,
        x: 0,
        y: 0,
        frame: 0,
    });

    // HUD row.
    if let Some(session) = game.session() {
        items.push(DrawItem::Text {
            x: 0,
            y: 0,
            text: format!("Score {:>6}", session.score),
            style: TextStyle::Highlight,
        });
        let level = format!("Level {}", session.level);
        overlay(items, 0, &level, TextStyle::Normal);
        let lives = format!("Lives {}", "#".repeat(session.lives as usize));
        items.push(DrawItem::Text {
            x: SCREEN_WIDTH - (lives.chars().count() as i32 + 1) * GRID_SIZE,
            y: 0,
            text: lives,
            style: TextStyle::Highlight,
        });
    }

    if let Some(world) = game.world() {
        // Body first so the head draws on top of the neck.
        for &cell in world.snake.body().iter().skip(1) {
            let (x, y) = cell.to_px();
            items.push(DrawItem::Sprite {
                asset: AssetId::SnakeBody,
                x,
                y,
                frame: 0,
            });
        }
        let (hx, hy) = world.snake.head().to_px();
        items.push(DrawItem::Sprite {
            asset: AssetId::SnakeHead,
            x: hx,
            y: hy,
            frame: animation_frame(catalog, AssetGroup::SnakeHead, game.frame()),
        });

        let (fx, fy) = world.food.cell.to_px();
        items.push(DrawItem::Sprite {
            asset: AssetId::Worm,
            x: fx,
            y: fy,
            frame: animation_frame(catalog, AssetGroup::Worm, game.frame()),
        });

        if let Some(bonus) = world.bonus {
            let (bx, by) = bonus.cell.to_px();
            items.push(DrawItem::Sprite {
                asset: AssetId::BonusFruit,
                x: bx,
                y: by,
                frame: 0,
            });
        }
    }

    for particle in game.particles().iter() {
        let (asset, group) = match particle.kind {
            ParticleKind::FoodBurst => (AssetId::ParticleFood, AssetGroup::ParticleFood),
            ParticleKind::Collision => (AssetId::ParticleCollision, AssetGroup::ParticleCollision),
            ParticleKind::Rainbow => (AssetId::ParticleRainbow, AssetGroup::ParticleRainbow),
        };
        items.push(DrawItem::Sprite {
            asset,
            x: particle.x as i32,
            y: particle.y as i32,
            frame: animation_frame(catalog, group, particle.age as u64),
        });
    }
}

fn level_complete_items<R: Rng>(game: &Game<R>, items: &mut Vec<DrawItem>) {
    let level = game.session().map_or(1, |s| s.level);
    overlay(items, 10, &format!("LEVEL {level} COMPLETE!"), TextStyle::Title);
    overlay(
        items,
        13,
        &format!("The hatchling reached length {LEVEL_TARGET_LENGTH}"),
        TextStyle::Normal,
    );
    if let Some(session) = game.session() {
        overlay(items, 15, &format!("Score {}", session.score), TextStyle::Highlight);
    }
    overlay(items, 18, "Enter continues", TextStyle::Dim);
}

fn game_over_items<R: Rng>(game: &Game<R>, catalog: &AssetCatalog, items: &mut Vec<DrawItem>) {
    if catalog.screens_loaded() {
        items.push(DrawItem::Sprite {
            asset: AssetId::GameOverScreen,
            x: 0,
            y: 0,
            frame: 0,
        });
    }
    overlay(items, 10, "G A M E  O V E R", TextStyle::Title);
    if let Some(session) = game.session() {
        overlay(
            items,
            13,
            &format!("Final score {}", session.score),
            TextStyle::Highlight,
        );
    }
    if game.state_timer() == 0 {
        overlay(items, 17, "Enter returns to the menu", TextStyle::Dim);
    }

    // Death particles keep animating behind the banner.
    for particle in game.particles().iter() {
        items.push(DrawItem::Sprite {
            asset: AssetId::ParticleCollision,
            x: particle.x as i32,
            y: particle.y as i32,
            frame: 0,
        });
    }
}

fn entry_items<R: Rng>(game: &Game<R>, items: &mut Vec<DrawItem>) {
    overlay(items, 7, "NEW HIGH SCORE!", TextStyle::Title);
    if let Some(session) = game.session() {
        overlay(items, 9, &session.score.to_string(), TextStyle::Highlight);
    }
    if let Some(entry) = game.name_entry() {
        let slots: String = entry
            .chars
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == entry.cursor {
                    format!("[{c}]")
                } else {
                    format!(" {c} ")
                }
            })
            .collect();
        overlay(items, 13, &slots, TextStyle::Highlight);
        overlay(items, 20, entry.hint, TextStyle::Dim);
    }
    overlay(items, 16, "Type your name, Enter confirms", TextStyle::Dim);
}

fn table_items<R: Rng>(game: &Game<R>, catalog: &AssetCatalog, items: &mut Vec<DrawItem>) {
    if catalog.screens_loaded() {
        items.push(DrawItem::Sprite {
            asset: AssetId::HighScoreScreen,
            x: 0,
            y: 0,
            frame: 0,
        });
    }
    overlay(items, 4, "HIGH SCORES", TextStyle::Title);
    let entries = game.scoreboard().entries();
    if entries.is_empty() {
        overlay(items, 12, "No scores yet", TextStyle::Dim);
    }
    for (i, entry) in entries.iter().enumerate() {
        let line = format!("{:>2}. {:<3} {:>7}", i + 1, entry.name, entry.score);
        overlay(items, 7 + i as i32 * 2, &line, TextStyle::Normal);
    }
    overlay(items, 27, "Enter returns to the menu", TextStyle::Dim);
}
