//! Rendering layer, all terminal I/O lives here.
//!
//! Each frame receives the core's draw list and translates it into
//! terminal commands.  No game logic is performed; this module only
//! maps asset handles to glyphs and colours and pixel positions to
//! terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::{GRID_HEIGHT, GRID_SIZE, GRID_WIDTH, HUD_HEIGHT, SCREEN_HEIGHT};
use crate::render::{AssetId, DrawItem, TextStyle};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SNAKE_HEAD: Color = Color::Cyan;
const C_SNAKE_BODY: Color = Color::DarkCyan;
const C_WORM: Color = Color::Red;
const C_BONUS: Color = Color::Yellow;
const C_PARTICLE_FOOD: Color = Color::Red;
const C_PARTICLE_COLLISION: Color = Color::White;
const C_PARTICLE_RAINBOW: Color = Color::Magenta;
const C_TITLE: Color = Color::Cyan;
const C_TEXT: Color = Color::White;
const C_DIM: Color = Color::DarkGrey;
const C_HIGHLIGHT: Color = Color::Yellow;

/// The playfield is drawn inside a frame: one column on each side, one
/// row of headroom above the HUD.
const OFFSET_X: u16 = 1;
const OFFSET_Y: u16 = 1;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame from the draw list.
pub fn render<W: Write>(out: &mut W, items: &[DrawItem]) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_frame_border(out)?;
    for item in items {
        match item {
            DrawItem::Sprite { asset, x, y, frame } => draw_sprite(out, *asset, *x, *y, *frame)?,
            DrawItem::Text { x, y, text, style } => draw_text(out, *x, *y, text, *style)?,
        }
    }

    // Park the cursor below the frame and flush.
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame_bottom() + 1))?;
    out.flush()?;
    Ok(())
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Screen pixels to terminal cells, one cell per grid square.
fn to_cell(x: i32, y: i32) -> (u16, u16) {
    let col = (x / GRID_SIZE).clamp(0, GRID_WIDTH - 1) as u16 + OFFSET_X;
    let row = (y / GRID_SIZE).clamp(0, SCREEN_HEIGHT / GRID_SIZE - 1) as u16 + OFFSET_Y;
    (col, row)
}

fn frame_bottom() -> u16 {
    (SCREEN_HEIGHT / GRID_SIZE) as u16 + OFFSET_Y
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_frame_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let w = GRID_WIDTH as usize;
    let top = OFFSET_Y + (HUD_HEIGHT / GRID_SIZE) as u16 - 1;
    let bottom = top + GRID_HEIGHT as u16 + 1;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;
    for row in top + 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(w as u16 + 1, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Glyph and colour for an asset; animated sheets alternate glyphs by
/// frame index.
fn sprite_look(asset: AssetId, frame: usize) -> Option<(char, Color)> {
    match asset {
        // Full-screen images have no terminal equivalent; the draw
        // list's text items carry those screens here.
        AssetId::Background
        | AssetId::TitleScreen
        | AssetId::GameOverScreen
        | AssetId::HighScoreScreen => None,

        AssetId::SnakeHead => Some((if frame % 2 == 0 { '◉' } else { '◎' }, C_SNAKE_HEAD)),
        AssetId::SnakeBody => Some(('●', C_SNAKE_BODY)),
        AssetId::Worm => Some((if frame % 2 == 0 { '~' } else { '≈' }, C_WORM)),
        AssetId::BonusFruit => Some(('$', C_BONUS)),
        AssetId::ParticleFood => Some((particle_glyph(frame), C_PARTICLE_FOOD)),
        AssetId::ParticleCollision => Some((particle_glyph(frame), C_PARTICLE_COLLISION)),
        AssetId::ParticleRainbow => Some((particle_glyph(frame), C_PARTICLE_RAINBOW)),
    }
}

fn particle_glyph(frame: usize) -> char {
    ['*', '+', '·', '.'][frame % 4]
}

fn draw_sprite<W: Write>(
    out: &mut W,
    asset: AssetId,
    x: i32,
    y: i32,
    frame: usize,
) -> std::io::Result<()> {
    let Some((glyph, color)) = sprite_look(asset, frame) else {
        return Ok(());
    };
    let (col, row) = to_cell(x, y);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn draw_text<W: Write>(
    out: &mut W,
    x: i32,
    y: i32,
    text: &str,
    text_style: TextStyle,
) -> std::io::Result<()> {
    let color = match text_style {
        TextStyle::Title => C_TITLE,
        TextStyle::Normal => C_TEXT,
        TextStyle::Dim => C_DIM,
        TextStyle::Highlight => C_HIGHLIGHT,
    };
    let (col, row) = to_cell(x, y);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
