//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use flappy_game::compute::{gap_band, GROUND_ROWS, TUMBLE_STEP, WALL_COLS};
use flappy_game::entities::{GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_CLOUD: Color = Color::White;
const C_WALL: Color = Color::Green;
const C_WALL_CAP: Color = Color::DarkGreen;
const C_ITEM: Color = Color::Yellow;
const C_GRASS: Color = Color::Green;
const C_GRASS_DARK: Color = Color::DarkGreen;
const C_DIRT: Color = Color::DarkYellow;
const C_BIRD: Color = Color::Yellow;
const C_BIRD_WING: Color = Color::White;
const C_HUD: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_clouds(out, state)?;
    draw_items(out, state)?;
    draw_walls(out, state)?;
    draw_ground(out, state)?;
    draw_bird(out, state)?;
    draw_hud(out, state)?;
    draw_controls_hint(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Terminal row for a world altitude (rows count upward from the
/// bottom of the screen).
fn row_of(height: u16, y: f64) -> i32 {
    height as i32 - 1 - y.floor() as i32
}

/// Queue `s` at (col, row), skipping anything that would land outside
/// the screen.
fn put<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    col: i32,
    row: i32,
    s: &str,
) -> std::io::Result<()> {
    if row < 0 || row >= height as i32 {
        return Ok(());
    }
    if col < 0 || col + s.chars().count() as i32 > width as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(s))?;
    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

fn draw_clouds<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let offset = state.cloud_scroll as i32;
    out.queue(style::SetForegroundColor(C_CLOUD))?;
    for col in 0..state.width as i32 {
        if (col + offset).rem_euclid(19) < 6 {
            put(out, state.width, state.height, col, 1, "▒")?;
        }
        if (col + offset).rem_euclid(23) < 4 {
            put(out, state.width, state.height, col, 2, "▒")?;
        }
    }
    Ok(())
}

fn draw_ground<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let offset = state.ground_scroll as i32;
    let grass_row = state.height as i32 - 2;
    let dirt_row = state.height as i32 - 1;
    for col in 0..state.width as i32 {
        let shade = (col + offset).rem_euclid(4) < 2;
        out.queue(style::SetForegroundColor(if shade {
            C_GRASS
        } else {
            C_GRASS_DARK
        }))?;
        put(out, state.width, state.height, col, grass_row, "▀")?;
        out.queue(style::SetForegroundColor(C_DIRT))?;
        let dirt = if (col + offset).rem_euclid(6) < 3 {
            "▓"
        } else {
            "▒"
        };
        put(out, state.width, state.height, col, dirt_row, dirt)?;
    }
    Ok(())
}

// ── Walls & items ─────────────────────────────────────────────────────────────

fn draw_walls<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for wall in &state.walls {
        let (gap_bottom, gap_top) = gap_band(wall);
        let left = wall.x.floor() as i32;
        let lower_top = gap_bottom.floor() as i32;
        let upper_bottom = gap_top.ceil() as i32;

        for col in left..left + WALL_COLS as i32 {
            // Lower section, from the ground up to the gap
            for yy in GROUND_ROWS as i32..lower_top {
                let cap = yy == lower_top - 1;
                out.queue(style::SetForegroundColor(if cap { C_WALL_CAP } else { C_WALL }))?;
                let row = row_of(state.height, yy as f64);
                put(out, state.width, state.height, col, row, "█")?;
            }
            // Upper section, from above the gap to the top edge
            for yy in upper_bottom..state.height as i32 {
                let cap = yy == upper_bottom;
                out.queue(style::SetForegroundColor(if cap { C_WALL_CAP } else { C_WALL }))?;
                let row = row_of(state.height, yy as f64);
                put(out, state.width, state.height, col, row, "█")?;
            }
        }
    }
    Ok(())
}

fn draw_items<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_ITEM))?;
    for item in &state.items {
        let row = row_of(state.height, item.y);
        put(out, state.width, state.height, item.x.floor() as i32, row, "◆")?;
    }
    Ok(())
}

// ── Bird ──────────────────────────────────────────────────────────────────────

fn draw_bird<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let b = &state.bird;
    let col = b.x as i32;
    let body_row = row_of(state.height, b.y);
    let wing_row = body_row - 1;
    let game_over = state.status == GameStatus::GameOver;

    out.queue(style::SetForegroundColor(C_BIRD))?;
    let body = if game_over && !b.flapping {
        "(x>"
    } else if game_over {
        // Tumbling: the beak swings around as rotation accumulates
        match ((-b.rotation / TUMBLE_STEP) as i64).rem_euclid(4) {
            0 => "(o>",
            1 => "(ov",
            2 => "(o<",
            _ => "(o^",
        }
    } else {
        "(o>"
    };
    put(out, state.width, state.height, col, body_row, body)?;

    if b.flapping && !game_over {
        let wing = if (state.frame / 5) % 2 == 0 { "/" } else { "\\" };
        out.queue(style::SetForegroundColor(C_BIRD_WING))?;
        put(out, state.width, state.height, col + 1, wing_row, wing)?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score:{:>4}  Items:{:>3}",
        state.score, state.item_score
    )))?;

    let best_str = format!(
        "Best:{:>4}  Item Best:{:>3}",
        state.best_score, state.best_item_score
    );
    let rx = state
        .width
        .saturating_sub(best_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(&best_str))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, state.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / ↑ : Flap   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let score_line = format!("Score: {:>4}   Items: {:>3}", state.score, state.item_score);
    let new_best = state.score >= state.best_score && state.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>4} ★", state.best_score)
    } else {
        format!("Best Score: {:>4}", state.best_score)
    };

    let lines: &[&str] = &[
        "╔════════════════════╗",
        "║     GAME  OVER     ║",
        "╚════════════════════╝",
    ];

    let cx = state.width / 2;
    let start_row = (state.height / 2).saturating_sub(3);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(if new_best {
        Color::Yellow
    } else {
        Color::DarkGrey
    }))?;
    out.queue(Print(&best_line))?;

    // The restart hint only appears once the bird has settled, which
    // is also when the restart key starts working.
    if !state.bird.flapping {
        let hint = "SPACE - Play Again   Q - Quit";
        let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, score_row + 3))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(hint))?;
    }

    Ok(())
}
