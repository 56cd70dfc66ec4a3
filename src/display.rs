/// Display adapter — the only module that writes to the terminal during
/// play. It receives a composed [`Frame`] and draws it with queued
/// crossterm commands, replacing the previous frame entirely.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::frame::{Emphasis, Frame};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SCENERY: Color = Color::Grey;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_TRAIL: Color = Color::DarkYellow;
const C_BORDER: Color = Color::DarkBlue;
const C_MARKER: Color = Color::Cyan;
const C_HUD: Color = Color::Green;

fn color_for(emphasis: Option<Emphasis>) -> Color {
    match emphasis {
        None => C_SCENERY,
        Some(Emphasis::Enemy) => C_ENEMY,
        Some(Emphasis::Bullet) => C_BULLET,
        Some(Emphasis::Trail) => C_TRAIL,
        Some(Emphasis::Border) => C_BORDER,
        Some(Emphasis::Marker) => C_MARKER,
        Some(Emphasis::Hud) => C_HUD,
    }
}

/// Draw one complete frame. Every cell of the surface is written, so no
/// clear is needed between frames and nothing of the old frame survives.
pub fn draw<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let mut current: Option<Color> = None;
    let mut run = String::with_capacity(frame.width());

    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        run.clear();
        for cell in frame.row(y) {
            let color = color_for(cell.emphasis);
            if current != Some(color) {
                if !run.is_empty() {
                    out.queue(Print(&run))?;
                    run.clear();
                }
                out.queue(style::SetForegroundColor(color))?;
                current = Some(color);
            }
            run.push(cell.glyph);
        }
        if !run.is_empty() {
            out.queue(Print(&run))?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.height().saturating_sub(1) as u16))?;
    out.flush()?;
    Ok(())
}
