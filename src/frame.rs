/// Frame compositor — turns per-column wall distances plus visible sprites
/// into a 2-D grid of display cells. No terminal I/O here; this module only
/// produces cells, the display adapter draws them.
///
/// Draw order per frame: walls/floor, enemies, minimap, bullets + trails,
/// HUD. Later passes overwrite earlier ones, so bullets sit on top of
/// everything except the cells the HUD explicitly claims.

use std::f32::consts::{PI, TAU};

use crate::compute::cast_ray;
use crate::entities::{GameState, Player, PLAYER_FOV};
use crate::world::{MAP_HEIGHT, MAP_WIDTH};

/// Minimap panel interior, in display cells. Height is half the map's so
/// the panel reads roughly square in tall terminal cells.
pub const MINI_WIDTH: usize = 16;
pub const MINI_HEIGHT: usize = 8;

// ── Cells ────────────────────────────────────────────────────────────────────

/// Emphasis tag a display adapter may map to a color. Cells without one
/// are scenery (walls, floor, minimap interior).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Enemy,
    Bullet,
    Trail,
    Border,
    Marker,
    Hud,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub emphasis: Option<Emphasis>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            glyph: ' ',
            emphasis: None,
        }
    }
}

// ── Frame buffer ─────────────────────────────────────────────────────────────

/// 2-D grid of cells sized to the current display surface.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Frame {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Write one cell; coordinates outside the surface are ignored, so
    /// sprite painters never have to clip.
    fn put(&mut self, x: i32, y: i32, glyph: char, emphasis: Option<Emphasis>) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = Cell { glyph, emphasis };
        }
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }
}

// ── Composition ──────────────────────────────────────────────────────────────

/// Render the whole game state into a frame of the given surface size.
pub fn compose(state: &GameState, width: usize, height: usize) -> Frame {
    let mut frame = Frame::new(width, height);
    if width == 0 || height == 0 {
        return frame;
    }

    draw_walls(&mut frame, state);
    draw_enemies(&mut frame, state);
    draw_minimap(&mut frame, state);
    draw_bullets(&mut frame, state);
    draw_hud(&mut frame, state);
    frame
}

/// Distance to a 4-band wall shade; beyond 8 units walls fade to blank.
fn wall_shade(distance: f32) -> char {
    if distance <= 1.0 {
        '#'
    } else if distance < 2.0 {
        'H'
    } else if distance < 4.0 {
        '='
    } else if distance < 8.0 {
        '-'
    } else {
        ' '
    }
}

/// Floor shade is a function of screen row only, not of any real distance.
/// A stylistic simplification kept on purpose.
fn floor_shade(y: usize, height: usize) -> char {
    let half = height as f32 / 2.0;
    let b = 1.0 - ((y as f32 - half) / half);
    if b < 0.25 {
        '#'
    } else if b < 0.5 {
        'x'
    } else if b < 0.75 {
        '.'
    } else if b < 0.9 {
        '-'
    } else {
        ' '
    }
}

fn draw_walls(frame: &mut Frame, state: &GameState) {
    let width = frame.width();
    let height = frame.height();

    for x in 0..width {
        let ray_angle = state.player.angle - PLAYER_FOV / 2.0
            + (x as f32 / width as f32) * PLAYER_FOV;
        let distance = cast_ray(&state.map, state.player.x, state.player.y, ray_angle);

        let ceiling = (height as f32 / 2.0 - height as f32 / distance) as i32;
        let floor = height as i32 - ceiling;
        let shade = wall_shade(distance);

        for y in 0..height {
            let yi = y as i32;
            if yi < ceiling {
                // sky
            } else if yi <= floor {
                frame.put(x as i32, yi, shade, None);
            } else {
                frame.put(x as i32, yi, floor_shade(y, height), None);
            }
        }
    }
}

// ── Sprite projection ────────────────────────────────────────────────────────

/// Project a world position into screen space. Returns the screen column
/// and the straight-line distance, or `None` when the bearing falls outside
/// the view cone. The bearing difference is normalized into (−π, π] by
/// repeated 2π shifts, so an unbounded heading is fine.
pub fn project_sprite(player: &Player, x: f32, y: f32, width: usize) -> Option<(i32, f32)> {
    let mut bearing = (y - player.y).atan2(x - player.x) - player.angle;
    while bearing > PI {
        bearing -= TAU;
    }
    while bearing < -PI {
        bearing += TAU;
    }
    if bearing.abs() >= PLAYER_FOV / 2.0 {
        return None;
    }

    let distance = (x - player.x).hypot(y - player.y);
    let col = ((bearing + PLAYER_FOV / 2.0) / PLAYER_FOV * width as f32) as i32;
    Some((col, distance))
}

fn draw_enemies(frame: &mut Frame, state: &GameState) {
    let width = frame.width();
    let height = frame.height() as i32;

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        let Some((center, distance)) = project_sprite(&state.player, enemy.x, enemy.y, width)
        else {
            continue;
        };
        if distance <= 0.0 {
            continue;
        }

        // Solid box scaled by distance, centered at mid-screen.
        let size = (height as f32 / distance) as i32;
        for y in 0..size.min(height) {
            for x in 0..(size / 2).min(width as i32) {
                let draw_y = height / 2 - size / 2 + y;
                let draw_x = center - size / 4 + x;
                frame.put(draw_x, draw_y, 'E', Some(Emphasis::Enemy));
            }
        }
    }
}

fn draw_bullets(frame: &mut Frame, state: &GameState) {
    let width = frame.width();
    let mid = frame.height() as i32 / 2;

    for bullet in state.bullets.iter().filter(|b| b.active) {
        // Trail first so the bullet itself lands on top.
        for &(tx, ty) in bullet.trail.points() {
            if let Some((col, _)) = project_sprite(&state.player, tx, ty, width) {
                frame.put(col, mid, '.', Some(Emphasis::Trail));
            }
        }
        if let Some((col, _)) = project_sprite(&state.player, bullet.x, bullet.y, width) {
            frame.put(col, mid, '*', Some(Emphasis::Bullet));
        }
    }
}

// ── Minimap ──────────────────────────────────────────────────────────────────

fn draw_minimap(frame: &mut Frame, state: &GameState) {
    let width = frame.width();
    let height = frame.height();

    // Panel plus border plus a margin column; skip when it doesn't fit.
    if width < MINI_WIDTH + 4 || height < MINI_HEIGHT + 4 {
        return;
    }
    let x0 = (width - MINI_WIDTH - 3) as i32;
    let y0 = 1i32;

    // Border frame.
    frame.put(x0, y0, '┌', Some(Emphasis::Border));
    frame.put(x0 + MINI_WIDTH as i32 + 1, y0, '┐', Some(Emphasis::Border));
    frame.put(x0, y0 + MINI_HEIGHT as i32 + 1, '└', Some(Emphasis::Border));
    frame.put(
        x0 + MINI_WIDTH as i32 + 1,
        y0 + MINI_HEIGHT as i32 + 1,
        '┘',
        Some(Emphasis::Border),
    );
    for mx in 0..MINI_WIDTH as i32 {
        frame.put(x0 + 1 + mx, y0, '─', Some(Emphasis::Border));
        frame.put(
            x0 + 1 + mx,
            y0 + MINI_HEIGHT as i32 + 1,
            '─',
            Some(Emphasis::Border),
        );
    }
    for my in 0..MINI_HEIGHT as i32 {
        frame.put(x0, y0 + 1 + my, '│', Some(Emphasis::Border));
        frame.put(
            x0 + MINI_WIDTH as i32 + 1,
            y0 + 1 + my,
            '│',
            Some(Emphasis::Border),
        );
    }

    // Label overlaid on the top border.
    for (i, ch) in "MAP".chars().enumerate() {
        frame.put(x0 + 2 + i as i32, y0, ch, Some(Emphasis::Border));
    }

    // Scaled map interior.
    for my in 0..MINI_HEIGHT {
        for mx in 0..MINI_WIDTH {
            let col = mx * MAP_WIDTH / MINI_WIDTH;
            let row = my * MAP_HEIGHT / MINI_HEIGHT;
            let glyph = if state.map.is_wall(col, row) { '#' } else { '.' };
            frame.put(x0 + 1 + mx as i32, y0 + 1 + my as i32, glyph, None);
        }
    }

    // Player's current map cell.
    let pmx = (state.player.x as usize).min(MAP_WIDTH - 1) * MINI_WIDTH / MAP_WIDTH;
    let pmy = (state.player.y as usize).min(MAP_HEIGHT - 1) * MINI_HEIGHT / MAP_HEIGHT;
    frame.put(
        x0 + 1 + pmx as i32,
        y0 + 1 + pmy as i32,
        'P',
        Some(Emphasis::Marker),
    );
}

// ── HUD ──────────────────────────────────────────────────────────────────────

fn draw_hud(frame: &mut Frame, state: &GameState) {
    let stats = format!(
        "FPS: {} | Enemies: {} | Shots: {} | Bullets: {}",
        state.fps,
        state.enemies_alive(),
        state.shots_fired,
        state.active_bullets(),
    );
    for (i, ch) in stats.chars().enumerate() {
        if i >= frame.width() {
            break;
        }
        frame.put(i as i32, 0, ch, Some(Emphasis::Hud));
    }

    // Crosshair at the exact center cell.
    frame.put(
        frame.width() as i32 / 2,
        frame.height() as i32 / 2,
        '+',
        Some(Emphasis::Hud),
    );
}
