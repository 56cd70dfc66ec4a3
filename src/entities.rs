/// All game entity types and tuning constants — pure data, no logic
/// beyond small constructors.

use std::f32::consts::PI;

use crate::world::WorldMap;

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Angular width of the visible cone.
pub const PLAYER_FOV: f32 = PI / 4.0;
/// Linear movement speed in map cells per second.
pub const PLAYER_SPEED: f32 = 5.0;
/// Turn rate in radians per second.
pub const PLAYER_ROT_SPEED: f32 = PI;

/// Bullet pool capacity; firing with every slot active is a silent no-op.
pub const MAX_BULLETS: usize = 10;
pub const BULLET_SPEED: f32 = 10.0;
/// A bullet within this distance of an alive enemy kills it.
pub const HIT_RADIUS: f32 = 0.5;
/// Number of recent positions kept per bullet, most-recent-first.
pub const TRAIL_LEN: usize = 5;
/// Spacing of the backward-seeded trail points at launch.
pub const TRAIL_SEED_STEP: f32 = 0.2;

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Player {
    /// Column coordinate in map-cell units.
    pub x: f32,
    /// Row coordinate in map-cell units.
    pub y: f32,
    /// Heading in radians; 0 faces the +row axis. Accumulates unbounded —
    /// every consumer normalizes angular differences, never the heading.
    pub angle: f32,
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Fixed-length history of a bullet's recent positions, newest first.
/// Pushing shifts everything back one slot and drops the oldest entry.
#[derive(Clone, Copy, Debug)]
pub struct Trail {
    points: [(f32, f32); TRAIL_LEN],
}

impl Trail {
    /// Trail for a freshly fired bullet: points stepped backward along the
    /// firing direction so the very first frame already shows a streak.
    pub fn seeded(x: f32, y: f32, dir_x: f32, dir_y: f32) -> Self {
        let mut points = [(0.0, 0.0); TRAIL_LEN];
        for (i, p) in points.iter_mut().enumerate() {
            let back = (i + 1) as f32 * TRAIL_SEED_STEP;
            *p = (x - dir_x * back, y - dir_y * back);
        }
        Trail { points }
    }

    pub fn push(&mut self, x: f32, y: f32) {
        for i in (1..TRAIL_LEN).rev() {
            self.points[i] = self.points[i - 1];
        }
        self.points[0] = (x, y);
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }
}

/// One slot of the bullet pool. Identity is the slot index while active;
/// nothing persists across deactivation.
#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub active: bool,
    pub trail: Trail,
}

impl Bullet {
    pub fn inactive() -> Self {
        Bullet {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            active: false,
            trail: Trail::seeded(0.0, 0.0, 0.0, 0.0),
        }
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Placed once at startup; death is terminal, there is no respawn path.
#[derive(Clone, Copy, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Enemy { x, y, alive: true }
    }
}

// ── Per-frame input snapshot ─────────────────────────────────────────────────

/// Which commands are asserted this frame. Movement and turning are
/// level-triggered (held); `fire` is edge-triggered by the input adapter
/// (one shot per discrete press, never per frame held).
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub quit: bool,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The whole simulation, owned by the frame loop and passed by reference
/// to the update engine and the frame compositor.
#[derive(Clone, Debug)]
pub struct GameState {
    pub map: WorldMap,
    pub player: Player,
    /// Fixed-capacity pool; inactive slots are reusable.
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// Shots that actually launched a bullet (pool-full presses don't count).
    pub shots_fired: u32,
    /// Frames per second measured by the loop, shown on the HUD.
    pub fps: u32,
    pub running: bool,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            map: WorldMap::new(),
            player: Player {
                x: 8.0,
                y: 8.0,
                angle: 0.0,
            },
            bullets: vec![Bullet::inactive(); MAX_BULLETS],
            enemies: vec![
                Enemy::new(10.0, 10.0),
                Enemy::new(5.0, 5.0),
                Enemy::new(12.0, 3.0),
            ],
            shots_fired: 0,
            fps: 0,
            running: true,
        }
    }

    pub fn active_bullets(&self) -> usize {
        self.bullets.iter().filter(|b| b.active).count()
    }

    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
