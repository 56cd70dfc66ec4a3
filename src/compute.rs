/// Game-logic functions: player movement with wall rejection, firing into
/// the bullet pool, per-frame bullet advance, and the ray caster.
///
/// Every function takes `&mut GameState` (or the pieces it reads) plus the
/// elapsed frame time; none of them can fail. All edge conditions — void
/// coordinates, wall hits, a full pool — are deterministic game events,
/// never errors.

use crate::entities::{
    FrameInput, GameState, Trail, BULLET_SPEED, HIT_RADIUS, MAX_BULLETS, PLAYER_ROT_SPEED,
    PLAYER_SPEED,
};
use crate::world::WorldMap;

/// Ray-march step in map units. Coarse on purpose: the output is quantized
/// into a handful of shading bands, so sub-cell precision buys nothing.
pub const RAY_STEP: f32 = 0.1;
/// Maximum ray range in map units; also the "too far to shade" distance.
pub const MAX_RAY_DEPTH: f32 = 16.0;

// ── Input dispatch ───────────────────────────────────────────────────────────

/// Apply one frame's worth of asserted commands to the state.
pub fn apply_input(state: &mut GameState, input: &FrameInput, dt: f32) {
    if input.quit {
        state.running = false;
        return;
    }
    if input.turn_left {
        turn_left(state, dt);
    }
    if input.turn_right {
        turn_right(state, dt);
    }
    if input.forward {
        move_forward(state, dt);
    }
    if input.backward {
        move_backward(state, dt);
    }
    if input.strafe_left {
        strafe_left(state, dt);
    }
    if input.strafe_right {
        strafe_right(state, dt);
    }
    if input.fire {
        fire(state);
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Move by (dx, dy) unless the destination cell is a wall or off the map.
/// The whole move is rejected in that case — no sliding along the wall.
fn try_move(state: &mut GameState, dx: f32, dy: f32) {
    let nx = state.player.x + dx;
    let ny = state.player.y + dy;
    if state.map.contains(nx, ny) && !state.map.wall_at(nx, ny) {
        state.player.x = nx;
        state.player.y = ny;
    }
}

pub fn move_forward(state: &mut GameState, dt: f32) {
    let step = PLAYER_SPEED * dt;
    let (dx, dy) = (state.player.angle.sin(), state.player.angle.cos());
    try_move(state, dx * step, dy * step);
}

pub fn move_backward(state: &mut GameState, dt: f32) {
    let step = PLAYER_SPEED * dt;
    let (dx, dy) = (state.player.angle.sin(), state.player.angle.cos());
    try_move(state, -dx * step, -dy * step);
}

pub fn strafe_left(state: &mut GameState, dt: f32) {
    let step = PLAYER_SPEED * dt;
    let (dx, dy) = (state.player.angle.cos(), -state.player.angle.sin());
    try_move(state, -dx * step, -dy * step);
}

pub fn strafe_right(state: &mut GameState, dt: f32) {
    let step = PLAYER_SPEED * dt;
    let (dx, dy) = (state.player.angle.cos(), -state.player.angle.sin());
    try_move(state, dx * step, dy * step);
}

/// Heading accumulates without wrapping; consumers normalize differences.
pub fn turn_left(state: &mut GameState, dt: f32) {
    state.player.angle -= PLAYER_ROT_SPEED * dt;
}

pub fn turn_right(state: &mut GameState, dt: f32) {
    state.player.angle += PLAYER_ROT_SPEED * dt;
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// Launch a bullet from the player's position along the heading. Claims the
/// first inactive pool slot; returns `false` (shot silently dropped) when
/// all `MAX_BULLETS` slots are active.
pub fn fire(state: &mut GameState) -> bool {
    let (px, py) = (state.player.x, state.player.y);
    let (dir_x, dir_y) = (state.player.angle.sin(), state.player.angle.cos());
    debug_assert!(state.bullets.len() == MAX_BULLETS);

    match state.bullets.iter_mut().find(|b| !b.active) {
        Some(slot) => {
            slot.x = px;
            slot.y = py;
            slot.dx = dir_x * BULLET_SPEED;
            slot.dy = dir_y * BULLET_SPEED;
            slot.active = true;
            slot.trail = Trail::seeded(px, py, dir_x, dir_y);
            state.shots_fired += 1;
            true
        }
        None => false,
    }
}

// ── Bullet lifecycle ─────────────────────────────────────────────────────────

/// Advance every active bullet by one frame. Per bullet, in order:
/// record the pre-move position in the trail, move, then resolve exactly
/// one of: left the map, entered a wall cell, or came within `HIT_RADIUS`
/// of an alive enemy (first hit wins — a bullet never kills twice).
pub fn update_bullets(state: &mut GameState, dt: f32) {
    for bullet in &mut state.bullets {
        if !bullet.active {
            continue;
        }

        bullet.trail.push(bullet.x, bullet.y);
        bullet.x += bullet.dx * dt;
        bullet.y += bullet.dy * dt;

        if !state.map.contains(bullet.x, bullet.y) {
            bullet.active = false;
            continue;
        }
        if state.map.wall_at(bullet.x, bullet.y) {
            bullet.active = false;
            continue;
        }
        for enemy in &mut state.enemies {
            if !enemy.alive {
                continue;
            }
            let dist = (bullet.x - enemy.x).hypot(bullet.y - enemy.y);
            if dist < HIT_RADIUS {
                enemy.alive = false;
                bullet.active = false;
                break;
            }
        }
    }
}

// ── Ray caster ───────────────────────────────────────────────────────────────

/// March a ray from (ox, oy) at `angle` in `RAY_STEP` increments and return
/// the distance to the nearest wall, in (0, `MAX_RAY_DEPTH`]. Leaving the
/// map terminates the ray at full range — the void acts as a boundary wall
/// too far away to shade.
pub fn cast_ray(map: &WorldMap, ox: f32, oy: f32, angle: f32) -> f32 {
    let (dir_x, dir_y) = (angle.sin(), angle.cos());
    let mut distance = 0.0_f32;

    while distance < MAX_RAY_DEPTH {
        distance += RAY_STEP;
        let x = ox + dir_x * distance;
        let y = oy + dir_y * distance;

        if !map.contains(x, y) {
            return MAX_RAY_DEPTH;
        }
        if map.wall_at(x, y) {
            return distance;
        }
    }
    MAX_RAY_DEPTH
}
