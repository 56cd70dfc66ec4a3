use std::f32::consts::{FRAC_PI_2, PI};

use raycast_shooter::compute::{
    cast_ray, fire, move_backward, move_forward, strafe_left, strafe_right, turn_left,
    turn_right, update_bullets, MAX_RAY_DEPTH,
};
use raycast_shooter::entities::{GameState, MAX_BULLETS, PLAYER_ROT_SPEED, TRAIL_LEN};
use raycast_shooter::world::{WorldMap, MAP_HEIGHT};

const EPS: f32 = 1e-4;

/// An empty 16×16 room with a solid one-cell border.
const BORDERED_EMPTY: [&str; MAP_HEIGHT] = [
    "################",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "#..............#",
    "################",
];

/// 16×16 of nothing at all — rays only terminate at the void.
const NO_WALLS: [&str; MAP_HEIGHT] = [
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
    "................",
];

fn bordered_state() -> GameState {
    let mut state = GameState::new();
    state.map = WorldMap::from_layout(&BORDERED_EMPTY);
    state
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn forward_then_backward_returns_to_start() {
    let mut state = bordered_state();
    state.player.angle = 0.7;
    let (x0, y0) = (state.player.x, state.player.y);

    move_forward(&mut state, 0.05);
    move_backward(&mut state, 0.05);

    assert!((state.player.x - x0).abs() < EPS);
    assert!((state.player.y - y0).abs() < EPS);
}

#[test]
fn strafe_right_then_left_returns_to_start() {
    let mut state = bordered_state();
    state.player.angle = 1.3;
    let (x0, y0) = (state.player.x, state.player.y);

    strafe_right(&mut state, 0.05);
    strafe_left(&mut state, 0.05);

    assert!((state.player.x - x0).abs() < EPS);
    assert!((state.player.y - y0).abs() < EPS);
}

#[test]
fn move_into_wall_is_rejected() {
    let mut state = bordered_state();
    // Facing +row, one long step would land inside the border at row 15.
    state.player.x = 8.0;
    state.player.y = 14.6;
    state.player.angle = 0.0;

    move_forward(&mut state, 0.2); // step = 1.0 cell

    assert_eq!(state.player.x, 8.0);
    assert_eq!(state.player.y, 14.6);
}

#[test]
fn rejected_move_is_idempotent() {
    let mut state = bordered_state();
    state.player.x = 8.0;
    state.player.y = 14.6;
    state.player.angle = 0.0;

    move_forward(&mut state, 0.2);
    move_forward(&mut state, 0.2);

    assert_eq!(state.player.y, 14.6);
}

#[test]
fn move_off_map_is_rejected() {
    let mut state = GameState::new();
    state.map = WorldMap::from_layout(&NO_WALLS);
    state.player.x = 8.0;
    state.player.y = 15.5;
    state.player.angle = 0.0;

    // The void is not a wall, but it still rejects the move.
    move_forward(&mut state, 0.2);

    assert_eq!(state.player.y, 15.5);
}

#[test]
fn turning_scales_with_elapsed_time() {
    let mut state = bordered_state();
    turn_right(&mut state, 0.1);
    assert!((state.player.angle - PLAYER_ROT_SPEED * 0.1).abs() < EPS);

    turn_left(&mut state, 0.1);
    assert!(state.player.angle.abs() < EPS);
}

#[test]
fn heading_is_not_normalized() {
    let mut state = bordered_state();
    for _ in 0..100 {
        turn_right(&mut state, 0.1);
    }
    // 100 × π/10 = 10π — well past one revolution and left that way.
    assert!(state.player.angle > 2.0 * PI);
}

// ── Ray caster ────────────────────────────────────────────────────────────────

#[test]
fn ray_with_no_walls_clamps_to_max_depth() {
    let map = WorldMap::from_layout(&NO_WALLS);
    for angle in [0.0, FRAC_PI_2, PI, -1.234] {
        assert_eq!(cast_ray(&map, 8.0, 8.0, angle), MAX_RAY_DEPTH);
    }
}

#[test]
fn ray_straight_at_border_wall() {
    let map = WorldMap::from_layout(&BORDERED_EMPTY);
    // From (8, 8) facing +row, the border cell at row 15 starts 7 units
    // away; the 0.1-unit march overshoots by at most one step.
    let distance = cast_ray(&map, 8.0, 8.0, 0.0);
    assert!(
        (6.99..=7.15).contains(&distance),
        "distance was {}",
        distance
    );
}

#[test]
fn ray_distance_is_positive_and_bounded() {
    let map = WorldMap::new();
    let mut angle = 0.0_f32;
    while angle < 2.0 * PI {
        let distance = cast_ray(&map, 8.0, 8.0, angle);
        assert!(distance > 0.0 && distance <= MAX_RAY_DEPTH);
        angle += 0.05;
    }
}

#[test]
fn ray_hits_interior_pillar() {
    // The default map has a 2×2 pillar at rows 10–11, columns 6–7.
    let map = WorldMap::new();
    let distance = cast_ray(&map, 7.0, 8.0, 0.0);
    // Pillar near face is at row 10, two units from y = 8.
    assert!(
        (1.99..=2.15).contains(&distance),
        "distance was {}",
        distance
    );
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_launches_along_heading() {
    let mut state = bordered_state();
    state.player.angle = 0.0;

    assert!(fire(&mut state));
    let bullet = &state.bullets[0];
    assert!(bullet.active);
    assert_eq!(bullet.x, state.player.x);
    assert_eq!(bullet.y, state.player.y);
    assert!(bullet.dx.abs() < EPS);
    assert!((bullet.dy - 10.0).abs() < EPS);
    assert_eq!(state.shots_fired, 1);
}

#[test]
fn fire_seeds_trail_behind_the_muzzle() {
    let mut state = bordered_state();
    state.player.angle = 0.0; // firing toward +row

    fire(&mut state);
    let bullet = &state.bullets[0];
    assert_eq!(bullet.trail.points().len(), TRAIL_LEN);
    let mut prev_y = bullet.y;
    for &(tx, ty) in bullet.trail.points() {
        assert!((tx - bullet.x).abs() < EPS);
        assert!(ty < prev_y, "trail must recede behind the bullet");
        prev_y = ty;
    }
}

#[test]
fn fifteen_shots_fill_exactly_ten_slots() {
    let mut state = bordered_state();
    let mut dropped = 0;
    for _ in 0..15 {
        if !fire(&mut state) {
            dropped += 1;
        }
    }
    assert_eq!(state.active_bullets(), MAX_BULLETS);
    assert_eq!(dropped, 5);
    assert_eq!(state.shots_fired, MAX_BULLETS as u32);
}

#[test]
fn freed_slot_is_reused() {
    let mut state = bordered_state();
    for _ in 0..MAX_BULLETS {
        fire(&mut state);
    }
    state.bullets[3].active = false;

    assert!(fire(&mut state));
    assert!(state.bullets[3].active);
    assert_eq!(state.active_bullets(), MAX_BULLETS);
}

// ── Bullet lifecycle ──────────────────────────────────────────────────────────

#[test]
fn bullet_dies_on_wall_and_stops_moving() {
    let mut state = bordered_state();
    state.bullets[0].x = 8.0;
    state.bullets[0].y = 14.7;
    state.bullets[0].dx = 0.0;
    state.bullets[0].dy = 10.0;
    state.bullets[0].active = true;

    update_bullets(&mut state, 0.05); // lands in the border cell at row 15
    assert!(!state.bullets[0].active);

    let (x, y) = (state.bullets[0].x, state.bullets[0].y);
    update_bullets(&mut state, 0.05);
    assert_eq!(state.bullets[0].x, x);
    assert_eq!(state.bullets[0].y, y);
}

#[test]
fn bullet_dies_leaving_the_map() {
    let mut state = GameState::new();
    state.map = WorldMap::from_layout(&NO_WALLS);
    state.bullets[0].x = 8.0;
    state.bullets[0].y = 15.5;
    state.bullets[0].dy = 10.0;
    state.bullets[0].active = true;

    update_bullets(&mut state, 0.1);
    assert!(!state.bullets[0].active);
}

#[test]
fn bullet_kills_enemy_within_hit_radius() {
    let mut state = bordered_state();
    state.enemies[0].x = 10.0;
    state.enemies[0].y = 10.0;
    state.bullets[0].x = 10.0;
    state.bullets[0].y = 9.7;
    state.bullets[0].dy = 10.0;
    state.bullets[0].active = true;

    update_bullets(&mut state, 0.01); // moves to y = 9.8, 0.2 from the enemy

    assert!(!state.enemies[0].alive);
    assert!(!state.bullets[0].active);
    assert!(state.enemies[1].alive);
    assert!(state.enemies[2].alive);
}

#[test]
fn first_hit_wins_one_kill_per_bullet() {
    let mut state = bordered_state();
    // Both enemies inside the hit radius of the bullet's destination.
    state.enemies[0].x = 10.0;
    state.enemies[0].y = 10.0;
    state.enemies[1].x = 10.2;
    state.enemies[1].y = 10.0;
    state.bullets[0].x = 10.0;
    state.bullets[0].y = 9.9;
    state.bullets[0].dy = 10.0;
    state.bullets[0].active = true;

    update_bullets(&mut state, 0.01);

    assert!(!state.enemies[0].alive);
    assert!(state.enemies[1].alive);
    assert!(!state.bullets[0].active);
}

#[test]
fn dead_enemy_is_ignored_by_later_bullets() {
    let mut state = bordered_state();
    state.enemies[0].x = 10.0;
    state.enemies[0].y = 10.0;
    state.enemies[0].alive = false;
    state.bullets[0].x = 10.0;
    state.bullets[0].y = 9.9;
    state.bullets[0].dy = 10.0;
    state.bullets[0].active = true;

    update_bullets(&mut state, 0.01);

    // Passes straight through the corpse.
    assert!(state.bullets[0].active);
    assert!(!state.enemies[0].alive);
}

#[test]
fn trail_records_pre_move_positions_newest_first() {
    let mut state = bordered_state();
    state.player.x = 8.0;
    state.player.y = 2.0;
    state.player.angle = 0.0;
    fire(&mut state);

    let y_before = state.bullets[0].y;
    update_bullets(&mut state, 0.05);

    let trail = state.bullets[0].trail.points();
    assert!((trail[0].1 - y_before).abs() < EPS);
    assert!(trail[0].1 > trail[1].1);
}
