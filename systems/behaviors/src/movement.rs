//! Built-in movement behaviors.
//!
//! Velocities are expressed in units per second and every behavior
//! integrates its own motion. Oscillating paths capture an anchor on their
//! first tick and are evaluated relative to it, so they do not drift with
//! frame timing.

use std::f32::consts::TAU;

use letter_siege_core::{Bounds, Motion, MovementState, Vec2};

use crate::{seconds, MovementFn};

/// Every built-in movement paired with its identifier.
pub const BUILT_IN: [(&str, MovementFn); 17] = [
    ("glide_horizontal", glide_horizontal),
    ("zigzag_burst", zigzag_burst),
    ("scuttle_side", scuttle_side),
    ("zigzag_descent", zigzag_descent),
    ("serpentine", serpentine),
    ("tentacle_wave", tentacle_wave),
    ("large_oscillation", large_oscillation),
    ("buzz_loop", buzz_loop),
    ("multi_phase_mix", multi_phase_mix),
    ("cluster_drift", cluster_drift),
    ("track_x", track_x),
    ("clockwork_step", clockwork_step),
    ("cross_pivot", cross_pivot),
    ("hover_bob", hover_bob),
    ("swoop_dive", swoop_dive),
    ("hop_arc", hop_arc),
    ("charge_rush", charge_rush),
];

const GLIDE_SPEED: f32 = 80.0;

/// Constant horizontal glide that reverses at the playfield edges.
///
/// A zero horizontal velocity is replaced with the default glide speed.
pub fn glide_horizontal(motion: &mut Motion, _: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    if motion.velocity.x == 0.0 {
        motion.velocity.x = GLIDE_SPEED;
    }
    motion.position += motion.velocity * seconds(dt_ms);
    if motion.position.x < 0.0 || motion.position.x > bounds.width {
        motion.velocity.x = -motion.velocity.x;
        clamp_x(motion, bounds);
    }
}

/// Alternates direction every 400 ms while sinking slowly.
pub fn zigzag_burst(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    zigzag(motion, state, dt_ms, bounds, 400.0, 120.0, 20.0);
}

/// Small side-to-side shuffle with a slow descent.
pub fn scuttle_side(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, _: Bounds) {
    state.clock_ms += dt_ms;
    let dt = seconds(dt_ms);
    let sway = (seconds(state.clock_ms) * TAU * 2.0).sin();
    motion.velocity = Vec2::new(sway * 40.0, 15.0);
    motion.position += motion.velocity * dt;
}

/// Wide zig-zag that flips every 600 ms and descends faster than [`zigzag_burst`].
pub fn zigzag_descent(
    motion: &mut Motion,
    state: &mut MovementState,
    dt_ms: f32,
    bounds: Bounds,
) {
    zigzag(motion, state, dt_ms, bounds, 600.0, 90.0, 35.0);
}

/// Sinusoidal weave around the spawn column while descending.
pub fn serpentine(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    let anchor = anchor(motion, state);
    state.clock_ms += dt_ms;
    let t = seconds(state.clock_ms);
    let target_x = anchor.x + (t * TAU * 0.5).sin() * 60.0;
    let descent = 30.0 * seconds(dt_ms);
    steer_to(motion, Vec2::new(target_x, motion.position.y + descent), dt_ms);
    clamp_x(motion, bounds);
}

/// Slow figure-eight undulation that creeps downward.
pub fn tentacle_wave(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    let anchor = anchor(motion, state);
    state.clock_ms += dt_ms;
    let t = seconds(state.clock_ms);
    let target = Vec2::new(
        anchor.x + (t * TAU * 0.35).sin() * 50.0,
        anchor.y + t * 12.0 + (t * TAU * 0.7).sin() * 10.0,
    );
    steer_to(motion, target, dt_ms);
    clamp_x(motion, bounds);
}

/// Broad horizontal sweep at a fixed altitude, scaled to the playfield width.
pub fn large_oscillation(
    motion: &mut Motion,
    state: &mut MovementState,
    dt_ms: f32,
    bounds: Bounds,
) {
    let anchor = anchor(motion, state);
    state.clock_ms += dt_ms;
    let amplitude = (bounds.width * 0.4).min(160.0);
    let t = seconds(state.clock_ms);
    let target = Vec2::new(anchor.x + (t * TAU * 0.25).sin() * amplitude, anchor.y);
    steer_to(motion, target, dt_ms);
    clamp_x(motion, bounds);
}

/// Tight elliptical loops that drift down over time.
pub fn buzz_loop(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    let anchor = anchor(motion, state);
    state.clock_ms += dt_ms;
    let t = seconds(state.clock_ms);
    let angle = t * TAU * 0.8;
    let target = Vec2::new(
        anchor.x + angle.cos() * 30.0 - 30.0,
        anchor.y + angle.sin() * 20.0 + t * 10.0,
    );
    steer_to(motion, target, dt_ms);
    clamp_x(motion, bounds);
}

/// Cycles sweep, sway and weave modes every two seconds.
pub fn multi_phase_mix(
    motion: &mut Motion,
    state: &mut MovementState,
    dt_ms: f32,
    bounds: Bounds,
) {
    prime_direction(state);
    state.clock_ms += dt_ms;
    let t = seconds(state.clock_ms);
    let mode = (state.clock_ms / 2_000.0) as u32 % 3;
    motion.velocity = match mode {
        0 => Vec2::new(state.direction * 100.0, 0.0),
        1 => Vec2::new((t * TAU * 0.5).sin() * 120.0, 0.0),
        _ => Vec2::new(state.direction * 60.0, (t * TAU).sin() * 40.0),
    };
    motion.position += motion.velocity * seconds(dt_ms);
    bounce_x(motion, state, bounds);
    motion.position.y = motion.position.y.clamp(0.0, bounds.height);
}

/// Lazy drift for swarming enemies.
pub fn cluster_drift(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    state.clock_ms += dt_ms;
    let t = seconds(state.clock_ms);
    motion.velocity = Vec2::new((t * TAU * 0.2).sin() * 25.0, 18.0);
    motion.position += motion.velocity * seconds(dt_ms);
    clamp_x(motion, bounds);
}

/// Chases a target column that sweeps across the playfield.
pub fn track_x(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    state.clock_ms += dt_ms;
    let t = seconds(state.clock_ms);
    let target_x = bounds.width * 0.5 + (t * TAU * 0.15).sin() * bounds.width * 0.35;
    let vx = ((target_x - motion.position.x) * 2.0).clamp(-140.0, 140.0);
    motion.velocity = Vec2::new(vx, 8.0);
    motion.position += motion.velocity * seconds(dt_ms);
    clamp_x(motion, bounds);
}

const CLOCKWORK_TICK_MS: f32 = 500.0;
const CLOCKWORK_STEPS_PER_ROW: u32 = 6;

/// Discrete 24-unit steps every half second, dropping a row after six steps.
pub fn clockwork_step(
    motion: &mut Motion,
    state: &mut MovementState,
    dt_ms: f32,
    bounds: Bounds,
) {
    prime_direction(state);
    motion.velocity = Vec2::ZERO;
    state.clock_ms += dt_ms;
    while state.clock_ms >= CLOCKWORK_TICK_MS {
        state.clock_ms -= CLOCKWORK_TICK_MS;
        state.step += 1;
        if state.step % CLOCKWORK_STEPS_PER_ROW == 0 {
            motion.position.y += 16.0;
            state.direction = -state.direction;
        } else {
            motion.position.x += state.direction * 24.0;
        }
    }
    clamp_x(motion, bounds);
}

const PIVOT_SEGMENT_MS: f32 = 700.0;
const PIVOT_HEADINGS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, -1.0),
];

/// Traces a square, pivoting a quarter turn every 700 ms.
pub fn cross_pivot(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    state.clock_ms += dt_ms;
    while state.clock_ms >= PIVOT_SEGMENT_MS {
        state.clock_ms -= PIVOT_SEGMENT_MS;
        state.step = (state.step + 1) % 4;
    }
    motion.velocity = PIVOT_HEADINGS[state.step as usize % 4] * 110.0;
    motion.position += motion.velocity * seconds(dt_ms);
    motion.position = motion
        .position
        .clamp(Vec2::ZERO, Vec2::new(bounds.width, bounds.height));
}

/// Gentle vertical bob with a slow lateral sway.
pub fn hover_bob(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    let anchor = anchor(motion, state);
    state.clock_ms += dt_ms;
    let t = seconds(state.clock_ms);
    let target = Vec2::new(
        anchor.x + (t * TAU * 0.15).sin() * 20.0,
        anchor.y + (t * TAU * 0.5).sin() * 10.0 + t * 6.0,
    );
    steer_to(motion, target, dt_ms);
    clamp_x(motion, bounds);
}

const SWOOP_CYCLE_MS: f32 = 3_000.0;
const SWOOP_GLIDE_MS: f32 = 2_000.0;

/// Glides for two seconds, then dives and climbs back during the third.
pub fn swoop_dive(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    prime_direction(state);
    state.clock_ms = (state.clock_ms + dt_ms) % SWOOP_CYCLE_MS;
    let phase = state.clock_ms;
    motion.velocity = if phase < SWOOP_GLIDE_MS {
        Vec2::new(state.direction * 90.0, 0.0)
    } else if phase < SWOOP_GLIDE_MS + 500.0 {
        Vec2::new(state.direction * 30.0, 160.0)
    } else {
        Vec2::new(state.direction * 30.0, -160.0)
    };
    motion.position += motion.velocity * seconds(dt_ms);
    bounce_x(motion, state, bounds);
}

const HOP_CYCLE_MS: f32 = 900.0;
const HOP_AIR_MS: f32 = 450.0;

/// Short hops with a pause between each, reversing at the edges.
pub fn hop_arc(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    prime_direction(state);
    state.clock_ms = (state.clock_ms + dt_ms) % HOP_CYCLE_MS;
    let phase = state.clock_ms;
    motion.velocity = if phase < HOP_AIR_MS * 0.5 {
        Vec2::new(state.direction * 70.0, -110.0)
    } else if phase < HOP_AIR_MS {
        Vec2::new(state.direction * 70.0, 130.0)
    } else {
        Vec2::new(0.0, 10.0)
    };
    motion.position += motion.velocity * seconds(dt_ms);
    bounce_x(motion, state, bounds);
}

const RUSH_WINDUP_MS: f32 = 1_200.0;
const RUSH_DASH_MS: f32 = 400.0;
const RUSH_RETREAT_MS: f32 = 800.0;

/// Holds still, dashes downward, then backs off to the starting altitude.
pub fn charge_rush(motion: &mut Motion, state: &mut MovementState, dt_ms: f32, bounds: Bounds) {
    let cycle = RUSH_WINDUP_MS + RUSH_DASH_MS + RUSH_RETREAT_MS;
    state.clock_ms = (state.clock_ms + dt_ms) % cycle;
    let phase = state.clock_ms;
    motion.velocity = if phase < RUSH_WINDUP_MS {
        Vec2::ZERO
    } else if phase < RUSH_WINDUP_MS + RUSH_DASH_MS {
        Vec2::new(0.0, 220.0)
    } else {
        Vec2::new(0.0, -110.0)
    };
    motion.position += motion.velocity * seconds(dt_ms);
    clamp_x(motion, bounds);
}

fn zigzag(
    motion: &mut Motion,
    state: &mut MovementState,
    dt_ms: f32,
    bounds: Bounds,
    period_ms: f32,
    speed: f32,
    descent: f32,
) {
    state.clock_ms = (state.clock_ms + dt_ms) % (period_ms * 2.0);
    let direction = if state.clock_ms < period_ms { 1.0 } else { -1.0 };
    motion.velocity = Vec2::new(direction * speed, descent);
    motion.position += motion.velocity * seconds(dt_ms);
    clamp_x(motion, bounds);
}

fn anchor(motion: &Motion, state: &mut MovementState) -> Vec2 {
    *state.anchor.get_or_insert(motion.position)
}

fn prime_direction(state: &mut MovementState) {
    if !state.primed {
        state.primed = true;
        state.direction = 1.0;
    }
}

/// Moves straight to `target` and records the implied velocity.
fn steer_to(motion: &mut Motion, target: Vec2, dt_ms: f32) {
    let dt = seconds(dt_ms);
    motion.velocity = if dt > 0.0 {
        (target - motion.position) / dt
    } else {
        Vec2::ZERO
    };
    motion.position = target;
}

fn clamp_x(motion: &mut Motion, bounds: Bounds) {
    motion.position.x = motion.position.x.clamp(0.0, bounds.width);
}

fn bounce_x(motion: &mut Motion, state: &mut MovementState, bounds: Bounds) {
    if motion.position.x < 0.0 {
        state.direction = 1.0;
    } else if motion.position.x > bounds.width {
        state.direction = -1.0;
    }
    clamp_x(motion, bounds);
}
