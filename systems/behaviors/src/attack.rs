//! Built-in attack behaviors that fire on a cadence.
//!
//! Cadence is enforced with an accumulator: elapsed time is added every tick
//! and one shot is fired per whole period contained in it. Long ticks fire
//! several shots instead of dropping them.

use std::f32::consts::TAU;

use letter_siege_core::{AttackState, EmitContext, Motion, ProjectileSpawn, Vec2};

use crate::AttackFn;

/// Every built-in cadence attack paired with its identifier.
pub const BUILT_IN: [(&str, AttackFn); 17] = [
    ("pellet_slow", pellet_slow),
    ("pellet_spread_2", pellet_spread_2),
    ("claw_lateral", claw_lateral),
    ("timed_volley", timed_volley),
    ("venom_arc", venom_arc),
    ("rapid_stingers", rapid_stingers),
    ("micro_pellets_swarm", micro_pellets_swarm),
    ("narrow_fast", narrow_fast),
    ("x_cross_lasers", x_cross_lasers),
    ("radial_burst", radial_burst),
    ("summon_minions_spiral", summon_minions_spiral),
    ("ink_radial_slow", ink_radial_slow),
    ("beam_continuous", beam_continuous),
    ("escalating_burst", escalating_burst),
    ("chain_bounce", chain_bounce),
    ("tongue_lash", tongue_lash),
    ("wail_ring", wail_ring),
];

/// Runs `fire` once for every whole `period_ms` accumulated in the state.
///
/// Periods shorter than one millisecond are treated as one millisecond.
pub fn on_cadence(
    state: &mut AttackState,
    dt_ms: f32,
    period_ms: f32,
    mut fire: impl FnMut(&mut AttackState),
) {
    let period = period_ms.max(1.0);
    state.accumulator_ms += dt_ms;
    while state.accumulator_ms >= period {
        state.accumulator_ms -= period;
        fire(state);
        state.shots += 1;
    }
}

/// Emits a projectile launched from `origin`.
pub fn shoot(ctx: &mut dyn EmitContext, origin: Vec2, velocity: Vec2, radius: f32) {
    log::trace!("projectile from {origin} with velocity {velocity}");
    ctx.emit_projectile(ProjectileSpawn {
        position: origin,
        velocity,
        radius,
    });
}

/// Emits `count` projectiles evenly spaced around a circle, starting at `offset` radians.
pub fn ring(
    ctx: &mut dyn EmitContext,
    origin: Vec2,
    count: u32,
    speed: f32,
    radius: f32,
    offset: f32,
) {
    let count = count.max(1);
    for index in 0..count {
        let angle = offset + TAU * index as f32 / count as f32;
        shoot(ctx, origin, Vec2::from_angle(angle) * speed, radius);
    }
}

/// Single downward pellet every 800 ms.
pub fn pellet_slow(motion: &Motion, state: &mut AttackState, ctx: &mut dyn EmitContext, dt_ms: f32) {
    on_cadence(state, dt_ms, 800.0, |_| {
        shoot(ctx, motion.position, Vec2::new(0.0, 220.0), 3.0);
    });
}

/// Pellet every 900 ms, alternating between a right and a left lean.
pub fn pellet_spread_2(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 900.0, |state| {
        let vx = if state.flip { -80.0 } else { 80.0 };
        state.flip = !state.flip;
        shoot(ctx, motion.position, Vec2::new(vx, 200.0), 3.0);
    });
}

/// Sideways claw projectile every 1.2 s.
pub fn claw_lateral(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 1_200.0, |_| {
        shoot(ctx, motion.position, Vec2::new(160.0, 0.0), 3.0);
    });
}

/// Three-pellet fan every 1.5 s.
pub fn timed_volley(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 1_500.0, |_| {
        for vx in [-60.0, 0.0, 60.0] {
            shoot(ctx, motion.position, Vec2::new(vx, 240.0), 3.0);
        }
    });
}

/// Pair of wide, slow globs every second.
pub fn venom_arc(motion: &Motion, state: &mut AttackState, ctx: &mut dyn EmitContext, dt_ms: f32) {
    on_cadence(state, dt_ms, 1_000.0, |_| {
        for vx in [-120.0, 120.0] {
            shoot(ctx, motion.position, Vec2::new(vx, 140.0), 4.0);
        }
    });
}

/// Fast thin stingers four times a second.
pub fn rapid_stingers(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 250.0, |_| {
        shoot(ctx, motion.position, Vec2::new(0.0, 320.0), 2.0);
    });
}

/// Tiny pellets every 150 ms sweeping across five lanes.
pub fn micro_pellets_swarm(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 150.0, |state| {
        let lane = (state.shots % 5) as f32 - 2.0;
        shoot(ctx, motion.position, Vec2::new(lane * 40.0, 180.0), 1.5);
    });
}

/// Quick narrow shot every 700 ms.
pub fn narrow_fast(motion: &Motion, state: &mut AttackState, ctx: &mut dyn EmitContext, dt_ms: f32) {
    on_cadence(state, dt_ms, 700.0, |_| {
        shoot(ctx, motion.position, Vec2::new(0.0, 420.0), 2.0);
    });
}

/// Four diagonal bolts forming an X every 1.4 s.
pub fn x_cross_lasers(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 1_400.0, |_| {
        ring(ctx, motion.position, 4, 260.0, 3.0, TAU / 8.0);
    });
}

/// Eight-way burst every 1.6 s.
pub fn radial_burst(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 1_600.0, |_| {
        ring(ctx, motion.position, 8, 160.0, 3.0, 0.0);
    });
}

/// Rotating spiral stream, one shot every 180 ms turning half a radian each time.
pub fn summon_minions_spiral(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 180.0, |state| {
        let angle = state.shots as f32 * 0.5;
        shoot(ctx, motion.position, Vec2::from_angle(angle) * 150.0, 3.0);
    });
}

/// Six large slow ink blobs in a ring every 1.4 s.
pub fn ink_radial_slow(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 1_400.0, |_| {
        ring(ctx, motion.position, 6, 110.0, 5.0, TAU / 12.0);
    });
}

const BEAM_CYCLE_MS: f32 = 2_000.0;
const BEAM_ON_MS: f32 = 1_000.0;

/// Dense stream for one second out of every two.
pub fn beam_continuous(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    state.cycle_ms = (state.cycle_ms + dt_ms) % BEAM_CYCLE_MS;
    if state.cycle_ms < BEAM_ON_MS {
        on_cadence(state, dt_ms, 60.0, |_| {
            shoot(ctx, motion.position, Vec2::new(0.0, 480.0), 2.0);
        });
    } else {
        state.accumulator_ms = 0.0;
    }
}

/// Bursts that come faster and grow larger the longer the attacker survives.
///
/// The period shrinks by 100 ms per burst down to 400 ms and each burst fires
/// one more pellet every third time, up to four.
pub fn escalating_burst(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    state.accumulator_ms += dt_ms;
    loop {
        let period = escalating_period(state.shots);
        if state.accumulator_ms < period {
            break;
        }
        state.accumulator_ms -= period;
        let pellets = (1 + state.shots / 3).min(4);
        let spread = (pellets - 1) as f32 * 0.5;
        for index in 0..pellets {
            let vx = (index as f32 - spread) * 30.0;
            shoot(ctx, motion.position, Vec2::new(vx, 240.0), 3.0);
        }
        state.shots += 1;
    }
}

/// Period of the next escalating burst after `shots` bursts.
#[must_use]
pub fn escalating_period(shots: u32) -> f32 {
    (1_200.0 - 100.0 * shots as f32).max(400.0)
}

const CHAIN_RANGE: f32 = 160.0;

/// Straight bolt plus aimed follow-ups at up to two nearby targets every 1.1 s.
pub fn chain_bounce(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    on_cadence(state, dt_ms, 1_100.0, |_| {
        shoot(ctx, motion.position, Vec2::new(0.0, 260.0), 2.0);
        let targets = ctx.nearby_targets(motion.position, CHAIN_RANGE);
        for target in targets.into_iter().take(2) {
            let heading = (target - motion.position).normalize_or_zero();
            if heading != Vec2::ZERO {
                shoot(ctx, motion.position, heading * 260.0, 2.0);
            }
        }
    });
}

/// Fast lateral lash to both sides every 1.3 s.
pub fn tongue_lash(motion: &Motion, state: &mut AttackState, ctx: &mut dyn EmitContext, dt_ms: f32) {
    on_cadence(state, dt_ms, 1_300.0, |_| {
        for vx in [-220.0, 220.0] {
            shoot(ctx, motion.position, Vec2::new(vx, 60.0), 2.0);
        }
    });
}

/// Expanding twelve-way ring every two seconds, rotated on alternate wails.
pub fn wail_ring(motion: &Motion, state: &mut AttackState, ctx: &mut dyn EmitContext, dt_ms: f32) {
    on_cadence(state, dt_ms, 2_000.0, |state| {
        let offset = if state.flip { TAU / 24.0 } else { 0.0 };
        state.flip = !state.flip;
        ring(ctx, motion.position, 12, 120.0, 2.0, offset);
    });
}
