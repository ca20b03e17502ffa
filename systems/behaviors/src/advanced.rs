//! Advanced attacks that telegraph before they strike.
//!
//! Each attack cycles through [`AdvancedPhase::Idle`],
//! [`AdvancedPhase::Charging`], [`AdvancedPhase::Active`] and
//! [`AdvancedPhase::Cooldown`]. Entering the charging phase emits a telegraph
//! lasting exactly as long as the charge. Phase timing is carried over across
//! ticks, so one long tick can walk through several phases.

use letter_siege_core::{
    AdvancedPhase, AreaEffectDescriptor, AreaEffectKind, AttackState, BeamDescriptor, EmitContext,
    Motion, TelegraphDescriptor, TelegraphShape, Vec2,
};

use crate::{
    attack::{on_cadence, shoot},
    AttackFn,
};

/// Every built-in advanced attack paired with its identifier.
pub const BUILT_IN: [(&str, AttackFn); 4] = [
    ("advanced_beam_continuous", advanced_beam_continuous),
    ("advanced_chain_lightning", advanced_chain_lightning),
    ("advanced_ink_slow_zones", advanced_ink_slow_zones),
    ("advanced_flame_cone_dot", advanced_flame_cone_dot),
];

/// Durations of each phase of an advanced attack in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTimings {
    /// Wait before charging starts.
    pub idle_ms: f32,
    /// Telegraph window. Always at least one millisecond.
    pub charge_ms: f32,
    /// Time spent emitting.
    pub active_ms: f32,
    /// Recovery before returning to idle.
    pub cooldown_ms: f32,
}

/// Beam: charges for 0.8 s, fires for 2 s, then sprays fallback pellets for 1.5 s.
pub const BEAM_TIMINGS: PhaseTimings = PhaseTimings {
    idle_ms: 0.0,
    charge_ms: 800.0,
    active_ms: 2_000.0,
    cooldown_ms: 1_500.0,
};

/// Chain lightning: every 1.2 s charges for 0.6 s and strikes once.
pub const CHAIN_TIMINGS: PhaseTimings = PhaseTimings {
    idle_ms: 1_200.0,
    charge_ms: 600.0,
    active_ms: 0.0,
    cooldown_ms: 0.0,
};

/// Ink: every 1.8 s charges for 0.7 s and drops a slowing zone.
pub const INK_TIMINGS: PhaseTimings = PhaseTimings {
    idle_ms: 1_800.0,
    charge_ms: 700.0,
    active_ms: 0.0,
    cooldown_ms: 0.0,
};

/// Flame: every 2.5 s charges for 0.5 s and breathes fire for 1.5 s.
pub const FLAME_TIMINGS: PhaseTimings = PhaseTimings {
    idle_ms: 2_500.0,
    charge_ms: 500.0,
    active_ms: 1_500.0,
    cooldown_ms: 0.0,
};

/// Hooks invoked by [`drive_phases`] as an advanced attack moves through its cycle.
pub trait PhaseHooks {
    /// Called when charging starts, normally to emit a telegraph.
    fn on_charge(&mut self, motion: &Motion, ctx: &mut dyn EmitContext, timings: PhaseTimings);

    /// Called once when the attack becomes active.
    fn on_activate(&mut self, motion: &Motion, state: &mut AttackState, ctx: &mut dyn EmitContext);

    /// Called with the time spent inside the active phase during a tick.
    fn while_active(
        &mut self,
        _motion: &Motion,
        _state: &mut AttackState,
        _ctx: &mut dyn EmitContext,
        _dt_ms: f32,
    ) {
    }

    /// Called with the time spent inside the cooldown phase during a tick.
    fn while_cooling(
        &mut self,
        _motion: &Motion,
        _state: &mut AttackState,
        _ctx: &mut dyn EmitContext,
        _dt_ms: f32,
    ) {
    }
}

/// Advances an advanced attack's phase machine by `dt_ms` milliseconds.
pub fn drive_phases(
    hooks: &mut dyn PhaseHooks,
    timings: PhaseTimings,
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    let timings = PhaseTimings {
        charge_ms: timings.charge_ms.max(1.0),
        ..timings
    };
    let mut remaining = dt_ms.max(0.0);
    loop {
        let limit = match state.phase {
            AdvancedPhase::Idle => timings.idle_ms,
            AdvancedPhase::Charging => timings.charge_ms,
            AdvancedPhase::Active => timings.active_ms,
            AdvancedPhase::Cooldown => timings.cooldown_ms,
        };
        let room = (limit - state.phase_ms).max(0.0);
        let slice = remaining.min(room);
        match state.phase {
            AdvancedPhase::Active if slice > 0.0 => hooks.while_active(motion, state, ctx, slice),
            AdvancedPhase::Cooldown if slice > 0.0 => {
                hooks.while_cooling(motion, state, ctx, slice);
            }
            _ => {}
        }
        if remaining < room {
            state.phase_ms += remaining;
            return;
        }
        remaining -= room;
        state.phase_ms = 0.0;
        state.accumulator_ms = 0.0;
        state.phase = match state.phase {
            AdvancedPhase::Idle => {
                hooks.on_charge(motion, ctx, timings);
                AdvancedPhase::Charging
            }
            AdvancedPhase::Charging => {
                hooks.on_activate(motion, state, ctx);
                AdvancedPhase::Active
            }
            AdvancedPhase::Active => AdvancedPhase::Cooldown,
            AdvancedPhase::Cooldown => AdvancedPhase::Idle,
        };
        log::trace!("advanced attack entered {:?}", state.phase);
    }
}

fn telegraph(
    ctx: &mut dyn EmitContext,
    position: Vec2,
    shape: TelegraphShape,
    timings: PhaseTimings,
    color: &'static str,
) {
    ctx.emit_telegraph(TelegraphDescriptor {
        position,
        shape,
        duration_ms: timings.charge_ms,
        color,
    });
}

struct Beam;

impl PhaseHooks for Beam {
    fn on_charge(&mut self, motion: &Motion, ctx: &mut dyn EmitContext, timings: PhaseTimings) {
        telegraph(ctx, motion.position, TelegraphShape::Beam, timings, "#ffff00");
    }

    fn on_activate(&mut self, motion: &Motion, _: &mut AttackState, ctx: &mut dyn EmitContext) {
        ctx.emit_beam(BeamDescriptor {
            position: motion.position,
            width: 8.0,
            height: 600.0,
            duration_ms: BEAM_TIMINGS.active_ms,
            damage: 3.0,
        });
    }

    fn while_cooling(
        &mut self,
        motion: &Motion,
        state: &mut AttackState,
        ctx: &mut dyn EmitContext,
        dt_ms: f32,
    ) {
        on_cadence(state, dt_ms, 400.0, |_| {
            shoot(ctx, motion.position, Vec2::new(0.0, 280.0), 2.0);
        });
    }
}

/// Charges a column, holds a damaging beam, then covers its cooldown with pellets.
pub fn advanced_beam_continuous(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    drive_phases(&mut Beam, BEAM_TIMINGS, motion, state, ctx, dt_ms);
}

const CHAIN_SEARCH_RADIUS: f32 = 200.0;
const CHAIN_MAX_JUMPS: usize = 3;

struct Chain;

impl PhaseHooks for Chain {
    fn on_charge(&mut self, motion: &Motion, ctx: &mut dyn EmitContext, timings: PhaseTimings) {
        telegraph(ctx, motion.position, TelegraphShape::Chain, timings, "#00ffff");
    }

    fn on_activate(&mut self, motion: &Motion, _: &mut AttackState, ctx: &mut dyn EmitContext) {
        let spread = ctx.random_unit() as f32 * 400.0 - 200.0;
        shoot(ctx, motion.position, Vec2::new(spread, 220.0), 2.0);
        let targets = ctx.nearby_targets(motion.position, CHAIN_SEARCH_RADIUS);
        for target in targets.into_iter().take(CHAIN_MAX_JUMPS) {
            let heading = (target - motion.position).normalize_or_zero();
            if heading != Vec2::ZERO {
                shoot(ctx, motion.position, heading * 300.0, 2.0);
            }
        }
    }
}

/// Periodic lightning bolt that forks toward up to three nearby targets.
pub fn advanced_chain_lightning(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    drive_phases(&mut Chain, CHAIN_TIMINGS, motion, state, ctx, dt_ms);
}

struct Ink;

impl PhaseHooks for Ink {
    fn on_charge(&mut self, motion: &Motion, ctx: &mut dyn EmitContext, timings: PhaseTimings) {
        let marker = motion.position + Vec2::new(0.0, 100.0);
        telegraph(ctx, marker, TelegraphShape::Area, timings, "#800080");
    }

    fn on_activate(&mut self, motion: &Motion, _: &mut AttackState, ctx: &mut dyn EmitContext) {
        shoot(ctx, motion.position, Vec2::new(0.0, 160.0), 5.0);
        ctx.emit_area_effect(AreaEffectDescriptor {
            position: motion.position + Vec2::new(0.0, 150.0),
            radius: 80.0,
            duration_ms: 4_000.0,
            kind: AreaEffectKind::Slow,
            intensity: 0.5,
        });
    }
}

/// Lobs an ink blob and leaves a slowing zone where it lands.
pub fn advanced_ink_slow_zones(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    drive_phases(&mut Ink, INK_TIMINGS, motion, state, ctx, dt_ms);
}

const FLAME_ANGLES: [f32; 3] = [-0.3, 0.0, 0.3];
const FLAME_BURST_MS: f32 = 120.0;
const FLAME_SCORCH_CHANCE: f64 = 0.3;

struct Flame;

impl PhaseHooks for Flame {
    fn on_charge(&mut self, motion: &Motion, ctx: &mut dyn EmitContext, timings: PhaseTimings) {
        telegraph(ctx, motion.position, TelegraphShape::Cone, timings, "#ff6600");
    }

    fn on_activate(&mut self, _: &Motion, _: &mut AttackState, _: &mut dyn EmitContext) {}

    fn while_active(
        &mut self,
        motion: &Motion,
        state: &mut AttackState,
        ctx: &mut dyn EmitContext,
        dt_ms: f32,
    ) {
        on_cadence(state, dt_ms, FLAME_BURST_MS, |_| {
            for angle in FLAME_ANGLES {
                let velocity = Vec2::new(angle.sin(), angle.cos()) * 250.0;
                shoot(ctx, motion.position, velocity, 3.0);
            }
            if ctx.random_unit() < FLAME_SCORCH_CHANCE {
                let jitter_x = (ctx.random_unit() as f32 - 0.5) * 60.0;
                let jitter_y = 80.0 + ctx.random_unit() as f32 * 40.0;
                ctx.emit_area_effect(AreaEffectDescriptor {
                    position: motion.position + Vec2::new(jitter_x, jitter_y),
                    radius: 25.0,
                    duration_ms: 2_000.0,
                    kind: AreaEffectKind::Damage,
                    intensity: 1.0,
                });
            }
        });
    }
}

/// Breathes a three-lane cone of fire that occasionally scorches the ground.
pub fn advanced_flame_cone_dot(
    motion: &Motion,
    state: &mut AttackState,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
) {
    drive_phases(&mut Flame, FLAME_TIMINGS, motion, state, ctx, dt_ms);
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use letter_siege_core::ProjectileSpawn;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        projectiles: Vec<ProjectileSpawn>,
        telegraphs: Vec<TelegraphDescriptor>,
        effects: Vec<AreaEffectDescriptor>,
        beams: Vec<BeamDescriptor>,
        roll: f64,
    }

    impl EmitContext for Recorder {
        fn emit_projectile(&mut self, spawn: ProjectileSpawn) {
            self.projectiles.push(spawn);
        }

        fn emit_telegraph(&mut self, telegraph: TelegraphDescriptor) {
            self.telegraphs.push(telegraph);
        }

        fn emit_area_effect(&mut self, effect: AreaEffectDescriptor) {
            self.effects.push(effect);
        }

        fn emit_beam(&mut self, beam: BeamDescriptor) {
            self.beams.push(beam);
        }

        fn nearby_targets(&self, origin: Vec2, _radius: f32) -> Vec<Vec2> {
            vec![origin + Vec2::new(0.0, 100.0); 5]
        }

        fn random_unit(&mut self) -> f64 {
            self.roll
        }
    }

    fn origin() -> Motion {
        Motion::at(Vec2::new(200.0, 100.0))
    }

    #[test]
    fn beam_telegraphs_then_fires_then_cools_down() {
        let motion = origin();
        let mut state = AttackState::default();
        let mut ctx = Recorder::default();

        advanced_beam_continuous(&motion, &mut state, &mut ctx, 16.0);
        assert_eq!(state.phase, AdvancedPhase::Charging);
        assert_eq!(ctx.telegraphs.len(), 1);
        assert_eq!(ctx.telegraphs[0].shape, TelegraphShape::Beam);
        assert_abs_diff_eq!(ctx.telegraphs[0].duration_ms, 800.0);
        assert!(ctx.beams.is_empty());

        advanced_beam_continuous(&motion, &mut state, &mut ctx, 800.0);
        assert_eq!(state.phase, AdvancedPhase::Active);
        assert_eq!(ctx.beams.len(), 1);
        assert_abs_diff_eq!(ctx.beams[0].height, 600.0);

        advanced_beam_continuous(&motion, &mut state, &mut ctx, 2_000.0);
        assert_eq!(state.phase, AdvancedPhase::Cooldown);
        assert!(ctx.projectiles.is_empty());

        advanced_beam_continuous(&motion, &mut state, &mut ctx, 1_200.0);
        assert_eq!(ctx.projectiles.len(), 3);
        assert_eq!(ctx.projectiles[0].velocity, Vec2::new(0.0, 280.0));
    }

    #[test]
    fn chain_lightning_forks_to_three_targets() {
        let motion = origin();
        let mut state = AttackState::default();
        let mut ctx = Recorder {
            roll: 0.75,
            ..Recorder::default()
        };

        advanced_chain_lightning(&motion, &mut state, &mut ctx, 1_200.0);
        assert_eq!(state.phase, AdvancedPhase::Charging);
        assert_eq!(ctx.telegraphs[0].color, "#00ffff");
        assert!(ctx.projectiles.is_empty());

        advanced_chain_lightning(&motion, &mut state, &mut ctx, 600.0);
        assert_eq!(state.phase, AdvancedPhase::Idle);
        assert_eq!(ctx.projectiles.len(), 4);
        assert_eq!(ctx.projectiles[0].velocity, Vec2::new(100.0, 220.0));
        assert_eq!(ctx.projectiles[1].velocity, Vec2::new(0.0, 300.0));
    }

    #[test]
    fn ink_leaves_a_slow_zone_below_the_attacker() {
        let motion = origin();
        let mut state = AttackState::default();
        let mut ctx = Recorder::default();

        advanced_ink_slow_zones(&motion, &mut state, &mut ctx, 2_500.0);
        assert_eq!(ctx.telegraphs.len(), 1);
        assert_eq!(ctx.telegraphs[0].position, Vec2::new(200.0, 200.0));
        assert_eq!(ctx.effects.len(), 1);
        let zone = ctx.effects[0];
        assert_eq!(zone.kind, AreaEffectKind::Slow);
        assert_eq!(zone.position, Vec2::new(200.0, 250.0));
        assert_abs_diff_eq!(zone.radius, 80.0);
        assert_abs_diff_eq!(zone.intensity, 0.5);
        assert_eq!(ctx.projectiles.len(), 1);
    }

    #[test]
    fn flame_bursts_during_active_window() {
        let motion = origin();
        let mut state = AttackState::default();
        let mut ctx = Recorder {
            roll: 0.1,
            ..Recorder::default()
        };

        advanced_flame_cone_dot(&motion, &mut state, &mut ctx, 3_000.0);
        assert_eq!(state.phase, AdvancedPhase::Active);
        assert!(ctx.projectiles.is_empty());

        advanced_flame_cone_dot(&motion, &mut state, &mut ctx, 1_500.0);
        assert_eq!(state.phase, AdvancedPhase::Idle);
        // 1500 / 120 = 12 bursts of three flames, each scorching at roll 0.1.
        assert_eq!(ctx.projectiles.len(), 36);
        assert_eq!(ctx.effects.len(), 12);
        assert!(ctx
            .effects
            .iter()
            .all(|effect| effect.kind == AreaEffectKind::Damage));
    }

    #[test]
    fn one_long_tick_walks_the_whole_cycle() {
        let motion = origin();
        let mut state = AttackState::default();
        let mut ctx = Recorder::default();

        advanced_ink_slow_zones(&motion, &mut state, &mut ctx, 5_000.0);
        assert_eq!(ctx.effects.len(), 2);
        assert_eq!(state.phase, AdvancedPhase::Idle);
        assert_abs_diff_eq!(state.phase_ms, 0.0);
    }
}
