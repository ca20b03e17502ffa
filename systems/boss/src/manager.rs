//! Adapter that drives one boss and reports discrete events.

use letter_siege_core::{
    AreaEffectDescriptor, BeamDescriptor, Bounds, EmitContext, MinionSpawn, ProjectileSpawn,
    SeededUnitRng, TelegraphDescriptor, TelegraphIntensity, UnitRng,
};
use letter_siege_system_behaviors::BehaviorRegistry;

use crate::machine::{Boss, BossContext, BossPhase};

/// Telegraphs at least this long are reported as heavy.
pub const HEAVY_TELEGRAPH_MS: f32 = 900.0;

/// Receiver of boss events. Every callback defaults to doing nothing.
pub trait BossListener {
    /// The phase telegraph started or finished.
    fn on_telegraph(&mut self, _active: bool, _intensity: TelegraphIntensity) {}

    /// Hit points changed.
    fn on_hp_change(&mut self, _hp: f32, _max_hp: f32) {}

    /// The boss was defeated. Raised once per encounter.
    fn on_defeated(&mut self) {}

    /// A phase spawned an add.
    fn on_spawn_add(&mut self, _minion: &MinionSpawn) {}

    /// The boss fired a projectile.
    fn on_projectile(&mut self, _spawn: ProjectileSpawn) {}

    /// An advanced attack posted its own warning.
    fn on_attack_telegraph(&mut self, _telegraph: TelegraphDescriptor) {}

    /// An advanced attack left an area effect.
    fn on_area_effect(&mut self, _effect: AreaEffectDescriptor) {}

    /// An advanced attack fired a beam.
    fn on_beam(&mut self, _beam: BeamDescriptor) {}
}

impl BossListener for () {}

/// Settings for a [`BossManager`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossManagerConfig {
    /// Playfield the boss moves in.
    pub bounds: Bounds,
    /// Seed of the random source handed to the boss's attacks.
    pub rng_seed: u64,
}

impl Default for BossManagerConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            rng_seed: 0,
        }
    }
}

/// Drives a [`Boss`] each step and raises edge-triggered events to a listener.
#[derive(Debug)]
pub struct BossManager<L> {
    boss: Boss,
    behaviors: BehaviorRegistry,
    config: BossManagerConfig,
    listener: L,
    rng: SeededUnitRng,
    last_telegraph: bool,
    last_hp: f32,
    defeat_reported: bool,
}

impl<L> BossManager<L>
where
    L: BossListener,
{
    /// Wraps `boss`, driving it with `behaviors`.
    #[must_use]
    pub fn new(boss: Boss, behaviors: BehaviorRegistry, config: BossManagerConfig, listener: L) -> Self {
        let last_hp = boss.hp();
        Self {
            boss,
            behaviors,
            config,
            listener,
            rng: SeededUnitRng::new(config.rng_seed),
            last_telegraph: false,
            last_hp,
            defeat_reported: false,
        }
    }

    /// Advances the boss and raises the events the step produced.
    pub fn update(&mut self, dt_ms: f32) {
        if !self.boss.is_active() {
            return;
        }
        let mut ctx = ListenerContext {
            listener: &mut self.listener,
            rng: &mut self.rng,
        };
        self.boss
            .update(&self.behaviors, &mut ctx, dt_ms, self.config.bounds);
        self.report_changes();
    }

    /// Damages the boss and raises hit-point and defeat events immediately.
    pub fn apply_damage(&mut self, amount: f32) {
        self.boss.apply_damage(amount);
        self.report_changes();
    }

    /// Whether the boss has been defeated.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        !self.boss.is_active()
    }

    /// Whether the current phase is still telegraphing.
    #[must_use]
    pub fn telegraph_active(&self) -> bool {
        self.boss.telegraph_active()
    }

    /// The managed boss.
    #[must_use]
    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    /// The event listener.
    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the event listener, for draining collected events.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    fn report_changes(&mut self) {
        let telegraph = self.boss.telegraph_active();
        if telegraph != self.last_telegraph {
            self.last_telegraph = telegraph;
            let intensity = self
                .boss
                .current_phase()
                .map_or(TelegraphIntensity::Light, telegraph_intensity);
            self.listener.on_telegraph(telegraph, intensity);
        }

        let hp = self.boss.hp();
        if hp != self.last_hp {
            self.last_hp = hp;
            self.listener.on_hp_change(hp, self.boss.max_hp());
        }

        if !self.boss.is_active() && !self.defeat_reported {
            self.defeat_reported = true;
            self.listener.on_defeated();
        }
    }
}

/// Audio cue strength for a phase's telegraph.
#[must_use]
pub fn telegraph_intensity(phase: &BossPhase) -> TelegraphIntensity {
    let long = phase.telegraph_ms.unwrap_or(0.0) >= HEAVY_TELEGRAPH_MS;
    if long || !phase.adds.is_empty() {
        TelegraphIntensity::Heavy
    } else {
        TelegraphIntensity::Light
    }
}

struct ListenerContext<'a, L> {
    listener: &'a mut L,
    rng: &'a mut SeededUnitRng,
}

impl<L> EmitContext for ListenerContext<'_, L>
where
    L: BossListener,
{
    fn emit_projectile(&mut self, spawn: ProjectileSpawn) {
        self.listener.on_projectile(spawn);
    }

    fn emit_telegraph(&mut self, telegraph: TelegraphDescriptor) {
        self.listener.on_attack_telegraph(telegraph);
    }

    fn emit_area_effect(&mut self, effect: AreaEffectDescriptor) {
        self.listener.on_area_effect(effect);
    }

    fn emit_beam(&mut self, beam: BeamDescriptor) {
        self.listener.on_beam(beam);
    }

    fn random_unit(&mut self) -> f64 {
        self.rng.next_unit()
    }
}

impl<L> BossContext for ListenerContext<'_, L>
where
    L: BossListener,
{
    fn spawn_minion(&mut self, minion: MinionSpawn) {
        self.listener.on_spawn_add(&minion);
    }
}
