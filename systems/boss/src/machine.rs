//! Hit-point driven phase controller for a single boss.

use letter_siege_core::{
    AttackState, Bounds, EmitContext, MinionSpawn, Motion, MovementState, Vec2,
};
use letter_siege_system_behaviors::BehaviorRegistry;

/// Share of elapsed time passed to the movement behavior while telegraphing.
pub const TELEGRAPH_MOVEMENT_RATE: f32 = 0.4;
/// Horizontal spacing between adds spawned together.
pub const ADD_SPACING: f32 = 24.0;
/// Vertical offset of spawned adds below the boss.
pub const ADD_DROP: f32 = 40.0;

/// Group of adds spawned when a phase is entered.
#[derive(Clone, Debug, PartialEq)]
pub struct AddSpec {
    /// Number of adds. Zero is treated as one.
    pub count: u32,
    /// Movement behavior of every add.
    pub movement_id: String,
    /// Attack behavior of every add.
    pub attack_id: String,
    /// Starting hit points of every add.
    pub hp: f32,
}

impl AddSpec {
    /// Creates an add group.
    #[must_use]
    pub fn new(count: u32, movement_id: &str, attack_id: &str, hp: f32) -> Self {
        Self {
            count,
            movement_id: movement_id.to_owned(),
            attack_id: attack_id.to_owned(),
            hp,
        }
    }
}

/// Behavior configuration entered once the boss's hit-point fraction drops
/// to `threshold` or below.
#[derive(Clone, Debug, PartialEq)]
pub struct BossPhase {
    /// Hit-point fraction in `(0, 1]` at which the phase starts.
    pub threshold: f32,
    /// Movement behavior used during the phase.
    pub movement_id: String,
    /// Attack behavior used once the telegraph has elapsed.
    pub attack_id: String,
    /// Warning window before the attack starts. `None` activates immediately.
    pub telegraph_ms: Option<f32>,
    /// Adds spawned once on entry.
    pub adds: Vec<AddSpec>,
}

impl BossPhase {
    /// Creates a phase without a telegraph or adds.
    #[must_use]
    pub fn new(threshold: f32, movement_id: &str, attack_id: &str) -> Self {
        Self {
            threshold,
            movement_id: movement_id.to_owned(),
            attack_id: attack_id.to_owned(),
            telegraph_ms: None,
            adds: Vec::new(),
        }
    }

    /// Sets the telegraph window.
    #[must_use]
    pub fn with_telegraph(mut self, telegraph_ms: f32) -> Self {
        self.telegraph_ms = Some(telegraph_ms);
        self
    }

    /// Appends an add group.
    #[must_use]
    pub fn with_adds(mut self, adds: AddSpec) -> Self {
        self.adds.push(adds);
        self
    }
}

/// Observable state of a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossState {
    /// No threshold has been crossed yet.
    NoPhase,
    /// The phase at this index is warning before it attacks.
    Telegraphing(usize),
    /// The phase at this index moves and attacks normally.
    Active(usize),
    /// Hit points reached zero.
    Defeated,
}

/// Sink for a boss's projectiles and adds.
pub trait BossContext: EmitContext {
    /// Receives an add spawned on phase entry.
    fn spawn_minion(&mut self, minion: MinionSpawn);
}

/// Boss driven through HP-threshold phases.
#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    /// Position and velocity.
    pub motion: Motion,
    hp: f32,
    max_hp: f32,
    phases: Vec<BossPhase>,
    phase_index: Option<usize>,
    telegraph_ms: f32,
    active: bool,
    movement_state: MovementState,
    attack_state: AttackState,
}

impl Boss {
    /// Creates a boss at full health.
    ///
    /// Phases are sorted by descending threshold and thresholds clamped to
    /// `0.0..=1.0`. Maximum hit points below one are raised to one.
    #[must_use]
    pub fn new(position: Vec2, max_hp: f32, mut phases: Vec<BossPhase>) -> Self {
        for phase in &mut phases {
            phase.threshold = if phase.threshold.is_nan() {
                0.0
            } else {
                phase.threshold.clamp(0.0, 1.0)
            };
        }
        phases.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        let max_hp = if max_hp.is_finite() { max_hp.max(1.0) } else { 1.0 };
        Self {
            motion: Motion::at(position),
            hp: max_hp,
            max_hp,
            phases,
            phase_index: None,
            telegraph_ms: 0.0,
            active: true,
            movement_state: MovementState::default(),
            attack_state: AttackState::default(),
        }
    }

    /// Current hit points.
    #[must_use]
    pub fn hp(&self) -> f32 {
        self.hp
    }

    /// Maximum hit points.
    #[must_use]
    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    /// Phases in descending threshold order.
    #[must_use]
    pub fn phases(&self) -> &[BossPhase] {
        &self.phases
    }

    /// Index of the current phase.
    #[must_use]
    pub fn phase_index(&self) -> Option<usize> {
        self.phase_index
    }

    /// Current phase, if one has been entered.
    #[must_use]
    pub fn current_phase(&self) -> Option<&BossPhase> {
        self.phase_index.and_then(|index| self.phases.get(index))
    }

    /// Remaining telegraph time in milliseconds.
    #[must_use]
    pub fn telegraph_remaining(&self) -> f32 {
        self.telegraph_ms
    }

    /// Whether a living boss is currently telegraphing.
    #[must_use]
    pub fn telegraph_active(&self) -> bool {
        self.active && self.telegraph_ms > 0.0
    }

    /// Whether the boss still has hit points.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Observable state.
    #[must_use]
    pub fn state(&self) -> BossState {
        match (self.active, self.phase_index) {
            (false, _) => BossState::Defeated,
            (true, None) => BossState::NoPhase,
            (true, Some(index)) if self.telegraph_ms > 0.0 => BossState::Telegraphing(index),
            (true, Some(index)) => BossState::Active(index),
        }
    }

    /// Subtracts `amount` hit points, clamped to `0.0..=max_hp`.
    ///
    /// Negative damage is ignored. Reaching zero defeats the boss, after which
    /// further damage and updates do nothing.
    pub fn apply_damage(&mut self, amount: f32) {
        if !self.active {
            return;
        }
        let amount = if amount.is_nan() { 0.0 } else { amount.max(0.0) };
        self.hp = (self.hp - amount).clamp(0.0, self.max_hp);
        if self.hp <= 0.0 {
            self.active = false;
            log::debug!("boss defeated");
        }
    }

    /// Enters the deepest phase whose threshold the hit-point fraction has
    /// reached, spawning its adds through `ctx`.
    ///
    /// Returns the index of a newly entered phase.
    pub fn maybe_advance_phase<C>(&mut self, ctx: &mut C) -> Option<usize>
    where
        C: BossContext,
    {
        if !self.active {
            return None;
        }
        let fraction = self.hp / self.max_hp;
        let next = self
            .phases
            .iter()
            .rposition(|phase| fraction <= phase.threshold)?;
        if self.phase_index == Some(next) {
            return None;
        }

        self.phase_index = Some(next);
        let phase = &self.phases[next];
        self.telegraph_ms = phase.telegraph_ms.unwrap_or(0.0).max(0.0);
        self.movement_state = MovementState::default();
        self.attack_state = AttackState::default();
        log::debug!(
            "boss entered phase {next} at {:.0}% with {} ms telegraph",
            fraction * 100.0,
            self.telegraph_ms
        );

        let origin = self.motion.position;
        for add in &phase.adds {
            let count = add.count.max(1);
            let center = (count - 1) as f32 / 2.0;
            for slot in 0..count {
                ctx.spawn_minion(MinionSpawn {
                    position: Vec2::new(
                        origin.x + (slot as f32 - center) * ADD_SPACING,
                        origin.y + ADD_DROP,
                    ),
                    movement_id: add.movement_id.clone(),
                    attack_id: add.attack_id.clone(),
                    hp: add.hp,
                });
            }
        }
        Some(next)
    }

    /// Advances the boss by one step.
    ///
    /// While telegraphing only movement runs, at a reduced rate. Once the
    /// telegraph has elapsed the phase's movement and attack run normally.
    pub fn update<C>(&mut self, behaviors: &BehaviorRegistry, ctx: &mut C, dt_ms: f32, bounds: Bounds)
    where
        C: BossContext,
    {
        if !self.active {
            return;
        }
        let dt_ms = dt_ms.max(0.0);
        let _ = self.maybe_advance_phase(ctx);
        let Some(index) = self.phase_index else {
            return;
        };
        let phase = &self.phases[index];

        if self.telegraph_ms > 0.0 {
            self.telegraph_ms = (self.telegraph_ms - dt_ms).max(0.0);
            let _ = behaviors.apply_movement(
                &phase.movement_id,
                &mut self.motion,
                &mut self.movement_state,
                dt_ms * TELEGRAPH_MOVEMENT_RATE,
                bounds,
            );
            return;
        }

        let _ = behaviors.apply_movement(
            &phase.movement_id,
            &mut self.motion,
            &mut self.movement_state,
            dt_ms,
            bounds,
        );
        let _ = behaviors.apply_attack(
            &phase.attack_id,
            &self.motion,
            &mut self.attack_state,
            ctx,
            dt_ms,
        );
    }
}

#[cfg(test)]
mod tests {
    use letter_siege_core::ProjectileSpawn;

    use super::*;

    #[derive(Default)]
    struct Harness {
        shots: Vec<ProjectileSpawn>,
        adds: Vec<MinionSpawn>,
    }

    impl EmitContext for Harness {
        fn emit_projectile(&mut self, spawn: ProjectileSpawn) {
            self.shots.push(spawn);
        }
    }

    impl BossContext for Harness {
        fn spawn_minion(&mut self, minion: MinionSpawn) {
            self.adds.push(minion);
        }
    }

    fn two_phase_boss() -> Boss {
        Boss::new(
            Vec2::new(400.0, 100.0),
            100.0,
            vec![
                BossPhase::new(0.33, "zigzag_descent", "timed_volley")
                    .with_telegraph(900.0)
                    .with_adds(AddSpec::new(3, "glide_horizontal", "pellet_slow", 1.0)),
                BossPhase::new(0.66, "scuttle_side", "claw_lateral").with_telegraph(700.0),
            ],
        )
    }

    #[test]
    fn phases_are_sorted_descending() {
        let boss = two_phase_boss();
        let thresholds: Vec<f32> = boss.phases().iter().map(|phase| phase.threshold).collect();
        assert_eq!(thresholds, vec![0.66, 0.33]);
        assert_eq!(boss.state(), BossState::NoPhase);
    }

    #[test]
    fn damage_is_clamped_and_defeat_is_final() {
        let mut boss = two_phase_boss();
        boss.apply_damage(-20.0);
        assert_eq!(boss.hp(), 100.0);
        boss.apply_damage(250.0);
        assert_eq!(boss.hp(), 0.0);
        assert_eq!(boss.state(), BossState::Defeated);

        let before = boss.clone();
        let mut harness = Harness::default();
        boss.update(&BehaviorRegistry::standard(), &mut harness, 500.0, Bounds::default());
        assert_eq!(boss, before);
        assert!(harness.shots.is_empty());
    }

    #[test]
    fn telegraph_slows_movement_and_blocks_attacks() {
        let behaviors = BehaviorRegistry::standard();
        let mut boss = Boss::new(
            Vec2::new(400.0, 100.0),
            10.0,
            vec![BossPhase::new(1.0, "glide_horizontal", "rapid_stingers").with_telegraph(1000.0)],
        );
        let mut harness = Harness::default();

        boss.update(&behaviors, &mut harness, 100.0, Bounds::default());
        assert_eq!(boss.state(), BossState::Telegraphing(0));
        assert!((boss.telegraph_remaining() - 900.0).abs() < 1e-3);
        assert!((boss.motion.position.x - 403.2).abs() < 1e-3);

        boss.update(&behaviors, &mut harness, 900.0, Bounds::default());
        assert!(harness.shots.is_empty());
        assert_eq!(boss.state(), BossState::Active(0));

        for _ in 0..30 {
            boss.update(&behaviors, &mut harness, 16.0, Bounds::default());
        }
        assert!(!harness.shots.is_empty());
    }

    #[test]
    fn adds_spread_around_the_boss() {
        let mut boss = two_phase_boss();
        let mut harness = Harness::default();
        boss.apply_damage(70.0);
        assert_eq!(boss.maybe_advance_phase(&mut harness), Some(1));

        let xs: Vec<f32> = harness.adds.iter().map(|add| add.position.x).collect();
        assert_eq!(xs, vec![376.0, 400.0, 424.0]);
        assert!(harness.adds.iter().all(|add| add.position.y == 140.0));
        assert_eq!(boss.maybe_advance_phase(&mut harness), None);
        assert_eq!(harness.adds.len(), 3);
    }

    #[test]
    fn zero_count_adds_spawn_one() {
        let mut boss = Boss::new(
            Vec2::new(100.0, 100.0),
            10.0,
            vec![BossPhase::new(0.5, "hover_bob", "pellet_slow").with_adds(AddSpec::new(
                0,
                "hover_bob",
                "pellet_slow",
                1.0,
            ))],
        );
        let mut harness = Harness::default();
        boss.apply_damage(6.0);
        assert_eq!(boss.maybe_advance_phase(&mut harness), Some(0));
        assert_eq!(harness.adds.len(), 1);
        assert_eq!(harness.adds[0].position, Vec2::new(100.0, 140.0));
        assert_eq!(boss.state(), BossState::Active(0));
    }
}
