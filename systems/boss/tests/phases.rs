use letter_siege_core::{Bounds, EmitContext, MinionSpawn, ProjectileSpawn};
use letter_siege_system_behaviors::BehaviorRegistry;
use letter_siege_system_boss::{
    crab_boss, octopus_boss, BossContext, BossListener, BossManager, BossManagerConfig, BossState,
    DEFAULT_BOSS_POSITION,
};

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

#[test]
fn crab_advances_through_telegraphed_phases() {
    let behaviors = BehaviorRegistry::standard();
    let bounds = Bounds::default();
    let mut boss = crab_boss(DEFAULT_BOSS_POSITION);
    let mut harness = Harness::default();

    boss.update(&behaviors, &mut harness, 16.0, bounds);
    assert_eq!(boss.state(), BossState::NoPhase);
    assert!(harness.shots.is_empty());
    assert!(harness.adds.is_empty());

    boss.apply_damage(40.0);
    boss.update(&behaviors, &mut harness, 16.0, bounds);
    assert_eq!(boss.state(), BossState::Telegraphing(0));
    let remaining = boss.telegraph_remaining();
    assert!(remaining > 0.0);

    boss.update(&behaviors, &mut harness, remaining + 16.0, bounds);
    assert!(harness.shots.is_empty());
    for _ in 0..80 {
        boss.update(&behaviors, &mut harness, 16.0, bounds);
    }
    assert_eq!(boss.state(), BossState::Active(0));
    assert!(!harness.shots.is_empty());

    boss.apply_damage(30.0);
    boss.update(&behaviors, &mut harness, 16.0, bounds);
    assert_eq!(boss.state(), BossState::Telegraphing(1));
    assert_eq!(harness.adds.len(), 3);

    for _ in 0..200 {
        boss.update(&behaviors, &mut harness, 16.0, bounds);
    }
    assert_eq!(harness.adds.len(), 3);
}

#[test]
fn heavy_damage_skips_straight_to_the_deepest_phase() {
    let mut boss = octopus_boss(DEFAULT_BOSS_POSITION);
    let mut harness = Harness::default();
    boss.apply_damage(120.0);
    assert_eq!(boss.maybe_advance_phase(&mut harness), Some(2));
    assert_eq!(harness.adds.len(), 6);
    assert!(harness.adds.iter().all(|add| add.movement_id == "cluster_drift"));
}

#[derive(Default)]
struct Counter {
    adds: usize,
    projectiles: usize,
    defeats: usize,
}

impl BossListener for Counter {
    fn on_spawn_add(&mut self, _minion: &MinionSpawn) {
        self.adds += 1;
    }

    fn on_projectile(&mut self, _spawn: ProjectileSpawn) {
        self.projectiles += 1;
    }

    fn on_defeated(&mut self) {
        self.defeats += 1;
    }
}

#[test]
fn managed_encounters_replay_identically() {
    let run = || {
        let mut manager = BossManager::new(
            octopus_boss(DEFAULT_BOSS_POSITION),
            BehaviorRegistry::standard(),
            BossManagerConfig {
                bounds: Bounds::default(),
                rng_seed: 17,
            },
            Counter::default(),
        );
        let mut positions = Vec::new();
        for step in 0..600 {
            if step % 20 == 0 {
                manager.apply_damage(3.0);
            }
            manager.update(16.0);
            positions.push(manager.boss().motion.position);
        }
        let counter = manager.listener();
        (positions, counter.adds, counter.projectiles, counter.defeats, manager.is_defeated())
    };

    let first = run();
    assert_eq!(first, run());
    assert_eq!(first.1, 4);
    assert!(first.2 > 0);
    assert_eq!(first.3, 0);
    assert!(!first.4);
}
