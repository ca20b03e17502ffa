use approx::assert_relative_eq;
use letter_siege_archetypes::{ArchetypeRegistry, EMBEDDED_LETTERS};
use letter_siege_core::{LetterId, MasteryMap, SeededUnitRng, Vec2};
use letter_siege_system_adaptive::{DifficultyConfig, DifficultyGovernor};
use letter_siege_system_spawning::{GridLayout, Spawner, WaveOptions};

fn registry() -> ArchetypeRegistry {
    ArchetypeRegistry::from_json(EMBEDDED_LETTERS).expect("valid data")
}

fn cycling(values: &'static [f64]) -> impl FnMut() -> f64 {
    let mut index = 0;
    move || {
        let value = values[index % values.len()];
        index += 1;
        value
    }
}

#[test]
fn default_wave_fills_the_grid() {
    let archetypes = registry();
    let mut spawner = Spawner::new();
    let wave = spawner.create_wave(
        &archetypes,
        &MasteryMap::new(),
        4,
        &WaveOptions::default(),
        &mut SeededUnitRng::new(1),
    );

    assert_eq!(wave.enemies.len(), 4);
    assert_eq!(wave.letters.len(), 4);
    assert_eq!(wave.enemies[0].motion.position, Vec2::new(80.0, 60.0));
    assert_eq!(wave.enemies[3].motion.position, Vec2::new(320.0, 60.0));
    for (enemy, letter) in wave.enemies.iter().zip(&wave.letters) {
        let archetype = archetypes.get(*letter).expect("letter defined");
        assert_eq!(enemy.letter, Some(*letter));
        assert_eq!(enemy.movement_id, archetype.movement_id);
        assert_eq!(enemy.attack_id, archetype.attack_id);
    }
}

#[test]
fn supplied_slots_override_the_grid() {
    let options = WaveOptions {
        slots: Some(vec![Vec2::new(100.0, 50.0), Vec2::new(140.0, 50.0)]),
        grid: GridLayout::new(0.0, 0.0, 1, 1.0, 1.0),
        ..WaveOptions::default()
    };
    let wave = Spawner::new().create_wave(
        &registry(),
        &MasteryMap::new(),
        4,
        &options,
        &mut SeededUnitRng::new(2),
    );

    assert_eq!(wave.letters.len(), 4);
    assert_eq!(wave.enemies.len(), 2);
    assert_eq!(wave.enemies[0].motion.position, Vec2::new(100.0, 50.0));
}

#[test]
fn difficulty_constraints_shape_the_wave() {
    let config = DifficultyConfig::default();
    let options = WaveOptions {
        difficulty: Some(config.clone()),
        previous_difficulty: Some(1.4),
        ..WaveOptions::default()
    };
    let wave = Spawner::new().create_wave(
        &registry(),
        &MasteryMap::new(),
        10,
        &options,
        &mut SeededUnitRng::new(5),
    );

    assert_eq!(wave.enemies.len(), 10);
    assert!(wave.composite_difficulty > 0.0);
    let governor = DifficultyGovernor::new(&config);
    assert_relative_eq!(
        wave.composite_difficulty,
        governor.composite_difficulty(&wave.letters),
        epsilon = 1e-12
    );
}

#[test]
fn review_slots_come_from_mastered_letters() {
    let mastery: MasteryMap = [
        (LetterId::A, 0.95),
        (LetterId::B, 0.92),
        (LetterId::C, 0.97),
        (LetterId::M, 0.2),
    ]
    .into_iter()
    .collect();
    let options = WaveOptions {
        review_percent: 0.2,
        mastered_threshold: 0.9,
        ..WaveOptions::default()
    };
    let mut rng = cycling(&[0.1, 0.7, 0.4]);
    let wave = Spawner::new().create_wave(&registry(), &mastery, 10, &options, &mut rng);

    let mastered = wave
        .letters
        .iter()
        .filter(|letter| matches!(letter, LetterId::A | LetterId::B | LetterId::C))
        .count();
    assert!(mastered >= 2, "letters {:?}", wave.letters);
    let mut distinct = wave.letters.clone();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), wave.letters.len());
}

#[test]
fn seeded_waves_replay_with_fresh_spawners() {
    let archetypes = registry();
    let mastery: MasteryMap = [(LetterId::Q, 0.4), (LetterId::E, 0.9)].into_iter().collect();
    let options = WaveOptions {
        difficulty: Some(DifficultyConfig::default()),
        ..WaveOptions::default()
    };
    let first = Spawner::new().create_wave(&archetypes, &mastery, 8, &options, &mut SeededUnitRng::new(77));
    let second = Spawner::new().create_wave(&archetypes, &mastery, 8, &options, &mut SeededUnitRng::new(77));
    assert_eq!(first, second);
}
