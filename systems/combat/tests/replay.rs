use letter_siege_archetypes::{ArchetypeRegistry, EMBEDDED_LETTERS};
use letter_siege_core::{Bounds, Enemy, EnemyId, MasteryMap, Projectile, SeededUnitRng, Vec2};
use letter_siege_system_behaviors::BehaviorRegistry;
use letter_siege_system_combat::{update_affected_enemies, EncounterContext};
use letter_siege_system_spawning::{Spawner, WaveOptions};

fn run(seed: u64, steps: &[f32]) -> (Vec<Enemy>, Vec<Projectile>) {
    let archetypes = ArchetypeRegistry::from_json(EMBEDDED_LETTERS).expect("valid data");
    let behaviors = BehaviorRegistry::standard();
    let bounds = Bounds::default();
    let mut enemies = Spawner::new()
        .create_wave(
            &archetypes,
            &MasteryMap::new(),
            26,
            &WaveOptions::default(),
            &mut SeededUnitRng::new(seed),
        )
        .enemies;
    let mut ctx = EncounterContext::new(bounds, seed);
    ctx.set_targets(&[Vec2::new(400.0, 560.0), Vec2::new(200.0, 500.0)]);

    for dt in steps {
        update_affected_enemies(&mut enemies, &behaviors, &mut ctx, *dt);
        ctx.advance(*dt);
    }
    (enemies, ctx.projectiles().to_vec())
}

fn hitchy_steps() -> Vec<f32> {
    (0..400)
        .map(|step| if step % 37 == 0 { 120.0 } else { 16.0 })
        .collect()
}

#[test]
fn identical_step_sequences_replay_identically() {
    let steps = hitchy_steps();
    assert_eq!(run(4, &steps), run(4, &steps));
}

#[test]
fn full_roster_fires_and_culls() {
    let (enemies, projectiles) = run(8, &hitchy_steps());
    assert_eq!(enemies.len(), 26);
    assert!(!projectiles.is_empty());
    let bounds = Bounds::default();
    for projectile in &projectiles {
        assert!(projectile.alive);
        assert!(bounds.contains_with_margin(projectile.position, projectile.radius + 4.0));
    }
}

#[test]
fn ink_zones_slow_the_enemies_they_land_on() {
    let behaviors = BehaviorRegistry::standard();
    let mut ctx = EncounterContext::new(Bounds::default(), 5);
    let mut inker = vec![Enemy::new(
        EnemyId::new(1),
        Vec2::new(300.0, 100.0),
        "hover_bob",
        "advanced_ink_slow_zones",
        10.0,
    )];

    let mut steps = 0;
    while ctx.effects().areas().is_empty() {
        assert!(steps < 400, "ink zone never landed");
        update_affected_enemies(&mut inker, &behaviors, &mut ctx, 16.0);
        steps += 1;
    }
    let zone = ctx
        .effects()
        .areas()
        .iter()
        .next()
        .map(|effect| effect.descriptor.position)
        .expect("zone present");

    let glider = |id, position| {
        Enemy::new(EnemyId::new(id), position, "glide_horizontal", "pellet_slow", 3.0)
    };
    let mut enemies = vec![glider(2, zone), glider(3, Vec2::new(zone.x, 20.0))];
    update_affected_enemies(&mut enemies, &behaviors, &mut ctx, 16.0);

    let slowed = enemies[0].motion.position.x - zone.x;
    let free = enemies[1].motion.position.x - zone.x;
    assert!(free > 0.0);
    assert!((slowed / free - 0.65).abs() < 1e-3);
}
