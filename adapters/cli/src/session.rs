//! Headless session: waves, bosses and a synthetic learner.

use std::{fmt, sync::Arc};

use anyhow::{Context, Result};
use letter_siege_archetypes::ArchetypeRegistry;
use letter_siege_core::{
    derive_wave_seed, AreaEffectDescriptor, BeamDescriptor, Bounds, EmitContext, Enemy, LetterId,
    MasteryMap, MinionSpawn, ProjectileSpawn, SeededUnitRng, TelegraphDescriptor,
    TelegraphIntensity, Vec2,
};
use letter_siege_system_behaviors::BehaviorRegistry;
use letter_siege_system_boss::{
    boss_for_letter, crab_boss, BossListener, BossManager, BossManagerConfig, BOSS_LETTERS,
    DEFAULT_BOSS_POSITION,
};
use letter_siege_system_combat::{absorb_hits, update_affected_enemies, Aabb, EncounterContext};
use letter_siege_system_effects::AdvancedEffects;
use letter_siege_system_spawning::{
    should_trigger_boss, verify_behavior_coverage, Spawner, WaveOptions,
};

use crate::config::TuningFile;

const PLAYER_POSITION: Vec2 = Vec2::new(400.0, 570.0);
const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 24.0);
const HIT_FORGIVENESS: f32 = 2.0;
const ESCAPE_MARGIN: f32 = 20.0;
const PLAYER_DAMAGE: f32 = 1.0;

/// What a wave consisted of.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum WaveKind {
    Letters {
        letters: Vec<LetterId>,
        difficulty: f64,
    },
    Boss {
        letter: LetterId,
        defeated: bool,
        heavy_telegraphs: usize,
    },
}

/// Outcome of one simulated wave.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct WaveSummary {
    pub(crate) index: u32,
    pub(crate) kind: WaveKind,
    pub(crate) defeated: usize,
    pub(crate) escaped: usize,
    pub(crate) hits_taken: usize,
    pub(crate) inked_ms: f32,
    pub(crate) elapsed_ms: f32,
}

impl fmt::Display for WaveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wave {:>2}: ", self.index + 1)?;
        match &self.kind {
            WaveKind::Letters {
                letters,
                difficulty,
            } => {
                let letters: String = letters.iter().map(|letter| letter.as_char()).collect();
                write!(f, "letters {letters} difficulty {difficulty:.2}")?;
            }
            WaveKind::Boss {
                letter,
                defeated,
                heavy_telegraphs,
            } => {
                let outcome = if *defeated { "defeated" } else { "survived" };
                write!(
                    f,
                    "boss {letter} {outcome}, {heavy_telegraphs} heavy telegraphs"
                )?;
            }
        }
        write!(
            f,
            ", {} down, {} escaped, {} hits taken, {:.1}s inked, {:.1}s",
            self.defeated,
            self.escaped,
            self.hits_taken,
            self.inked_ms / 1000.0,
            self.elapsed_ms / 1000.0
        )
    }
}

#[derive(Debug, Default)]
struct Tally {
    defeated: usize,
    escaped: usize,
    hits_taken: usize,
    inked_ms: f32,
    elapsed_ms: f32,
}

/// Everything the boss emitted during one step, drained by the session.
#[derive(Debug, Default)]
struct BossFeed {
    adds: Vec<MinionSpawn>,
    projectiles: Vec<ProjectileSpawn>,
    telegraphs: Vec<TelegraphDescriptor>,
    areas: Vec<AreaEffectDescriptor>,
    beams: Vec<BeamDescriptor>,
    heavy_telegraphs: usize,
}

impl BossListener for BossFeed {
    fn on_telegraph(&mut self, active: bool, intensity: TelegraphIntensity) {
        if active {
            if intensity == TelegraphIntensity::Heavy {
                self.heavy_telegraphs += 1;
            }
            log::info!("boss telegraph ({})", intensity.label());
        }
    }

    fn on_hp_change(&mut self, hp: f32, max_hp: f32) {
        log::debug!("boss hp {hp:.0}/{max_hp:.0}");
    }

    fn on_defeated(&mut self) {
        log::info!("boss defeated");
    }

    fn on_spawn_add(&mut self, minion: &MinionSpawn) {
        self.adds.push(minion.clone());
    }

    fn on_projectile(&mut self, spawn: ProjectileSpawn) {
        self.projectiles.push(spawn);
    }

    fn on_attack_telegraph(&mut self, telegraph: TelegraphDescriptor) {
        self.telegraphs.push(telegraph);
    }

    fn on_area_effect(&mut self, effect: AreaEffectDescriptor) {
        self.areas.push(effect);
    }

    fn on_beam(&mut self, beam: BeamDescriptor) {
        self.beams.push(beam);
    }
}

/// Simulated play session.
#[derive(Debug)]
pub(crate) struct Session {
    archetypes: Arc<ArchetypeRegistry>,
    behaviors: BehaviorRegistry,
    tuning: TuningFile,
    bounds: Bounds,
    mastery: MasteryMap,
    spawner: Spawner,
    baseline: Option<f64>,
    bosses_fought: usize,
}

impl Session {
    /// Creates a session, refusing archetypes whose behaviors are not registered.
    pub(crate) fn new(archetypes: Arc<ArchetypeRegistry>, tuning: TuningFile) -> Result<Self> {
        let behaviors = BehaviorRegistry::standard();
        verify_behavior_coverage(&archetypes, &behaviors)
            .context("archetypes reference unknown behaviors")?;
        Ok(Self {
            archetypes,
            behaviors,
            tuning,
            bounds: Bounds::default(),
            mastery: MasteryMap::new(),
            spawner: Spawner::new(),
            baseline: None,
            bosses_fought: 0,
        })
    }

    /// Number of waves the session runs.
    pub(crate) fn waves(&self) -> u32 {
        self.tuning.session.waves
    }

    /// Learner mastery accumulated so far.
    pub(crate) fn mastery(&self) -> &MasteryMap {
        &self.mastery
    }

    /// Runs the wave at `index`, replayable from the session seed alone.
    pub(crate) fn run_wave(&mut self, index: u32) -> WaveSummary {
        let seed = derive_wave_seed(self.tuning.session.seed, index);
        if should_trigger_boss(index, self.tuning.session.boss_cadence) {
            self.run_boss_wave(index, seed)
        } else {
            self.run_letter_wave(index, seed)
        }
    }

    fn steps(&self) -> usize {
        let settings = &self.tuning.session;
        (settings.wave_seconds * 1000.0 / settings.step_ms).ceil() as usize
    }

    fn run_letter_wave(&mut self, index: u32, seed: u64) -> WaveSummary {
        let options = WaveOptions {
            review_percent: self.tuning.review.percent,
            mastered_threshold: self.tuning.review.mastered_threshold,
            difficulty: Some(self.tuning.difficulty.clone()),
            previous_difficulty: self.baseline,
            grid: self.tuning.grid,
            slots: None,
        };
        let wave = self.spawner.create_wave(
            &self.archetypes,
            &self.mastery,
            self.tuning.session.wave_size,
            &options,
            &mut SeededUnitRng::new(seed),
        );
        self.baseline = Some(wave.composite_difficulty);

        let step_ms = self.tuning.session.step_ms;
        let mut enemies = wave.enemies;
        let mut ctx = EncounterContext::new(self.bounds, seed);
        ctx.set_targets(&[PLAYER_POSITION]);
        let mut tally = Tally::default();
        let mut fire_clock = 0.0;

        for _ in 0..self.steps() {
            update_affected_enemies(&mut enemies, &self.behaviors, &mut ctx, step_ms);
            step_world(&mut ctx, step_ms, &mut tally);

            fire_clock += step_ms;
            while fire_clock >= self.tuning.session.player_fire_ms {
                fire_clock -= self.tuning.session.player_fire_ms;
                let _ = strike_nearest(&mut enemies);
            }
            cull(&mut enemies, self.bounds, &mut tally);
            if enemies.is_empty() {
                break;
            }
        }

        learn(&mut self.mastery, &wave.letters, self.tuning.session.learning_rate);
        summary(
            index,
            WaveKind::Letters {
                letters: wave.letters,
                difficulty: wave.composite_difficulty,
            },
            &tally,
        )
    }

    fn run_boss_wave(&mut self, index: u32, seed: u64) -> WaveSummary {
        let letter = BOSS_LETTERS[self.bosses_fought % BOSS_LETTERS.len()];
        self.bosses_fought += 1;
        let boss = boss_for_letter(letter, DEFAULT_BOSS_POSITION)
            .unwrap_or_else(|| crab_boss(DEFAULT_BOSS_POSITION));
        let mut manager = BossManager::new(
            boss,
            self.behaviors.clone(),
            BossManagerConfig {
                bounds: self.bounds,
                rng_seed: seed,
            },
            BossFeed::default(),
        );
        log::info!("boss {letter} enters with {:.0} hp", manager.boss().max_hp());

        let step_ms = self.tuning.session.step_ms;
        let mut adds: Vec<Enemy> = Vec::new();
        let mut ctx = EncounterContext::new(self.bounds, seed);
        ctx.set_targets(&[PLAYER_POSITION]);
        let mut tally = Tally::default();
        let mut fire_clock = 0.0;

        for _ in 0..self.steps() {
            manager.update(step_ms);
            let feed = manager.listener_mut();
            for minion in feed.adds.drain(..) {
                adds.push(self.spawner.spawn_minion(&minion));
            }
            for spawn in feed.projectiles.drain(..) {
                ctx.emit_projectile(spawn);
            }
            for telegraph in feed.telegraphs.drain(..) {
                ctx.emit_telegraph(telegraph);
            }
            for area in feed.areas.drain(..) {
                ctx.emit_area_effect(area);
            }
            for beam in feed.beams.drain(..) {
                ctx.emit_beam(beam);
            }

            update_affected_enemies(&mut adds, &self.behaviors, &mut ctx, step_ms);
            step_world(&mut ctx, step_ms, &mut tally);

            fire_clock += step_ms;
            while fire_clock >= self.tuning.session.player_fire_ms {
                fire_clock -= self.tuning.session.player_fire_ms;
                if !strike_nearest(&mut adds) {
                    manager.apply_damage(self.tuning.session.boss_damage);
                }
            }
            cull(&mut adds, self.bounds, &mut tally);
            if manager.is_defeated() && adds.is_empty() {
                break;
            }
        }

        learn(&mut self.mastery, &[letter], self.tuning.session.learning_rate);
        summary(
            index,
            WaveKind::Boss {
                letter,
                defeated: manager.is_defeated(),
                heavy_telegraphs: manager.listener().heavy_telegraphs,
            },
            &tally,
        )
    }
}

fn summary(index: u32, kind: WaveKind, tally: &Tally) -> WaveSummary {
    WaveSummary {
        index,
        kind,
        defeated: tally.defeated,
        escaped: tally.escaped,
        hits_taken: tally.hits_taken,
        inked_ms: tally.inked_ms,
        elapsed_ms: tally.elapsed_ms,
    }
}

/// Advances projectiles and effects, then resolves everything that reached the player.
fn step_world(ctx: &mut EncounterContext, step_ms: f32, tally: &mut Tally) {
    ctx.advance(step_ms);
    tally.elapsed_ms += step_ms;

    let player = Aabb::centered(PLAYER_POSITION, PLAYER_SIZE);
    tally.hits_taken += absorb_hits(ctx.projectiles_mut(), &player, HIT_FORGIVENESS);
    tally.hits_taken += ctx
        .take_beams()
        .iter()
        .filter(|beam| (beam.position.x - PLAYER_POSITION.x).abs() <= beam.width / 2.0)
        .count();

    let exposure: AdvancedEffects = ctx.effects().areas().query(PLAYER_POSITION);
    if exposure.has_ink {
        tally.inked_ms += step_ms;
    }
    if exposure.damage > 0.0 {
        tally.hits_taken += 1;
    }
}

/// Damages the living enemy closest to the player. Returns whether one was hit.
fn strike_nearest(enemies: &mut [Enemy]) -> bool {
    let target = enemies
        .iter_mut()
        .filter(|enemy| enemy.is_alive())
        .min_by(|a, b| {
            let a = a.motion.position.distance_squared(PLAYER_POSITION);
            let b = b.motion.position.distance_squared(PLAYER_POSITION);
            a.total_cmp(&b)
        });
    match target {
        Some(enemy) => {
            enemy.hp -= PLAYER_DAMAGE;
            true
        }
        None => false,
    }
}

fn cull(enemies: &mut Vec<Enemy>, bounds: Bounds, tally: &mut Tally) {
    enemies.retain(|enemy| {
        if !enemy.is_alive() {
            tally.defeated += 1;
            false
        } else if enemy.motion.position.y > bounds.height + ESCAPE_MARGIN {
            tally.escaped += 1;
            false
        } else {
            true
        }
    });
}

/// Moves each letter's mastery `rate` of the way towards one.
fn learn(mastery: &mut MasteryMap, letters: &[LetterId], rate: f64) {
    for letter in letters {
        let current = mastery.mastery(*letter);
        mastery.set(*letter, current + (1.0 - current) * rate);
    }
}
