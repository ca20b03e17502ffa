#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave spawning.
//!
//! A wave is assembled in stages: adaptive selection picks letters, the
//! difficulty governor optionally reshapes them, archetype data turns them
//! into a [`SpawnRecipe`], and [`Spawner::spawn_wave`] places one enemy per
//! grid slot. Given the same random source every stage is reproducible.

pub mod coverage;
pub mod layout;
pub mod recipe;

use letter_siege_archetypes::ArchetypeRegistry;
use letter_siege_core::{Enemy, IdAllocator, LetterId, MasteryMap, MinionSpawn, UnitRng, Vec2};
use letter_siege_system_adaptive::{pick_with_review, DifficultyConfig, DifficultyGovernor, PickOptions};
use serde::Deserialize;

pub use coverage::{verify_behavior_coverage, BehaviorKind, CoverageError, MissingBehavior};
pub use layout::{generate_grid_slots, GridLayout};
pub use recipe::{build_recipe_from_archetypes, Loadout, SpawnRecipe};

/// Waves between boss encounters unless configured otherwise.
pub const DEFAULT_BOSS_CADENCE: u32 = 5;

/// Whether the zero-based wave `wave_index` is a boss wave.
///
/// Every `cadence`-th wave is a boss wave; a cadence of zero disables bosses.
#[must_use]
pub const fn should_trigger_boss(wave_index: u32, cadence: u32) -> bool {
    cadence != 0 && wave_index % cadence == cadence - 1
}

/// Selects the letters for a wave with a review share of mastered letters.
pub fn generate_wave_letters<R>(
    archetypes: &ArchetypeRegistry,
    mastery: &MasteryMap,
    options: &PickOptions,
    rng: &mut R,
) -> Vec<LetterId>
where
    R: UnitRng + ?Sized,
{
    pick_with_review(archetypes, mastery, options, rng)
}

/// Options for [`Spawner::create_wave`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveOptions {
    /// Share of the wave reserved for mastered letters.
    pub review_percent: f64,
    /// Mastery at or above which a letter counts as mastered.
    pub mastered_threshold: f64,
    /// Enables the pressure cap and, with a baseline, wave-to-wave smoothing.
    pub difficulty: Option<DifficultyConfig>,
    /// Composite difficulty of the previous wave.
    pub previous_difficulty: Option<f64>,
    /// Grid used when no explicit slots are supplied.
    pub grid: GridLayout,
    /// Explicit spawn positions, used instead of the grid when present.
    #[serde(skip)]
    pub slots: Option<Vec<Vec2>>,
}

impl Default for WaveOptions {
    fn default() -> Self {
        let pick = PickOptions::default();
        Self {
            review_percent: pick.review_percent,
            mastered_threshold: pick.mastered_threshold,
            difficulty: None,
            previous_difficulty: None,
            grid: GridLayout::default(),
            slots: None,
        }
    }
}

/// Enemies of a freshly created wave.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveResult {
    /// Letters in spawn order, after difficulty governance.
    pub letters: Vec<LetterId>,
    /// Spawned enemies, one per letter that received a slot.
    pub enemies: Vec<Enemy>,
    /// Composite difficulty of `letters`, the baseline for the next wave.
    pub composite_difficulty: f64,
}

/// Instantiates enemies with identifiers unique to this spawner.
#[derive(Debug, Default)]
pub struct Spawner {
    ids: IdAllocator,
}

impl Spawner {
    /// Creates a spawner whose first enemy receives identifier `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places one enemy per slot, pairing slots with recipe letters in order.
    ///
    /// Extra slots or extra letters are ignored.
    pub fn spawn_wave(&mut self, slots: &[Vec2], recipe: &SpawnRecipe) -> Vec<Enemy> {
        slots
            .iter()
            .zip(&recipe.letters)
            .map(|(slot, letter)| {
                let loadout = recipe.loadout(*letter);
                Enemy::new(
                    self.ids.next_enemy(),
                    *slot,
                    loadout.movement_id,
                    loadout.attack_id,
                    loadout.hp,
                )
                .with_letter(*letter)
            })
            .collect()
    }

    /// Turns a boss add into a regular enemy.
    pub fn spawn_minion(&mut self, minion: &MinionSpawn) -> Enemy {
        Enemy::new(
            self.ids.next_enemy(),
            minion.position,
            minion.movement_id.clone(),
            minion.attack_id.clone(),
            minion.hp.max(1.0),
        )
    }

    /// Runs selection, governance, recipe building and placement for one wave of `n` letters.
    pub fn create_wave<R>(
        &mut self,
        archetypes: &ArchetypeRegistry,
        mastery: &MasteryMap,
        n: usize,
        options: &WaveOptions,
        rng: &mut R,
    ) -> WaveResult
    where
        R: UnitRng + ?Sized,
    {
        let pick = PickOptions {
            n,
            review_percent: options.review_percent,
            mastered_threshold: options.mastered_threshold,
        };
        let mut letters = generate_wave_letters(archetypes, mastery, &pick, rng);

        let governor = match &options.difficulty {
            Some(config) => {
                let governor = DifficultyGovernor::new(config);
                letters = governor.cap_pressure(&letters, rng);
                if let Some(previous) = options.previous_difficulty {
                    letters = governor.smooth(&letters, previous, rng);
                }
                governor
            }
            None => DifficultyGovernor::new(&DifficultyConfig::default()),
        };
        let composite_difficulty = governor.composite_difficulty(&letters);

        let recipe = build_recipe_from_archetypes(archetypes, &letters);
        let enemies = match &options.slots {
            Some(slots) => self.spawn_wave(slots, &recipe),
            None => self.spawn_wave(&generate_grid_slots(letters.len(), &options.grid), &recipe),
        };
        log::debug!(
            "wave of {} enemies with difficulty {composite_difficulty:.3}: {}",
            enemies.len(),
            letters.iter().map(|letter| letter.as_char()).collect::<String>()
        );

        WaveResult {
            letters,
            enemies,
            composite_difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn boss_cadence_defaults_to_every_fifth_wave() {
        let triggers: Vec<u32> = (0..15)
            .filter(|wave| should_trigger_boss(*wave, DEFAULT_BOSS_CADENCE))
            .collect();
        assert_eq!(triggers, vec![4, 9, 14]);
    }

    #[test]
    fn cadence_holds_at_the_end_of_the_index_range() {
        assert!(!should_trigger_boss(u32::MAX, DEFAULT_BOSS_CADENCE));
        assert!(should_trigger_boss(u32::MAX - 1, DEFAULT_BOSS_CADENCE));
        assert!(should_trigger_boss(u32::MAX, 1));
        assert!(!should_trigger_boss(u32::MAX, 0));
    }

    #[test]
    fn custom_cadence_and_disabled_bosses() {
        assert!(!should_trigger_boss(0, 3));
        assert!(!should_trigger_boss(1, 3));
        assert!(should_trigger_boss(2, 3));
        assert!(!should_trigger_boss(3, 3));
        assert!(should_trigger_boss(5, 3));
        assert!(!should_trigger_boss(4, 0));
    }

    #[test]
    fn spawn_wave_stops_at_the_shorter_input() {
        let mut spawner = Spawner::new();
        let recipe = SpawnRecipe {
            letters: vec![LetterId::A, LetterId::B, LetterId::C],
            loadouts: BTreeMap::new(),
        };
        let enemies = spawner.spawn_wave(&[Vec2::ZERO, Vec2::new(10.0, 0.0)], &recipe);
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[1].motion.position, Vec2::new(10.0, 0.0));
        assert_eq!(enemies[1].letter, Some(LetterId::B));
        assert_eq!(enemies[0].movement_id, recipe::FALLBACK_MOVEMENT);
        assert_eq!(enemies[0].attack_id, recipe::FALLBACK_ATTACK);
        assert!(enemies[0].id < enemies[1].id);
    }

    #[test]
    fn minions_get_fresh_ids() {
        let mut spawner = Spawner::new();
        let minion = MinionSpawn {
            position: Vec2::new(5.0, 6.0),
            movement_id: "buzz_loop".to_owned(),
            attack_id: "rapid_stingers".to_owned(),
            hp: 2.0,
        };
        let first = spawner.spawn_minion(&minion);
        let second = spawner.spawn_minion(&minion);
        assert_ne!(first.id, second.id);
        assert_eq!(first.letter, None);
        assert_eq!(first.hp, 2.0);
    }
}
