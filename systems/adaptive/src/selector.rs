//! Mastery-weighted letter selection.

use letter_siege_archetypes::ArchetypeRegistry;
use letter_siege_core::{LetterId, MasteryMap, UnitRng};
use serde::Deserialize;

/// Smallest weight a letter can receive, keeping every letter selectable.
pub const MIN_WEIGHT: f64 = 0.0001;

/// Sampling weights keyed by letter, kept in the order they were computed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightMap {
    entries: Vec<(LetterId, f64)>,
}

impl WeightMap {
    /// Weight of the letter, if present.
    #[must_use]
    pub fn get(&self, letter: LetterId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == letter)
            .map(|(_, weight)| *weight)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (LetterId, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Copy of the map without the listed letters.
    #[must_use]
    pub fn without(&self, excluded: &[LetterId]) -> Self {
        self.entries
            .iter()
            .copied()
            .filter(|(letter, _)| !excluded.contains(letter))
            .collect()
    }

    /// Sum of the positive weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        positive_total(&self.entries)
    }

    /// Number of letters in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no letters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(LetterId, f64)> for WeightMap {
    fn from_iter<T: IntoIterator<Item = (LetterId, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Options for [`pick_with_review`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickOptions {
    /// Number of letters requested.
    pub n: usize,
    /// Share of the wave reserved for mastered letters.
    pub review_percent: f64,
    /// Mastery at or above which a letter counts as mastered.
    pub mastered_threshold: f64,
}

impl PickOptions {
    /// Default options for a wave of `n` letters.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            n: 0,
            review_percent: 0.1,
            mastered_threshold: 0.8,
        }
    }
}

/// Weight for every letter: low mastery and high tiers are favoured.
///
/// `weight = max(MIN_WEIGHT, (1 - mastery) * (1 + 0.1 * tier))`, with mastery
/// clamped to `0.0..=1.0`.
#[must_use]
pub fn compute_weights(archetypes: &ArchetypeRegistry, mastery: &MasteryMap) -> WeightMap {
    archetypes
        .iter()
        .map(|archetype| {
            let tier_boost = 1.0 + 0.1 * f64::from(archetype.tier);
            let weight = (1.0 - mastery.mastery(archetype.letter)) * tier_boost;
            (archetype.letter, weight.max(MIN_WEIGHT))
        })
        .collect()
}

/// Draws up to `n` distinct letters, each with probability proportional to its weight.
///
/// Every draw scales one rng sample by the remaining pool's total weight and
/// walks the pool in order until the sample falls inside an entry. The
/// chosen letter leaves the pool. Returns an empty list when the total weight
/// is not positive.
pub fn weighted_pick_n<R>(weights: &WeightMap, n: usize, rng: &mut R) -> Vec<LetterId>
where
    R: UnitRng + ?Sized,
{
    if weights.total() <= 0.0 {
        return Vec::new();
    }

    let mut pool = weights.entries.clone();
    let mut picked = Vec::with_capacity(n.min(pool.len()));
    while picked.len() < n && !pool.is_empty() {
        let mut remaining = rng.next_unit() * positive_total(&pool);
        let mut index = 0;
        while index < pool.len() {
            let weight = pool[index].1.max(0.0);
            if remaining <= weight {
                break;
            }
            remaining -= weight;
            index += 1;
        }
        let (letter, _) = pool.remove(index.min(pool.len() - 1));
        picked.push(letter);
    }
    picked
}

/// Picks a wave that reserves a share of slots for mastered letters.
///
/// `floor(n * review_percent)` slots are filled uniformly from letters whose
/// mastery reaches the threshold; the rest come from [`weighted_pick_n`] with
/// the review letters excluded. A short mastered set shrinks the review share.
pub fn pick_with_review<R>(
    archetypes: &ArchetypeRegistry,
    mastery: &MasteryMap,
    options: &PickOptions,
    rng: &mut R,
) -> Vec<LetterId>
where
    R: UnitRng + ?Sized,
{
    let weights = compute_weights(archetypes, mastery);
    let review_percent = options.review_percent.clamp(0.0, 1.0);
    let review_target = (options.n as f64 * review_percent).floor() as usize;

    let mut mastered: Vec<LetterId> = archetypes
        .iter()
        .map(|archetype| archetype.letter)
        .filter(|letter| mastery.mastery(*letter) >= options.mastered_threshold)
        .collect();

    let mut picked = Vec::with_capacity(options.n);
    while picked.len() < review_target && !mastered.is_empty() {
        let index = rng.next_index(mastered.len());
        picked.push(mastered.remove(index));
    }

    let review_count = picked.len();
    let rest = weighted_pick_n(
        &weights.without(&picked),
        options.n.saturating_sub(review_count),
        rng,
    );
    picked.extend(rest);
    log::debug!(
        "picked {} letters ({} for review) from {} candidates",
        picked.len(),
        review_count,
        weights.len()
    );
    picked
}

fn positive_total(entries: &[(LetterId, f64)]) -> f64 {
    entries.iter().map(|(_, weight)| weight.max(0.0)).sum()
}
