//! Bounds on how hard a generated roster may be.
//!
//! The governor caps the share of pressure letters in a wave and limits how
//! much harder a wave may be than the one before it. Both passes substitute
//! letters from [`EASY_POOL`] and draw the substitute uniformly from the
//! injected random source.

use std::collections::BTreeSet;

use letter_siege_core::{LetterId, UnitRng};
use serde::Deserialize;

/// Letters every learner meets early; they score [`COMMON_SCORE`].
pub const COMMON_LETTERS: [LetterId; 9] = [
    LetterId::A,
    LetterId::B,
    LetterId::C,
    LetterId::D,
    LetterId::E,
    LetterId::I,
    LetterId::O,
    LetterId::S,
    LetterId::T,
];

/// Substitutes used when a letter has to be replaced.
pub const EASY_POOL: [LetterId; 5] = [
    LetterId::A,
    LetterId::B,
    LetterId::C,
    LetterId::D,
    LetterId::E,
];

/// Default pressure letters.
pub const DEFAULT_PRESSURE_LETTERS: [LetterId; 5] = [
    LetterId::X,
    LetterId::Z,
    LetterId::Q,
    LetterId::J,
    LetterId::K,
];

/// Difficulty score of a pressure letter.
pub const PRESSURE_SCORE: f64 = 2.0;
/// Difficulty score of a common letter.
pub const COMMON_SCORE: f64 = 1.0;
/// Difficulty score of every other letter.
pub const STANDARD_SCORE: f64 = 1.5;
/// Upper bound on smoothing iterations.
pub const SMOOTHING_ITERATION_CAP: usize = 20;

/// Tunables for the difficulty governor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DifficultyConfig {
    /// Largest share of a wave that may be pressure letters.
    pub max_pressure_ratio: f64,
    /// Largest relative difficulty increase from one wave to the next.
    pub max_wave_increase: f64,
    /// Letters considered high pressure.
    pub pressure_letters: BTreeSet<LetterId>,
}

impl DifficultyConfig {
    /// Copy of the configuration with both ratios clamped into `0.0..=1.0`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            max_pressure_ratio: clamp_ratio(self.max_pressure_ratio),
            max_wave_increase: clamp_ratio(self.max_wave_increase),
            pressure_letters: self.pressure_letters.clone(),
        }
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            max_pressure_ratio: 0.30,
            max_wave_increase: 0.15,
            pressure_letters: DEFAULT_PRESSURE_LETTERS.into_iter().collect(),
        }
    }
}

fn clamp_ratio(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Applies the pressure cap and wave-to-wave smoothing to letter rosters.
#[derive(Clone, Debug, Default)]
pub struct DifficultyGovernor {
    config: DifficultyConfig,
}

impl DifficultyGovernor {
    /// Creates a governor, clamping out-of-range ratios in the configuration.
    #[must_use]
    pub fn new(config: &DifficultyConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    /// Configuration in effect after clamping.
    #[must_use]
    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    /// Whether the letter is a pressure letter under this configuration.
    #[must_use]
    pub fn is_pressure(&self, letter: LetterId) -> bool {
        self.config.pressure_letters.contains(&letter)
    }

    /// Difficulty score of a single letter.
    #[must_use]
    pub fn letter_score(&self, letter: LetterId) -> f64 {
        if self.is_pressure(letter) {
            PRESSURE_SCORE
        } else if is_common(letter) {
            COMMON_SCORE
        } else {
            STANDARD_SCORE
        }
    }

    /// Average letter score of the roster; zero for an empty roster.
    #[must_use]
    pub fn composite_difficulty(&self, letters: &[LetterId]) -> f64 {
        if letters.is_empty() {
            return 0.0;
        }
        let total: f64 = letters.iter().map(|letter| self.letter_score(*letter)).sum();
        total / letters.len() as f64
    }

    /// Keeps at most `floor(len * max_pressure_ratio)` pressure letters.
    ///
    /// The earliest pressure letters are kept; later ones are replaced in
    /// order with uniform picks from [`EASY_POOL`]. Other letters are untouched.
    pub fn cap_pressure<R>(&self, letters: &[LetterId], rng: &mut R) -> Vec<LetterId>
    where
        R: UnitRng + ?Sized,
    {
        let max_allowed = (letters.len() as f64 * self.config.max_pressure_ratio).floor() as usize;
        let mut kept = 0;
        let mut replaced = 0;
        let capped: Vec<LetterId> = letters
            .iter()
            .map(|&letter| {
                if !self.is_pressure(letter) {
                    return letter;
                }
                if kept < max_allowed {
                    kept += 1;
                    return letter;
                }
                replaced += 1;
                easy_letter(rng)
            })
            .collect();
        if replaced > 0 {
            log::debug!("pressure cap replaced {replaced} letters (allowed {max_allowed})");
        }
        capped
    }

    /// Relaxes the roster until it is at most `max_wave_increase` harder than `previous`.
    ///
    /// Each iteration replaces the first pressure letter, or failing that the
    /// first letter that is neither common nor pressure, with a uniform pick
    /// from [`EASY_POOL`]. Stops when the target is met, nothing is
    /// replaceable, or after [`SMOOTHING_ITERATION_CAP`] iterations. A
    /// non-positive `previous` leaves the roster unchanged.
    pub fn smooth<R>(&self, letters: &[LetterId], previous: f64, rng: &mut R) -> Vec<LetterId>
    where
        R: UnitRng + ?Sized,
    {
        let mut smoothed = letters.to_vec();
        if previous.is_nan() || previous <= 0.0 {
            return smoothed;
        }

        let max_allowed = previous * (1.0 + self.config.max_wave_increase);
        let mut iterations = 0;
        while self.composite_difficulty(&smoothed) > max_allowed
            && iterations < SMOOTHING_ITERATION_CAP
        {
            let Some(index) = self.replaceable_index(&smoothed) else {
                break;
            };
            smoothed[index] = easy_letter(rng);
            iterations += 1;
        }

        let reached = self.composite_difficulty(&smoothed);
        if reached > max_allowed {
            log::debug!(
                "smoothing stopped at {reached:.3} above target {max_allowed:.3} after {iterations} iterations"
            );
        } else if iterations > 0 {
            log::debug!("smoothing replaced {iterations} letters to reach {reached:.3}");
        }
        smoothed
    }

    fn replaceable_index(&self, letters: &[LetterId]) -> Option<usize> {
        letters
            .iter()
            .position(|letter| self.is_pressure(*letter))
            .or_else(|| {
                letters
                    .iter()
                    .position(|letter| !is_common(*letter) && !self.is_pressure(*letter))
            })
    }
}

/// Whether the letter belongs to [`COMMON_LETTERS`].
#[must_use]
pub fn is_common(letter: LetterId) -> bool {
    COMMON_LETTERS.contains(&letter)
}

fn easy_letter<R>(rng: &mut R) -> LetterId
where
    R: UnitRng + ?Sized,
{
    EASY_POOL[rng.next_index(EASY_POOL.len())]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use LetterId::*;

    fn custom(ratio: f64, increase: f64, pressure: &[LetterId]) -> DifficultyGovernor {
        DifficultyGovernor::new(&DifficultyConfig {
            max_pressure_ratio: ratio,
            max_wave_increase: increase,
            pressure_letters: pressure.iter().copied().collect(),
        })
    }

    #[test]
    fn composite_scores_by_letter_class() {
        let governor = DifficultyGovernor::default();
        assert_relative_eq!(governor.composite_difficulty(&[]), 0.0);
        assert_relative_eq!(governor.composite_difficulty(&[X]), 2.0);
        assert_relative_eq!(governor.composite_difficulty(&[X, X, X]), 2.0);
        assert_relative_eq!(governor.composite_difficulty(&[X, A]), 1.5);
        assert_relative_eq!(governor.composite_difficulty(&[F, G]), 1.5);
        assert!(governor.composite_difficulty(&[X, Z, Q]) > governor.composite_difficulty(&[A, B, C]));
        assert_relative_eq!(
            governor.composite_difficulty(&[X, A, Z, B]),
            governor.composite_difficulty(&[B, Z, A, X])
        );
    }

    #[test]
    fn cap_keeps_earliest_pressure_letters() {
        let governor = DifficultyGovernor::default();
        let letters = [X, A, Z, B, Q, C, J, D, K, E];
        let capped = governor.cap_pressure(&letters, &mut || 0.0);
        assert_eq!(capped, vec![X, A, Z, B, Q, C, A, D, A, E]);
    }

    #[test]
    fn cap_limits_pressure_share() {
        let governor = DifficultyGovernor::default();
        let letters = [X, X, X, X, A, B, C, D, E, F];
        let capped = governor.cap_pressure(&letters, &mut || 0.5);
        assert_eq!(capped.len(), letters.len());
        assert_eq!(capped.iter().filter(|l| governor.is_pressure(**l)).count(), 3);
        assert_eq!(&capped[4..], &letters[4..]);
    }

    #[test]
    fn cap_with_custom_pressure_set() {
        let governor = custom(0.1, 0.15, &[X, Z]);
        let letters = [X, X, X, A, B, C, D, E, F, G];
        let capped = governor.cap_pressure(&letters, &mut || 0.99);
        assert_eq!(capped[..3], [X, E, E]);
    }

    #[test]
    fn cap_leaves_calm_rosters_alone() {
        let governor = DifficultyGovernor::default();
        assert_eq!(governor.cap_pressure(&[A, B, C, D], &mut || 0.5), vec![A, B, C, D]);
        assert!(governor.cap_pressure(&[], &mut || 0.5).is_empty());
        let capped = governor.cap_pressure(&[A, B, C, Y, Z], &mut || 0.5);
        assert_eq!(capped[..4], [A, B, C, Y]);
    }

    #[test]
    fn smoothing_pulls_difficulty_under_target() {
        let governor = DifficultyGovernor::default();
        let smoothed = governor.smooth(&[X, Z, Q, J, K], 1.0, &mut || 0.5);
        assert!(governor.composite_difficulty(&smoothed) <= 1.15 + 1e-9);
        assert_eq!(smoothed.len(), 5);
    }

    #[test]
    fn smoothing_without_baseline_is_identity() {
        let governor = DifficultyGovernor::default();
        assert_eq!(governor.smooth(&[X, Z], 0.0, &mut || 0.5), vec![X, Z]);
        assert_eq!(governor.smooth(&[X, Z], -3.0, &mut || 0.5), vec![X, Z]);
        assert_eq!(governor.smooth(&[A, B, C], 2.0, &mut || 0.5), vec![A, B, C]);
    }

    #[test]
    fn smoothing_replaces_first_occurrence_first() {
        let governor = custom(0.3, 0.05, &[X, Z]);
        let smoothed = governor.smooth(&[X, A, B], 1.0, &mut || 0.0);
        assert_eq!(smoothed, vec![A, A, B]);

        let governor = DifficultyGovernor::default();
        let smoothed = governor.smooth(&[A, F, G], 1.1, &mut || 0.2);
        assert_eq!(smoothed, vec![A, B, G]);
    }

    #[test]
    fn smoothing_stops_when_nothing_is_replaceable() {
        let governor = DifficultyGovernor::default();
        let smoothed = governor.smooth(&[A, B], 0.5, &mut || 0.5);
        assert_eq!(smoothed, vec![A, B]);
    }

    #[test]
    fn out_of_range_ratios_are_clamped() {
        let governor = custom(4.0, -1.0, &[X]);
        assert_relative_eq!(governor.config().max_pressure_ratio, 1.0);
        assert_relative_eq!(governor.config().max_wave_increase, 0.0);
        let governor = custom(f64::NAN, 0.2, &[X]);
        assert_relative_eq!(governor.config().max_pressure_ratio, 0.0);
    }
}
