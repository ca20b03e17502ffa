//! Optional TOML tuning file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use letter_siege_system_adaptive::DifficultyConfig;
use letter_siege_system_spawning::{GridLayout, DEFAULT_BOSS_CADENCE};
use serde::Deserialize;

/// Tunables for a simulated session. Every table and key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TuningFile {
    /// Pressure cap and wave-to-wave smoothing.
    pub(crate) difficulty: DifficultyConfig,
    /// Spaced-review share.
    pub(crate) review: ReviewSettings,
    /// Spawn grid.
    pub(crate) grid: GridLayout,
    /// Session pacing.
    pub(crate) session: SessionSettings,
}

/// Share of each wave reserved for mastered letters.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ReviewSettings {
    pub(crate) percent: f64,
    pub(crate) mastered_threshold: f64,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            percent: 0.1,
            mastered_threshold: 0.8,
        }
    }
}

/// Pacing of the simulated session.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionSettings {
    pub(crate) waves: u32,
    pub(crate) wave_size: usize,
    pub(crate) seed: u64,
    pub(crate) step_ms: f32,
    pub(crate) wave_seconds: f32,
    pub(crate) boss_cadence: u32,
    /// Share of the remaining gap to full mastery gained per wave a letter appears in.
    pub(crate) learning_rate: f64,
    /// Interval between the synthetic player's shots.
    pub(crate) player_fire_ms: f32,
    /// Damage the synthetic player deals to a boss per shot.
    pub(crate) boss_damage: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            waves: 10,
            wave_size: 8,
            seed: 1,
            step_ms: 16.0,
            wave_seconds: 20.0,
            boss_cadence: DEFAULT_BOSS_CADENCE,
            learning_rate: 0.25,
            player_fire_ms: 450.0,
            boss_damage: 4.0,
        }
    }
}

impl TuningFile {
    /// Reads and parses a tuning file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid tuning file at {}", path.display()))
    }

    /// Parses tuning TOML.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let file: Self = toml::from_str(contents).context("failed to parse tuning toml contents")?;
        Ok(file.sanitized())
    }

    /// Copy with out-of-range values clamped.
    pub(crate) fn sanitized(&self) -> Self {
        let session = self.session;
        Self {
            difficulty: self.difficulty.sanitized(),
            review: ReviewSettings {
                percent: unit(self.review.percent),
                mastered_threshold: unit(self.review.mastered_threshold),
            },
            grid: self.grid,
            session: SessionSettings {
                step_ms: positive(session.step_ms, 1.0),
                wave_seconds: positive(session.wave_seconds, 0.0),
                learning_rate: unit(session.learning_rate),
                player_fire_ms: positive(session.player_fire_ms, 1.0),
                boss_damage: positive(session.boss_damage, 0.0),
                ..session
            },
        }
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn positive(value: f32, floor: f32) -> f32 {
    if value.is_finite() {
        value.max(floor)
    } else {
        floor
    }
}
