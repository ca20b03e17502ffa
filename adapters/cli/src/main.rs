#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Letter Siege session.
//!
//! Waves are generated from a synthetic learner's mastery, fought with fixed
//! steps and summarised one line per wave. Every fifth wave (by default) is a
//! boss encounter.

mod config;
mod logging;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use letter_siege_archetypes::ArchetypeRegistry;
use letter_siege_core::WELCOME_BANNER;

use crate::{config::TuningFile, session::Session};

/// Headless encounter simulator for Letter Siege.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of waves to simulate.
    #[arg(long)]
    waves: Option<u32>,
    /// Letters requested per regular wave.
    #[arg(long)]
    wave_size: Option<usize>,
    /// Session seed; each wave derives its own seed from it.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML tuning file with [difficulty], [review], [grid] and [session] tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed simulation step in milliseconds.
    #[arg(long)]
    step_ms: Option<f32>,
    /// Longest a wave may last, in seconds.
    #[arg(long)]
    wave_seconds: Option<f32>,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Tuning from the optional file with command-line overrides applied.
    fn tuning(&self) -> Result<TuningFile> {
        let mut tuning = match &self.config {
            Some(path) => TuningFile::load(path)?,
            None => TuningFile::default(),
        };
        let session = &mut tuning.session;
        if let Some(waves) = self.waves {
            session.waves = waves;
        }
        if let Some(wave_size) = self.wave_size {
            session.wave_size = wave_size;
        }
        if let Some(seed) = self.seed {
            session.seed = seed;
        }
        if let Some(step_ms) = self.step_ms {
            session.step_ms = step_ms;
        }
        if let Some(wave_seconds) = self.wave_seconds {
            session.wave_seconds = wave_seconds;
        }
        Ok(tuning.sanitized())
    }
}

/// Entry point for the Letter Siege command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = args.tuning()?;
    let threshold = tuning.review.mastered_threshold;
    let archetypes = ArchetypeRegistry::load().context("failed to load letter archetypes")?;
    let mut session = Session::new(archetypes, tuning)?;

    println!("{WELCOME_BANNER}");
    for index in 0..session.waves() {
        let summary = session.run_wave(index);
        println!("{summary}");
    }

    let mastered = session
        .mastery()
        .iter()
        .filter(|(_, stat)| stat.mastery >= threshold)
        .count();
    log::info!("{mastered} letters mastered after {} waves", session.waves());
    Ok(())
}
