#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Multi-phase boss encounters.
//!
//! A [`Boss`] reuses the ordinary movement and attack behaviors and layers
//! hit-point thresholds on top of them: crossing a threshold swaps the active
//! behaviors, opens a telegraph window and spawns the phase's adds exactly
//! once. [`BossManager`] drives one boss per step and turns its state changes
//! into edge-triggered events for the HUD, audio and enemy list.

pub mod machine;
pub mod manager;
pub mod presets;

pub use machine::{AddSpec, Boss, BossContext, BossPhase, BossState};
pub use manager::{telegraph_intensity, BossListener, BossManager, BossManagerConfig};
pub use presets::{
    boss_for_letter, crab_boss, octopus_boss, queen_boss, BOSS_LETTERS, DEFAULT_BOSS_POSITION,
};
