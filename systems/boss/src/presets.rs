//! Bosses fought at the end of boss waves.

use letter_siege_core::{LetterId, Vec2};

use crate::machine::{AddSpec, Boss, BossPhase};

/// Spawn position used when the caller has no preference.
pub const DEFAULT_BOSS_POSITION: Vec2 = Vec2::new(400.0, 100.0);

/// Letters that have a boss preset, in unlock order.
pub const BOSS_LETTERS: [LetterId; 3] = [LetterId::C, LetterId::O, LetterId::Q];

/// Crab: lateral claws, then a descending volley with three adds.
#[must_use]
pub fn crab_boss(position: Vec2) -> Boss {
    Boss::new(
        position,
        100.0,
        vec![
            BossPhase::new(0.66, "scuttle_side", "claw_lateral").with_telegraph(700.0),
            BossPhase::new(0.33, "zigzag_descent", "timed_volley")
                .with_telegraph(900.0)
                .with_adds(AddSpec::new(3, "glide_horizontal", "pellet_slow", 1.0)),
        ],
    )
}

/// Octopus: ink, then a beam with stinger adds, then a spiral summon with a swarm.
#[must_use]
pub fn octopus_boss(position: Vec2) -> Boss {
    Boss::new(
        position,
        140.0,
        vec![
            BossPhase::new(0.8, "tentacle_wave", "ink_radial_slow").with_telegraph(800.0),
            BossPhase::new(0.5, "large_oscillation", "beam_continuous")
                .with_telegraph(900.0)
                .with_adds(AddSpec::new(4, "buzz_loop", "rapid_stingers", 2.0)),
            BossPhase::new(0.25, "multi_phase_mix", "summon_minions_spiral")
                .with_telegraph(1_000.0)
                .with_adds(AddSpec::new(6, "cluster_drift", "micro_pellets_swarm", 1.0)),
        ],
    )
}

/// Queen: steady escalation with clockwork and serpent adds.
#[must_use]
pub fn queen_boss(position: Vec2) -> Boss {
    Boss::new(
        position,
        180.0,
        vec![
            BossPhase::new(0.9, "multi_phase_mix", "narrow_fast").with_telegraph(700.0),
            BossPhase::new(0.6, "track_x", "timed_volley")
                .with_telegraph(800.0)
                .with_adds(AddSpec::new(3, "clockwork_step", "timed_volley", 2.0)),
            BossPhase::new(0.3, "cross_pivot", "x_cross_lasers")
                .with_telegraph(1_000.0)
                .with_adds(AddSpec::new(4, "serpentine", "venom_arc", 2.0)),
        ],
    )
}

/// Preset boss bound to `letter`, if there is one.
#[must_use]
pub fn boss_for_letter(letter: LetterId, position: Vec2) -> Option<Boss> {
    match letter {
        LetterId::C => Some(crab_boss(position)),
        LetterId::O => Some(octopus_boss(position)),
        LetterId::Q => Some(queen_boss(position)),
        _ => None,
    }
}
