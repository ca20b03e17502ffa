#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Letter Siege encounter engine.
//!
//! This crate defines the plain data that flows between systems. The
//! archetype registry and the adaptive selector decide *which* letters fight,
//! the spawning system turns those letters into [`Enemy`] values, and the
//! combat and boss systems mutate enemies, bosses and [`Projectile`] values
//! once per fixed simulation step. Everything that leaves the engine for an
//! external collaborator (telegraph visuals, area effects, boss adds) is
//! described by a descriptor type in this crate and delivered through an
//! [`EmitContext`].

pub mod rng;

use std::{collections::BTreeMap, fmt, str::FromStr};

pub use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use rng::{derive_wave_seed, SeededUnitRng, UnitRng};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Letter Siege.";

/// Letters of the alphabet that enemies are bound to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[allow(missing_docs)]
pub enum LetterId {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

/// Every letter in alphabetical order.
pub const ALL_LETTERS: [LetterId; 26] = [
    LetterId::A,
    LetterId::B,
    LetterId::C,
    LetterId::D,
    LetterId::E,
    LetterId::F,
    LetterId::G,
    LetterId::H,
    LetterId::I,
    LetterId::J,
    LetterId::K,
    LetterId::L,
    LetterId::M,
    LetterId::N,
    LetterId::O,
    LetterId::P,
    LetterId::Q,
    LetterId::R,
    LetterId::S,
    LetterId::T,
    LetterId::U,
    LetterId::V,
    LetterId::W,
    LetterId::X,
    LetterId::Y,
    LetterId::Z,
];

impl LetterId {
    /// Zero-based alphabetical position of the letter.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case character representing the letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Resolves an ASCII letter, accepting either case.
    #[must_use]
    pub fn from_char(value: char) -> Option<Self> {
        if !value.is_ascii_alphabetic() {
            return None;
        }
        let offset = (value.to_ascii_uppercase() as u8).checked_sub(b'A')?;
        ALL_LETTERS.get(usize::from(offset)).copied()
    }
}

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned when text does not name exactly one letter.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{input}` is not a single letter A-Z")]
pub struct ParseLetterError {
    input: String,
}

impl FromStr for LetterId {
    type Err = ParseLetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => Self::from_char(value),
            _ => None,
        }
        .ok_or_else(|| ParseLetterError {
            input: s.to_owned(),
        })
    }
}

/// Per-letter proficiency record owned by the progress subsystem.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LetterStat {
    /// Proficiency in `0.0..=1.0`; out-of-range values are clamped on read.
    pub mastery: f64,
}

/// Sparse mapping from letter to mastery. Letters without an entry count as unmastered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasteryMap {
    stats: BTreeMap<LetterId, LetterStat>,
}

impl MasteryMap {
    /// Creates an empty mastery map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the mastery value for a letter, replacing any previous value.
    pub fn set(&mut self, letter: LetterId, mastery: f64) {
        let _ = self.stats.insert(letter, LetterStat { mastery });
    }

    /// Mastery for the letter clamped into `0.0..=1.0`, zero when absent or not a number.
    #[must_use]
    pub fn mastery(&self, letter: LetterId) -> f64 {
        self.stats
            .get(&letter)
            .map(|stat| stat.mastery)
            .filter(|value| !value.is_nan())
            .map_or(0.0, |value| value.clamp(0.0, 1.0))
    }

    /// Iterator over recorded entries in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (LetterId, LetterStat)> + '_ {
        self.stats.iter().map(|(letter, stat)| (*letter, *stat))
    }

    /// Number of letters with a recorded stat.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether no letter has a recorded stat.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

impl FromIterator<(LetterId, f64)> for MasteryMap {
    fn from_iter<T: IntoIterator<Item = (LetterId, f64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (letter, mastery) in iter {
            map.set(letter, mastery);
        }
        map
    }
}

/// Playfield dimensions in world units. The origin sits at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Horizontal extent of the playfield.
    pub width: f32,
    /// Vertical extent of the playfield.
    pub height: f32,
}

impl Bounds {
    /// Creates bounds with the provided extents, clamping negative values to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Whether the point lies inside the bounds grown by `margin` on every side.
    #[must_use]
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= -margin
            && point.y <= self.height + margin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Position and velocity of a moving body. Velocity is expressed in units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    /// Current position in world units.
    pub position: Vec2,
    /// Current velocity in world units per second.
    pub velocity: Vec2,
}

impl Motion {
    /// Creates a stationary body at the provided position.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }
}

/// Scratch state owned by whichever movement behavior drives an entity.
///
/// Movement functions are stateless; anything they need to remember between
/// ticks lives here, one instance per entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementState {
    /// Milliseconds the current behavior has been running.
    pub clock_ms: f32,
    /// Reference point captured on the first tick for oscillating paths.
    pub anchor: Option<Vec2>,
    /// Discrete step counter for stepping paths.
    pub step: u32,
    /// Signed travel direction, `1.0` or `-1.0` once primed.
    pub direction: f32,
    /// Whether the behavior initialised its velocity or direction.
    pub primed: bool,
}

/// Lifecycle of attacks that charge, telegraph and then activate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvancedPhase {
    /// Waiting for the next cycle.
    #[default]
    Idle,
    /// Telegraph shown, attack not yet active.
    Charging,
    /// Attack is emitting.
    Active,
    /// Recovering before returning to idle.
    Cooldown,
}

/// Scratch state owned by whichever attack behavior drives an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttackState {
    /// Elapsed time accumulated toward the next shot.
    pub accumulator_ms: f32,
    /// Elapsed time within the current attack cycle.
    pub cycle_ms: f32,
    /// Number of shots fired since the behavior started.
    pub shots: u32,
    /// Alternating flag for left/right patterns.
    pub flip: bool,
    /// Current lifecycle phase for charge/telegraph attacks.
    pub phase: AdvancedPhase,
    /// Elapsed time inside [`AttackState::phase`].
    pub phase_ms: f32,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Monotonic identifier source. Each encounter owns its own allocator.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Creates an allocator whose first identifier is `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocates the next enemy identifier.
    pub fn next_enemy(&mut self) -> EnemyId {
        EnemyId::new(self.advance())
    }

    /// Allocates the next projectile identifier.
    pub fn next_projectile(&mut self) -> ProjectileId {
        ProjectileId::new(self.advance())
    }

    fn advance(&mut self) -> u32 {
        let value = self.next;
        self.next = self.next.wrapping_add(1).max(1);
        value
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable runtime enemy driven by one movement and one attack behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Identifier allocated by the spawner.
    pub id: EnemyId,
    /// Letter the enemy is bound to, absent for boss adds.
    pub letter: Option<LetterId>,
    /// Position and velocity.
    pub motion: Motion,
    /// Remaining hit points.
    pub hp: f32,
    /// Movement behavior identifier.
    pub movement_id: String,
    /// Attack behavior identifier.
    pub attack_id: String,
    /// Scratch state owned by the movement behavior.
    pub movement_state: MovementState,
    /// Scratch state owned by the attack behavior.
    pub attack_state: AttackState,
}

impl Enemy {
    /// Creates a stationary enemy with fresh behavior state.
    #[must_use]
    pub fn new(
        id: EnemyId,
        position: Vec2,
        movement_id: impl Into<String>,
        attack_id: impl Into<String>,
        hp: f32,
    ) -> Self {
        Self {
            id,
            letter: None,
            motion: Motion::at(position),
            hp,
            movement_id: movement_id.into(),
            attack_id: attack_id.into(),
            movement_state: MovementState::default(),
            attack_state: AttackState::default(),
        }
    }

    /// Binds the enemy to a letter.
    #[must_use]
    pub fn with_letter(mut self, letter: LetterId) -> Self {
        self.letter = Some(letter);
        self
    }

    /// Whether the enemy still has hit points.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

/// Request to create a projectile, raised by attack behaviors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSpawn {
    /// Launch position.
    pub position: Vec2,
    /// Launch velocity in units per second.
    pub velocity: Vec2,
    /// Collision radius.
    pub radius: f32,
}

/// Loose projectile moving with constant velocity until culled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// Identifier allocated when the projectile was created.
    pub id: ProjectileId,
    /// Current position.
    pub position: Vec2,
    /// Constant velocity in units per second.
    pub velocity: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Cleared once the projectile leaves the playfield; purged afterwards.
    pub alive: bool,
}

impl Projectile {
    /// Creates a live projectile from a spawn request. Negative radii are clamped to zero.
    #[must_use]
    pub fn from_spawn(id: ProjectileId, spawn: ProjectileSpawn) -> Self {
        Self {
            id,
            position: spawn.position,
            velocity: spawn.velocity,
            radius: spawn.radius.max(0.0),
            alive: true,
        }
    }
}

/// Shape hint attached to a telegraph warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TelegraphShape {
    /// Vertical beam column.
    Beam,
    /// Downward cone.
    Cone,
    /// Circular ground area.
    Area,
    /// Chain lightning target marker.
    Chain,
}

/// Timed warning shown before an attack becomes active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelegraphDescriptor {
    /// Anchor position of the warning.
    pub position: Vec2,
    /// Shape of the warning.
    pub shape: TelegraphShape,
    /// How long the warning lasts in milliseconds.
    pub duration_ms: f32,
    /// Hex color of the warning.
    pub color: &'static str,
}

/// Kind of lingering area effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AreaEffectKind {
    /// Reduces movement speed.
    Slow,
    /// Deals damage every tick.
    Damage,
    /// Obscures vision and slows.
    Ink,
}

/// Lingering circular effect emitted by an attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaEffectDescriptor {
    /// Center of the effect.
    pub position: Vec2,
    /// Radius of the effect.
    pub radius: f32,
    /// Lifetime in milliseconds.
    pub duration_ms: f32,
    /// What the effect does to bodies inside it.
    pub kind: AreaEffectKind,
    /// Strength in `0.0..=1.0`.
    pub intensity: f32,
}

/// Continuous beam emitted once a beam attack activates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamDescriptor {
    /// Top-center origin of the beam.
    pub position: Vec2,
    /// Beam width.
    pub width: f32,
    /// Beam length.
    pub height: f32,
    /// Lifetime in milliseconds.
    pub duration_ms: f32,
    /// Damage dealt per hit.
    pub damage: f32,
}

/// Cue strength suggested to the audio collaborator when a boss telegraphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TelegraphIntensity {
    /// Routine warning.
    Light,
    /// Warning for a long or add-spawning phase.
    Heavy,
}

impl TelegraphIntensity {
    /// Lower-case label used to select an audio cue.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Heavy => "heavy",
        }
    }
}

/// Request to spawn a boss add (minion).
#[derive(Clone, Debug, PartialEq)]
pub struct MinionSpawn {
    /// Position the add appears at.
    pub position: Vec2,
    /// Movement behavior identifier.
    pub movement_id: String,
    /// Attack behavior identifier.
    pub attack_id: String,
    /// Starting hit points.
    pub hp: f32,
}

/// Sink through which behaviors hand their output to the outside world.
///
/// Only [`EmitContext::emit_projectile`] is mandatory. Contexts that do not
/// render telegraphs, area effects or beams may ignore them.
pub trait EmitContext {
    /// Receives a projectile launched by an attack.
    fn emit_projectile(&mut self, spawn: ProjectileSpawn);

    /// Receives a telegraph warning.
    fn emit_telegraph(&mut self, _telegraph: TelegraphDescriptor) {}

    /// Receives a lingering area effect.
    fn emit_area_effect(&mut self, _effect: AreaEffectDescriptor) {}

    /// Receives a beam.
    fn emit_beam(&mut self, _beam: BeamDescriptor) {}

    /// Positions of targets within `radius` of `origin`, nearest first.
    fn nearby_targets(&self, _origin: Vec2, _radius: f32) -> Vec<Vec2> {
        Vec::new()
    }

    /// Uniform sample in `[0, 1)` for attacks with random spread.
    fn random_unit(&mut self) -> f64 {
        0.5
    }
}

impl EmitContext for Vec<ProjectileSpawn> {
    fn emit_projectile(&mut self, spawn: ProjectileSpawn) {
        self.push(spawn);
    }
}
