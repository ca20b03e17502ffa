#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-letter archetype registry.
//!
//! One archetype exists for every letter of the alphabet. The registry is
//! built from the `letters.json` document shipped with the crate, validated
//! as a whole, and cached process-wide so every system shares the same
//! immutable copy.

mod schema;

use std::sync::{Arc, Mutex, PoisonError};

use letter_siege_core::{LetterId, ALL_LETTERS};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use schema::{FieldViolation, LETTERS_SCHEMA};

/// Archetype document compiled into the binary.
pub const EMBEDDED_LETTERS: &str = include_str!("../data/letters.json");

static CACHE: Mutex<Option<Arc<ArchetypeRegistry>>> = Mutex::new(None);

/// Immutable definition of the enemy bound to a letter.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LetterArchetype {
    /// Letter the archetype belongs to.
    pub letter: LetterId,
    /// Display name.
    pub name: String,
    /// Difficulty class between 1 and 5.
    pub tier: u8,
    /// Starting hit points, at least 1.
    #[serde(rename = "baseHP")]
    pub base_hp: f64,
    /// Score awarded on defeat.
    pub base_points: u32,
    /// Movement behavior identifier.
    pub movement_id: String,
    /// Attack behavior identifier.
    pub attack_id: String,
    /// Voice-line asset key.
    pub audio_phoneme: String,
    /// Sprite frame keys.
    pub sprite_set: Vec<String>,
    /// Color theme used by the renderer.
    pub color_theme: String,
    /// Optional free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LetterArchetype {
    /// Whether the archetype carries the provided tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}

/// Errors raised while building the registry. All of them are fatal.
#[derive(Debug, Error)]
pub enum ArchetypeError {
    /// The document is not valid JSON.
    #[error("archetype data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The bundled schema itself failed to compile.
    #[error("archetype schema is invalid: {0}")]
    InvalidSchema(String),
    /// One or more records violate the schema.
    #[error("archetype schema validation failed: {}", join_violations(.violations))]
    Schema {
        /// Every violation found in the batch.
        violations: Vec<FieldViolation>,
    },
    /// A letter is defined more than once.
    #[error("duplicate archetype letter: {letter}")]
    Duplicate {
        /// Letter that appeared twice.
        letter: LetterId,
    },
    /// At least one letter has no archetype.
    #[error("archetypes missing for letters: {}", join_letters(.missing))]
    Incomplete {
        /// Letters without a definition.
        missing: Vec<LetterId>,
    },
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_letters(letters: &[LetterId]) -> String {
    letters.iter().map(|letter| letter.as_char()).collect()
}

/// Read-only lookup from letter to archetype.
#[derive(Clone, Debug, PartialEq)]
pub struct ArchetypeRegistry {
    entries: Vec<LetterArchetype>,
}

impl ArchetypeRegistry {
    /// Builds an uncached registry from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchetypeError`] when the document fails to parse, any
    /// record violates the schema, a letter repeats, or a letter is missing.
    pub fn from_json(source: &str) -> Result<Self, ArchetypeError> {
        let document: Value = serde_json::from_str(source)?;
        schema::validate(&document)?;
        let records: Vec<LetterArchetype> = serde_json::from_value(document)?;

        let mut slots: Vec<Option<LetterArchetype>> = vec![None; ALL_LETTERS.len()];
        for record in records {
            let slot = &mut slots[record.letter.index()];
            if slot.is_some() {
                return Err(ArchetypeError::Duplicate {
                    letter: record.letter,
                });
            }
            *slot = Some(record);
        }

        let missing: Vec<LetterId> = ALL_LETTERS
            .iter()
            .copied()
            .filter(|letter| slots[letter.index()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ArchetypeError::Incomplete { missing });
        }

        let entries: Vec<LetterArchetype> = slots.into_iter().flatten().collect();
        log::debug!("validated {} letter archetypes", entries.len());
        Ok(Self { entries })
    }

    /// Returns the process-wide registry, building it from [`EMBEDDED_LETTERS`] on first use.
    ///
    /// # Errors
    ///
    /// Propagates the [`ArchetypeError`] raised while validating the embedded document.
    pub fn load() -> Result<Arc<Self>, ArchetypeError> {
        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(registry) = cache.as_ref() {
            return Ok(Arc::clone(registry));
        }
        let registry = Arc::new(Self::from_json(EMBEDDED_LETTERS)?);
        *cache = Some(Arc::clone(&registry));
        Ok(registry)
    }

    /// Drops the cached registry so the next [`ArchetypeRegistry::load`] rebuilds it.
    pub fn clear_cache() {
        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        *cache = None;
    }

    /// Archetype bound to the letter, or `None` when the registry has no entry for it.
    #[must_use]
    pub fn get(&self, letter: LetterId) -> Option<&LetterArchetype> {
        self.entries.get(letter.index())
    }

    /// Resolves textual input such as `"Q"`; returns `None` for anything but a single letter.
    #[must_use]
    pub fn lookup(&self, letter: &str) -> Option<&LetterArchetype> {
        letter.parse::<LetterId>().ok().and_then(|letter| self.get(letter))
    }

    /// Iterator over archetypes in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &LetterArchetype> + '_ {
        self.entries.iter()
    }

    /// Number of archetypes, always 26 for a valid registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty. A validated registry never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
