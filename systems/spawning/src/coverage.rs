//! Load-time check that every archetype's behaviors exist.

use std::fmt;

use letter_siege_archetypes::ArchetypeRegistry;
use letter_siege_core::LetterId;
use letter_siege_system_behaviors::BehaviorRegistry;
use thiserror::Error;

/// Which behavior table an unresolved id was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorKind {
    /// Movement table.
    Movement,
    /// Attack table.
    Attack,
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movement => f.write_str("movement"),
            Self::Attack => f.write_str("attack"),
        }
    }
}

/// Behavior id referenced by an archetype but absent from the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingBehavior {
    /// Archetype that references the id.
    pub letter: LetterId,
    /// Table the id was looked up in.
    pub kind: BehaviorKind,
    /// Unresolved identifier.
    pub id: String,
}

impl fmt::Display for MissingBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} `{}`", self.letter, self.kind, self.id)
    }
}

/// Raised when archetypes reference behaviors the registry does not know.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unresolved behaviors: {}", join(.missing))]
pub struct CoverageError {
    /// Every unresolved reference in alphabetical letter order.
    pub missing: Vec<MissingBehavior>,
}

fn join(missing: &[MissingBehavior]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Confirms every archetype's movement and attack ids resolve in `behaviors`.
///
/// # Errors
///
/// Returns a [`CoverageError`] listing every unresolved reference.
pub fn verify_behavior_coverage(
    archetypes: &ArchetypeRegistry,
    behaviors: &BehaviorRegistry,
) -> Result<(), CoverageError> {
    let mut missing = Vec::new();
    for archetype in archetypes.iter() {
        if !behaviors.has_movement(&archetype.movement_id) {
            missing.push(MissingBehavior {
                letter: archetype.letter,
                kind: BehaviorKind::Movement,
                id: archetype.movement_id.clone(),
            });
        }
        if !behaviors.has_attack(&archetype.attack_id) {
            missing.push(MissingBehavior {
                letter: archetype.letter,
                kind: BehaviorKind::Attack,
                id: archetype.attack_id.clone(),
            });
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoverageError { missing })
    }
}

#[cfg(test)]
mod tests {
    use letter_siege_archetypes::EMBEDDED_LETTERS;
    use letter_siege_system_behaviors::movement;

    use super::*;

    #[test]
    fn standard_behaviors_cover_embedded_archetypes() {
        let archetypes = ArchetypeRegistry::from_json(EMBEDDED_LETTERS).expect("valid data");
        assert_eq!(
            verify_behavior_coverage(&archetypes, &BehaviorRegistry::standard()),
            Ok(())
        );
    }

    #[test]
    fn every_gap_is_reported() {
        let archetypes = ArchetypeRegistry::from_json(EMBEDDED_LETTERS).expect("valid data");
        let mut behaviors = BehaviorRegistry::new();
        behaviors.register_movement("glide_horizontal", movement::glide_horizontal);

        let error = verify_behavior_coverage(&archetypes, &behaviors).expect_err("gaps");
        let ant_gaps: Vec<&MissingBehavior> = error
            .missing
            .iter()
            .filter(|gap| gap.letter == LetterId::A)
            .collect();
        assert_eq!(ant_gaps.len(), 1);
        assert_eq!(ant_gaps[0].kind, BehaviorKind::Attack);
        assert_eq!(error.missing.iter().filter(|gap| gap.kind == BehaviorKind::Attack).count(), 26);
        assert!(error.to_string().contains("A attack `pellet_slow`"));
    }
}
