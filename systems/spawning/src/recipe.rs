//! Intermediate roster description between selection and instantiation.

use std::collections::BTreeMap;

use letter_siege_archetypes::ArchetypeRegistry;
use letter_siege_core::LetterId;

/// Movement used when a recipe has no loadout for a letter.
pub const FALLBACK_MOVEMENT: &str = "glide_horizontal";
/// Attack used when a recipe has no loadout for a letter.
pub const FALLBACK_ATTACK: &str = "pellet_slow";

/// Behaviors and hit points assigned to one letter.
#[derive(Clone, Debug, PartialEq)]
pub struct Loadout {
    /// Movement behavior identifier.
    pub movement_id: String,
    /// Attack behavior identifier.
    pub attack_id: String,
    /// Starting hit points.
    pub hp: f32,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            movement_id: FALLBACK_MOVEMENT.to_owned(),
            attack_id: FALLBACK_ATTACK.to_owned(),
            hp: 1.0,
        }
    }
}

/// Ordered letters plus the loadout of each distinct letter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnRecipe {
    /// Letters in spawn order.
    pub letters: Vec<LetterId>,
    /// Loadout per letter.
    pub loadouts: BTreeMap<LetterId, Loadout>,
}

impl SpawnRecipe {
    /// Loadout for the letter, falling back to [`Loadout::default`].
    #[must_use]
    pub fn loadout(&self, letter: LetterId) -> Loadout {
        self.loadouts.get(&letter).cloned().unwrap_or_default()
    }
}

/// Builds a recipe for `letters` from archetype data.
///
/// Hit points are rounded to the nearest whole number with a floor of one.
/// Letters without an archetype get the fallback loadout.
#[must_use]
pub fn build_recipe_from_archetypes(
    archetypes: &ArchetypeRegistry,
    letters: &[LetterId],
) -> SpawnRecipe {
    let mut loadouts = BTreeMap::new();
    for letter in letters {
        let _ = loadouts.entry(*letter).or_insert_with(|| {
            archetypes
                .get(*letter)
                .map_or_else(Loadout::default, |archetype| Loadout {
                    movement_id: archetype.movement_id.clone(),
                    attack_id: archetype.attack_id.clone(),
                    hp: archetype.base_hp.round().max(1.0) as f32,
                })
        });
    }
    SpawnRecipe {
        letters: letters.to_vec(),
        loadouts,
    }
}
