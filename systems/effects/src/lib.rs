#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Telegraph warnings and lingering area effects raised by advanced attacks.
//!
//! Both collections are owned by the encounter that drives them. Each fixed
//! step should call [`AdvancedEffectsSystem::update`] before querying so that
//! expired entries never influence the current step.

pub mod area;
pub mod telegraph;

pub use area::{ActiveAreaEffect, AdvancedEffects, AreaEffectField, AreaEffectId};
pub use telegraph::{ActiveTelegraph, TelegraphBoard};

use letter_siege_core::{AreaEffectDescriptor, Enemy, TelegraphDescriptor};

/// Telegraph board and area-effect field advanced together.
#[derive(Clone, Debug, Default)]
pub struct AdvancedEffectsSystem {
    telegraphs: TelegraphBoard,
    areas: AreaEffectField,
}

impl AdvancedEffectsSystem {
    /// Creates a system with no live entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a telegraph warning.
    pub fn post_telegraph(&mut self, descriptor: TelegraphDescriptor) {
        self.telegraphs.post(descriptor);
    }

    /// Adds an area effect and returns its identifier.
    pub fn add_area_effect(&mut self, descriptor: AreaEffectDescriptor) -> AreaEffectId {
        self.areas.add(descriptor)
    }

    /// Ages telegraphs and area effects.
    pub fn update(&mut self, dt_ms: f32) {
        self.telegraphs.update(dt_ms);
        self.areas.update(dt_ms);
    }

    /// Deals the damage of every field covering the enemy and reports the
    /// combined effects. The caller scales the enemy's movement step with
    /// [`AdvancedEffects::movement_dt`].
    pub fn apply_to_enemy(&self, enemy: &mut Enemy) -> AdvancedEffects {
        let effects = self.areas.query(enemy.motion.position);
        effects.apply_damage(&mut enemy.hp);
        effects
    }

    /// Live telegraph warnings.
    #[must_use]
    pub fn telegraphs(&self) -> &TelegraphBoard {
        &self.telegraphs
    }

    /// Live area effects.
    #[must_use]
    pub fn areas(&self) -> &AreaEffectField {
        &self.areas
    }

    /// Drops every telegraph and area effect.
    pub fn clear(&mut self) {
        self.telegraphs.clear();
        self.areas.clear();
    }
}

#[cfg(test)]
mod tests {
    use letter_siege_core::{AreaEffectKind, EnemyId, TelegraphShape, Vec2};

    use super::*;

    #[test]
    fn enemies_inside_a_burning_slow_zone_are_hurt_and_slowed() {
        let mut system = AdvancedEffectsSystem::new();
        let _ = system.add_area_effect(AreaEffectDescriptor {
            position: Vec2::new(100.0, 100.0),
            radius: 50.0,
            duration_ms: 500.0,
            kind: AreaEffectKind::Damage,
            intensity: 0.5,
        });
        let _ = system.add_area_effect(AreaEffectDescriptor {
            position: Vec2::new(100.0, 100.0),
            radius: 50.0,
            duration_ms: 500.0,
            kind: AreaEffectKind::Slow,
            intensity: 1.0,
        });
        let mut enemy = Enemy::new(EnemyId::new(1), Vec2::new(100.0, 100.0), "hover_bob", "none", 3.0);

        let effects = system.apply_to_enemy(&mut enemy);

        assert_eq!(effects.affected_by.len(), 2);
        assert!((enemy.hp - 2.0).abs() < 1e-6);
        assert!((effects.movement_dt(10.0) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn update_ages_both_collections() {
        let mut system = AdvancedEffectsSystem::new();
        system.post_telegraph(TelegraphDescriptor {
            position: Vec2::ZERO,
            shape: TelegraphShape::Area,
            duration_ms: 100.0,
            color: "#800080",
        });
        let _ = system.add_area_effect(AreaEffectDescriptor {
            position: Vec2::ZERO,
            radius: 10.0,
            duration_ms: 300.0,
            kind: AreaEffectKind::Ink,
            intensity: 0.8,
        });

        system.update(150.0);
        assert!(system.telegraphs().is_empty());
        assert_eq!(system.areas().len(), 1);

        system.clear();
        assert!(system.areas().is_empty());
    }
}
