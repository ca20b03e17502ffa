//! Lingering circular effects left behind by advanced attacks.

use letter_siege_core::{AreaEffectDescriptor, AreaEffectKind, Vec2};

/// Largest slow applied by a slow field at its center.
pub const MAX_SLOW: f32 = 0.7;
/// Largest slow applied by ink at its center.
pub const MAX_INK_SLOW: f32 = 0.5;
/// Damage per tick dealt by a full-strength damage field.
pub const DAMAGE_PER_STRENGTH: f32 = 2.0;

/// Identifier of an area effect within one [`AreaEffectField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaEffectId(u32);

impl AreaEffectId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Area effect together with its age.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveAreaEffect {
    /// Identifier assigned on insertion.
    pub id: AreaEffectId,
    /// Effect parameters, sanitized on insertion.
    pub descriptor: AreaEffectDescriptor,
    /// Milliseconds since the effect was added.
    pub elapsed_ms: f32,
}

impl ActiveAreaEffect {
    /// Strength of the effect at `point`, or `None` outside its radius.
    ///
    /// Strength falls off linearly from the full intensity at the center to
    /// zero at the edge.
    #[must_use]
    pub fn strength_at(&self, point: Vec2) -> Option<f32> {
        let distance = point.distance(self.descriptor.position);
        let radius = self.descriptor.radius;
        if distance > radius {
            return None;
        }
        let falloff = if radius > 0.0 { 1.0 - distance / radius } else { 1.0 };
        Some(self.descriptor.intensity * falloff)
    }
}

/// Aggregate of every area effect touching one point.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvancedEffects {
    /// Multiplier for movement speed, `1.0` when unaffected.
    pub slow_multiplier: f32,
    /// Damage to apply this tick.
    pub damage: f32,
    /// Whether any ink cloud covers the point.
    pub has_ink: bool,
    /// Effects that contributed, in insertion order.
    pub affected_by: Vec<AreaEffectId>,
}

impl Default for AdvancedEffects {
    fn default() -> Self {
        Self {
            slow_multiplier: 1.0,
            damage: 0.0,
            has_ink: false,
            affected_by: Vec::new(),
        }
    }
}

impl AdvancedEffects {
    /// Whether no effect touched the point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.affected_by.is_empty()
    }

    /// Share of `dt_ms` a slowed entity gets to move for.
    #[must_use]
    pub fn movement_dt(&self, dt_ms: f32) -> f32 {
        dt_ms * self.slow_multiplier.clamp(0.0, 1.0)
    }

    /// Subtracts this tick's damage from `hp`.
    pub fn apply_damage(&self, hp: &mut f32) {
        if self.damage > 0.0 {
            *hp -= self.damage;
        }
    }
}

/// Always-on collection of area effects that ages and expires them.
#[derive(Clone, Debug)]
pub struct AreaEffectField {
    effects: Vec<ActiveAreaEffect>,
    next_id: u32,
}

impl Default for AreaEffectField {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaEffectField {
    /// Creates an empty field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            effects: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds an effect and returns its identifier.
    ///
    /// Intensity is clamped to `0.0..=1.0`; radius and duration to non-negative values.
    pub fn add(&mut self, descriptor: AreaEffectDescriptor) -> AreaEffectId {
        let id = AreaEffectId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        let descriptor = AreaEffectDescriptor {
            radius: finite_or_zero(descriptor.radius).max(0.0),
            duration_ms: finite_or_zero(descriptor.duration_ms).max(0.0),
            intensity: finite_or_zero(descriptor.intensity).clamp(0.0, 1.0),
            ..descriptor
        };
        self.effects.push(ActiveAreaEffect {
            id,
            descriptor,
            elapsed_ms: 0.0,
        });
        log::trace!("area effect {} added: {:?}", id.get(), descriptor.kind);
        id
    }

    /// Removes an effect early. Returns whether it was present.
    pub fn remove(&mut self, id: AreaEffectId) -> bool {
        match self.effects.iter().position(|effect| effect.id == id) {
            Some(index) => {
                let _ = self.effects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Ages every effect by `dt_ms` and drops the ones that expired.
    pub fn update(&mut self, dt_ms: f32) {
        let dt_ms = dt_ms.max(0.0);
        self.effects.retain_mut(|effect| {
            effect.elapsed_ms += dt_ms;
            effect.elapsed_ms < effect.descriptor.duration_ms
        });
    }

    /// Combines every effect whose radius contains `point`.
    ///
    /// The strongest slow wins and damage sums.
    #[must_use]
    pub fn query(&self, point: Vec2) -> AdvancedEffects {
        let mut result = AdvancedEffects::default();
        for effect in &self.effects {
            let Some(strength) = effect.strength_at(point) else {
                continue;
            };
            match effect.descriptor.kind {
                AreaEffectKind::Slow => {
                    result.slow_multiplier = result.slow_multiplier.min(1.0 - strength * MAX_SLOW);
                }
                AreaEffectKind::Damage => result.damage += strength * DAMAGE_PER_STRENGTH,
                AreaEffectKind::Ink => {
                    result.has_ink = true;
                    result.slow_multiplier =
                        result.slow_multiplier.min(1.0 - strength * MAX_INK_SLOW);
                }
            }
            result.affected_by.push(effect.id);
        }
        result
    }

    /// Live effects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveAreaEffect> + '_ {
        self.effects.iter()
    }

    /// Number of live effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether no effect is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Drops every effect.
    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
