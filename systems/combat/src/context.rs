//! Emission context owned by one running encounter.

use letter_siege_core::{
    AreaEffectDescriptor, BeamDescriptor, Bounds, EmitContext, IdAllocator, Projectile,
    ProjectileSpawn, SeededUnitRng, TelegraphDescriptor, UnitRng, Vec2,
};
use letter_siege_system_effects::AdvancedEffectsSystem;

use crate::{
    collision::{Aabb, SpatialHash},
    projectiles::{purge_dead, update_projectiles},
};

/// Footprint used when indexing targets in the broadphase.
const TARGET_SIZE: f32 = 24.0;

/// Everything attacks emit into during an encounter.
///
/// Projectiles, beams, telegraphs and area effects accumulate here; targets
/// registered with [`EncounterContext::set_targets`] answer chain-attack
/// proximity queries.
#[derive(Debug)]
pub struct EncounterContext {
    bounds: Bounds,
    ids: IdAllocator,
    projectiles: Vec<Projectile>,
    beams: Vec<BeamDescriptor>,
    effects: AdvancedEffectsSystem,
    rng: SeededUnitRng,
    targets: Vec<Vec2>,
    index: SpatialHash,
}

impl EncounterContext {
    /// Creates an empty context for a playfield of `bounds`.
    #[must_use]
    pub fn new(bounds: Bounds, seed: u64) -> Self {
        Self {
            bounds,
            ids: IdAllocator::new(),
            projectiles: Vec::new(),
            beams: Vec::new(),
            effects: AdvancedEffectsSystem::new(),
            rng: SeededUnitRng::new(seed),
            targets: Vec::new(),
            index: SpatialHash::default(),
        }
    }

    /// Playfield dimensions.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replaces the positions chain attacks may jump to.
    pub fn set_targets(&mut self, targets: &[Vec2]) {
        self.targets.clear();
        self.targets.extend_from_slice(targets);
        self.index.clear();
        let size = Vec2::splat(TARGET_SIZE);
        for (slot, target) in self.targets.iter().enumerate() {
            self.index.insert(slot as u32, &Aabb::centered(*target, size));
        }
    }

    /// Projectiles currently in flight.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Mutable access for collision passes that kill projectiles.
    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    /// Beams emitted since the last call, handed over to the caller.
    pub fn take_beams(&mut self) -> Vec<BeamDescriptor> {
        std::mem::take(&mut self.beams)
    }

    /// Telegraph warnings and area effects.
    #[must_use]
    pub fn effects(&self) -> &AdvancedEffectsSystem {
        &self.effects
    }

    /// Advances projectiles, effects and telegraphs by one step and purges
    /// projectiles that left the playfield.
    pub fn advance(&mut self, dt_ms: f32) {
        update_projectiles(&mut self.projectiles, dt_ms, self.bounds);
        purge_dead(&mut self.projectiles);
        self.effects.update(dt_ms);
    }

    /// Drops everything emitted so far.
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.beams.clear();
        self.effects.clear();
    }
}

impl EmitContext for EncounterContext {
    fn emit_projectile(&mut self, spawn: ProjectileSpawn) {
        let id = self.ids.next_projectile();
        self.projectiles.push(Projectile::from_spawn(id, spawn));
    }

    fn emit_telegraph(&mut self, telegraph: TelegraphDescriptor) {
        self.effects.post_telegraph(telegraph);
    }

    fn emit_area_effect(&mut self, effect: AreaEffectDescriptor) {
        let _ = self.effects.add_area_effect(effect);
    }

    fn emit_beam(&mut self, beam: BeamDescriptor) {
        self.beams.push(beam);
    }

    fn nearby_targets(&self, origin: Vec2, radius: f32) -> Vec<Vec2> {
        let radius = radius.max(0.0);
        let area = Aabb::centered(origin, Vec2::splat(radius * 2.0));
        let mut found: Vec<Vec2> = self
            .index
            .query(&area)
            .into_iter()
            .filter_map(|slot| self.targets.get(slot as usize).copied())
            .filter(|target| target.distance(origin) <= radius)
            .collect();
        found.sort_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)));
        found
    }

    fn random_unit(&mut self) -> f64 {
        self.rng.next_unit()
    }
}
