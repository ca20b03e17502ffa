#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateless movement and attack behaviors keyed by string identifiers.
//!
//! Every behavior is a plain function. Whatever it needs to remember between
//! ticks lives in the [`MovementState`] or [`AttackState`] carried by the
//! entity it drives, so one function can safely drive any number of
//! entities. Registries are ordinary values owned by the encounter rather
//! than process-wide tables.

pub mod advanced;
pub mod attack;
pub mod movement;

use std::{collections::HashMap, fmt};

use letter_siege_core::{AttackState, Bounds, EmitContext, Motion, MovementState};

/// Movement behavior: advances `motion` by `dt_ms` milliseconds inside `bounds`.
pub type MovementFn = fn(&mut Motion, &mut MovementState, f32, Bounds);

/// Attack behavior: accumulates `dt_ms` milliseconds and emits through the context when due.
pub type AttackFn = fn(&Motion, &mut AttackState, &mut dyn EmitContext, f32);

/// Lookup tables from behavior identifier to behavior function.
#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    movements: HashMap<String, MovementFn>,
    attacks: HashMap<String, AttackFn>,
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("movements", &self.movement_ids())
            .field("attacks", &self.attack_ids())
            .finish()
    }
}

impl BehaviorRegistry {
    /// Creates a registry without any behaviors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in movement and attack.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (id, behavior) in movement::BUILT_IN {
            registry.register_movement(id, behavior);
        }
        for (id, behavior) in attack::BUILT_IN {
            registry.register_attack(id, behavior);
        }
        for (id, behavior) in advanced::BUILT_IN {
            registry.register_attack(id, behavior);
        }
        registry
    }

    /// Registers a movement behavior, replacing any previous one with the same id.
    pub fn register_movement(&mut self, id: impl Into<String>, behavior: MovementFn) {
        let _ = self.movements.insert(id.into(), behavior);
    }

    /// Registers an attack behavior, replacing any previous one with the same id.
    pub fn register_attack(&mut self, id: impl Into<String>, behavior: AttackFn) {
        let _ = self.attacks.insert(id.into(), behavior);
    }

    /// Movement behavior registered under `id`.
    #[must_use]
    pub fn movement(&self, id: &str) -> Option<MovementFn> {
        self.movements.get(id).copied()
    }

    /// Attack behavior registered under `id`.
    #[must_use]
    pub fn attack(&self, id: &str) -> Option<AttackFn> {
        self.attacks.get(id).copied()
    }

    /// Whether a movement behavior is registered under `id`.
    #[must_use]
    pub fn has_movement(&self, id: &str) -> bool {
        self.movements.contains_key(id)
    }

    /// Whether an attack behavior is registered under `id`.
    #[must_use]
    pub fn has_attack(&self, id: &str) -> bool {
        self.attacks.contains_key(id)
    }

    /// Registered movement identifiers in lexical order.
    #[must_use]
    pub fn movement_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.movements.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Registered attack identifiers in lexical order.
    #[must_use]
    pub fn attack_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.attacks.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Runs the movement registered under `id`.
    ///
    /// An unknown id leaves the motion untouched and returns `false`.
    pub fn apply_movement(
        &self,
        id: &str,
        motion: &mut Motion,
        state: &mut MovementState,
        dt_ms: f32,
        bounds: Bounds,
    ) -> bool {
        match self.movement(id) {
            Some(behavior) => {
                behavior(motion, state, dt_ms.max(0.0), bounds);
                true
            }
            None => {
                log::warn!("unknown movement behavior `{id}` skipped");
                false
            }
        }
    }

    /// Runs the attack registered under `id`.
    ///
    /// An unknown id emits nothing and returns `false`.
    pub fn apply_attack(
        &self,
        id: &str,
        motion: &Motion,
        state: &mut AttackState,
        ctx: &mut dyn EmitContext,
        dt_ms: f32,
    ) -> bool {
        match self.attack(id) {
            Some(behavior) => {
                behavior(motion, state, ctx, dt_ms.max(0.0));
                true
            }
            None => {
                log::warn!("unknown attack behavior `{id}` skipped");
                false
            }
        }
    }
}

/// Converts a step length in milliseconds to seconds.
#[must_use]
pub fn seconds(dt_ms: f32) -> f32 {
    dt_ms / 1000.0
}
