#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step combat: enemy behaviors, loose projectiles and overlap tests.
//!
//! Nothing here owns the enemy list. Callers pass it in every step together
//! with an [`EmitContext`](letter_siege_core::EmitContext) that receives
//! whatever the attacks emit; [`EncounterContext`] is the context used by a
//! running encounter.

pub mod collision;
pub mod context;
pub mod enemies;
pub mod projectiles;

pub use collision::{aabb_intersect, circle_vs_aabb, Aabb, Circle, SpatialHash};
pub use context::EncounterContext;
pub use enemies::{update_affected_enemies, update_enemies, update_enemy};
pub use projectiles::{absorb_hits, purge_dead, update_projectiles};
