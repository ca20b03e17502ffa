//! Per-step update of ordinary enemies.

use letter_siege_core::{Bounds, EmitContext, Enemy};
use letter_siege_system_behaviors::BehaviorRegistry;

use crate::context::EncounterContext;

/// Runs the enemy's movement and then its attack for one step.
///
/// Unknown behavior identifiers make the corresponding half a no-op.
pub fn update_enemy(
    enemy: &mut Enemy,
    behaviors: &BehaviorRegistry,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
    bounds: Bounds,
) {
    step_enemy(enemy, behaviors, ctx, dt_ms, dt_ms, bounds);
}

/// Updates every enemy in list order.
pub fn update_enemies(
    list: &mut [Enemy],
    behaviors: &BehaviorRegistry,
    ctx: &mut dyn EmitContext,
    dt_ms: f32,
    bounds: Bounds,
) {
    for enemy in list {
        update_enemy(enemy, behaviors, ctx, dt_ms, bounds);
    }
}

/// Updates every enemy in list order under the encounter's area effects.
///
/// Damage fields covering an enemy are dealt before it acts. Slow and ink
/// fields shorten its movement step; its attack cadence is unaffected.
pub fn update_affected_enemies(
    list: &mut [Enemy],
    behaviors: &BehaviorRegistry,
    ctx: &mut EncounterContext,
    dt_ms: f32,
) {
    let bounds = ctx.bounds();
    for enemy in list {
        let effects = ctx.effects().apply_to_enemy(enemy);
        if !effects.is_empty() {
            log::trace!(
                "enemy {} in {} area effects, slow {:.2}, damage {:.2}",
                enemy.id.get(),
                effects.affected_by.len(),
                effects.slow_multiplier,
                effects.damage
            );
        }
        let movement_dt = effects.movement_dt(dt_ms);
        step_enemy(enemy, behaviors, ctx, movement_dt, dt_ms, bounds);
    }
}

fn step_enemy(
    enemy: &mut Enemy,
    behaviors: &BehaviorRegistry,
    ctx: &mut dyn EmitContext,
    movement_dt: f32,
    attack_dt: f32,
    bounds: Bounds,
) {
    let _ = behaviors.apply_movement(
        &enemy.movement_id,
        &mut enemy.motion,
        &mut enemy.movement_state,
        movement_dt,
        bounds,
    );
    let _ = behaviors.apply_attack(
        &enemy.attack_id,
        &enemy.motion,
        &mut enemy.attack_state,
        ctx,
        attack_dt,
    );
}
