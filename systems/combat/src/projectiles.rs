//! Constant-velocity projectile motion with playfield culling.

use letter_siege_core::{Bounds, Projectile};

use crate::collision::{circle_vs_aabb, Aabb, Circle};

/// Extra room beyond a projectile's radius before it counts as off-screen.
pub const CULL_MARGIN: f32 = 4.0;

/// Moves every live projectile by `velocity * dt_ms / 1000` and marks the
/// ones that left the playfield as dead.
///
/// A projectile is culled once its center lies further than its radius plus
/// [`CULL_MARGIN`] outside `bounds`. Dead projectiles stay in the list until
/// [`purge_dead`] runs.
pub fn update_projectiles(list: &mut [Projectile], dt_ms: f32, bounds: Bounds) {
    let dt_s = dt_ms.max(0.0) / 1000.0;
    for projectile in list.iter_mut().filter(|projectile| projectile.alive) {
        projectile.position += projectile.velocity * dt_s;
        let margin = projectile.radius + CULL_MARGIN;
        if !bounds.contains_with_margin(projectile.position, margin) {
            projectile.alive = false;
        }
    }
}

/// Removes dead projectiles, keeping the survivors in order.
pub fn purge_dead(list: &mut Vec<Projectile>) {
    list.retain(|projectile| projectile.alive);
}

/// Kills every live projectile touching `target` and returns how many did.
pub fn absorb_hits(list: &mut [Projectile], target: &Aabb, forgiveness: f32) -> usize {
    let mut hits = 0;
    for projectile in list.iter_mut().filter(|projectile| projectile.alive) {
        let circle = Circle {
            center: projectile.position,
            radius: projectile.radius,
        };
        if circle_vs_aabb(&circle, target, forgiveness) {
            projectile.alive = false;
            hits += 1;
            log::trace!("projectile {} hit the target", projectile.id.get());
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use letter_siege_core::{ProjectileId, ProjectileSpawn, Vec2};

    use super::*;

    fn projectile(x: f32, vx: f32) -> Projectile {
        Projectile::from_spawn(
            ProjectileId::new(1),
            ProjectileSpawn {
                position: Vec2::new(x, 100.0),
                velocity: Vec2::new(vx, 0.0),
                radius: 3.0,
            },
        )
    }

    #[test]
    fn projectiles_move_and_are_culled_then_purged() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut list = vec![projectile(5.0, 1000.0)];

        update_projectiles(&mut list, 10.0, bounds);
        assert_relative_eq!(list[0].position.x, 15.0, epsilon = 1e-4);
        assert!(list[0].alive);

        update_projectiles(&mut list, 1000.0, bounds);
        assert!(!list[0].alive);

        purge_dead(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn margin_grows_with_radius() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut list = vec![projectile(106.0, 0.0)];
        update_projectiles(&mut list, 16.0, bounds);
        assert!(list[0].alive);

        list[0].position.x = 107.5;
        update_projectiles(&mut list, 16.0, bounds);
        assert!(!list[0].alive);
    }

    #[test]
    fn hits_are_absorbed_once() {
        let mut list = vec![projectile(50.0, 0.0), projectile(300.0, 0.0)];
        let target = Aabb::new(40.0, 90.0, 20.0, 20.0);
        assert_eq!(absorb_hits(&mut list, &target, 0.0), 1);
        assert!(!list[0].alive);
        assert!(list[1].alive);
        assert_eq!(absorb_hits(&mut list, &target, 0.0), 0);
    }

    #[test]
    fn dead_projectiles_stop_moving() {
        let mut list = vec![projectile(50.0, 100.0)];
        list[0].alive = false;
        update_projectiles(&mut list, 100.0, Bounds::default());
        assert_eq!(list[0].position.x, 50.0);
    }
}
