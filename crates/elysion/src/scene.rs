//! Demo scene: a single turret firing projectiles, which fly off and expire.

use elysion_ecs::{Component, EcsResult, Entity, EntityAccessorMut, EntityManager, Group};
use glam::Vec2;
use log::*;

/// Entities that are drawn every frame.
pub const VISIBLE: usize = 0;
/// Projectiles in flight.
pub const PROJECTILES: usize = 1;
/// Projectiles that left the arena and are waiting to expire.
pub const OUT_OF_BOUNDS: usize = 2;

/// Half the side length of the square arena, centered at the origin.
const ARENA_EXTENT: f32 = 10.0;

pub fn group(id: usize) -> Group {
    // The ids above are all in range
    Group::new(id).unwrap_or_else(|_| unreachable!("invalid scene group {id}"))
}

#[derive(Debug, Default)]
pub struct Transform {
    pub position: Vec2,
}

impl Component for Transform {}

#[derive(Debug)]
pub struct Velocity(pub Vec2);

impl Component for Velocity {
    fn update(&mut self, ctx: &mut EntityAccessorMut<'_>, dt: f32) {
        if let Ok(transform) = ctx.get_component_mut::<Transform>() {
            transform.position += self.0 * dt;
        }
    }
}

/// Destroys its entity once the time runs out.
#[derive(Debug)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Component for Lifetime {
    fn update(&mut self, ctx: &mut EntityAccessorMut<'_>, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 && ctx.is_alive() {
            debug!("Entity {} expired", ctx.entity());
            ctx.destroy();
        }
    }
}

/// Moves projectiles that left the arena from the visible group to the out of bounds one.
#[derive(Debug, Default)]
pub struct ArenaBounds;

impl Component for ArenaBounds {
    fn update(&mut self, ctx: &mut EntityAccessorMut<'_>, _dt: f32) {
        let Ok(transform) = ctx.get_component::<Transform>() else {
            return;
        };

        let outside = transform.position.abs().max_element() > ARENA_EXTENT;
        if outside && ctx.has_group(group(VISIBLE)) {
            ctx.remove_group(group(VISIBLE));
            ctx.add_group(group(OUT_OF_BOUNDS));
        }
    }
}

/// Logs the entity position on every draw.
#[derive(Debug)]
pub struct Sprite {
    pub name: &'static str,
    pub draws: u32,
}

impl Component for Sprite {
    fn draw(&mut self, ctx: &mut EntityAccessorMut<'_>) {
        self.draws += 1;
        if let Ok(transform) = ctx.get_component::<Transform>() {
            trace!(
                "Drawing {} of {} at {}",
                self.name,
                ctx.entity(),
                transform.position
            );
        }
    }
}

/// Rotates its aim every frame.
#[derive(Debug)]
pub struct Turret {
    pub angle: f32,
    pub turn_rate: f32,
}

impl Component for Turret {
    fn update(&mut self, _ctx: &mut EntityAccessorMut<'_>, dt: f32) {
        self.angle = (self.angle + self.turn_rate * dt) % std::f32::consts::TAU;
    }
}

pub fn spawn_turret(manager: &mut EntityManager) -> EcsResult<Entity> {
    let entity = manager.add_entity();
    let mut turret = manager.entity_mut(entity)?;

    turret.add_component(Transform::default())?;
    turret.add_component(Turret {
        angle: 0.0,
        turn_rate: 2.0,
    })?;
    turret.add_component(Sprite {
        name: "turret",
        draws: 0,
    })?;
    turret.add_group(group(VISIBLE));

    Ok(entity)
}

/// Fires `count` projectiles, spread evenly around the turret's current aim.
pub fn fire(manager: &mut EntityManager, turret: Entity, count: u32) -> EcsResult<Vec<Entity>> {
    let aim = manager.entity(turret)?.get_component::<Turret>()?.angle;

    let mut spawned = Vec::with_capacity(count as usize);
    for i in 0..count {
        let angle = aim + std::f32::consts::TAU * i as f32 / count.max(1) as f32;
        let entity = manager.add_entity();
        let mut projectile = manager.entity_mut(entity)?;

        projectile.add_component(Transform::default())?;
        projectile.add_component(Velocity(Vec2::from_angle(angle) * 8.0))?;
        projectile.add_component(ArenaBounds)?;
        projectile.add_component(Lifetime { remaining: 2.0 })?;
        projectile.add_component(Sprite {
            name: "projectile",
            draws: 0,
        })?;
        projectile.add_group(group(VISIBLE));
        projectile.add_group(group(PROJECTILES));

        spawned.push(entity);
    }

    Ok(spawned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectiles_leave_the_arena_and_expire() {
        let mut manager = EntityManager::new();
        let turret = spawn_turret(&mut manager).unwrap();
        let projectiles = fire(&mut manager, turret, 3).unwrap();

        assert_eq!(manager.get_entities_by_group(group(VISIBLE)).len(), 4);
        assert_eq!(manager.get_entities_by_group(group(PROJECTILES)).len(), 3);

        // 8 units per second for 1.5 seconds takes them past the arena edge
        for _ in 0..15 {
            manager.update(0.1);
            manager.draw();
            manager.refresh();
        }

        assert_eq!(manager.get_entities_by_group(group(VISIBLE)), &[turret]);
        assert_eq!(manager.get_entities_by_group(group(OUT_OF_BOUNDS)).len(), 3);
        for &projectile in &projectiles {
            let accessor = manager.entity(projectile).unwrap();
            assert!(accessor.get_component::<Transform>().unwrap().position.length() > 10.0);
            assert_eq!(accessor.get_component::<Sprite>().unwrap().draws, 15);
        }

        for _ in 0..6 {
            manager.update(0.1);
            manager.refresh();
        }

        assert_eq!(manager.len(), 1);
        assert!(manager.get_entities_by_group(group(PROJECTILES)).is_empty());
        assert!(manager.get_entities_by_group(group(OUT_OF_BOUNDS)).is_empty());
        assert!(projectiles.iter().all(|&p| !manager.is_valid(p)));
    }
}
