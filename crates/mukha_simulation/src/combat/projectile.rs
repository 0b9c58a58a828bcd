//! Fireball projectile (Theyyam ranged cast)
//!
//! Архитектура:
//! - Прямолинейный полёт, lifetime в секундах
//! - Hitbox (28px) меньше visual bounds (128px): попадание должно быть честным
//! - Стена → `alive = false` в том же тике; первый ghost → один hit, projectile умирает
//! - Despawn только в Cleanup фазе (после всех collision resolution)

use bevy::math::Rect;
use bevy::prelude::*;

use crate::combat::{apply_hit, DamageSource, HitEvents, HitParams};
use crate::components::{Collider, Ghost, Health, Lifecycle, Player, Position};
use crate::config::FireballConfig;
use crate::logger;
use crate::physics::{fully_outside_horizontally, overlaps_any, rects_overlap, KnockbackBody};
use crate::world::{PlayBounds, SimulationClock, SolidGeometry};

/// Состояние fireball
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Fireball {
    /// Кто выпустил (attacker в `DamageDealt`)
    pub owner: Entity,
    pub position: Vec2,
    pub velocity: Vec2,
    pub hitbox_half_extents: Vec2,
    pub visual_half_extents: Vec2,
    pub remaining_lifetime: f32,
    pub damage: f32,
    pub knockback_force: f32,
    pub stun_duration: f32,
    pub alive: bool,
}

impl Fireball {
    /// Спавн в `origin`, полёт вдоль `direction` (нулевое направление → +X)
    pub fn new(owner: Entity, origin: Vec2, direction: Vec2, config: &FireballConfig) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec2::X);
        Self {
            owner,
            position: origin,
            velocity: direction * config.speed,
            hitbox_half_extents: Vec2::splat(config.hitbox_size * 0.5),
            visual_half_extents: Vec2::splat(config.visual_size * 0.5),
            remaining_lifetime: config.lifetime,
            damage: config.damage,
            knockback_force: config.knockback_force,
            stun_duration: config.stun_duration,
            alive: true,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_half_size(self.position, self.hitbox_half_extents)
    }

    pub fn visual_bounds(&self) -> Rect {
        Rect::from_center_half_size(self.position, self.visual_half_extents)
    }

    /// Движение, расход lifetime, смерть о первую стену
    pub fn update(&mut self, dt: f32, walls: &[Rect]) {
        if !self.alive {
            return;
        }

        self.position += self.velocity * dt;
        self.remaining_lifetime -= dt;

        if overlaps_any(&self.hitbox(), walls) {
            self.alive = false;
        }
    }

    /// Мертв, lifetime кончился или целиком за PlayBounds по горизонтали
    pub fn is_expired(&self, bounds: &Rect) -> bool {
        self.remaining_lifetime <= 0.0 || !self.alive || fully_outside_horizontally(&self.hitbox(), bounds)
    }

    fn hit_params(&self) -> HitParams {
        HitParams {
            source_position: self.position,
            damage: self.damage,
            knockback_force: self.knockback_force,
            stun_duration: self.stun_duration,
            invulnerable_duration: 0.0,
        }
    }
}

/// Система: полёт всех fireballs
pub fn update_projectiles(
    clock: Res<SimulationClock>,
    geometry: Res<SolidGeometry>,
    mut fireballs: Query<&mut Fireball>,
) {
    let dt = clock.delta();
    for mut fireball in fireballs.iter_mut() {
        fireball.update(dt, &geometry.walls);
    }
}

/// Система: fireball vs ghosts (single-target)
///
/// Порядок детерминирован: fireballs и ghosts отсортированы по Entity.
pub fn resolve_projectile_hits(
    mut fireballs: Query<(Entity, &mut Fireball)>,
    mut ghosts: Query<
        (Entity, &Position, &Collider, &mut Health, &mut KnockbackBody, &mut Lifecycle),
        (With<Ghost>, Without<Player>),
    >,
    mut hit_events: HitEvents,
) {
    let mut projectiles: Vec<Entity> = fireballs.iter().map(|(entity, _)| entity).collect();
    projectiles.sort();

    let mut targets: Vec<Entity> = ghosts.iter().map(|(entity, ..)| entity).collect();
    targets.sort();

    for projectile in projectiles {
        let Ok((_, mut fireball)) = fireballs.get_mut(projectile) else {
            continue;
        };
        if !fireball.alive {
            continue;
        }

        let hitbox = fireball.hitbox();
        for &target in &targets {
            let Ok((_, position, collider, mut health, mut body, mut lifecycle)) = ghosts.get_mut(target) else {
                continue;
            };
            if !lifecycle.is_alive() || !rects_overlap(&hitbox, &collider.rect_at(position.0)) {
                continue;
            }

            let outcome = apply_hit(position.0, &mut health, &mut body, &mut lifecycle, &fireball.hit_params());
            hit_events.report(fireball.owner, target, DamageSource::Fireball, fireball.damage, outcome);

            fireball.alive = false;
            break;
        }
    }
}

/// Система: удаление мертвых/истекших fireballs
pub fn despawn_expired_projectiles(
    mut commands: Commands,
    bounds: Res<PlayBounds>,
    fireballs: Query<(Entity, &Fireball)>,
) {
    for (entity, fireball) in fireballs.iter() {
        if fireball.is_expired(&bounds.0) {
            commands.entity(entity).despawn();
            logger::log(&format!("Fireball {:?} removed", entity));
        }
    }
}
