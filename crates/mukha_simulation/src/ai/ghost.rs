//! Ghost chase AI
//!
//! Ghost идёт к игроку только по доминирующей оси (никогда по диагонали),
//! displacement применяется напрямую (без accel/drag). Стены ghosts не
//! блокируют; PlayBounds держат их на экране.

use bevy::prelude::*;

use crate::components::{Actor, Collider, Ghost, Health, Lifecycle, MovementSpeed, Player, Position};
use crate::config::CombatConfig;
use crate::physics::{clamp_to_bounds, dominant_axis_direction, KnockbackBody};
use crate::world::{PlayBounds, SimulationClock};

/// Компоненты нового ghost: полное здоровье, нулевой knockback, alive
pub fn ghost_bundle(position: Vec2, config: &CombatConfig) -> impl Bundle {
    let ghost = &config.ghost;

    (
        Actor,
        Ghost::new(ghost.damage_per_hit, ghost.knockback_force),
        Position(position),
        Collider::square(ghost.size),
        MovementSpeed { speed: ghost.speed },
        KnockbackBody::from_config(&config.knockback),
        Health::new(ghost.max_health, config.health_steps),
    )
}

/// Spawn ghost с `CombatConfig` из world
pub fn spawn_ghost(world: &mut World, position: Vec2) -> Entity {
    let config = world.get_resource::<CombatConfig>().cloned().unwrap_or_default();
    world.spawn(ghost_bundle(position, &config)).id()
}

/// Система: ghost movement
///
/// Живой игрок → chase по доминирующей оси (× stun control multiplier).
/// Нет игрока или он мертв → ghosts только дрейфуют от knockback.
pub fn update_ghosts(
    clock: Res<SimulationClock>,
    config: Res<CombatConfig>,
    bounds: Res<PlayBounds>,
    players: Query<(&Position, &Lifecycle), With<Player>>,
    mut ghosts: Query<
        (&mut Position, &Collider, &MovementSpeed, &mut KnockbackBody, &Lifecycle),
        (With<Ghost>, Without<Player>),
    >,
) {
    let dt = clock.delta();
    let target = players
        .single()
        .ok()
        .filter(|(_, lifecycle)| lifecycle.is_alive())
        .map(|(position, _)| position.0);

    for (mut position, collider, speed, mut body, lifecycle) in ghosts.iter_mut() {
        if !lifecycle.is_alive() {
            continue;
        }

        let chase = match target {
            Some(target) => {
                let control = body.control_multiplier(config.knockback.stun_control_multiplier);
                dominant_axis_direction(target - position.0) * speed.speed * control
            }
            None => Vec2::ZERO,
        };

        let moved = position.0 + (chase + body.velocity) * dt;
        position.0 = clamp_to_bounds(moved, collider, &bounds.0);
        body.tick(dt);
    }
}
