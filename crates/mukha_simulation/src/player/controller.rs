//! Player motion + respawn
//!
//! Порядок внутри тика (живой игрок):
//! 1. Input direction → facing
//! 2. Target velocity = direction × mask speed × stun control multiplier
//! 3. SmoothedMotion.steer (accel/drag)
//! 4. Displacement = (move velocity + knockback velocity) × dt → walls → PlayBounds
//! 5. Knockback tick, cooldowns tick, swing animation, walk cycle

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::combat::SwordSwing;
use crate::components::{
    Collider, Facing, Health, Lifecycle, MovementSpeed, Player, PlayerIntent, Position, SmoothedMotion, WalkCycle,
};
use crate::config::CombatConfig;
use crate::logger;
use crate::physics::{clamp_to_bounds, move_with_walls, KnockbackBody};
use crate::player::RespawnPlayer;
use crate::world::{PlayBounds, SimulationClock, SolidGeometry};

/// Система: движение игрока
///
/// Мертвый игрок (Lifecycle::Dead) не двигается до явного `RespawnPlayer`.
#[allow(clippy::type_complexity)]
pub fn update_player_motion(
    clock: Res<SimulationClock>,
    config: Res<CombatConfig>,
    intent: Res<PlayerIntent>,
    geometry: Res<SolidGeometry>,
    bounds: Res<PlayBounds>,
    mut players: Query<(
        &mut Player,
        &mut Position,
        &Collider,
        &MovementSpeed,
        &mut SmoothedMotion,
        &mut KnockbackBody,
        &mut Facing,
        &mut SwordSwing,
        &mut WalkCycle,
        &Lifecycle,
    )>,
) {
    let Ok((mut player, mut position, collider, speed, mut motion, mut body, mut facing, mut swing, mut walk, lifecycle)) =
        players.single_mut()
    else {
        return;
    };
    if !lifecycle.is_alive() {
        return;
    }

    let dt = clock.delta();
    let direction = intent.held.direction();

    if let Some(new_facing) = Facing::from_direction(direction) {
        *facing = new_facing;
    }

    let control = body.control_multiplier(config.knockback.stun_control_multiplier);
    motion.steer(direction * speed.speed * control, dt, config.knockback.snap_epsilon);

    let displacement = (motion.velocity + body.velocity) * dt;
    let result = move_with_walls(position.0, collider, displacement, &geometry.walls, config.player.collision);
    // Стена гасит скорость по заблокированной оси
    if result.blocked_x {
        motion.velocity.x = 0.0;
        body.velocity.x = 0.0;
    }
    if result.blocked_y {
        motion.velocity.y = 0.0;
        body.velocity.y = 0.0;
    }
    position.0 = clamp_to_bounds(result.position, collider, &bounds.0);

    body.tick(dt);
    player.tick_cooldowns(dt);
    swing.advance(dt, config.melee.swing_angle_step, *facing);

    if direction != Vec2::ZERO {
        walk.phase = (walk.phase + config.player.walk_cycle_rate * dt) % TAU;
    } else {
        walk.phase = 0.0;
    }
}

/// Система: respawn по событию `RespawnPlayer`
///
/// Полный reset: позиция (spawn point), health, knockback, motion, cooldowns,
/// swing, lifecycle. Маска сохраняется.
#[allow(clippy::type_complexity)]
pub fn respawn_player(
    mut respawn_events: EventReader<RespawnPlayer>,
    mut players: Query<(
        Entity,
        &mut Player,
        &mut Position,
        &mut Health,
        &mut KnockbackBody,
        &mut SmoothedMotion,
        &mut SwordSwing,
        &mut WalkCycle,
        &mut Lifecycle,
    )>,
) {
    if respawn_events.read().count() == 0 {
        return;
    }

    for (entity, mut player, mut position, mut health, mut body, mut motion, mut swing, mut walk, mut lifecycle) in
        players.iter_mut()
    {
        position.0 = player.spawn_point;
        health.reset();
        body.reset();
        motion.velocity = Vec2::ZERO;
        player.reset_cooldowns();
        swing.reset();
        walk.phase = 0.0;
        *lifecycle = Lifecycle::Alive;

        logger::log_info(&format!("Player {:?} respawned at {:?}", entity, player.spawn_point));
    }
}
