//! Player module
//!
//! Управление игроком через `PlayerIntent`:
//! - controller: движение (accel/drag + knockback), wall collision, таймеры, respawn
//! - abilities: fireball, sword swing, mask switch, debug self-damage

use bevy::prelude::*;

use crate::combat::SwordSwing;
use crate::components::{
    Actor, Collider, Health, MaskKind, MovementSpeed, Player, PlayerIntent, Position, SmoothedMotion, WalkCycle,
};
use crate::config::CombatConfig;
use crate::physics::KnockbackBody;
use crate::{SimulationSet, SimulationTick};

pub mod abilities;
pub mod controller;

pub use abilities::player_abilities;
pub use controller::{respawn_player, update_player_motion};

/// Событие: fireball выпущен
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FireballCast {
    pub caster: Entity,
    pub projectile: Entity,
    pub origin: Vec2,
    pub direction: Vec2,
}

/// Событие: маска сменилась
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MaskSwitched {
    pub entity: Entity,
    pub from: MaskKind,
    pub to: MaskKind,
}

/// Запрос хоста: вернуть игрока на spawn point (полный reset)
#[derive(Event, Debug, Clone, Copy, Default, PartialEq)]
pub struct RespawnPlayer;

/// Компоненты нового игрока в маске по умолчанию
pub fn player_bundle(position: Vec2, config: &CombatConfig) -> impl Bundle {
    let mask = MaskKind::default();
    let player = &config.player;

    (
        Actor,
        Player::new(mask, position),
        Position(position),
        Collider::square(player.size),
        MovementSpeed {
            speed: config.masks.profile(mask).speed,
        },
        SmoothedMotion::new(player.acceleration, player.drag),
        KnockbackBody::from_config(&config.knockback),
        Health::new(player.max_health, config.health_steps),
        WalkCycle::default(),
        SwordSwing::default(),
    )
}

/// Spawn игрока с `CombatConfig` из world
pub fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    let config = world.get_resource::<CombatConfig>().cloned().unwrap_or_default();
    world.spawn(player_bundle(position, &config)).id()
}

/// Player Plugin
///
/// Порядок выполнения:
/// 1. Spawn фаза: respawn_player (до любых updates)
/// 2. Player фаза: update_player_motion → player_abilities
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireballCast>()
            .add_event::<MaskSwitched>()
            .add_event::<RespawnPlayer>()
            .init_resource::<PlayerIntent>();

        app.add_systems(SimulationTick, respawn_player.in_set(SimulationSet::Spawn))
            .add_systems(
                SimulationTick,
                (update_player_motion, player_abilities)
                    .chain()
                    .in_set(SimulationSet::Player),
            );
    }
}
