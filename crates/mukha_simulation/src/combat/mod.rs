//! Combat system module
//!
//! ECS ответственность:
//! - Combat rules: `apply_hit` (damage → knockback → stun → invulnerability → death)
//! - Resolvers: sword vs ghosts, ghost vs player, ghost vs ghost, fireball vs ghosts
//! - Cleanup: despawn expired fireballs и мертвых ghosts, Score
//! - Events: DamageDealt, EntityDied

use bevy::prelude::*;

use crate::{SimulationSet, SimulationTick};

pub mod contact;
pub mod damage;
pub mod melee;
pub mod projectile;


// Re-export основных типов
pub use contact::{resolve_ghost_contacts, separate_ghosts};
pub use damage::{
    apply_hit, despawn_dead_ghosts, DamageDealt, DamageSource, EntityDied, HitEvents, HitOutcome, HitParams, Score,
};
pub use melee::{resolve_melee_hits, SwordSwing};
pub use projectile::{despawn_expired_projectiles, resolve_projectile_hits, update_projectiles, Fireball};

/// Combat Plugin
///
/// Регистрирует combat системы в `SimulationTick`.
///
/// Порядок выполнения (по фазам SimulationSet):
/// 1. Melee: resolve_melee_hits
/// 2. Contacts: resolve_ghost_contacts → separate_ghosts
/// 3. Projectiles: update_projectiles → resolve_projectile_hits
/// 4. Cleanup: despawn_expired_projectiles, despawn_dead_ghosts
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .init_resource::<Score>();

        app.add_systems(SimulationTick, resolve_melee_hits.in_set(SimulationSet::Melee))
            .add_systems(
                SimulationTick,
                (resolve_ghost_contacts, separate_ghosts)
                    .chain()
                    .in_set(SimulationSet::Contacts),
            )
            .add_systems(
                SimulationTick,
                (update_projectiles, resolve_projectile_hits)
                    .chain()
                    .in_set(SimulationSet::Projectiles),
            )
            .add_systems(
                SimulationTick,
                (despawn_expired_projectiles, despawn_dead_ghosts)
                    .chain()
                    .in_set(SimulationSet::Cleanup),
            );
    }
}
