//! AI module
//!
//! Ghosts: chase AI (dominant axis) + timer spawner.

use bevy::prelude::*;

use crate::{SimulationSet, SimulationTick};

pub mod ghost;
pub mod spawner;

// Re-export основных типов
pub use ghost::{ghost_bundle, spawn_ghost, update_ghosts};
pub use spawner::{spawn_corner, spawn_ghosts, GhostSpawner};

/// AI Plugin
///
/// Порядок выполнения:
/// 1. Spawn фаза: spawn_ghosts
/// 2. Ghosts фаза: update_ghosts (после игрока и melee)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GhostSpawner>();

        app.add_systems(SimulationTick, spawn_ghosts.in_set(SimulationSet::Spawn))
            .add_systems(SimulationTick, update_ghosts.in_set(SimulationSet::Ghosts));
    }
}
