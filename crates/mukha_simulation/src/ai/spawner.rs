//! Ghost spawner
//!
//! Раз в `delay` секунд (первый ghost сразу) спавнит ghost в случайном углу
//! PlayBounds (inset `corner_margin`) + случайный jitter, пока живых ghosts
//! меньше `max_ghosts`. Таймер на лимите продолжает идти (до 0).
//! Случайность только через `DeterministicRng`.

use bevy::math::Rect;
use bevy::prelude::*;
use rand::Rng;

use crate::ai::ghost_bundle;
use crate::components::{Ghost, Lifecycle};
use crate::config::{CombatConfig, SpawnerConfig};
use crate::logger;
use crate::world::{PlayBounds, SimulationClock};
use crate::DeterministicRng;

/// Spawner state
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GhostSpawner {
    pub enabled: bool,
    /// Секунды до следующей попытки спавна
    pub timer: f32,
    pub spawned_total: u32,
}

impl GhostSpawner {
    pub fn new(config: &SpawnerConfig) -> Self {
        Self {
            enabled: config.enabled,
            timer: if config.spawn_immediately { 0.0 } else { config.delay },
            spawned_total: 0,
        }
    }
}

impl FromWorld for GhostSpawner {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<CombatConfig>()
            .map(|config| config.spawner)
            .unwrap_or_default();
        Self::new(&config)
    }
}

/// Угол `index % 4` у `bounds` с отступом `margin`
///
/// 0 = левый верхний, 1 = правый верхний, 2 = левый нижний, 3 = правый нижний.
pub fn spawn_corner(bounds: &Rect, margin: f32, index: usize) -> Vec2 {
    let left = bounds.min.x + margin;
    let right = bounds.max.x - margin;
    let top = bounds.min.y + margin;
    let bottom = bounds.max.y - margin;

    match index % 4 {
        0 => Vec2::new(left, top),
        1 => Vec2::new(right, top),
        2 => Vec2::new(left, bottom),
        _ => Vec2::new(right, bottom),
    }
}

/// Система: спавн ghosts по таймеру
pub fn spawn_ghosts(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    config: Res<CombatConfig>,
    bounds: Res<PlayBounds>,
    mut spawner: ResMut<GhostSpawner>,
    mut rng: ResMut<DeterministicRng>,
    ghosts: Query<&Lifecycle, With<Ghost>>,
) {
    if !spawner.enabled {
        return;
    }

    // На лимите таймер не перезапускается: замена появится сразу как освободится слот
    spawner.timer = (spawner.timer - clock.delta()).max(0.0);
    if spawner.timer > 0.0 {
        return;
    }
    let settings = &config.spawner;

    let alive = ghosts.iter().filter(|lifecycle| lifecycle.is_alive()).count();
    if alive >= settings.max_ghosts {
        return;
    }
    spawner.timer = settings.delay;

    let corner = spawn_corner(&bounds.0, settings.corner_margin, rng.rng.gen_range(0..4));
    let jitter = if settings.jitter > 0.0 {
        Vec2::new(
            rng.rng.gen_range(-settings.jitter..=settings.jitter),
            rng.rng.gen_range(-settings.jitter..=settings.jitter),
        )
    } else {
        Vec2::ZERO
    };
    let position = corner + jitter;

    let entity = commands.spawn(ghost_bundle(position, &config)).id();
    spawner.spawned_total += 1;
    logger::log(&format!(
        "Ghost {:?} spawned at ({:.1}, {:.1}), {} alive",
        entity,
        position.x,
        position.y,
        alive + 1
    ));
}
