//! Mukha Tejah Simulation Core
//!
//! Headless ECS-симуляция боя и движения на Bevy 0.16.
//! Renderer, audio, меню и карта живут снаружи: ядро читает `PlayerIntent`,
//! `SolidGeometry`, `PlayBounds` и пишет состояние компонентов + события.
//!
//! Один тик = `step_simulation(world, dt)`:
//! Spawn → Player → Melee → Ghosts → Contacts → Projectiles → Cleanup

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod player;
pub mod world;

// Re-export базовых типов для удобства
pub use ai::{ghost_bundle, spawn_ghost, AIPlugin, GhostSpawner};
pub use combat::{
    apply_hit, CombatPlugin, DamageDealt, DamageSource, EntityDied, Fireball, HitOutcome, HitParams, Score, SwordSwing,
};
pub use components::*;
pub use config::{CollisionPolicy, CombatConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::KnockbackBody;
pub use player::{player_bundle, spawn_player, FireballCast, MaskSwitched, PlayerPlugin, RespawnPlayer};
pub use world::{PlayBounds, SimulationClock, SolidGeometry};

/// Schedule одного simulation тика (запускается через `step_simulation`)
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationTick;

/// Фазы тика (chained в этом порядке)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Respawn игрока + spawner
    Spawn,
    /// Player motion → ability triggers
    Player,
    /// Sword vs ghosts
    Melee,
    /// Ghost chase AI
    Ghosts,
    /// Ghost vs player, ghost vs ghost
    Contacts,
    /// Fireball flight + fireball vs ghosts
    Projectiles,
    /// Removals (после всех collision resolution)
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `CombatConfig` и `DeterministicRng`, вставленные хостом до плагина,
/// сохраняются; иначе используются defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            // Детерминистичный RNG (seed по умолчанию)
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<CombatConfig>()
            .init_resource::<SimulationClock>()
            .init_resource::<SolidGeometry>()
            .init_resource::<PlayBounds>();

        // Тик строго последовательный: порядок фаз = порядок resolver'а
        app.init_schedule(SimulationTick);
        app.edit_schedule(SimulationTick, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });
        app.configure_sets(
            SimulationTick,
            (
                SimulationSet::Spawn,
                SimulationSet::Player,
                SimulationSet::Melee,
                SimulationSet::Ghosts,
                SimulationSet::Contacts,
                SimulationSet::Projectiles,
                SimulationSet::Cleanup,
            )
                .chain(),
        );

        // Подсистемы
        app.add_plugins((PlayerPlugin, CombatPlugin, AIPlugin));

        // Обычный Bevy app двигает симуляцию из FixedUpdate (60Hz)
        app.add_systems(FixedUpdate, drive_simulation);
    }
}

/// Один тик симуляции длиной `dt` секунд
///
/// Отрицательный или non-finite `dt` → 0 (тик всё равно выполняется).
///
/// Event buffers крутятся внутри тика, а не в `First`:
/// - output events (DamageDealt, EntityDied, FireballCast, MaskSwitched) в начале тика,
///   поэтому после тика `iter_current_update_events` = события этого тика;
///   события доступны reader'ам до конца следующего тика
/// - input events (RespawnPlayer) в конце тика, после того как их прочитал respawn
pub fn step_simulation(world: &mut World, dt: f32) {
    match world.get_resource_mut::<SimulationClock>() {
        Some(mut clock) => clock.advance(dt),
        None => {
            logger::log_error("step_simulation: SimulationClock missing (SimulationPlugin not added?)");
            return;
        }
    }

    rotate_events::<DamageDealt>(world);
    rotate_events::<EntityDied>(world);
    rotate_events::<FireballCast>(world);
    rotate_events::<MaskSwitched>(world);

    if let Err(error) = world.try_run_schedule(SimulationTick) {
        logger::log_error(&format!("step_simulation: {}", error));
    }

    rotate_events::<RespawnPlayer>(world);
}

/// Double-buffer swap: события старше одного update удаляются
fn rotate_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Exclusive system: FixedUpdate → один simulation тик
fn drive_simulation(world: &mut World) {
    let dt = world.get_resource::<Time<Fixed>>().map_or(0.0, |time| time.delta_secs());
    step_simulation(world, dt);
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (default `CombatConfig`)
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, CombatConfig::default())
}

/// Headless app с заданным config
///
/// Fixed 60Hz, время двигается вручную (ровно один fixed step на `app.update()`).
pub fn create_headless_app_with_config(seed: u64, config: CombatConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0)) // 60Hz FixedUpdate
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
