//! Tunables боевой симуляции
//!
//! Все таймеры в секундах, расстояния в пикселях, скорости в px/s.
//! `CombatConfig` это Resource: хост может вставить свой до `SimulationPlugin`,
//! иначе берётся `Default` (подобранные значения).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{AbilityKind, MaskKind, MaskProfile};

/// Корневой config resource
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Число кадров health bar (одинаково для всех акторов)
    pub health_steps: u32,
    pub knockback: KnockbackConfig,
    pub player: PlayerConfig,
    pub masks: MaskTable,
    pub ghost: GhostConfig,
    pub fireball: FireballConfig,
    pub melee: MeleeConfig,
    pub spawner: SpawnerConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            health_steps: 13,
            knockback: KnockbackConfig::default(),
            player: PlayerConfig::default(),
            masks: MaskTable::default(),
            ghost: GhostConfig::default(),
            fireball: FireballConfig::default(),
            melee: MeleeConfig::default(),
            spawner: SpawnerConfig::default(),
        }
    }
}

/// Общие параметры knockback body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnockbackConfig {
    /// Затухание скорости: `v *= max(0, 1 - friction * dt)`
    pub friction_per_second: f32,
    /// Потолок скорости после каждого impulse
    pub max_speed: f32,
    /// Множитель вертикальной составляющей impulse
    pub vertical_scale: f32,
    /// Множитель управляемого движения во время stun
    pub stun_control_multiplier: f32,
    /// Компоненты меньше этого значения обнуляются
    pub snap_epsilon: f32,
}

impl Default for KnockbackConfig {
    fn default() -> Self {
        Self {
            friction_per_second: 8.0,
            max_speed: 900.0,
            vertical_scale: 0.9,
            stun_control_multiplier: 0.3,
            snap_epsilon: 0.1,
        }
    }
}

/// Обработка столкновения игрока со стенами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Откат всего перемещения за тик, если новый box задевает стену
    Revert,
    /// Сначала X, потом Y независимо (скольжение вдоль стен)
    #[default]
    SlidePerAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub max_health: f32,
    /// Сторона квадратного collision box
    pub size: f32,
    /// Скорость выхода на target velocity от input (px/s²)
    pub acceleration: f32,
    /// Затухание скорости без input (1/s)
    pub drag: f32,
    /// Иммунитет к урону после удара ghost
    pub invulnerable_duration: f32,
    pub mask_switch_cooldown: f32,
    pub collision: CollisionPolicy,
    /// Урон от debug self-damage клавиши
    pub debug_damage: f32,
    /// Скорость фазы walk cycle при движении (рад/с)
    pub walk_cycle_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            size: 32.0,
            acceleration: 2400.0,
            drag: 12.0,
            invulnerable_duration: 0.6,
            mask_switch_cooldown: 1.2,
            collision: CollisionPolicy::SlidePerAxis,
            debug_damage: 10.0,
            walk_cycle_rate: 12.0,
        }
    }
}

/// Profile для каждой маски (закрытый набор)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskTable {
    pub theyyam: MaskProfile,
    pub garuda: MaskProfile,
    pub kali: MaskProfile,
}

impl MaskTable {
    pub fn profile(&self, mask: MaskKind) -> &MaskProfile {
        match mask {
            MaskKind::Theyyam => &self.theyyam,
            MaskKind::Garuda => &self.garuda,
            MaskKind::Kali => &self.kali,
        }
    }
}

impl Default for MaskTable {
    fn default() -> Self {
        Self {
            // Огненный кастер, медленный
            theyyam: MaskProfile {
                speed: 200.0,
                ability: AbilityKind::Fireball,
                color: [200, 0, 0],
                stun_scale: 1.0,
            },
            // Только скорость; от удара оглушается вдвое дольше
            garuda: MaskProfile {
                speed: 450.0,
                ability: AbilityKind::Haste,
                color: [30, 60, 180],
                stun_scale: 2.0,
            },
            kali: MaskProfile {
                speed: 300.0,
                ability: AbilityKind::Sword,
                color: [255, 215, 0],
                stun_scale: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostConfig {
    pub max_health: f32,
    pub size: f32,
    pub speed: f32,
    pub damage_per_hit: f32,
    pub knockback_force: f32,
    /// Stun игрока при контакте
    pub stun_duration: f32,
    /// Минимальный интервал между ударами одного ghost
    pub hit_cooldown: f32,
    /// Impulse каждому ghost пересекающейся пары
    pub separation_force: f32,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            max_health: 40.0,
            size: 32.0,
            speed: 156.0,
            damage_per_hit: 8.0,
            knockback_force: 420.0,
            stun_duration: 0.18,
            hit_cooldown: 0.7,
            separation_force: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireballConfig {
    pub speed: f32,
    pub lifetime: f32,
    pub damage: f32,
    /// Сторона collision box (меньше спрайта)
    pub hitbox_size: f32,
    pub visual_size: f32,
    pub cooldown: f32,
    pub knockback_force: f32,
    pub stun_duration: f32,
}

impl Default for FireballConfig {
    fn default() -> Self {
        Self {
            speed: 600.0,
            lifetime: 1.5,
            damage: 20.0,
            hitbox_size: 28.0,
            visual_size: 128.0,
            cooldown: 0.8,
            knockback_force: 350.0,
            stun_duration: 0.12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeleeConfig {
    pub damage: f32,
    pub knockback_force: f32,
    pub stun_duration: f32,
    /// Длительность анимации swing
    pub swing_duration: f32,
    /// Изменение угла swing за тик (градусы), знак по facing
    pub swing_angle_step: f32,
    /// Минимальный интервал между damage resolution меча
    pub attack_cooldown: f32,
    /// Глубина hitbox перед игроком
    pub reach: f32,
    /// Ширина hitbox поперёк facing
    pub width: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            damage: 15.0,
            knockback_force: 500.0,
            stun_duration: 0.15,
            swing_duration: 0.25,
            swing_angle_step: 12.0,
            attack_cooldown: 0.35,
            reach: 48.0,
            width: 48.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    pub enabled: bool,
    /// Секунды между спавнами
    pub delay: f32,
    pub max_ghosts: usize,
    /// Отступ spawn углов от PlayBounds
    pub corner_margin: f32,
    /// Максимальный случайный сдвиг от угла (по каждой оси)
    pub jitter: f32,
    /// Первый ghost на первом тике, а не через `delay`
    pub spawn_immediately: bool,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: 5.0,
            max_ghosts: 6,
            corner_margin: 50.0,
            jitter: 24.0,
            spawn_immediately: true,
        }
    }
}
