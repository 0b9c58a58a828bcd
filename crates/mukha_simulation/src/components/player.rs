//! Player control component
//!
//! Отмечает entity которым управляет игрок через `PlayerIntent` (в отличие от AI).

use bevy::prelude::*;

use crate::components::MaskKind;

/// Актор под управлением игрока: активная маска + cooldowns способностей
///
/// # Архитектурная заметка
/// - Ghost systems используют `Without<Player>` filter
/// - Player systems берут `&Player` / `&mut Player` (implicit `With<Player>`)
///
/// Все cooldowns тикают до 0 в секундах simulation time.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub mask: MaskKind,
    pub fireball_cooldown: f32,
    pub mask_switch_cooldown: f32,
    /// Gate на damage resolution меча (независим от анимации swing)
    pub melee_cooldown: f32,
    /// Куда явный respawn возвращает игрока
    pub spawn_point: Vec2,
}

impl Player {
    pub fn new(mask: MaskKind, spawn_point: Vec2) -> Self {
        Self {
            mask,
            fireball_cooldown: 0.0,
            mask_switch_cooldown: 0.0,
            melee_cooldown: 0.0,
            spawn_point,
        }
    }

    pub fn tick_cooldowns(&mut self, dt: f32) {
        self.fireball_cooldown = (self.fireball_cooldown - dt).max(0.0);
        self.mask_switch_cooldown = (self.mask_switch_cooldown - dt).max(0.0);
        self.melee_cooldown = (self.melee_cooldown - dt).max(0.0);
    }

    pub fn reset_cooldowns(&mut self) {
        self.fireball_cooldown = 0.0;
        self.mask_switch_cooldown = 0.0;
        self.melee_cooldown = 0.0;
    }
}

/// Зажатые клавиши движения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn right() -> Self {
        Self { right: true, ..default() }
    }

    pub fn left() -> Self {
        Self { left: true, ..default() }
    }

    /// Единичное направление (диагонали нормализованы, противоположные клавиши гасятся)
    pub fn direction(&self) -> Vec2 {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)).normalize_or_zero()
    }
}

/// Input, который хост пишет раз в тик
///
/// `held` level-triggered; остальное "нажато в этом тике" и потребляется
/// тиком, который это прочитал.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerIntent {
    pub held: HeldDirections,
    pub attack: bool,
    pub select_mask: Option<MaskKind>,
    pub debug_self_damage: bool,
}

/// Одноразовые действия, извлечённые из `PlayerIntent`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressedActions {
    pub attack: bool,
    pub select_mask: Option<MaskKind>,
    pub debug_self_damage: bool,
}

impl PlayerIntent {
    pub fn take_pressed(&mut self) -> PressedActions {
        PressedActions {
            attack: std::mem::take(&mut self.attack),
            select_mask: self.select_mask.take(),
            debug_self_damage: std::mem::take(&mut self.debug_self_damage),
        }
    }
}
