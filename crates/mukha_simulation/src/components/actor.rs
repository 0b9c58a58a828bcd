//! Базовые компоненты акторов: Actor, Lifecycle, Health, Facing

use bevy::prelude::*;

/// Актор (игрок или призрак): базовый маркер для живых существ
///
/// Автоматически добавляет Lifecycle и Facing через Required Components.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Lifecycle, Facing)]
pub struct Actor;

/// Entity lifecycle: Alive → Dead → (respawn, player only) → Alive
///
/// Единственный guard в начале каждой update системы.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Alive,
    Dead,
}

impl Lifecycle {
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Frame-indexed health
///
/// Health хранится как индекс кадра health bar (фиксированное число кадров).
/// Шаг 0 = полное здоровье, шаг `step_count - 1` = смерть.
///
/// Инвариант: 0 ≤ current_step ≤ step_count - 1
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    max_health: f32,
    step_count: u32,
    current_step: u32,
}

impl Health {
    pub fn new(max_health: f32, step_count: u32) -> Self {
        Self {
            // Защита деления в step_size
            max_health: if max_health > 0.0 { max_health } else { 1.0 },
            // Bar из одного кадра был бы мертв при спавне
            step_count: step_count.max(2),
            current_step: 0,
        }
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Индекс последнего (мертвого) кадра
    pub fn last_step(&self) -> u32 {
        self.step_count - 1
    }

    /// Здоровье на один кадр
    pub fn step_size(&self) -> f32 {
        self.max_health / self.step_count as f32
    }

    pub fn is_dead(&self) -> bool {
        self.current_step >= self.last_step()
    }

    /// Остаток здоровья 0.0..=1.0 (для HUD)
    pub fn fraction_remaining(&self) -> f32 {
        1.0 - self.current_step as f32 / self.last_step() as f32
    }

    /// Сколько кадров стоит `amount`. Non-positive (и NaN) → 0,
    /// любое положительное значение минимум 1 (каждый удар заметен).
    pub fn steps_for(&self, amount: f32) -> u32 {
        if !(amount > 0.0) {
            return 0;
        }
        let steps = (amount / self.step_size()).round();
        (steps.min(self.step_count as f32) as u32).max(1)
    }

    /// Возвращает число реально потерянных кадров
    pub fn apply_damage(&mut self, amount: f32) -> u32 {
        let before = self.current_step;
        self.current_step = (self.current_step + self.steps_for(amount)).min(self.last_step());
        self.current_step - before
    }

    /// Возвращает число реально восстановленных кадров
    pub fn apply_heal(&mut self, amount: f32) -> u32 {
        let before = self.current_step;
        self.current_step = self.current_step.saturating_sub(self.steps_for(amount));
        before - self.current_step
    }

    /// Полное здоровье (respawn)
    pub fn reset(&mut self) {
        self.current_step = 0;
    }
}

/// Направление взгляда (screen space, Y растёт вниз)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn as_vec2(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Facing по направлению движения; при равенстве побеждает горизонталь.
    /// `None` для нулевого вектора (facing не меняется).
    pub fn from_direction(direction: Vec2) -> Option<Self> {
        if direction == Vec2::ZERO || !direction.is_finite() {
            return None;
        }
        let facing = if direction.x.abs() >= direction.y.abs() {
            if direction.x > 0.0 { Self::Right } else { Self::Left }
        } else if direction.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        };
        Some(facing)
    }

    /// Направление вращения swing
    pub fn swing_sign(self) -> f32 {
        match self {
            Self::Right | Self::Down => 1.0,
            Self::Left | Self::Up => -1.0,
        }
    }
}
