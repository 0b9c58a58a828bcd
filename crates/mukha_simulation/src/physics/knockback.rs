//! Knockback body: impulse + decay скорость поверх управляемого движения
//!
//! Архитектура:
//! - Impulse: мгновенная добавка скорости от источника урона (clamped to max_speed)
//! - Decay: линейное трение per tick + snap к нулю (без бесконечного дрейфа)
//! - Timers: stun (ослабленный контроль) и invulnerability (иммунитет к урону)

use bevy::prelude::*;

use crate::config::KnockbackConfig;

/// Knockback компонент (игрок и ghosts)
///
/// Инварианты:
/// - |velocity| ≤ max_speed после каждого impulse
/// - timers ≥ 0
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct KnockbackBody {
    pub velocity: Vec2,
    pub friction_per_second: f32,
    pub max_speed: f32,
    /// Множитель impulse для entity (1.0 = обычный)
    pub resistance: f32,
    /// Множитель вертикального impulse
    pub vertical_scale: f32,
    pub snap_epsilon: f32,
    /// Оставшиеся секунды ослабленного контроля
    pub stun_timer: f32,
    /// Оставшиеся секунды иммунитета к урону
    pub invulnerable_timer: f32,
}

impl Default for KnockbackBody {
    fn default() -> Self {
        Self::from_config(&KnockbackConfig::default())
    }
}

impl KnockbackBody {
    pub fn from_config(config: &KnockbackConfig) -> Self {
        Self {
            velocity: Vec2::ZERO,
            friction_per_second: config.friction_per_second,
            max_speed: config.max_speed,
            resistance: 1.0,
            vertical_scale: config.vertical_scale,
            snap_epsilon: config.snap_epsilon,
            stun_timer: 0.0,
            invulnerable_timer: 0.0,
        }
    }

    /// Толчок от `source`. Совпадающие позиции → вдоль +X.
    pub fn apply_impulse(&mut self, position: Vec2, source: Vec2, force: f32) {
        let direction = (position - source).try_normalize().unwrap_or(Vec2::X);
        self.apply_impulse_along(direction, force);
    }

    /// Толчок вдоль единичного `direction`. Non-positive force игнорируется.
    pub fn apply_impulse_along(&mut self, direction: Vec2, force: f32) {
        if !(force > 0.0) || !direction.is_finite() {
            return;
        }
        let scaled = force * self.resistance;
        self.velocity.x += direction.x * scaled;
        self.velocity.y += direction.y * scaled * self.vertical_scale;
        self.clamp_speed();
    }

    fn clamp_speed(&mut self) {
        let speed = self.velocity.length();
        if !speed.is_finite() {
            self.velocity = Vec2::ZERO;
        } else if speed > self.max_speed {
            self.velocity *= self.max_speed / speed;
        }
    }

    pub fn stun(&mut self, duration: f32) {
        self.stun_timer = self.stun_timer.max(duration);
    }

    pub fn make_invulnerable(&mut self, duration: f32) {
        self.invulnerable_timer = self.invulnerable_timer.max(duration);
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    /// Масштаб управляемого движения: `stunned_multiplier` во время stun, иначе 1
    pub fn control_multiplier(&self, stunned_multiplier: f32) -> f32 {
        if self.is_stunned() {
            stunned_multiplier
        } else {
            1.0
        }
    }

    /// Затухание скорости и таймеров за тик
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        self.velocity *= (1.0 - self.friction_per_second * dt).max(0.0);
        if self.velocity.x.abs() < self.snap_epsilon {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < self.snap_epsilon {
            self.velocity.y = 0.0;
        }

        self.stun_timer = (self.stun_timer - dt).max(0.0);
        self.invulnerable_timer = (self.invulnerable_timer - dt).max(0.0);
    }

    /// Respawn: ни скорости, ни таймеров
    pub fn reset(&mut self) {
        self.velocity = Vec2::ZERO;
        self.stun_timer = 0.0;
        self.invulnerable_timer = 0.0;
    }
}
