//! Movement компоненты: позиция, коллайдер, скорость, сглаженное движение

use bevy::math::Rect;
use bevy::prelude::*;

/// Позиция центра актора (пиксели, Y вниз)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Axis-aligned collision box с центром в `Position`
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub half_extents: Vec2,
}

impl Collider {
    pub fn square(size: f32) -> Self {
        Self {
            half_extents: Vec2::splat(size * 0.5),
        }
    }

    pub fn rect_at(&self, center: Vec2) -> Rect {
        Rect::from_center_half_size(center, self.half_extents)
    }
}

/// Скорость движения актора (px/s)
///
/// У игрока перезаписывается при каждой смене маски.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementSpeed {
    pub speed: f32,
}

/// Сглаженное (accel/drag) управляемое движение, только игрок
///
/// Враги двигаются напрямую (`position += direction * speed * dt`).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SmoothedMotion {
    pub velocity: Vec2,
    /// Скорость выхода на input target (px/s²)
    pub acceleration: f32,
    /// Затухание без input (1/s)
    pub drag: f32,
}

impl SmoothedMotion {
    pub fn new(acceleration: f32, drag: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration,
            drag,
        }
    }

    /// Тянет скорость к `target` (нулевой target = накат с drag)
    pub fn steer(&mut self, target: Vec2, dt: f32, snap_epsilon: f32) {
        if target != Vec2::ZERO {
            self.velocity = approach(self.velocity, target, self.acceleration * dt);
        } else {
            self.velocity *= (1.0 - self.drag * dt).max(0.0);
            if self.velocity.length() < snap_epsilon {
                self.velocity = Vec2::ZERO;
            }
        }
    }
}

/// Сдвиг `current` к `target` не больше чем на `max_step`
fn approach(current: Vec2, target: Vec2, max_step: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_step
    }
}

/// Фаза walk анимации, идёт только пока игрок двигается
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct WalkCycle {
    pub phase: f32,
}
