//! World resources: simulation clock, статическая геометрия, play bounds

use bevy::math::Rect;
use bevy::prelude::*;

/// Simulation clock, двигается один раз за тик в `step_simulation`
///
/// Единственный источник времени ядра: все cooldowns и hit timestamps считаются по нему.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    delta: f32,
    elapsed: f32,
    tick: u64,
}

impl SimulationClock {
    /// Отрицательные и non-finite deltas → 0
    pub fn advance(&mut self, dt: f32) {
        self.delta = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += self.delta;
        self.tick += 1;
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// Статические solid прямоугольники (стены) от map layer
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SolidGeometry {
    pub walls: Vec<Rect>,
}

impl SolidGeometry {
    pub fn new(walls: Vec<Rect>) -> Self {
        Self { walls }
    }

    /// Четыре стены толщиной `thickness` по внутреннему краю `bounds`
    pub fn arena(bounds: Rect, thickness: f32) -> Self {
        let Rect { min, max } = bounds;
        Self::new(vec![
            Rect::new(min.x, min.y, max.x, min.y + thickness),
            Rect::new(min.x, max.y - thickness, max.x, max.y),
            Rect::new(min.x, min.y, min.x + thickness, max.y),
            Rect::new(max.x - thickness, min.y, max.x, max.y),
        ])
    }
}

/// Игровая область (projectiles, ушедшие за неё по горизонтали, истекают)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayBounds(pub Rect);

impl Default for PlayBounds {
    fn default() -> Self {
        // Окно 800x600
        Self(Rect::new(0.0, 0.0, 800.0, 600.0))
    }
}
