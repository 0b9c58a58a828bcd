//! Kinematic movement против статической геометрии
//!
//! Архитектура:
//! - Player: displacement → wall check (Revert или SlidePerAxis) → clamp в PlayBounds
//! - Ghosts: direct displacement, стены не блокируют (только PlayBounds)
//!
//! Детерминизм: walls проверяются в порядке `SolidGeometry::walls`.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::components::Collider;
use crate::config::CollisionPolicy;
use crate::physics::bounds::overlaps_any;

/// Результат перемещения с проверкой стен
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub position: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

impl MoveResult {
    pub fn blocked(&self) -> bool {
        self.blocked_x || self.blocked_y
    }
}

/// Сдвиг box на `displacement`; позиции внутри стены отклоняются
pub fn move_with_walls(
    position: Vec2,
    collider: &Collider,
    displacement: Vec2,
    walls: &[Rect],
    policy: CollisionPolicy,
) -> MoveResult {
    if !displacement.is_finite() {
        return MoveResult { position, blocked_x: false, blocked_y: false };
    }

    match policy {
        CollisionPolicy::Revert => {
            let target = position + displacement;
            if overlaps_any(&collider.rect_at(target), walls) {
                MoveResult {
                    position,
                    blocked_x: displacement.x != 0.0,
                    blocked_y: displacement.y != 0.0,
                }
            } else {
                MoveResult { position: target, blocked_x: false, blocked_y: false }
            }
        }
        CollisionPolicy::SlidePerAxis => {
            let mut current = position;

            let along_x = current + Vec2::new(displacement.x, 0.0);
            let blocked_x = displacement.x != 0.0 && overlaps_any(&collider.rect_at(along_x), walls);
            if !blocked_x {
                current = along_x;
            }

            let along_y = current + Vec2::new(0.0, displacement.y);
            let blocked_y = displacement.y != 0.0 && overlaps_any(&collider.rect_at(along_y), walls);
            if !blocked_y {
                current = along_y;
            }

            MoveResult { position: current, blocked_x, blocked_y }
        }
    }
}

/// Держит box целиком внутри `bounds` (по центру, если не помещается)
pub fn clamp_to_bounds(position: Vec2, collider: &Collider, bounds: &Rect) -> Vec2 {
    let clamp_axis = |value: f32, half: f32, min: f32, max: f32| {
        let (low, high) = (min + half, max - half);
        if low > high {
            (min + max) * 0.5
        } else {
            value.clamp(low, high)
        }
    };

    Vec2::new(
        clamp_axis(position.x, collider.half_extents.x, bounds.min.x, bounds.max.x),
        clamp_axis(position.y, collider.half_extents.y, bounds.min.y, bounds.max.y),
    )
}
