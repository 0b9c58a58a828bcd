//! AABB helpers (screen space, Y вниз)

use bevy::math::Rect;
use bevy::prelude::*;

use crate::components::Facing;

/// Strict overlap: boxes с общим ребром не пересекаются
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// `rect` пересекает хотя бы одну из `walls`
pub fn overlaps_any(rect: &Rect, walls: &[Rect]) -> bool {
    walls.iter().any(|wall| rects_overlap(rect, wall))
}

/// `rect` целиком левее или правее `bounds`
pub fn fully_outside_horizontally(rect: &Rect, bounds: &Rect) -> bool {
    rect.max.x <= bounds.min.x || rect.min.x >= bounds.max.x
}

/// Hitbox меча перед актором
///
/// `reach` глубина вдоль `facing`, `width` ширина поперёк.
/// Box начинается от края актора.
pub fn melee_hitbox(center: Vec2, half_extents: Vec2, facing: Facing, reach: f32, width: f32) -> Rect {
    let forward = facing.as_vec2();
    let edge = forward.x.abs() * half_extents.x + forward.y.abs() * half_extents.y;
    let box_center = center + forward * (edge + reach * 0.5);

    let half_size = if forward.x != 0.0 {
        Vec2::new(reach * 0.5, width * 0.5)
    } else {
        Vec2::new(width * 0.5, reach * 0.5)
    };

    Rect::from_center_half_size(box_center, half_size)
}

/// Единичный шаг по доминирующей оси `delta` (никогда по диагонали)
///
/// При равенстве побеждает горизонталь; нулевой или non-finite `delta` → `Vec2::ZERO`.
pub fn dominant_axis_direction(delta: Vec2) -> Vec2 {
    if delta == Vec2::ZERO || !delta.is_finite() {
        return Vec2::ZERO;
    }
    if delta.x.abs() >= delta.y.abs() {
        Vec2::new(delta.x.signum(), 0.0)
    } else {
        Vec2::new(0.0, delta.y.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        let c = Rect::new(9.0, 9.0, 20.0, 20.0);

        assert!(!rects_overlap(&a, &b));
        assert!(rects_overlap(&a, &c));
        assert!(rects_overlap(&c, &a));
    }

    #[test]
    fn test_melee_hitbox_in_front() {
        let half = Vec2::splat(16.0);
        let right = melee_hitbox(Vec2::ZERO, half, Facing::Right, 48.0, 40.0);
        assert_eq!(right.min, Vec2::new(16.0, -20.0));
        assert_eq!(right.max, Vec2::new(64.0, 20.0));

        let up = melee_hitbox(Vec2::ZERO, half, Facing::Up, 48.0, 40.0);
        assert_eq!(up.min, Vec2::new(-20.0, -64.0));
        assert_eq!(up.max, Vec2::new(20.0, -16.0));
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(dominant_axis_direction(Vec2::new(-30.0, 10.0)), Vec2::new(-1.0, 0.0));
        assert_eq!(dominant_axis_direction(Vec2::new(3.0, 10.0)), Vec2::new(0.0, 1.0));
        assert_eq!(dominant_axis_direction(Vec2::new(5.0, -5.0)), Vec2::new(1.0, 0.0));
        assert_eq!(dominant_axis_direction(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_horizontal_exit() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert!(fully_outside_horizontally(&Rect::new(800.0, 0.0, 828.0, 28.0), &bounds));
        assert!(fully_outside_horizontally(&Rect::new(-28.0, 0.0, 0.0, 28.0), &bounds));
        assert!(!fully_outside_horizontally(&Rect::new(790.0, 0.0, 818.0, 28.0), &bounds));
        // Выход по вертикали не считается
        assert!(!fully_outside_horizontally(&Rect::new(10.0, 700.0, 38.0, 728.0), &bounds));
    }
}
