//! Physics simulation module
//!
//! Kinematic 2D движение, knockback impulses, AABB коллизии.
//! Никакого physics engine: всё детерминированно и считается вручную.

pub mod bounds;
pub mod knockback;
pub mod movement;

// Re-export основных типов
pub use bounds::{
    dominant_axis_direction,
    fully_outside_horizontally,
    melee_hitbox,
    overlaps_any,
    rects_overlap,
};
pub use knockback::KnockbackBody;
pub use movement::{clamp_to_bounds, move_with_walls, MoveResult};
