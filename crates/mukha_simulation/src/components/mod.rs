//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Lifecycle, Health, Facing)
//! - movement: позиция, коллайдер, скорость (Position, Collider, MovementSpeed, SmoothedMotion)
//! - mask: маски игрока (MaskKind, MaskProfile, AbilityKind)
//! - player: player control (Player, PlayerIntent)
//! - ghost: враги (Ghost)

pub mod actor;
pub mod ghost;
pub mod mask;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use ghost::*;
pub use mask::*;
pub use movement::*;
pub use player::*;
