//! Маски: класс/loadout игрока (закрытый набор)

use serde::{Deserialize, Serialize};

/// Маска, надетая на игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaskKind {
    /// Огненный ranged кастер
    #[default]
    Theyyam,
    /// Форма скорости
    Garuda,
    /// Melee с мечом
    Kali,
}

impl MaskKind {
    pub const ALL: [MaskKind; 3] = [MaskKind::Theyyam, MaskKind::Garuda, MaskKind::Kali];

    /// Слот цифровой клавиши (1/2/3)
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Self::Theyyam),
            2 => Some(Self::Garuda),
            3 => Some(Self::Kali),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Theyyam => "Theyyam",
            Self::Garuda => "Garuda",
            Self::Kali => "Kali",
        }
    }
}

/// Боевая способность маски (на кнопке атаки)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Fireball,
    /// Без атаки: вся сила маски в скорости
    Haste,
    Sword,
}

/// Фиксированные stats маски
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskProfile {
    pub speed: f32,
    pub ability: AbilityKind,
    /// Цвет для renderer
    pub color: [u8; 3],
    /// Множитель длительности contact stun
    pub stun_scale: f32,
}
