//! Ghost enemy component

use bevy::prelude::*;

/// Ghost враг: урон при контакте
///
/// Движение и health лежат в общих actor компонентах; здесь то, что ghost
/// делает с игроком при касании.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pub damage_per_hit: f32,
    pub knockback_force: f32,
    /// `SimulationClock::elapsed` последнего удара этого ghost
    pub last_hit_at: Option<f32>,
}

impl Ghost {
    pub fn new(damage_per_hit: f32, knockback_force: f32) -> Self {
        Self {
            damage_per_hit,
            knockback_force,
            last_hit_at: None,
        }
    }

    /// Проверка hit cooldown (тот же ghost → тот же игрок)
    pub fn can_hit(&self, now: f32, hit_cooldown: f32) -> bool {
        match self.last_hit_at {
            Some(last) => now - last >= hit_cooldown,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_hit_cooldown() {
        let mut ghost = Ghost::new(8.0, 420.0);
        assert!(ghost.can_hit(0.0, 0.7));

        ghost.last_hit_at = Some(1.0);
        assert!(!ghost.can_hit(1.5, 0.7));
        assert!(ghost.can_hit(1.7, 0.7));
    }
}
