//! Melee (Kali sword)
//!
//! Два независимых таймера:
//! - `SwordSwing`: анимация удара (angle + remaining), тикает в player motion
//! - `Player::melee_cooldown`: gate на damage resolution, закрывается после попадания
//!
//! Пока swing активен и gate открыт, hitbox перед игроком проверяется каждый тик.

use bevy::prelude::*;

use crate::combat::{apply_hit, DamageSource, HitEvents, HitParams};
use crate::components::{Collider, Facing, Ghost, Health, Lifecycle, Player, Position};
use crate::config::CombatConfig;
use crate::logger;
use crate::physics::{melee_hitbox, rects_overlap, KnockbackBody};

/// Состояние анимации swing (renderer читает `angle`)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct SwordSwing {
    /// Оставшиеся секунды swing (0 = idle)
    pub remaining: f32,
    /// Отклонение от нейтрали (градусы)
    pub angle: f32,
}

impl SwordSwing {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
        self.angle = 0.0;
    }

    /// Поворот на `angle_step` (знак по facing); по окончании возврат в нейтраль
    pub fn advance(&mut self, dt: f32, angle_step: f32, facing: Facing) {
        if !self.is_active() {
            return;
        }

        self.remaining -= dt.max(0.0);
        self.angle += angle_step * facing.swing_sign();

        if self.remaining <= 0.0 {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
        self.angle = 0.0;
    }
}

/// Система: sword hitbox vs ghosts
///
/// Бьёт всех ghosts в hitbox за один resolution, затем закрывает gate
/// на `attack_cooldown` (один ghost не получает два удара за один swing).
pub fn resolve_melee_hits(
    config: Res<CombatConfig>,
    mut players: Query<(Entity, &mut Player, &Position, &Collider, &Facing, &SwordSwing, &Lifecycle)>,
    mut ghosts: Query<
        (Entity, &Position, &mut Health, &mut KnockbackBody, &mut Lifecycle, &Collider),
        (With<Ghost>, Without<Player>),
    >,
    mut hit_events: HitEvents,
) {
    let Ok((player_entity, mut player, position, collider, facing, swing, lifecycle)) = players.single_mut() else {
        return;
    };
    if !lifecycle.is_alive() || !swing.is_active() || player.melee_cooldown > 0.0 {
        return;
    }

    let melee = &config.melee;
    let hitbox = melee_hitbox(position.0, collider.half_extents, *facing, melee.reach, melee.width);
    let params = HitParams {
        source_position: position.0,
        damage: melee.damage,
        knockback_force: melee.knockback_force,
        stun_duration: melee.stun_duration,
        invulnerable_duration: 0.0,
    };

    let mut targets: Vec<Entity> = ghosts.iter().map(|(entity, ..)| entity).collect();
    targets.sort();

    let mut landed = 0;
    for target in targets {
        let Ok((entity, ghost_position, mut health, mut body, mut ghost_lifecycle, ghost_collider)) =
            ghosts.get_mut(target)
        else {
            continue;
        };
        if !ghost_lifecycle.is_alive() || !rects_overlap(&hitbox, &ghost_collider.rect_at(ghost_position.0)) {
            continue;
        }

        let outcome = apply_hit(ghost_position.0, &mut health, &mut body, &mut ghost_lifecycle, &params);
        if outcome.landed() {
            landed += 1;
        }
        hit_events.report(player_entity, entity, DamageSource::Sword, melee.damage, outcome);
    }

    if landed > 0 {
        player.melee_cooldown = melee.attack_cooldown;
        logger::log(&format!("Sword hit {} ghost(s)", landed));
    }
}
