//! Ability triggers: ranged cast, sword swing, mask switch, debug self-damage
//!
//! Все триггеры на cooldown или с неподходящей маской молча игнорируются.

use bevy::prelude::*;

use crate::combat::{apply_hit, DamageSource, Fireball, HitEvents, HitParams, SwordSwing};
use crate::components::{
    AbilityKind, Facing, Health, Lifecycle, MaskKind, MovementSpeed, Player, PlayerIntent, Position,
};
use crate::config::{CombatConfig, MaskTable};
use crate::logger;
use crate::physics::KnockbackBody;
use crate::player::{FireballCast, MaskSwitched};

impl Player {
    /// Ranged маска + cooldown прошёл → cooldown заново
    ///
    /// `true` = нужно спавнить fireball.
    pub fn try_shoot(&mut self, masks: &MaskTable, cooldown: f32) -> bool {
        if masks.profile(self.mask).ability != AbilityKind::Fireball || self.fireball_cooldown > 0.0 {
            return false;
        }
        self.fireball_cooldown = cooldown;
        true
    }

    /// Melee маска + swing не идёт → старт анимации swing
    pub fn try_swing(&self, masks: &MaskTable, swing: &mut SwordSwing, duration: f32) -> bool {
        if masks.profile(self.mask).ability != AbilityKind::Sword || swing.is_active() {
            return false;
        }
        swing.start(duration);
        true
    }

    /// Смена маски, если switch cooldown прошёл
    ///
    /// Выбор уже надетой маски: no-op, cooldown не тратится.
    /// При успехе возвращает прежнюю маску.
    pub fn switch_mask(&mut self, to: MaskKind, cooldown: f32) -> Option<MaskKind> {
        if to == self.mask || self.mask_switch_cooldown > 0.0 {
            return None;
        }
        let from = self.mask;
        self.mask = to;
        self.mask_switch_cooldown = cooldown;
        Some(from)
    }
}

/// Система: pressed actions из `PlayerIntent`
///
/// Порядок: mask switch → attack (по ability новой маски) → debug self-damage.
/// Pressed flags потребляются всегда, даже если игрок мертв.
#[allow(clippy::type_complexity)]
pub fn player_abilities(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut intent: ResMut<PlayerIntent>,
    mut players: Query<(
        Entity,
        &mut Player,
        &Position,
        &Facing,
        &mut SwordSwing,
        &mut MovementSpeed,
        &mut Health,
        &mut KnockbackBody,
        &mut Lifecycle,
    )>,
    mut cast_events: EventWriter<FireballCast>,
    mut switch_events: EventWriter<MaskSwitched>,
    mut hit_events: HitEvents,
) {
    let pressed = intent.take_pressed();

    let Ok((entity, mut player, position, facing, mut swing, mut speed, mut health, mut body, mut lifecycle)) =
        players.single_mut()
    else {
        return;
    };
    if !lifecycle.is_alive() {
        return;
    }

    if let Some(mask) = pressed.select_mask {
        if let Some(from) = player.switch_mask(mask, config.player.mask_switch_cooldown) {
            speed.speed = config.masks.profile(mask).speed;
            switch_events.write(MaskSwitched { entity, from, to: mask });
            logger::log_info(&format!("Mask switched: {} → {}", from.name(), mask.name()));
        }
    }

    if pressed.attack {
        match config.masks.profile(player.mask).ability {
            AbilityKind::Fireball => {
                if player.try_shoot(&config.masks, config.fireball.cooldown) {
                    let direction = facing.as_vec2();
                    let projectile = commands
                        .spawn(Fireball::new(entity, position.0, direction, &config.fireball))
                        .id();
                    cast_events.write(FireballCast {
                        caster: entity,
                        projectile,
                        origin: position.0,
                        direction,
                    });
                    logger::log(&format!("Fireball cast {:?} toward {:?}", projectile, facing));
                }
            }
            AbilityKind::Sword => {
                if player.try_swing(&config.masks, &mut swing, config.melee.swing_duration) {
                    logger::log(&format!("Sword swing toward {:?}", facing));
                }
            }
            // Garuda: вся сила в скорости
            AbilityKind::Haste => {}
        }
    }

    if pressed.debug_self_damage {
        let damage = config.player.debug_damage;
        let params = HitParams {
            source_position: position.0,
            damage,
            knockback_force: 0.0,
            stun_duration: 0.0,
            invulnerable_duration: 0.0,
        };
        let outcome = apply_hit(position.0, &mut health, &mut body, &mut lifecycle, &params);
        hit_events.report(entity, entity, DamageSource::SelfInflicted, damage, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(mask: MaskKind) -> Player {
        Player::new(mask, Vec2::ZERO)
    }

    #[test]
    fn test_try_shoot_gated_by_mask_and_cooldown() {
        let masks = MaskTable::default();

        let mut kali = player(MaskKind::Kali);
        assert!(!kali.try_shoot(&masks, 0.8));

        let mut theyyam = player(MaskKind::Theyyam);
        assert!(theyyam.try_shoot(&masks, 0.8));
        assert!(!theyyam.try_shoot(&masks, 0.8));

        theyyam.tick_cooldowns(0.8);
        assert!(theyyam.try_shoot(&masks, 0.8));
    }

    #[test]
    fn test_try_swing_only_when_idle() {
        let masks = MaskTable::default();
        let kali = player(MaskKind::Kali);
        let mut swing = SwordSwing::default();

        assert!(kali.try_swing(&masks, &mut swing, 0.25));
        assert!(swing.is_active());
        assert!(!kali.try_swing(&masks, &mut swing, 0.25));

        let garuda = player(MaskKind::Garuda);
        let mut idle = SwordSwing::default();
        assert!(!garuda.try_swing(&masks, &mut idle, 0.25));
    }

    #[test]
    fn test_switch_mask_cooldown() {
        let mut p = player(MaskKind::Theyyam);

        // Та же маска: тихий no-op, cooldown не тронут
        assert_eq!(p.switch_mask(MaskKind::Theyyam, 1.2), None);
        assert_eq!(p.mask_switch_cooldown, 0.0);

        assert_eq!(p.switch_mask(MaskKind::Garuda, 1.2), Some(MaskKind::Theyyam));
        assert_eq!(p.mask, MaskKind::Garuda);

        // На cooldown
        assert_eq!(p.switch_mask(MaskKind::Kali, 1.2), None);
        assert_eq!(p.mask, MaskKind::Garuda);

        p.tick_cooldowns(1.2);
        assert_eq!(p.switch_mask(MaskKind::Kali, 1.2), Some(MaskKind::Garuda));
    }
}
