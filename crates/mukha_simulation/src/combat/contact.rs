//! Ghost contact damage + ghost-ghost separation

use bevy::math::Rect;
use bevy::prelude::*;

use crate::combat::{apply_hit, DamageSource, HitEvents, HitParams};
use crate::components::{Collider, Ghost, Health, Lifecycle, Player, Position};
use crate::config::CombatConfig;
use crate::logger;
use crate::physics::{rects_overlap, KnockbackBody};
use crate::world::SimulationClock;

/// Система: ghost касается игрока → урон, knockback, stun, invulnerability
///
/// Гейты (по порядку):
/// - player жив и не invulnerable (`apply_hit`)
/// - у этого ghost прошёл `hit_cooldown` с его последнего попадания
///
/// Первый попавший ghost выдаёт invulnerability, остальные overlapping ghosts
/// в этом же тике игнорируются (и не тратят свой cooldown).
pub fn resolve_ghost_contacts(
    clock: Res<SimulationClock>,
    config: Res<CombatConfig>,
    mut players: Query<(Entity, &Player, &Position, &Collider, &mut Health, &mut KnockbackBody, &mut Lifecycle)>,
    mut ghosts: Query<(Entity, &mut Ghost, &Position, &Collider, &Lifecycle), Without<Player>>,
    mut hit_events: HitEvents,
) {
    let Ok((player_entity, player, player_position, player_collider, mut health, mut body, mut lifecycle)) =
        players.single_mut()
    else {
        return;
    };
    if !lifecycle.is_alive() {
        return;
    }

    let now = clock.elapsed();
    let ghost_config = &config.ghost;
    let stun_scale = config.masks.profile(player.mask).stun_scale;
    let player_box = player_collider.rect_at(player_position.0);

    let mut attackers: Vec<Entity> = ghosts.iter().map(|(entity, ..)| entity).collect();
    attackers.sort();

    for attacker in attackers {
        let Ok((ghost_entity, mut ghost, ghost_position, ghost_collider, ghost_lifecycle)) = ghosts.get_mut(attacker)
        else {
            continue;
        };
        if !ghost_lifecycle.is_alive()
            || !ghost.can_hit(now, ghost_config.hit_cooldown)
            || !rects_overlap(&player_box, &ghost_collider.rect_at(ghost_position.0))
        {
            continue;
        }

        let params = HitParams {
            source_position: ghost_position.0,
            damage: ghost.damage_per_hit,
            knockback_force: ghost.knockback_force,
            stun_duration: ghost_config.stun_duration * stun_scale,
            invulnerable_duration: config.player.invulnerable_duration,
        };

        let outcome = apply_hit(player_position.0, &mut health, &mut body, &mut lifecycle, &params);
        if outcome.landed() {
            ghost.last_hit_at = Some(now);
            logger::log(&format!(
                "Ghost {:?} hit player (step {}/{})",
                ghost_entity,
                health.current_step(),
                health.last_step()
            ));
        }
        hit_events.report(ghost_entity, player_entity, DamageSource::Contact, ghost.damage_per_hit, outcome);

        if !lifecycle.is_alive() {
            break;
        }
    }
}

/// Система: pairwise separation overlapping ghosts
///
/// Для каждой неупорядоченной пары (a, b) с пересекающимися boxes: b толкается
/// вдоль a→b, a в обратную сторону. Совпадающие позиции → ось X.
pub fn separate_ghosts(
    config: Res<CombatConfig>,
    mut ghosts: Query<(Entity, &Position, &Collider, &mut KnockbackBody, &Lifecycle), (With<Ghost>, Without<Player>)>,
) {
    let mut boxes: Vec<(Entity, Vec2, Rect)> = ghosts
        .iter()
        .filter(|(.., lifecycle)| lifecycle.is_alive())
        .map(|(entity, position, collider, ..)| (entity, position.0, collider.rect_at(position.0)))
        .collect();
    boxes.sort_by_key(|(entity, ..)| *entity);

    let force = config.ghost.separation_force;
    for (i, (a, a_position, a_box)) in boxes.iter().enumerate() {
        for (b, b_position, b_box) in &boxes[i + 1..] {
            if !rects_overlap(a_box, b_box) {
                continue;
            }

            let direction = (*b_position - *a_position).try_normalize().unwrap_or(Vec2::X);
            if let Ok((.., mut body, _)) = ghosts.get_mut(*b) {
                body.apply_impulse_along(direction, force);
            }
            if let Ok((.., mut body, _)) = ghosts.get_mut(*a) {
                body.apply_impulse_along(-direction, force);
            }
        }
    }
}
