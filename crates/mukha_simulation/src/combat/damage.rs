//! Damage application
//!
//! Единая точка применения урона для всех источников (contact, fireball,
//! sword, debug): `apply_hit`. Guard'ы (dead, invulnerable, non-positive
//! damage) проверяются здесь один раз, а не в каждом resolver'е.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{Ghost, Health, Lifecycle};
use crate::logger;
use crate::physics::KnockbackBody;

/// Источник урона (для renderer/audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Contact,
    Fireball,
    Sword,
    SelfInflicted,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub source: DamageSource,
    pub damage: f32,
    pub steps_lost: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health bar на последнем кадре)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Счётчик изгнанных ghosts
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub banished: u32,
}

/// Параметры одного удара
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitParams {
    /// Knockback толкает от этой точки
    pub source_position: Vec2,
    pub damage: f32,
    pub knockback_force: f32,
    pub stun_duration: f32,
    /// Иммунитет цели после удара (0 для врагов)
    pub invulnerable_duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Цель мертва/invulnerable или damage ≤ 0: ничего не изменилось
    Ignored,
    Damaged { steps_lost: u32 },
    Killed { steps_lost: u32 },
}

impl HitOutcome {
    pub fn landed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub fn killed(&self) -> bool {
        matches!(self, Self::Killed { .. })
    }

    pub fn steps_lost(&self) -> u32 {
        match self {
            Self::Ignored => 0,
            Self::Damaged { steps_lost } | Self::Killed { steps_lost } => *steps_lost,
        }
    }
}

/// Damage + knockback + stun + invulnerability для одной цели
///
/// Держит `Lifecycle` синхронно с `Health`: удар, доводящий до последнего
/// кадра, переводит цель в `Dead` и гасит её knockback.
pub fn apply_hit(
    target_position: Vec2,
    health: &mut Health,
    body: &mut KnockbackBody,
    lifecycle: &mut Lifecycle,
    params: &HitParams,
) -> HitOutcome {
    if !lifecycle.is_alive() || health.is_dead() || body.is_invulnerable() || !(params.damage > 0.0) {
        return HitOutcome::Ignored;
    }

    let steps_lost = health.apply_damage(params.damage);
    body.apply_impulse(target_position, params.source_position, params.knockback_force);
    body.stun(params.stun_duration);
    body.make_invulnerable(params.invulnerable_duration);

    if health.is_dead() {
        body.velocity = Vec2::ZERO;
        *lifecycle = Lifecycle::Dead;
        HitOutcome::Killed { steps_lost }
    } else {
        HitOutcome::Damaged { steps_lost }
    }
}

/// DamageDealt + EntityDied writers для resolver'ов
#[derive(SystemParam)]
pub struct HitEvents<'w> {
    dealt: EventWriter<'w, DamageDealt>,
    died: EventWriter<'w, EntityDied>,
}

impl HitEvents<'_> {
    /// События для попавшего удара (Ignored ничего не пишет)
    pub fn report(
        &mut self,
        attacker: Entity,
        target: Entity,
        source: DamageSource,
        damage: f32,
        outcome: HitOutcome,
    ) {
        if !outcome.landed() {
            return;
        }

        self.dealt.write(DamageDealt {
            attacker,
            target,
            source,
            damage,
            steps_lost: outcome.steps_lost(),
            target_died: outcome.killed(),
        });

        if outcome.killed() {
            self.died.write(EntityDied {
                entity: target,
                killer: Some(attacker),
            });
            logger::log_info(&format!("{:?} killed by {:?} ({:?})", target, attacker, source));
        }
    }
}

/// Система: удаление мертвых ghosts (последний шаг тика)
///
/// Каждый удаленный ghost засчитывается в `Score`.
pub fn despawn_dead_ghosts(
    mut commands: Commands,
    mut score: ResMut<Score>,
    ghosts: Query<(Entity, &Lifecycle), With<Ghost>>,
) {
    for (entity, lifecycle) in ghosts.iter() {
        if lifecycle.is_alive() {
            continue;
        }

        commands.entity(entity).despawn();
        score.banished += 1;
        logger::log(&format!("Ghost {:?} banished (score: {})", entity, score.banished));
    }
}
