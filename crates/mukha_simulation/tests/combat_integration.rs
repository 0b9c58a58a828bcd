//! Combat integration test
//!
//! Headless app + `step_simulation`, spawner выключен (ghosts ставим вручную).
//!
//! Проверяем:
//! - Cooldown gating (fireball, mask switch)
//! - Fireball бьёт максимум одного ghost
//! - Invulnerability window после contact hit
//! - Ghost умирает от двух fireballs и удаляется (+Score)
//! - Overlapping ghosts расталкиваются
//! - Melee: один resolution на swing
//! - Death → explicit respawn

use bevy::prelude::*;
use mukha_simulation::*;

const DT: f32 = 1.0 / 60.0;

/// Helper: combat App без spawner'а
fn create_combat_app() -> App {
    let mut config = CombatConfig::default();
    config.spawner.enabled = false;
    create_headless_app_with_config(42, config)
}

fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        step_simulation(app.world_mut(), DT);
    }
}

/// Прогоняет `count` тиков и собирает события `E` каждого тика
///
/// Buffers крутятся в `step_simulation`, поэтому после тика
/// `iter_current_update_events` содержит только события этого тика.
fn tick_collecting<E: Event + Clone>(app: &mut App, count: usize) -> Vec<E> {
    let mut collected = Vec::new();
    for _ in 0..count {
        step_simulation(app.world_mut(), DT);
        collected.extend(app.world().resource::<Events<E>>().iter_current_update_events().cloned());
    }
    collected
}

fn intent(app: &mut App) -> Mut<'_, PlayerIntent> {
    app.world_mut().resource_mut::<PlayerIntent>()
}

fn count_with<T: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<(), With<T>>().iter(world).count()
}

fn health_step(app: &App, entity: Entity) -> u32 {
    app.world().get::<Health>(entity).map(Health::current_step).unwrap_or_default()
}

fn damage_events(app: &App, source: DamageSource) -> Vec<DamageDealt> {
    app.world()
        .resource::<Events<DamageDealt>>()
        .iter_current_update_events()
        .filter(|event| event.source == source)
        .cloned()
        .collect()
}

fn spawn_fireball(app: &mut App, owner: Entity, origin: Vec2, direction: Vec2) -> Entity {
    let config = app.world().resource::<CombatConfig>().fireball;
    app.world_mut().spawn(Fireball::new(owner, origin, direction, &config)).id()
}

/// Test: два нажатия в пределах cooldown → один fireball; после cooldown → второй
#[test]
fn test_fireball_cooldown_gating() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(400.0, 300.0));

    let mut casts = Vec::new();
    intent(&mut app).attack = true;
    casts.extend(tick_collecting::<FireballCast>(&mut app, 1));
    intent(&mut app).attack = true;
    casts.extend(tick_collecting::<FireballCast>(&mut app, 1));

    assert_eq!(count_with::<Fireball>(&mut app), 1, "second cast within cooldown must be ignored");

    // 0.8s cooldown → ждём 1s
    casts.extend(tick_collecting::<FireballCast>(&mut app, 60));
    intent(&mut app).attack = true;
    casts.extend(tick_collecting::<FireballCast>(&mut app, 1));

    assert_eq!(count_with::<Fireball>(&mut app), 2);
    assert_eq!(casts.len(), 2);
    assert!(casts.iter().all(|cast| cast.caster == player));
    // Default facing: Down
    assert_eq!(casts[0].direction, Vec2::new(0.0, 1.0));
}

/// Test: fireball от игрока, смотрящего вправо, летит +X и истекает по lifetime
#[test]
fn test_fireball_spawns_at_player_and_expires() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(100.0, 300.0));
    app.world_mut().entity_mut(player).insert(Facing::Right);

    // Стены по краям экрана не мешают: fireball должен прожить весь lifetime
    app.world_mut().insert_resource(PlayBounds(Rect::new(0.0, 0.0, 2000.0, 600.0)));

    intent(&mut app).attack = true;
    tick(&mut app, 1);

    let fireballs: Vec<Fireball> = {
        let world = app.world_mut();
        world.query::<&Fireball>().iter(world).copied().collect()
    };
    assert_eq!(fireballs.len(), 1);
    assert_eq!(fireballs[0].velocity, Vec2::new(600.0, 0.0));
    assert!((fireballs[0].position.x - 110.0).abs() < 1e-3);
    assert_eq!(fireballs[0].position.y, 300.0);

    // 1.5s lifetime (+1 тик запаса)
    tick(&mut app, 90);
    assert_eq!(count_with::<Fireball>(&mut app), 0);
}

/// Test: fireball overlapping два ghosts в одном тике → урон ровно одному
#[test]
fn test_fireball_hits_at_most_one_ghost() {
    let mut app = create_combat_app();
    let caster = app.world_mut().spawn_empty().id();

    let ghost_a = spawn_ghost(app.world_mut(), Vec2::new(300.0, 300.0));
    let ghost_b = spawn_ghost(app.world_mut(), Vec2::new(300.0, 300.0));
    // Hitbox сразу внутри обоих ghosts
    spawn_fireball(&mut app, caster, Vec2::new(290.0, 300.0), Vec2::X);

    tick(&mut app, 1);

    let hits = damage_events(&app, DamageSource::Fireball);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].attacker, caster);

    let damaged = [ghost_a, ghost_b].iter().filter(|&&ghost| health_step(&app, ghost) > 0).count();
    assert_eq!(damaged, 1, "one projectile, one target");
    assert_eq!(count_with::<Fireball>(&mut app), 0, "projectile removed after its hit");
}

/// Test: ghost (40hp) + два fireball (20dmg) → мертв и удален, Score +1
#[test]
fn test_ghost_dies_after_two_fireballs() {
    let mut app = create_combat_app();
    let caster = app.world_mut().spawn_empty().id();
    let ghost = spawn_ghost(app.world_mut(), Vec2::new(300.0, 300.0));

    spawn_fireball(&mut app, caster, Vec2::new(200.0, 300.0), Vec2::X);
    tick(&mut app, 20);

    assert!(health_step(&app, ghost) > 0);
    assert_eq!(app.world().get::<Lifecycle>(ghost), Some(&Lifecycle::Alive));

    let ghost_x = app.world().get::<Position>(ghost).map(|p| p.0.x).unwrap_or_default();
    spawn_fireball(&mut app, caster, Vec2::new(ghost_x - 100.0, 300.0), Vec2::X);
    let deaths = tick_collecting::<EntityDied>(&mut app, 20);

    assert!(app.world().get_entity(ghost).is_err(), "dead ghost must be removed");
    assert_eq!(app.world().resource::<Score>().banished, 1);
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].entity, ghost);
    assert_eq!(deaths[0].killer, Some(caster));
}

/// Test: два ghosts на игроке → один hit, затем invulnerability
#[test]
fn test_invulnerability_blocks_all_ghosts() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(400.0, 300.0));
    spawn_ghost(app.world_mut(), Vec2::new(410.0, 300.0));
    spawn_ghost(app.world_mut(), Vec2::new(390.0, 300.0));

    tick(&mut app, 1);

    assert_eq!(health_step(&app, player), 1);
    assert_eq!(damage_events(&app, DamageSource::Contact).len(), 1);

    let body = app.world().get::<KnockbackBody>(player).copied();
    assert!(body.is_some_and(|b| b.is_invulnerable() && b.is_stunned()));
    assert!(body.is_some_and(|b| b.velocity != Vec2::ZERO));

    // 0.5s < 0.6s invulnerability: ghosts продолжают касаться, урона нет
    let later = tick_collecting::<DamageDealt>(&mut app, 30);
    assert_eq!(health_step(&app, player), 1);
    assert!(later.iter().all(|event| event.source != DamageSource::Contact));
}

/// Test: Garuda получает удвоенный stun от contact hit
#[test]
fn test_garuda_is_stunned_longer() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(400.0, 300.0));
    intent(&mut app).select_mask = Some(MaskKind::Garuda);
    tick(&mut app, 1);

    spawn_ghost(app.world_mut(), Vec2::new(410.0, 300.0));
    tick(&mut app, 1);

    let stun = app.world().get::<KnockbackBody>(player).map(|b| b.stun_timer).unwrap_or_default();
    let base = app.world().resource::<CombatConfig>().ghost.stun_duration;
    assert!((stun - base * 2.0).abs() < 1e-5, "stun = {}", stun);
}

/// Test: overlapping ghosts получают разнонаправленный knockback и расходятся
#[test]
fn test_overlapping_ghosts_separate() {
    let mut app = create_combat_app();
    let ghost_a = spawn_ghost(app.world_mut(), Vec2::new(200.0, 300.0));
    let ghost_b = spawn_ghost(app.world_mut(), Vec2::new(210.0, 300.0));

    tick(&mut app, 1);

    let velocity = |app: &App, ghost: Entity| {
        app.world().get::<KnockbackBody>(ghost).map(|b| b.velocity).unwrap_or_default()
    };
    assert!(velocity(&app, ghost_a).x < 0.0);
    assert!(velocity(&app, ghost_b).x > 0.0);

    tick(&mut app, 120);

    let rect = |app: &App, ghost: Entity| {
        let position = app.world().get::<Position>(ghost).map(|p| p.0).unwrap_or_default();
        let collider = app.world().get::<Collider>(ghost).copied().unwrap_or(Collider::square(32.0));
        collider.rect_at(position)
    };
    let (a, b) = (rect(&app, ghost_a), rect(&app, ghost_b));
    assert!(
        !mukha_simulation::physics::rects_overlap(&a, &b),
        "ghosts still overlap: {:?} vs {:?}",
        a,
        b
    );
}

/// Test: Kali swing → ghost получает урон один раз за swing
#[test]
fn test_sword_hits_once_per_swing() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(400.0, 300.0));
    app.world_mut().entity_mut(player).insert(Facing::Right);

    intent(&mut app).select_mask = Some(MaskKind::Kali);
    tick(&mut app, 1);

    // Ghost в зоне меча, но не касается игрока
    let ghost = spawn_ghost(app.world_mut(), Vec2::new(450.0, 300.0));
    intent(&mut app).attack = true;
    tick(&mut app, 1);

    let after_first = health_step(&app, ghost);
    assert!(after_first > 0);
    assert_eq!(damage_events(&app, DamageSource::Sword).len(), 1);
    assert!(app.world().get::<SwordSwing>(player).is_some_and(|s| s.is_active()));

    // Весь swing (0.25s) внутри attack cooldown (0.35s): больше ударов нет
    let later = tick_collecting::<DamageDealt>(&mut app, 16);
    assert_eq!(health_step(&app, ghost), after_first);
    assert!(later.iter().all(|event| event.source != DamageSource::Sword));
    assert!(app.world().get::<SwordSwing>(player).is_some_and(|s| !s.is_active() && s.angle == 0.0));
}

/// Test: mask switch меняет скорость, повтор в пределах cooldown игнорируется
#[test]
fn test_mask_switch() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(400.0, 300.0));
    let masks = app.world().resource::<CombatConfig>().masks;

    // Та же маска: no-op без cooldown
    intent(&mut app).select_mask = Some(MaskKind::Theyyam);
    tick(&mut app, 1);
    assert_eq!(app.world().get::<Player>(player).map(|p| p.mask_switch_cooldown), Some(0.0));

    intent(&mut app).select_mask = Some(MaskKind::Garuda);
    let mut switches = tick_collecting::<MaskSwitched>(&mut app, 1);
    intent(&mut app).select_mask = Some(MaskKind::Kali);
    switches.extend(tick_collecting::<MaskSwitched>(&mut app, 1));

    assert_eq!(app.world().get::<Player>(player).map(|p| p.mask), Some(MaskKind::Garuda));
    assert_eq!(app.world().get::<MovementSpeed>(player).map(|s| s.speed), Some(masks.garuda.speed));

    assert_eq!(switches.len(), 1);
    assert_eq!(switches[0].from, MaskKind::Theyyam);
    assert_eq!(switches[0].to, MaskKind::Garuda);
}

/// Test: смерть → игрок замирает; RespawnPlayer → полный reset
#[test]
fn test_death_and_respawn() {
    let mut app = create_combat_app();
    let spawn_point = Vec2::new(400.0, 300.0);
    let player = spawn_player(app.world_mut(), spawn_point);

    // debug self-damage: 10 dmg = 1 шаг из 13, последний шаг = смерть
    for _ in 0..12 {
        intent(&mut app).debug_self_damage = true;
        tick(&mut app, 1);
    }
    assert_eq!(app.world().get::<Lifecycle>(player), Some(&Lifecycle::Dead));
    assert!(app.world().get::<Health>(player).is_some_and(Health::is_dead));

    // Мертвый игрок не двигается и не стреляет
    intent(&mut app).held = HeldDirections::right();
    intent(&mut app).attack = true;
    tick(&mut app, 10);
    assert_eq!(app.world().get::<Position>(player), Some(&Position(spawn_point)));
    assert_eq!(count_with::<Fireball>(&mut app), 0);
    // Pressed flags потреблены даже мертвым игроком
    assert!(!app.world().resource::<PlayerIntent>().attack);

    intent(&mut app).held = HeldDirections::default();
    app.world_mut().send_event(RespawnPlayer);
    tick(&mut app, 1);

    assert_eq!(app.world().get::<Lifecycle>(player), Some(&Lifecycle::Alive));
    assert_eq!(health_step(&app, player), 0);
    assert_eq!(app.world().get::<Position>(player), Some(&Position(spawn_point)));
}

/// Test: spawner (seeded) спавнит первый ghost сразу, дальше раз в 5s, максимум 6
#[test]
fn test_spawner_respects_delay_and_cap() {
    let mut app = create_headless_app(7);

    tick(&mut app, 1);
    assert_eq!(count_with::<Ghost>(&mut app), 1);

    tick(&mut app, 60);
    assert_eq!(count_with::<Ghost>(&mut app), 1, "next spawn only after the delay");

    // Без игрока ghosts стоят; 40s → лимит
    tick(&mut app, 60 * 40);
    assert_eq!(count_with::<Ghost>(&mut app), 6);

    let bounds = app.world().resource::<PlayBounds>().0;
    let world = app.world_mut();
    for position in world.query_filtered::<&Position, With<Ghost>>().iter(world) {
        assert!(bounds.contains(position.0), "ghost spawned outside play bounds: {:?}", position.0);
    }
}

/// Test: при долгом прогоне через `step_simulation` event buffers не растут
#[test]
fn test_event_buffers_stay_bounded() {
    let mut app = create_combat_app();
    spawn_player(app.world_mut(), Vec2::new(400.0, 300.0));

    let mut max_dealt = 0;
    let mut max_casts = 0;
    let mut total_casts = 0;
    for _ in 0..3000 {
        {
            let mut input = intent(&mut app);
            input.attack = true;
            input.debug_self_damage = true;
        }
        step_simulation(app.world_mut(), DT);

        let world = app.world();
        max_dealt = max_dealt.max(world.resource::<Events<DamageDealt>>().len());
        max_casts = max_casts.max(world.resource::<Events<FireballCast>>().len());
        total_casts += world.resource::<Events<FireballCast>>().iter_current_update_events().count();
    }

    // Живут максимум два тика: текущий + предыдущий
    assert!(max_dealt <= 2, "DamageDealt buffered: {}", max_dealt);
    assert!(max_casts <= 2, "FireballCast buffered: {}", max_casts);
    // Игрок успел выстрелить до смерти (12 debug hits)
    assert_eq!(total_casts, 1);
}

/// Test: respawn event читается ровно один раз и не копится
#[test]
fn test_respawn_event_is_consumed_once() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(400.0, 300.0));

    app.world_mut().send_event(RespawnPlayer);
    tick(&mut app, 2);
    assert!(app.world().resource::<Events<RespawnPlayer>>().is_empty());

    // Респавн не повторяется: игрок уходит от spawn point и там остаётся
    intent(&mut app).held = HeldDirections::right();
    tick(&mut app, 10);
    let position = app.world().get::<Position>(player).map(|p| p.0.x).unwrap_or_default();
    assert!(position > 400.0);
}

/// Test: на лимите таймер не сбрасывается, освободившийся слот заполняется сразу
#[test]
fn test_spawner_refills_slot_without_waiting() {
    let mut config = CombatConfig::default();
    config.spawner.max_ghosts = 1;
    let mut app = create_headless_app_with_config(11, config);

    tick(&mut app, 1);
    assert_eq!(count_with::<Ghost>(&mut app), 1);

    // 10s на лимите: попытки на 5s и 10s пропущены
    tick(&mut app, 600);
    assert_eq!(count_with::<Ghost>(&mut app), 1);

    let ghost = {
        let world = app.world_mut();
        world.query_filtered::<Entity, With<Ghost>>().iter(world).next()
    };
    if let Some(ghost) = ghost {
        app.world_mut().despawn(ghost);
    }
    assert_eq!(count_with::<Ghost>(&mut app), 0);

    tick(&mut app, 1);
    assert_eq!(count_with::<Ghost>(&mut app), 1, "free slot refilled on the next tick");
}
