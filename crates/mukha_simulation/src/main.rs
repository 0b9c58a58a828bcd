//! Headless симуляция Mukha Tejah
//!
//! Запускает Bevy App без рендера: арена со стенами, игрок, scripted input.

use bevy::prelude::*;
use mukha_simulation::{
    create_headless_app, spawn_player, CombatConfig, Ghost, HeldDirections, Health, MaskKind, PlayBounds,
    PlayerIntent, Score, SolidGeometry,
};

fn main() {
    let seed = 42;
    println!("Starting Mukha Tejah headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    let masks = app.world().resource::<CombatConfig>().masks;
    for (slot, mask) in MaskKind::ALL.iter().enumerate() {
        let profile = masks.profile(*mask);
        println!("  [{}] {}: speed {}, {:?}", slot + 1, mask.name(), profile.speed, profile.ability);
    }

    let bounds = app.world().resource::<PlayBounds>().0;
    app.world_mut().insert_resource(SolidGeometry::arena(bounds, 16.0));
    let player = spawn_player(app.world_mut(), bounds.center());

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000u32 {
        script_input(&mut app.world_mut().resource_mut::<PlayerIntent>(), tick);
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let ghosts = world.query_filtered::<(), With<Ghost>>().iter(world).count();
            let (health_step, health_left) = world
                .get::<Health>(player)
                .map(|health| (health.current_step(), health.fraction_remaining()))
                .unwrap_or_default();
            let score = world.resource::<Score>().banished;
            println!(
                "Tick {}: {} ghosts, player health step {} ({:.0}%), score {}",
                tick,
                ghosts,
                health_step,
                health_left * 100.0,
                score
            );
        }
    }

    println!("Simulation complete!");
}

/// Ходим по квадрату, кидаем fireballs, потом Kali (меч) и Garuda
fn script_input(intent: &mut PlayerIntent, tick: u32) {
    intent.held = match (tick / 120) % 4 {
        0 => HeldDirections::right(),
        1 => HeldDirections { down: true, ..default() },
        2 => HeldDirections::left(),
        _ => HeldDirections { up: true, ..default() },
    };

    // Цифровые клавиши 1/2/3
    let slot = match tick {
        500 => 3,
        800 => 2,
        _ => 0,
    };
    intent.select_mask = MaskKind::from_slot(slot);

    intent.attack = tick % 30 == 0;
}
