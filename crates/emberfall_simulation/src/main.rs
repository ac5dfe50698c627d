//! Headless симуляция Emberfall
//!
//! Скриптованный забег: игрок бежит вправо, прыгает и рубит врагов.
//! Опциональный аргумент: путь к JSON конфигу (`SimulationConfig`).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use emberfall_simulation::services::RecordingAudio;
use emberfall_simulation::*;
use std::time::Duration;

const FRAMES: usize = 900;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);

    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("❌ Config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    log_info(&format!("Starting Emberfall headless simulation (seed: {})", seed));

    let audio = RecordingAudio::new();
    app.insert_resource(config)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(AudioService(Box::new(audio.clone())))
        .add_plugins(SimulationPlugin);

    {
        let mut level = app.world_mut().resource_mut::<ColliderWorld>();
        level.add_static(Vec2::new(0.0, -0.5), Vec2::new(60.0, 1.0), CollisionLayers::GROUND);
        level.add_static(Vec2::new(6.0, 1.5), Vec2::new(3.0, 0.5), CollisionLayers::GROUND);
    }

    let player = spawn_player(app.world_mut(), Vec2::new(-8.0, 0.5));
    let enemies = [
        spawn_enemy(app.world_mut(), Vec2::new(2.0, 0.5)),
        spawn_enemy(app.world_mut(), Vec2::new(12.0, 0.5)),
    ];

    for frame in 0..FRAMES {
        match frame {
            1 => app.world_mut().send_event(PlayerInput::Move(Vec2::new(1.0, 0.0))),
            120 => app.world_mut().send_event(PlayerInput::Jump(true)),
            126 => app.world_mut().send_event(PlayerInput::Jump(false)),
            300 => app.world_mut().send_event(PlayerInput::Dash(true)),
            f if f % 15 == 0 => app.world_mut().send_event(PlayerInput::Attack(true)),
            _ => None,
        };

        app.update();

        if frame % 100 == 0 {
            let body = app.world().get::<Body2d>(player).copied().unwrap_or_default();
            let health = app
                .world()
                .get::<PlayerHealth>(player)
                .map(|h| h.current())
                .unwrap_or(0);
            log_info(&format!(
                "Frame {}: player at ({:.2}, {:.2}), hp {}",
                frame, body.position.x, body.position.y, health
            ));
        }
    }

    let dead_enemies = enemies
        .iter()
        .filter(|e| app.world().get::<Dead>(**e).is_some())
        .count();
    log_info(&format!(
        "Simulation complete: {} / {} enemies dead, {} sounds played",
        dead_enemies,
        enemies.len(),
        audio.played().len()
    ));
}
