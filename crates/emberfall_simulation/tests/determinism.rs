//! Тесты детерминизма
//!
//! Один и тот же seed + один и тот же сценарий ввода → идентичные тела,
//! здоровье и последовательность звуков (включая случайные шаги).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use emberfall_simulation::services::RecordingAudio;
use emberfall_simulation::*;
use std::time::Duration;

/// Скриптованный сценарий: бег вправо, прыжок, атаки у врага
fn run_scenario(seed: u64, frames: usize) -> (Vec<u8>, Vec<u8>, Vec<String>) {
    let mut app = create_headless_app(seed);
    let audio = RecordingAudio::new();

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(AudioService(Box::new(audio.clone())))
        .add_plugins(SimulationPlugin);

    app.world_mut().resource_mut::<ColliderWorld>().add_static(
        Vec2::new(0.0, -0.5),
        Vec2::new(40.0, 1.0),
        CollisionLayers::GROUND,
    );

    spawn_player(app.world_mut(), Vec2::new(-6.0, 0.5));
    spawn_enemy(app.world_mut(), Vec2::new(3.0, 0.5));
    spawn_enemy(app.world_mut(), Vec2::new(8.0, 0.5));

    for frame in 0..frames {
        match frame {
            1 => {
                app.world_mut().send_event(PlayerInput::Move(Vec2::new(1.0, 0.0)));
            }
            40 => {
                app.world_mut().send_event(PlayerInput::Jump(true));
            }
            48 => {
                app.world_mut().send_event(PlayerInput::Jump(false));
            }
            90 => {
                app.world_mut().send_event(PlayerInput::Dash(true));
            }
            f if f > 100 && f % 20 == 0 => {
                app.world_mut().send_event(PlayerInput::Attack(true));
            }
            _ => {}
        }
        app.update();
    }

    let bodies = world_snapshot::<Body2d>(app.world_mut());
    let health = world_snapshot::<PlayerHealth>(app.world_mut());
    (bodies, health, audio.played())
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const FRAMES: usize = 400;

    let first = run_scenario(SEED, FRAMES);
    let second = run_scenario(SEED, FRAMES);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_scenario_produces_footsteps() {
    let (_, _, played) = run_scenario(42, 60);

    let footsteps = played.iter().filter(|clip| clip.starts_with("footstep_")).count();
    // Бег до встречи с первым врагом при footstep_rate 0.3
    assert!(footsteps >= 2, "footsteps: {}, played: {:?}", footsteps, played);
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // Запускаем 3 раза: все должны быть идентичны
    let runs: Vec<_> = (0..3).map(|_| run_scenario(SEED, 300)).collect();

    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(runs[0], *run, "Прогон {} дал результат отличный от прогона 0", i);
    }
}
