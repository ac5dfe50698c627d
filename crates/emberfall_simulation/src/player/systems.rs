//! Player ECS systems.
//!
//! Тонкий слой: достают компоненты, зовут контроллеры, превращают их
//! события в `SfxRequested` / `AnimationRequested` / `DamageRequest`.

use bevy::prelude::*;
use rand::seq::SliceRandom;

use crate::combat::{DamageRequest, PlayerCombat};
use crate::components::Player;
use crate::config::{AudioConfig, SimulationConfig};
use crate::input::PlayerInput;
use crate::physics::{Body2d, ColliderWorld};
use crate::services::{AnimationEventSink, AnimationPlayback, AnimationRequested, SfxRequested, SoundCue};
use crate::DeterministicRng;

use super::health::PlayerHealth;
use super::motion::{MotionEvent, PlayerMotion};

/// Звук для события движения (шаг: случайный вариант из таблицы)
fn motion_cue(event: MotionEvent, audio: &AudioConfig, rng: &mut DeterministicRng) -> Option<String> {
    match event {
        MotionEvent::Jumped => audio.jump.clone(),
        MotionEvent::DashStarted => audio.dash.clone(),
        MotionEvent::Footstep => audio.footsteps.choose(&mut rng.rng).cloned(),
        MotionEvent::JumpCut | MotionEvent::DashEnded | MotionEvent::DashReady => None,
    }
}

fn write_motion_cues(
    source: Entity,
    events: &[MotionEvent],
    audio: &AudioConfig,
    rng: &mut DeterministicRng,
    sfx: &mut EventWriter<SfxRequested>,
) {
    for event in events {
        if let Some(clip) = motion_cue(*event, audio, rng) {
            sfx.write(SfxRequested {
                source,
                cue: SoundCue::new(clip),
            });
        }
    }
}

/// System: события ввода → motion (jump/dash/move) и combat (attack)
pub fn route_player_input(
    mut inputs: EventReader<PlayerInput>,
    mut players: Query<(Entity, &mut PlayerMotion, &mut PlayerCombat, &mut Body2d), With<Player>>,
    physics: Res<ColliderWorld>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut damage: EventWriter<DamageRequest>,
    mut sfx: EventWriter<SfxRequested>,
) {
    for input in inputs.read() {
        for (entity, mut motion, mut combat, mut body) in players.iter_mut() {
            if *input == PlayerInput::Attack(true) {
                let Some(activation) = combat.try_attack(&body, &motion, &*physics, Some(entity)) else {
                    continue;
                };

                if let Some(clip) = combat.sound_name(&activation) {
                    sfx.write(SfxRequested {
                        source: entity,
                        cue: SoundCue::new(clip),
                    });
                }

                for target in &activation.hit_entities {
                    damage.write(DamageRequest {
                        attacker: Some(entity),
                        target: *target,
                        amount: activation.damage,
                        source_position: body.position,
                    });
                }
                continue;
            }

            let mut events = Vec::new();
            motion.handle_input(input, &mut body, &mut events);
            write_motion_cues(entity, &events, &config.audio, &mut rng, &mut sfx);
        }
    }
}

/// System: логический тик движения + выбор анимации
pub fn player_logic_tick(
    time: Res<Time>,
    physics: Res<ColliderWorld>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut players: Query<
        (
            Entity,
            &mut PlayerMotion,
            &mut Body2d,
            &PlayerCombat,
            &PlayerHealth,
            &mut AnimationPlayback,
        ),
        With<Player>,
    >,
    mut sfx: EventWriter<SfxRequested>,
    mut animations: EventWriter<AnimationRequested>,
) {
    let delta = time.delta_secs();

    for (entity, mut motion, mut body, combat, health, mut playback) in players.iter_mut() {
        let mut events = Vec::new();
        motion.tick(delta, &mut body, &*physics, &mut events);
        write_motion_cues(entity, &events, &config.audio, &mut rng, &mut sfx);

        // Анимацию смерти ставит apply_damage_requests, дальше не трогаем
        if health.is_dead() {
            continue;
        }

        let clip = motion.select_animation(combat.is_attacking());
        playback.play(
            clip,
            &mut AnimationEventSink {
                entity,
                writer: &mut animations,
            },
        );
    }
}

/// System: окончание атак и шаг combo
pub fn player_attack_tick(time: Res<Time>, mut players: Query<(Entity, &mut PlayerCombat), With<Player>>) {
    let delta = time.delta_secs();

    for (entity, mut combat) in players.iter_mut() {
        if let Some(finished) = combat.tick(delta) {
            crate::log(&format!(
                "✅ Attack finished (entity: {:?}, next step {})",
                entity, finished.next_step
            ));
        }
    }
}

/// System: knockback / неуязвимость
pub fn player_health_tick(
    time: Res<Time>,
    mut players: Query<(&mut PlayerHealth, &mut PlayerMotion), With<Player>>,
) {
    let delta = time.delta_secs();

    for (mut health, mut motion) in players.iter_mut() {
        let mut events = Vec::new();
        health.tick(delta, &mut motion, &mut events);
    }
}

/// System: горизонтальная скорость из ввода (FixedUpdate)
pub fn player_physics_tick(mut players: Query<(&mut PlayerMotion, &mut Body2d), With<Player>>) {
    for (mut motion, mut body) in players.iter_mut() {
        motion.fixed_tick(&mut body);
    }
}
