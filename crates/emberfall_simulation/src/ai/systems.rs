//! Enemy ECS systems: perception → FSM tick → contact damage, physics в FixedUpdate.

use bevy::prelude::*;

use crate::combat::DamageRequest;
use crate::components::Player;
use crate::config::SimulationConfig;
use crate::physics::Body2d;
use crate::player::PlayerHealth;
use crate::services::{AnimationEventSink, AnimationPlayback, AnimationRequested, SfxRequested, SoundCue};

use super::enemy::Enemy;
use super::enemy_states::{EnemyEvent, EnemyStateKind, Perception};

/// Анимации для `Entered` событий (остальные события игнорируются)
pub(crate) fn play_state_animations(
    entity: Entity,
    events: &[EnemyEvent],
    playback: &mut AnimationPlayback,
    animations: &mut EventWriter<AnimationRequested>,
) {
    for event in events {
        if let EnemyEvent::Entered(kind) = event {
            playback.play(
                kind.animation(),
                &mut AnimationEventSink {
                    entity,
                    writer: &mut *animations,
                },
            );
        }
    }
}

/// System: что каждый враг видит (ближайший живой игрок)
pub fn enemy_perception(
    players: Query<(Entity, &Body2d, &PlayerHealth), With<Player>>,
    mut enemies: Query<(&mut Enemy, &Body2d), Without<Player>>,
) {
    for (mut enemy, body) in enemies.iter_mut() {
        let target = players
            .iter()
            .filter(|(_, _, health)| !health.is_dead())
            .map(|(entity, player_body, _)| (entity, player_body.position))
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(body.position)
                    .total_cmp(&b.distance_squared(body.position))
            });

        let perception = Perception::evaluate(body.position, target, &enemy.config);
        enemy.set_perception(perception);
    }
}

/// System: логический тик FSM + эффекты состояний
pub fn enemy_logic_tick(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut enemies: Query<(Entity, &mut Enemy, &mut Body2d, &mut AnimationPlayback), Without<Player>>,
    mut damage: EventWriter<DamageRequest>,
    mut sfx: EventWriter<SfxRequested>,
    mut animations: EventWriter<AnimationRequested>,
) {
    let delta = time.delta_secs();

    for (entity, mut enemy, mut body, mut playback) in enemies.iter_mut() {
        enemy.tick(delta, &mut body);
        let events = enemy.drain_events();

        play_state_animations(entity, &events, &mut playback, &mut animations);

        for event in events {
            match event {
                EnemyEvent::Entered(EnemyStateKind::Attack) => {
                    if let Some(clip) = &config.audio.enemy_attack {
                        sfx.write(SfxRequested {
                            source: entity,
                            cue: SoundCue::new(clip.clone()),
                        });
                    }
                }
                EnemyEvent::Strike { target, damage: amount } => {
                    damage.write(DamageRequest {
                        attacker: Some(entity),
                        target,
                        amount,
                        source_position: body.position,
                    });
                }
                EnemyEvent::Entered(_) => {}
            }
        }
    }
}

/// System: урон от касания тела врага (неуязвимость игрока гасит повторы)
pub fn enemy_contact_damage(
    players: Query<(Entity, &Body2d, &PlayerHealth), With<Player>>,
    enemies: Query<(Entity, &Enemy, &Body2d), Without<Player>>,
    mut damage: EventWriter<DamageRequest>,
) {
    for (player, player_body, health) in players.iter() {
        if health.is_dead() || health.is_invincible() {
            continue;
        }

        for (entity, enemy, body) in enemies.iter() {
            if enemy.touches(body, player_body.position) {
                damage.write(DamageRequest {
                    attacker: Some(entity),
                    target: player,
                    amount: enemy.config.contact_damage,
                    source_position: body.position,
                });
            }
        }
    }
}

/// System: физический тик FSM (FixedUpdate)
pub fn enemy_physics_tick(time: Res<Time<Fixed>>, mut enemies: Query<(&mut Enemy, &mut Body2d), Without<Player>>) {
    let delta = time.delta_secs();

    for (mut enemy, mut body) in enemies.iter_mut() {
        enemy.fixed_tick(delta, &mut body);
    }
}
