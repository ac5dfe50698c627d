//! Damage application system.

use bevy::prelude::*;

use crate::ai::systems::play_state_animations;
use crate::ai::{Enemy, EnemyTarget};
use crate::components::{Dead, Player};
use crate::config::SimulationConfig;
use crate::physics::{ActorCollider, Body2d};
use crate::player::{PlayerHealth, PlayerMotion, PlayerTarget, ANIM_DEATH};
use crate::services::{AnimationEventSink, AnimationPlayback, AnimationRequested, SfxRequested, SoundCue};

use super::damage::{ActorDied, DamageDealt, DamageOutcome, DamageRequest, Damageable};

/// System: применить все DamageRequest этого кадра.
///
/// Запросы применяются по порядку; повторный удар по неуязвимому/мёртвому
/// актору: `Ignored`. Неизвестная цель (despawn, не актор): warning.
pub fn apply_damage_requests(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    config: Res<SimulationConfig>,
    mut players: Query<
        (&mut PlayerHealth, &mut PlayerMotion, &mut Body2d, &mut AnimationPlayback),
        With<Player>,
    >,
    mut enemies: Query<(&mut Enemy, &mut Body2d, &mut AnimationPlayback), Without<Player>>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<ActorDied>,
    mut sfx: EventWriter<SfxRequested>,
    mut animations: EventWriter<AnimationRequested>,
) {
    for request in requests.read() {
        let target = request.target;

        let (outcome, hurt_sound) = if let Ok((mut health, mut motion, mut body, mut playback)) =
            players.get_mut(target)
        {
            let mut events = Vec::new();
            let outcome = PlayerTarget {
                health: &mut *health,
                motion: &mut *motion,
                body: &mut *body,
                events: &mut events,
            }
            .take_damage(request.amount, request.source_position);

            if outcome == DamageOutcome::Died {
                playback.play(
                    ANIM_DEATH,
                    &mut AnimationEventSink {
                        entity: target,
                        writer: &mut animations,
                    },
                );
            }
            (outcome, config.audio.player_hurt.as_ref())
        } else if let Ok((mut enemy, mut body, mut playback)) = enemies.get_mut(target) {
            let outcome = EnemyTarget {
                enemy: &mut *enemy,
                body: &mut *body,
            }
            .take_damage(request.amount, request.source_position);

            // Hit/Dead enter → анимация сразу, не ждём следующего тика
            let events = enemy.drain_events();
            play_state_animations(target, &events, &mut playback, &mut animations);

            if outcome == DamageOutcome::Died {
                // Труп больше не участвует в hitbox-запросах
                commands.entity(target).remove::<ActorCollider>();
            }
            (outcome, config.audio.enemy_hurt.as_ref())
        } else {
            crate::log_warning(&format!(
                "⚠️ DamageRequest: target {:?} is not a damageable actor (attacker {:?})",
                target, request.attacker
            ));
            continue;
        };

        if !outcome.applied() {
            continue;
        }

        if let Some(clip) = hurt_sound {
            sfx.write(SfxRequested {
                source: target,
                cue: SoundCue::new(clip.clone()),
            });
        }

        let target_died = outcome == DamageOutcome::Died;
        dealt_events.write(DamageDealt {
            attacker: request.attacker,
            target,
            damage: request.amount,
            target_died,
        });

        if target_died {
            commands.entity(target).insert(Dead);
            died_events.write(ActorDied {
                entity: target,
                killer: request.attacker,
            });
            crate::log_info(&format!(
                "💀 Actor {:?} died (killer: {:?})",
                target, request.attacker
            ));
        }
    }
}
