//! Состояния врага: Idle → Chase → Attack → Chase, Hit из любого, Dead (терминальное).

use bevy::prelude::*;

use crate::config::EnemyConfig;
use crate::physics::Body2d;

use super::state_machine::MachineState;

/// Что враг знает об игроке в этом тике
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Perception {
    pub target: Option<Entity>,
    pub target_position: Option<Vec2>,
    pub target_visible: bool,
    pub target_in_attack_range: bool,
}

impl Perception {
    /// Видимость по прямоугольнику (sight_range по X, sight_height по Y).
    ///
    /// `target` = None → игрока нет (или он мёртв): ничего не видим.
    pub fn evaluate(enemy_position: Vec2, target: Option<(Entity, Vec2)>, config: &EnemyConfig) -> Self {
        let Some((entity, position)) = target else {
            return Self::default();
        };

        let delta = (position - enemy_position).abs();
        let within_height = delta.y <= config.sight_height;

        Self {
            target: Some(entity),
            target_position: Some(position),
            target_visible: within_height && delta.x <= config.sight_range,
            target_in_attack_range: within_height && delta.x <= config.attack_range,
        }
    }
}

/// Вид состояния без данных (логи, анимации, snapshot'ы)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EnemyStateKind {
    Idle,
    Chase,
    Attack,
    Hit,
    Dead,
}

impl EnemyStateKind {
    pub fn animation(&self) -> &'static str {
        match self {
            EnemyStateKind::Idle => "Idle",
            EnemyStateKind::Chase => "Move",
            EnemyStateKind::Attack => "Attack",
            EnemyStateKind::Hit => "Hit",
            EnemyStateKind::Dead => "Die",
        }
    }
}

/// Эффекты состояний (ECS слой превращает в анимации / DamageRequest)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyEvent {
    Entered(EnemyStateKind),
    /// Активный кадр атаки попал по цели
    Strike { target: Entity, damage: u32 },
}

/// Контекст состояний (заимствования компонентов одной entity на время вызова)
pub struct EnemyContext<'a> {
    pub body: &'a mut Body2d,
    pub config: &'a EnemyConfig,
    pub perception: Perception,
    /// Часы врага (секунды с spawn)
    pub now: f64,
    pub delta: f32,
    pub last_attack_time: &'a mut Option<f64>,
    pub facing: &'a mut f32,
    pub events: &'a mut Vec<EnemyEvent>,
}

impl EnemyContext<'_> {
    fn attack_ready(&self) -> bool {
        match *self.last_attack_time {
            Some(last) => self.now - last >= f64::from(self.config.attack_cooldown),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    Idle,
    Chase {
        /// Сколько секунд подряд игрок не виден
        unseen_for: f32,
    },
    Attack {
        elapsed: f32,
        struck: bool,
    },
    Hit {
        /// Направление knockback (-1 / +1), выставляется до enter
        direction: f32,
        elapsed: f32,
    },
    Dead,
}

impl EnemyState {
    pub fn chase() -> Self {
        EnemyState::Chase { unseen_for: 0.0 }
    }

    pub fn attack() -> Self {
        EnemyState::Attack {
            elapsed: 0.0,
            struck: false,
        }
    }

    pub fn hit(direction: f32) -> Self {
        EnemyState::Hit {
            direction,
            elapsed: 0.0,
        }
    }

    pub fn kind(&self) -> EnemyStateKind {
        match self {
            EnemyState::Idle => EnemyStateKind::Idle,
            EnemyState::Chase { .. } => EnemyStateKind::Chase,
            EnemyState::Attack { .. } => EnemyStateKind::Attack,
            EnemyState::Hit { .. } => EnemyStateKind::Hit,
            EnemyState::Dead => EnemyStateKind::Dead,
        }
    }
}

impl<'a> MachineState<EnemyContext<'a>> for EnemyState {
    fn name(&self) -> &'static str {
        match self.kind() {
            EnemyStateKind::Idle => "Idle",
            EnemyStateKind::Chase => "Chase",
            EnemyStateKind::Attack => "Attack",
            EnemyStateKind::Hit => "Hit",
            EnemyStateKind::Dead => "Dead",
        }
    }

    fn enter(&mut self, ctx: &mut EnemyContext<'a>) {
        match *self {
            EnemyState::Idle | EnemyState::Dead => {
                ctx.body.velocity = Vec2::ZERO;
            }
            EnemyState::Chase { .. } => {}
            EnemyState::Attack { .. } => {
                ctx.body.velocity = Vec2::ZERO;
                *ctx.last_attack_time = Some(ctx.now);
            }
            EnemyState::Hit { direction, .. } => {
                ctx.body.velocity = Vec2::ZERO;
                ctx.body.apply_impulse(Vec2::new(
                    direction * ctx.config.knockback.x,
                    ctx.config.knockback.y,
                ));
            }
        }
        ctx.events.push(EnemyEvent::Entered(self.kind()));
    }

    fn logic_update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<Self> {
        let perception = ctx.perception;

        match self {
            EnemyState::Idle => perception.target_visible.then(EnemyState::chase),

            EnemyState::Chase { unseen_for } => {
                if perception.target_in_attack_range && ctx.attack_ready() {
                    return Some(EnemyState::attack());
                }

                if perception.target_visible {
                    *unseen_for = 0.0;
                    return None;
                }

                *unseen_for += ctx.delta;
                (*unseen_for >= ctx.config.lose_sight_time).then_some(EnemyState::Idle)
            }

            EnemyState::Attack { elapsed, struck } => {
                *elapsed += ctx.delta;

                if !*struck && *elapsed >= ctx.config.attack_strike_delay {
                    *struck = true;
                    if let (true, Some(target)) = (perception.target_in_attack_range, perception.target) {
                        ctx.events.push(EnemyEvent::Strike {
                            target,
                            damage: ctx.config.attack_damage,
                        });
                    }
                }

                (*elapsed >= ctx.config.attack_state_duration).then(EnemyState::chase)
            }

            EnemyState::Hit { elapsed, .. } => {
                *elapsed += ctx.delta;
                (*elapsed >= ctx.config.knockback_duration).then(EnemyState::chase)
            }

            EnemyState::Dead => None,
        }
    }

    fn physics_update(&mut self, ctx: &mut EnemyContext<'a>) {
        match self {
            EnemyState::Chase { .. } => {
                let Some(target) = ctx.perception.target_position else {
                    ctx.body.velocity.x = 0.0;
                    return;
                };

                let dx = target.x - ctx.body.position.x;
                if dx.abs() > f32::EPSILON {
                    *ctx.facing = dx.signum();
                    ctx.body.velocity.x = *ctx.facing * ctx.config.chase_speed;
                } else {
                    ctx.body.velocity.x = 0.0;
                }
            }
            EnemyState::Idle | EnemyState::Attack { .. } => {
                ctx.body.velocity.x = 0.0;
            }
            EnemyState::Hit { .. } | EnemyState::Dead => {}
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, EnemyState::Dead)
    }
}
