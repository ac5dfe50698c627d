//! Enemy: FSM-управляемый враг.
//!
//! Владеет своим health, state machine, часами и буфером эффектов.
//! Внешний мир меняет его только через `take_damage` и `set_perception`.

use bevy::prelude::*;

use crate::combat::{DamageOutcome, Damageable};
use crate::components::{knockback_direction, Health};
use crate::config::EnemyConfig;
use crate::physics::Body2d;

use super::enemy_states::{EnemyContext, EnemyEvent, EnemyState, EnemyStateKind, Perception};
use super::state_machine::StateMachine;

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub config: EnemyConfig,
    health: Health,
    machine: StateMachine<EnemyState>,
    perception: Perception,
    facing: f32,
    last_attack_time: Option<f64>,
    clock: f64,
    events: Vec<EnemyEvent>,
}

impl Default for Enemy {
    fn default() -> Self {
        Self::new(EnemyConfig::default())
    }
}

impl Enemy {
    pub fn new(config: EnemyConfig) -> Self {
        Self {
            health: Health::new(config.max_health),
            config,
            machine: StateMachine::new(),
            perception: Perception::default(),
            facing: -1.0,
            last_attack_time: None,
            clock: 0.0,
            events: Vec::new(),
        }
    }

    // --- Queries ---

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.machine.current(), Some(EnemyState::Dead))
    }

    pub fn state(&self) -> Option<&EnemyState> {
        self.machine.current()
    }

    pub fn state_kind(&self) -> Option<EnemyStateKind> {
        self.machine.current().map(EnemyState::kind)
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn perception(&self) -> Perception {
        self.perception
    }

    pub fn machine(&self) -> &StateMachine<EnemyState> {
        &self.machine
    }

    // --- Driving ---

    /// Старт FSM в Idle (повторный вызов идёт через exit текущего состояния)
    pub fn initialize(&mut self, body: &mut Body2d) {
        self.drive(body, 0.0, |machine, ctx| {
            machine.initialize(EnemyState::Idle, ctx);
        });
    }

    pub fn set_perception(&mut self, perception: Perception) {
        self.perception = perception;
    }

    /// Логический тик (Update). Неинициализированная FSM стартует в Idle.
    pub fn tick(&mut self, delta: f32, body: &mut Body2d) {
        if !self.machine.is_initialized() {
            self.initialize(body);
        }

        self.clock += f64::from(delta);
        self.drive(body, delta, |machine, ctx| machine.logic_update(ctx));
    }

    /// Физический тик (FixedUpdate)
    pub fn fixed_tick(&mut self, delta: f32, body: &mut Body2d) {
        self.drive(body, delta, |machine, ctx| machine.physics_update(ctx));
    }

    /// Накопленные эффекты с прошлого вызова
    pub fn drain_events(&mut self) -> Vec<EnemyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Касание тела игрока (contact damage): жив, не в Hit, в радиусе
    pub fn touches(&self, body: &Body2d, target_position: Vec2) -> bool {
        let harmless = matches!(
            self.machine.current(),
            None | Some(EnemyState::Hit { .. }) | Some(EnemyState::Dead)
        );
        !harmless && body.position.distance(target_position) <= self.config.contact_radius
    }

    /// Удар по врагу: Dead при 0 HP, иначе Hit с направлением от источника
    pub fn take_damage(&mut self, amount: u32, source_position: Vec2, body: &mut Body2d) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }

        self.health.take_damage(amount);

        if !self.health.is_alive() {
            self.drive(body, 0.0, |machine, ctx| {
                machine.change_state(EnemyState::Dead, ctx);
            });
            crate::log_info(&format!("💀 Enemy died (took {} dmg)", amount));
            return DamageOutcome::Died;
        }

        let direction = knockback_direction(body.position.x, source_position.x);
        self.drive(body, 0.0, |machine, ctx| {
            machine.change_state(EnemyState::hit(direction), ctx);
        });
        crate::log(&format!(
            "🩸 Enemy hit: -{} HP → {}/{} (knockback dir {})",
            amount, self.health.current, self.health.max, direction
        ));

        DamageOutcome::Hurt {
            remaining: self.health.current,
        }
    }

    fn drive<R>(
        &mut self,
        body: &mut Body2d,
        delta: f32,
        f: impl FnOnce(&mut StateMachine<EnemyState>, &mut EnemyContext<'_>) -> R,
    ) -> R {
        let Self {
            config,
            machine,
            perception,
            facing,
            last_attack_time,
            clock,
            events,
            ..
        } = self;

        let mut ctx = EnemyContext {
            body,
            config,
            perception: *perception,
            now: *clock,
            delta,
            last_attack_time,
            facing,
            events,
        };
        f(machine, &mut ctx)
    }
}

/// Damageable view врага (Enemy + его тело)
pub struct EnemyTarget<'a> {
    pub enemy: &'a mut Enemy,
    pub body: &'a mut Body2d,
}

impl Damageable for EnemyTarget<'_> {
    fn take_damage(&mut self, amount: u32, source_position: Vec2) -> DamageOutcome {
        self.enemy.take_damage(amount, source_position, self.body)
    }
}
