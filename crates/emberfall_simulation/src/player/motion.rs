//! PlayerMotion: per-tick контроллер движения игрока
//!
//! Порядок внутри `tick` (логический тик):
//! 1. dash routine (длительность + cooldown): идёт даже во время hit-stun
//! 2. hit-stun → выход (таймеры заморожены)
//! 3. декремент coyote/buffer таймеров
//! 4. dash активен → выход (dash владеет velocity)
//! 5. ground probe → jump → facing → gravity shaping → footsteps
//!
//! `fixed_tick` (физический тик) только пишет горизонтальную скорость.

use bevy::prelude::*;

use crate::config::MotionConfig;
use crate::input::PlayerInput;
use crate::physics::{Body2d, CollisionLayers, PhysicsQuery};
use crate::timers::{Countdown, TimerSet};

pub const ANIM_IDLE: &str = "Player_idle";
pub const ANIM_RUN: &str = "Player_run";
pub const ANIM_JUMP: &str = "Player_jump";
pub const ANIM_DASH: &str = "Player_dash";
pub const ANIM_HIT: &str = "Player_Hit";

/// Скорость по X, выше которой считаем что игрок бежит (шаги)
const FOOTSTEP_SPEED_THRESHOLD: f32 = 0.1;

/// Ключи таймеров игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTimer {
    /// Coyote window: > 0 пока недавно стояли на земле
    LastGrounded,
    /// Jump buffer: > 0 пока недавно нажали прыжок
    LastJumpPressed,
}

/// Что произошло за тик (host превращает в звук/анимацию)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    Jumped,
    JumpCut,
    DashStarted,
    DashEnded,
    DashReady,
    Footstep,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerMotion {
    pub config: MotionConfig,
    timers: TimerSet<PlayerTimer>,
    move_input: Vec2,
    facing: f32,
    is_grounded: bool,
    mid_jump: bool,

    is_dashing: bool,
    can_dash: bool,
    dash_timer: Countdown,
    dash_cooldown: Countdown,
    saved_gravity: f32,

    hit_stunned: bool,
    enabled: bool,
    footstep_timer: f32,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl PlayerMotion {
    pub fn new(config: MotionConfig) -> Self {
        let mut timers = TimerSet::new();
        timers.set(PlayerTimer::LastGrounded, 0.0);
        timers.set(PlayerTimer::LastJumpPressed, 0.0);

        Self {
            saved_gravity: config.gravity_scale,
            config,
            timers,
            move_input: Vec2::ZERO,
            facing: 1.0,
            is_grounded: false,
            mid_jump: false,
            is_dashing: false,
            can_dash: true,
            dash_timer: Countdown::default(),
            dash_cooldown: Countdown::default(),
            hit_stunned: false,
            enabled: true,
            footstep_timer: 0.0,
        }
    }

    // --- Queries ---

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn is_mid_jump(&self) -> bool {
        self.mid_jump
    }

    pub fn is_dashing(&self) -> bool {
        self.is_dashing
    }

    pub fn can_dash(&self) -> bool {
        self.can_dash
    }

    pub fn is_hit_stunned(&self) -> bool {
        self.hit_stunned
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn timer(&self, key: PlayerTimer) -> f32 {
        self.timers.get(key)
    }

    pub fn foot_anchor(&self, body: &Body2d) -> Vec2 {
        body.position + self.config.foot_offset
    }

    // --- Hit / death hooks (вызывает PlayerHealth) ---

    pub fn set_hit_stun(&mut self, stunned: bool) {
        self.hit_stunned = stunned;
    }

    /// Смерть: управление отключается навсегда
    pub fn disable(&mut self) {
        self.enabled = false;
        self.move_input = Vec2::ZERO;
    }

    // --- Input ---

    /// Обработать событие ввода. Attack сюда не относится (см. `PlayerCombat`).
    pub fn handle_input(&mut self, input: &PlayerInput, body: &mut Body2d, events: &mut Vec<MotionEvent>) {
        if !self.enabled {
            return;
        }

        match *input {
            PlayerInput::Move(axis) => self.move_input = axis,
            PlayerInput::Jump(pressed) => self.on_jump(pressed, body, events),
            PlayerInput::Dash(true) => {
                self.try_dash(body, events);
            }
            PlayerInput::Dash(false) | PlayerInput::Attack(_) => {}
        }
    }

    fn on_jump(&mut self, pressed: bool, body: &mut Body2d, events: &mut Vec<MotionEvent>) {
        if pressed {
            self.timers
                .set(PlayerTimer::LastJumpPressed, self.config.jump_buffer_time);
        } else if body.velocity.y > 0.0 && self.mid_jump {
            // Variable jump height
            body.velocity.y *= self.config.jump_cut_multiplier;
            events.push(MotionEvent::JumpCut);
        }
    }

    /// Начать dash. Возвращает false если dash сейчас невозможен.
    pub fn try_dash(&mut self, body: &mut Body2d, events: &mut Vec<MotionEvent>) -> bool {
        if !self.enabled || !self.can_dash || self.is_dashing || self.hit_stunned {
            return false;
        }

        self.is_dashing = true;
        self.can_dash = false;
        self.dash_timer.set(self.config.dash_time);

        self.saved_gravity = body.gravity_scale;
        body.gravity_scale = 0.0;
        body.velocity = Vec2::new(self.facing * self.config.dash_power, 0.0);

        events.push(MotionEvent::DashStarted);
        crate::log(&format!("💨 Dash started (facing {})", self.facing));
        true
    }

    // --- Ticks ---

    /// Логический тик (ground → jump → facing → gravity → footsteps)
    pub fn tick(&mut self, delta: f32, body: &mut Body2d, physics: &dyn PhysicsQuery, events: &mut Vec<MotionEvent>) {
        if !self.enabled {
            return;
        }

        self.advance_dash(delta, body, events);

        if self.hit_stunned {
            return;
        }

        self.timers.tick(delta);

        if self.is_dashing {
            return;
        }

        self.probe_ground(body, physics);

        if self.timers.is_active(PlayerTimer::LastJumpPressed)
            && self.timers.is_active(PlayerTimer::LastGrounded)
            && !self.mid_jump
        {
            self.perform_jump(body, events);
        }

        if self.move_input.x != 0.0 {
            self.facing = self.move_input.x.signum();
        }

        body.gravity_scale = if body.velocity.y < 0.0 {
            self.config.gravity_scale * self.config.fall_gravity_multiplier
        } else {
            self.config.gravity_scale
        };

        self.update_footsteps(delta, body, events);
    }

    /// Физический тик: горизонтальная скорость из оси ввода
    pub fn fixed_tick(&mut self, body: &mut Body2d) {
        if !self.enabled || self.is_dashing || self.hit_stunned {
            return;
        }
        body.velocity.x = self.move_input.x * self.config.move_speed;
    }

    /// Клип по приоритету: hit → dash → воздух → бег → idle
    pub fn select_animation(&self, attacking: bool) -> &'static str {
        if self.hit_stunned {
            return ANIM_HIT;
        }
        if self.is_dashing {
            return ANIM_DASH;
        }
        if !self.is_grounded {
            return ANIM_JUMP;
        }
        if self.move_input.x.abs() > 0.01 && !attacking {
            ANIM_RUN
        } else {
            ANIM_IDLE
        }
    }

    fn advance_dash(&mut self, delta: f32, body: &mut Body2d, events: &mut Vec<MotionEvent>) {
        if self.is_dashing {
            if self.dash_timer.tick_expired(delta) {
                body.gravity_scale = self.saved_gravity;
                body.velocity = Vec2::ZERO;
                self.is_dashing = false;
                self.dash_cooldown.set(self.config.dash_cooldown);
                events.push(MotionEvent::DashEnded);

                if !self.dash_cooldown.is_active() {
                    self.can_dash = true;
                    events.push(MotionEvent::DashReady);
                }
            }
        } else if !self.can_dash {
            self.dash_cooldown.tick(delta);
            if !self.dash_cooldown.is_active() {
                self.can_dash = true;
                events.push(MotionEvent::DashReady);
            }
        }
    }

    fn probe_ground(&mut self, body: &Body2d, physics: &dyn PhysicsQuery) {
        let anchor = self.foot_anchor(body);
        self.is_grounded = physics.overlap_box(anchor, self.config.ground_check_size, CollisionLayers::GROUND);

        // Пока летим вверх после прыжка: coyote не перевзводится
        if self.is_grounded && body.velocity.y <= 0.0 {
            self.timers
                .set(PlayerTimer::LastGrounded, self.config.coyote_time);
            self.mid_jump = false;
        }
    }

    fn perform_jump(&mut self, body: &mut Body2d, events: &mut Vec<MotionEvent>) {
        self.mid_jump = true;
        self.timers.clear(PlayerTimer::LastGrounded);
        self.timers.clear(PlayerTimer::LastJumpPressed);

        body.velocity.y = 0.0;
        body.apply_impulse(Vec2::Y * self.config.jump_force);

        events.push(MotionEvent::Jumped);
        crate::log("🦘 Jump");
    }

    fn update_footsteps(&mut self, delta: f32, body: &Body2d, events: &mut Vec<MotionEvent>) {
        if self.is_grounded && body.velocity.x.abs() > FOOTSTEP_SPEED_THRESHOLD {
            self.footstep_timer -= delta;
            if self.footstep_timer <= 0.0 {
                events.push(MotionEvent::Footstep);
                self.footstep_timer = self.config.footstep_rate;
            }
        } else {
            // Первый шаг звучит сразу после приземления/старта
            self.footstep_timer = 0.0;
        }
    }
}
