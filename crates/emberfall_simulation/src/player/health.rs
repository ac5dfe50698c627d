//! PlayerHealth: урон, knockback, окно неуязвимости и смерть игрока
//!
//! Фазы после удара:
//! - Knockback: hit-stun держится `knockback_duration`
//! - Flicker: мигание (0.4 / 1.0 каждые `flash_delay`) до `invincibility_duration`
//!
//! Обе фазы считаются от момента удара (один общий `elapsed`).

use bevy::prelude::*;

use crate::combat::DamageOutcome;
use crate::components::{knockback_direction, Health};
use crate::config::HealthConfig;
use crate::physics::Body2d;

use super::motion::PlayerMotion;

/// Прозрачность спрайта в "тёмной" фазе мигания
pub const FLICKER_ALPHA: f32 = 0.4;

pub const ANIM_DEATH: &str = "Player_Death";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum HitPhase {
    #[default]
    None,
    Knockback,
    Flicker,
}

/// События фаз (host: UI, звуки)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthEvent {
    Hurt { remaining: u32, direction: f32 },
    Died,
    HitStunReleased,
    InvincibilityEnded,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    pub config: HealthConfig,
    health: Health,
    invincible: bool,
    dead: bool,
    phase: HitPhase,
    elapsed: f32,
}

impl Default for PlayerHealth {
    fn default() -> Self {
        Self::new(HealthConfig::default())
    }
}

impl PlayerHealth {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            health: Health::new(config.max_health),
            config,
            invincible: false,
            dead: false,
            phase: HitPhase::None,
            elapsed: 0.0,
        }
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn current(&self) -> u32 {
        self.health.current
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Прозрачность для renderer'а (мигание только в фазе Flicker)
    pub fn opacity(&self) -> f32 {
        if self.phase != HitPhase::Flicker {
            return 1.0;
        }
        let since_flicker = (self.elapsed - self.config.knockback_duration).max(0.0);
        let half_cycles = (since_flicker / self.config.flash_delay).floor() as u64;
        if half_cycles % 2 == 0 {
            FLICKER_ALPHA
        } else {
            1.0
        }
    }

    /// Нанести урон игроку
    ///
    /// No-op (`Ignored`) если неуязвим или мёртв.
    pub fn take_damage(
        &mut self,
        amount: u32,
        source_position: Vec2,
        body: &mut Body2d,
        motion: &mut PlayerMotion,
        events: &mut Vec<HealthEvent>,
    ) -> DamageOutcome {
        if self.invincible || self.dead {
            return DamageOutcome::Ignored;
        }

        self.health.take_damage(amount);

        if !self.health.is_alive() {
            self.dead = true;
            self.phase = HitPhase::None;
            motion.disable();
            body.freeze();
            events.push(HealthEvent::Died);
            crate::log_info("💀 Player died");
            return DamageOutcome::Died;
        }

        let direction = knockback_direction(body.position.x, source_position.x);

        self.invincible = true;
        self.phase = HitPhase::Knockback;
        self.elapsed = 0.0;
        motion.set_hit_stun(true);

        body.velocity = Vec2::ZERO;
        body.apply_impulse(Vec2::new(
            direction * self.config.knockback.x,
            self.config.knockback.y,
        ));

        events.push(HealthEvent::Hurt {
            remaining: self.health.current,
            direction,
        });
        crate::log(&format!(
            "💥 Player hit: -{} HP → {}/{} (knockback dir {})",
            amount, self.health.current, self.health.max, direction
        ));

        DamageOutcome::Hurt {
            remaining: self.health.current,
        }
    }

    /// Логический тик: снятие hit-stun и окончание неуязвимости
    pub fn tick(&mut self, delta: f32, motion: &mut PlayerMotion, events: &mut Vec<HealthEvent>) {
        if self.dead || self.phase == HitPhase::None {
            return;
        }

        self.elapsed += delta;

        if self.phase == HitPhase::Knockback && self.elapsed >= self.config.knockback_duration {
            motion.set_hit_stun(false);
            self.phase = HitPhase::Flicker;
            events.push(HealthEvent::HitStunReleased);
        }

        if self.phase == HitPhase::Flicker && self.elapsed >= self.config.invincibility_duration {
            self.invincible = false;
            self.phase = HitPhase::None;
            events.push(HealthEvent::InvincibilityEnded);
            crate::log("🛡️ Player invincibility ended");
        }
    }
}

/// Damageable view игрока: компоненты одной entity, заимствованные на время удара
pub struct PlayerTarget<'a> {
    pub health: &'a mut PlayerHealth,
    pub motion: &'a mut PlayerMotion,
    pub body: &'a mut Body2d,
    pub events: &'a mut Vec<HealthEvent>,
}

impl crate::combat::Damageable for PlayerTarget<'_> {
    fn take_damage(&mut self, amount: u32, source_position: Vec2) -> DamageOutcome {
        self.health
            .take_damage(amount, source_position, self.body, self.motion, self.events)
    }
}
