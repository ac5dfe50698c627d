//! PlayerCombat: combo атаки игрока.
//!
//! Одна активация = один круговой hitbox-запрос в момент нажатия.
//! Каждая цель получает ровно один удар за активацию (`hit_entities`).

use bevy::prelude::*;

use crate::config::ComboConfig;
use crate::physics::{Body2d, CollisionLayers, PhysicsQuery};
use crate::player::PlayerMotion;
use crate::timers::Countdown;

use super::combo::{combo_damage, wrap_index, ComboState};

/// Результат активации атаки
#[derive(Debug, Clone, PartialEq)]
pub struct AttackActivation {
    pub step: u64,
    /// Индекс VFX (None: таблица effects пустая)
    pub effect_index: Option<usize>,
    /// Индекс звука (своя таблица, своя длина)
    pub sound_index: Option<usize>,
    pub damage: u32,
    pub finisher: bool,
    /// Точка атаки (центр hitbox'а)
    pub anchor: Vec2,
    /// Уникальные цели этой активации
    pub hit_entities: Vec<Entity>,
}

/// Событие окончания атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackFinished {
    /// Шаг combo, который будет использован следующей атакой
    pub next_step: u64,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerCombat {
    pub config: ComboConfig,
    combo: ComboState,
    attacking: bool,
    attack_timer: Countdown,
    active_effect: Option<usize>,
    /// Собственные часы (секунды с spawn), для окна сброса combo
    clock: f64,
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self::new(ComboConfig::default())
    }
}

impl PlayerCombat {
    pub fn new(config: ComboConfig) -> Self {
        Self {
            config,
            combo: ComboState::default(),
            attacking: false,
            attack_timer: Countdown::default(),
            active_effect: None,
            clock: 0.0,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn step(&self) -> u64 {
        self.combo.step
    }

    /// Активный VFX (индекс в `config.effects`), None когда атаки нет
    pub fn active_effect(&self) -> Option<usize> {
        self.active_effect
    }

    /// Имя активного VFX (для renderer'а)
    pub fn active_effect_name(&self) -> Option<&str> {
        self.active_effect
            .and_then(|index| self.config.effects.get(index))
            .map(String::as_str)
    }

    /// Имя звука для активации
    pub fn sound_name(&self, activation: &AttackActivation) -> Option<&str> {
        activation
            .sound_index
            .and_then(|index| self.config.sounds.get(index))
            .map(String::as_str)
    }

    /// Центр hitbox'а: позиция + offset, x зеркалится по facing
    pub fn attack_anchor(&self, position: Vec2, facing: f32) -> Vec2 {
        position + Vec2::new(self.config.attack_offset.x * facing, self.config.attack_offset.y)
    }

    /// Попытка атаки (rising edge кнопки)
    ///
    /// Отклоняется если уже атакуем, в dash, в hit-stun или мёртвы.
    pub fn try_attack(
        &mut self,
        body: &Body2d,
        motion: &PlayerMotion,
        physics: &dyn PhysicsQuery,
        attacker: Option<Entity>,
    ) -> Option<AttackActivation> {
        if self.attacking || motion.is_dashing() || motion.is_hit_stunned() || !motion.is_enabled() {
            return None;
        }

        if self.combo.refresh(self.clock, self.config.combo_reset_window) {
            crate::log("🔄 Combo reset");
        }

        let step = self.combo.step;
        let effect_count = self.config.effects.len();
        let effect_index = wrap_index(step, effect_count);
        let sound_index = wrap_index(step, self.config.sounds.len());
        let damage = combo_damage(
            self.config.base_damage,
            effect_index,
            effect_count,
            self.config.finisher_multiplier,
        );
        let finisher = matches!(effect_index, Some(index) if index + 1 == effect_count);

        let anchor = self.attack_anchor(body.position, motion.facing());
        let mut hit_entities: Vec<Entity> = Vec::new();
        for hit in physics.overlap_circle_all(anchor, self.config.attack_range, CollisionLayers::ENEMY) {
            let Some(owner) = hit.owner else {
                continue;
            };
            if Some(owner) == attacker || hit_entities.contains(&owner) {
                continue;
            }
            hit_entities.push(owner);
        }

        self.attacking = true;
        self.attack_timer.set(self.config.attack_duration);
        self.active_effect = effect_index;

        crate::log(&format!(
            "⚔️ Attack step {} (effect {:?}, dmg {}{}) → {} target(s)",
            step,
            effect_index,
            damage,
            if finisher { ", finisher" } else { "" },
            hit_entities.len()
        ));

        Some(AttackActivation {
            step,
            effect_index,
            sound_index,
            damage,
            finisher,
            anchor,
            hit_entities,
        })
    }

    /// Логический тик: часы + окончание атаки
    pub fn tick(&mut self, delta: f32) -> Option<AttackFinished> {
        self.clock += f64::from(delta);

        if !self.attacking || !self.attack_timer.tick_expired(delta) {
            return None;
        }

        self.attacking = false;
        self.active_effect = None;
        self.combo.advance(self.clock);

        Some(AttackFinished {
            next_step: self.combo.step,
        })
    }
}
