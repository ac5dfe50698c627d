//! Tuning параметры симуляции (data-driven)
//!
//! Все значения по умолчанию: из исходных настроек игры.
//! `SimulationConfig`: Resource, компоненты копируют свою секцию при spawn.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ошибки загрузки конфига (единственная fallible поверхность crate'а)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Движение игрока: прыжок, гравитация, dash, coyote/buffer окна
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MotionConfig {
    pub move_speed: f32,
    pub jump_force: f32,
    /// Множитель вертикальной скорости при отпускании прыжка (0..1)
    pub jump_cut_multiplier: f32,
    pub gravity_scale: f32,
    pub fall_gravity_multiplier: f32,

    pub dash_power: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,

    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Ground probe box (ширина, высота)
    pub ground_check_size: Vec2,
    /// Смещение ног относительно центра тела
    pub foot_offset: Vec2,

    /// Интервал шагов при беге (секунды)
    pub footstep_rate: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            jump_force: 16.0,
            jump_cut_multiplier: 0.5,
            gravity_scale: 4.5,
            fall_gravity_multiplier: 1.5,
            dash_power: 24.0,
            dash_time: 0.2,
            dash_cooldown: 1.0,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            ground_check_size: Vec2::new(0.5, 0.2),
            foot_offset: Vec2::new(0.0, -0.5),
            footstep_rate: 0.3,
        }
    }
}

/// Combo атаки игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct ComboConfig {
    pub attack_duration: f32,
    /// Радиус круглого hitbox'а атаки
    pub attack_range: f32,
    /// Смещение точки атаки (x зеркалится по facing)
    pub attack_offset: Vec2,
    pub base_damage: u32,
    /// Урон на последнем слоте effect-таблицы умножается на это значение
    pub finisher_multiplier: u32,
    pub combo_reset_window: f32,
    /// VFX на каждый шаг combo (индекс = step mod len)
    pub effects: Vec<String>,
    /// Звуки атаки (индекс = step mod len, своя длина)
    pub sounds: Vec<String>,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            attack_duration: 0.2,
            attack_range: 0.5,
            attack_offset: Vec2::new(0.6, 0.0),
            base_damage: 1,
            finisher_multiplier: 2,
            combo_reset_window: 0.8,
            effects: vec![
                "slash_1".to_string(),
                "slash_2".to_string(),
                "slash_finisher".to_string(),
            ],
            sounds: vec!["attack_swing_a".to_string(), "attack_swing_b".to_string()],
        }
    }
}

/// Здоровье игрока, knockback и окно неуязвимости
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct HealthConfig {
    pub max_health: u32,
    pub invincibility_duration: f32,
    /// Половина периода мигания
    pub flash_delay: f32,
    pub knockback: Vec2,
    /// Время без управления после удара (hit-stun)
    pub knockback_duration: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 5,
            invincibility_duration: 1.5,
            flash_delay: 0.1,
            knockback: Vec2::new(10.0, 10.0),
            knockback_duration: 0.3,
        }
    }
}

/// Параметры врага (FSM + боевые значения)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: u32,
    /// Дистанция обнаружения игрока по X
    pub sight_range: f32,
    /// Допуск по высоте для обнаружения
    pub sight_height: f32,
    /// Через сколько секунд без видимости игрока Chase → Idle
    pub lose_sight_time: f32,
    pub chase_speed: f32,

    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attack_state_duration: f32,
    /// Задержка удара от начала Attack (момент "активного кадра")
    pub attack_strike_delay: f32,
    pub attack_damage: u32,

    /// Урон при касании тела игрока
    pub contact_damage: u32,
    pub contact_radius: f32,

    pub knockback: Vec2,
    pub knockback_duration: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            sight_range: 6.0,
            sight_height: 2.0,
            lose_sight_time: 2.0,
            chase_speed: 3.0,
            attack_range: 1.2,
            attack_cooldown: 2.0,
            attack_state_duration: 1.1,
            attack_strike_delay: 0.4,
            attack_damage: 1,
            contact_damage: 1,
            contact_radius: 0.6,
            knockback: Vec2::new(6.0, 4.0),
            knockback_duration: 0.4,
        }
    }
}

/// Имена звуковых клипов (пустое значение: звук просто не играет)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct AudioConfig {
    pub jump: Option<String>,
    pub dash: Option<String>,
    pub player_hurt: Option<String>,
    pub enemy_hurt: Option<String>,
    pub enemy_attack: Option<String>,
    /// Варианты звука шага (случайный выбор через DeterministicRng)
    pub footsteps: Vec<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            jump: Some("jump".to_string()),
            dash: Some("dash".to_string()),
            player_hurt: Some("player_hurt".to_string()),
            enemy_hurt: Some("enemy_hurt".to_string()),
            enemy_attack: Some("enemy_attack".to_string()),
            footsteps: vec![
                "footstep_1".to_string(),
                "footstep_2".to_string(),
                "footstep_3".to_string(),
            ],
        }
    }
}

/// Полный набор tuning параметров (Resource)
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct SimulationConfig {
    pub motion: MotionConfig,
    pub combo: ComboConfig,
    pub health: HealthConfig,
    pub enemy: EnemyConfig,
    pub audio: AudioConfig,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Проверка значений, при которых таймеры/физика теряют смысл
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("motion.move_speed", self.motion.move_speed),
            ("motion.dash_time", self.motion.dash_time),
            ("motion.coyote_time", self.motion.coyote_time),
            ("motion.jump_buffer_time", self.motion.jump_buffer_time),
            ("combo.attack_duration", self.combo.attack_duration),
            ("combo.attack_range", self.combo.attack_range),
            ("health.flash_delay", self.health.flash_delay),
            ("enemy.attack_state_duration", self.enemy.attack_state_duration),
            ("enemy.knockback_duration", self.enemy.knockback_duration),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.motion.jump_cut_multiplier) {
            return Err(ConfigError::Invalid {
                field: "motion.jump_cut_multiplier",
                reason: "must be within 0..=1",
            });
        }
        if self.combo.finisher_multiplier == 0 {
            return Err(ConfigError::Invalid {
                field: "combo.finisher_multiplier",
                reason: "must be at least 1",
            });
        }
        if self.health.max_health == 0 || self.enemy.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                reason: "actors must spawn alive",
            });
        }
        Ok(())
    }
}
