//! Damage contract между акторами
//!
//! Единственный способ изменить чужого актора: `Damageable::take_damage`.
//! В ECS слое вызовы идут через `DamageRequest` события, которые применяются
//! в `apply_damage_requests` после всех логических тиков: порядок тиков
//! игрока и врагов не важен, повторы гасятся флагами invincible/dead.

use bevy::prelude::*;

/// Результат попытки нанести урон
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Guard сработал (неуязвим / уже мёртв): обычный no-op
    Ignored,
    /// Урон прошёл, актор жив
    Hurt { remaining: u32 },
    /// Урон прошёл, актор умер (терминальное состояние)
    Died,
}

impl DamageOutcome {
    pub fn applied(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Публичный контракт урона (Player и Enemy)
pub trait Damageable {
    fn take_damage(&mut self, amount: u32, source_position: Vec2) -> DamageOutcome;
}

/// Запрос на урон (пишут атакующие, применяет `apply_damage_requests`)
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
    /// Позиция источника (для направления knockback)
    pub source_position: Vec2,
}

/// Событие: урон нанесён (для UI, hit-stop, звуков)
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: актор умер
#[derive(Event, Debug, Clone)]
pub struct ActorDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
