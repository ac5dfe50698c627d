//! Базовые компоненты акторов: Health, маркеры Player / Dead

use bevy::prelude::*;

/// Маркер: entity управляется игроком
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Компонент-маркер: entity мертв (health == 0)
///
/// Добавляется один раз при смерти. Трупы не деспавнятся (это забота host'а).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max (u32 + saturating_sub, отрицательным не бывает)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

/// Направление "от источника урона": источник справа → толкаем влево (-1)
pub fn knockback_direction(actor_x: f32, source_x: f32) -> f32 {
    if actor_x < source_x {
        -1.0
    } else {
        1.0
    }
}
