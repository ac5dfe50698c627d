//! Decoded input events (устройство ввода: забота host'а)

use bevy::prelude::*;

/// Дискретные события ввода игрока
///
/// - `Move`: текущее значение оси (x: горизонталь)
/// - `Jump`: press взводит jump buffer, release делает jump-cut
/// - `Dash` / `Attack`: срабатывают только на rising edge (`true`)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    Move(Vec2),
    Jump(bool),
    Dash(bool),
    Attack(bool),
}

impl PlayerInput {
    /// Rising edge для кнопочных событий
    pub fn is_press(&self) -> bool {
        matches!(
            self,
            PlayerInput::Jump(true) | PlayerInput::Dash(true) | PlayerInput::Attack(true)
        )
    }
}
