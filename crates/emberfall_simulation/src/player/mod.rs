//! Player module
//!
//! Контроллеры игрока (чистые структуры с явным tick) + ECS systems.

pub mod health;
mod health_tests;
pub mod motion;
pub mod systems;

// Re-export основных типов
pub use health::{HealthEvent, PlayerHealth, PlayerTarget, ANIM_DEATH, FLICKER_ALPHA};
pub use motion::{MotionEvent, PlayerMotion, PlayerTimer};
pub use systems::{
    player_attack_tick, player_health_tick, player_logic_tick, player_physics_tick, route_player_input,
};
