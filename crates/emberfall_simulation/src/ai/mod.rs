//! AI module
//!
//! Generic state machine + враг поверх неё.

pub mod enemy;
pub mod enemy_states;
mod enemy_tests;
pub mod state_machine;
pub mod systems;

// Re-export основных типов
pub use enemy::{Enemy, EnemyTarget};
pub use enemy_states::{EnemyContext, EnemyEvent, EnemyState, EnemyStateKind, Perception};
pub use state_machine::{MachineState, StateMachine};
pub use systems::{enemy_contact_damage, enemy_logic_tick, enemy_perception, enemy_physics_tick};
