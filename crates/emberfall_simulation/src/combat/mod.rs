//! Combat module
//!
//! Combo атаки игрока + общий damage contract для всех акторов.

pub mod combo;
pub mod damage;
pub mod resolver;
pub mod systems;

// Re-export основных типов
pub use combo::{combo_damage, wrap_index, ComboState};
pub use damage::{ActorDied, DamageDealt, DamageOutcome, DamageRequest, Damageable};
pub use resolver::{AttackActivation, AttackFinished, PlayerCombat};
pub use systems::apply_damage_requests;
