//! Physics module
//!
//! Kinematic тела + AABB collider world + query contract.
//! Движок рендера/физики host'а может подменить backend через `PhysicsQuery`.

pub mod body;
pub mod query;
pub mod world;

// Re-export основных типов
pub use body::{integrate_bodies, Body2d, GRAVITY};
pub use query::{ColliderHit, CollisionLayers, PhysicsQuery};
pub use world::{sync_actor_colliders, ActorCollider, Collider, ColliderWorld};
