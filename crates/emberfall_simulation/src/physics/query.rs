//! Physics query service (ground probe + attack hitbox)
//!
//! Контроллеры не знают про конкретный physics backend: они получают
//! `&dyn PhysicsQuery` параметром. Встроенная реализация: `ColliderWorld`.

use bevy::prelude::*;
use bitflags::bitflags;

bitflags! {
    /// Слои коллизий (маска для spatial queries)
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CollisionLayers: u32 {
        const GROUND = 1 << 0;
        const PLAYER = 1 << 1;
        const ENEMY  = 1 << 2;
    }
}

/// Результат overlap query: какой collider пересёкся и кому он принадлежит
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderHit {
    /// Entity-владелец (None для статической геометрии уровня)
    pub owner: Option<Entity>,
    pub layers: CollisionLayers,
    pub center: Vec2,
}

/// Контракт physics backend'а.
///
/// Возвращает все коллайдеры, пересекающие фигуру в момент запроса;
/// между вызовами ничего не кэшируется.
pub trait PhysicsQuery {
    fn overlap_box(&self, center: Vec2, size: Vec2, mask: CollisionLayers) -> bool;

    fn overlap_circle_all(&self, center: Vec2, radius: f32, mask: CollisionLayers) -> Vec<ColliderHit>;
}
