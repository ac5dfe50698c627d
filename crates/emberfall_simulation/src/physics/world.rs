//! ColliderWorld: встроенный AABB backend для `PhysicsQuery`
//!
//! - Статика (земля, платформы) добавляется host'ом один раз
//! - Динамика (тела акторов) пересобирается каждый fixed tick
//!   системой `sync_actor_colliders`

use bevy::prelude::*;

use super::body::Body2d;
use super::query::{ColliderHit, CollisionLayers, PhysicsQuery};

/// Axis-aligned box collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub owner: Option<Entity>,
    pub center: Vec2,
    pub half_extents: Vec2,
    pub layers: CollisionLayers,
}

impl Collider {
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    fn overlaps_box(&self, center: Vec2, half: Vec2) -> bool {
        let d = (self.center - center).abs();
        d.x <= self.half_extents.x + half.x && d.y <= self.half_extents.y + half.y
    }

    fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;
        let closest = center.clamp(min, max);
        closest.distance_squared(center) <= radius * radius
    }
}

/// Компонент: актор участвует в overlap queries на указанных слоях
#[derive(Component, Debug, Clone, Copy)]
pub struct ActorCollider {
    pub layers: CollisionLayers,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ColliderWorld {
    statics: Vec<Collider>,
    dynamics: Vec<Collider>,
}

impl ColliderWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Статический box по центру и полному размеру
    pub fn add_static(&mut self, center: Vec2, size: Vec2, layers: CollisionLayers) {
        self.statics.push(Collider {
            owner: None,
            center,
            half_extents: size * 0.5,
            layers,
        });
    }

    pub fn push_dynamic(&mut self, owner: Entity, center: Vec2, half_extents: Vec2, layers: CollisionLayers) {
        self.dynamics.push(Collider {
            owner: Some(owner),
            center,
            half_extents,
            layers,
        });
    }

    pub fn clear_dynamic(&mut self) {
        self.dynamics.clear();
    }

    pub fn statics(&self) -> &[Collider] {
        &self.statics
    }

    fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.statics.iter().chain(self.dynamics.iter())
    }

    /// Верхняя грань статической земли, через которую тело прошло за шаг
    ///
    /// `prev_bottom`/`next_bottom`: нижняя грань тела до и после интеграции.
    pub fn landing_surface(&self, x: f32, half_width: f32, prev_bottom: f32, next_bottom: f32) -> Option<f32> {
        self.statics
            .iter()
            .filter(|c| c.layers.intersects(CollisionLayers::GROUND))
            .filter(|c| (c.center.x - x).abs() < c.half_extents.x + half_width)
            .map(|c| c.top())
            .filter(|&top| prev_bottom >= top - 1e-3 && next_bottom < top)
            .reduce(f32::max)
    }
}

impl PhysicsQuery for ColliderWorld {
    fn overlap_box(&self, center: Vec2, size: Vec2, mask: CollisionLayers) -> bool {
        let half = size * 0.5;
        self.colliders()
            .any(|c| c.layers.intersects(mask) && c.overlaps_box(center, half))
    }

    fn overlap_circle_all(&self, center: Vec2, radius: f32, mask: CollisionLayers) -> Vec<ColliderHit> {
        self.colliders()
            .filter(|c| c.layers.intersects(mask) && c.overlaps_circle(center, radius))
            .map(|c| ColliderHit {
                owner: c.owner,
                layers: c.layers,
                center: c.center,
            })
            .collect()
    }
}

/// System: пересобрать динамические коллайдеры из тел акторов (FixedUpdate)
pub fn sync_actor_colliders(
    mut world: ResMut<ColliderWorld>,
    actors: Query<(Entity, &Body2d, &ActorCollider)>,
) {
    world.clear_dynamic();
    for (entity, body, collider) in actors.iter() {
        world.push_dynamic(entity, body.position, body.half_extents, collider.layers);
    }
}
