//! Kinematic 2D тело актора
//!
//! Velocity пишут контроллеры (move, jump impulse, dash, knockback),
//! интеграция в позицию: здесь, в FixedUpdate.
//! Масса единичная: impulse == мгновенное изменение velocity.

use bevy::prelude::*;

use super::world::ColliderWorld;

/// Базовая гравитация (м/с²), умножается на `Body2d::gravity_scale`
pub const GRAVITY: f32 = 9.81;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Body2d {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    /// Половина размеров тела (центр в `position`)
    pub half_extents: Vec2,
    /// Static body: не двигается и не падает (после смерти)
    pub frozen: bool,
}

impl Default for Body2d {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            half_extents: Vec2::new(0.25, 0.5),
            frozen: false,
        }
    }
}

impl Body2d {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.frozen {
            return;
        }
        self.velocity += impulse;
    }

    pub fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.frozen = true;
    }

    pub fn bottom(&self) -> f32 {
        self.position.y - self.half_extents.y
    }

    /// Один шаг интеграции: гравитация → позиция → приземление на статику
    pub fn integrate(&mut self, delta: f32, world: &ColliderWorld) {
        if self.frozen {
            return;
        }

        self.velocity.y -= GRAVITY * self.gravity_scale * delta;

        let prev_bottom = self.bottom();
        let next = self.position + self.velocity * delta;
        let next_bottom = next.y - self.half_extents.y;

        if self.velocity.y <= 0.0 {
            if let Some(top) = world.landing_surface(next.x, self.half_extents.x, prev_bottom, next_bottom) {
                self.position = Vec2::new(next.x, top + self.half_extents.y);
                self.velocity.y = 0.0;
                return;
            }
        }

        self.position = next;
    }
}

/// System: интеграция всех тел (FixedUpdate, после контроллеров)
pub fn integrate_bodies(
    mut bodies: Query<&mut Body2d>,
    world: Res<ColliderWorld>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut body in bodies.iter_mut() {
        body.integrate(delta, &world);
    }
}
