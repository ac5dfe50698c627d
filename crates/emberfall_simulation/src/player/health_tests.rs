//! Tests for PlayerHealth (invincibility, knockback, flicker, death).

#[cfg(test)]
mod tests {
    use super::super::health::*;
    use super::super::motion::PlayerMotion;
    use crate::combat::{DamageOutcome, Damageable};
    use crate::physics::Body2d;
    use bevy::prelude::*;

    struct Rig {
        health: PlayerHealth,
        motion: PlayerMotion,
        body: Body2d,
        events: Vec<HealthEvent>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                health: PlayerHealth::default(),
                motion: PlayerMotion::default(),
                body: Body2d::at(Vec2::new(0.0, 0.5)),
                events: Vec::new(),
            }
        }

        fn hit(&mut self, amount: u32, source: Vec2) -> DamageOutcome {
            self.health
                .take_damage(amount, source, &mut self.body, &mut self.motion, &mut self.events)
        }

        fn advance(&mut self, seconds: f32, step: f32) {
            let steps = (seconds / step).round() as usize;
            for _ in 0..steps {
                self.health.tick(step, &mut self.motion, &mut self.events);
            }
        }
    }

    #[test]
    fn test_hit_applies_knockback_away_from_source() {
        let mut rig = Rig::new();
        rig.body.velocity = Vec2::new(5.0, -3.0);

        let outcome = rig.hit(1, Vec2::new(2.0, 0.5));

        assert_eq!(outcome, DamageOutcome::Hurt { remaining: 4 });
        assert!(rig.health.is_invincible());
        assert!(rig.motion.is_hit_stunned());
        // Источник справа → толкаем влево, старая скорость обнулена
        assert_eq!(rig.body.velocity, Vec2::new(-10.0, 10.0));
    }

    #[test]
    fn test_invincibility_blocks_second_hit() {
        let mut rig = Rig::new();
        rig.hit(1, Vec2::new(-1.0, 0.0));

        let outcome = rig.hit(1, Vec2::new(-1.0, 0.0));

        assert_eq!(outcome, DamageOutcome::Ignored);
        assert_eq!(rig.health.current(), 4);
    }

    #[test]
    fn test_hit_stun_released_after_knockback_duration() {
        let mut rig = Rig::new();
        rig.hit(1, Vec2::new(1.0, 0.0));

        rig.advance(0.25, 0.05);
        assert!(rig.motion.is_hit_stunned());

        rig.advance(0.1, 0.05);
        assert!(!rig.motion.is_hit_stunned());
        assert!(rig.health.is_invincible());
        assert!(rig.events.contains(&HealthEvent::HitStunReleased));
    }

    #[test]
    fn test_flicker_alternates_after_knockback() {
        let mut rig = Rig::new();
        rig.hit(1, Vec2::new(1.0, 0.0));

        // Во время knockback мигания нет
        assert_eq!(rig.health.opacity(), 1.0);

        // 0.3 → Flicker, первая половина периода тёмная
        rig.advance(0.32, 0.02);
        assert_eq!(rig.health.opacity(), FLICKER_ALPHA);

        rig.advance(0.1, 0.02);
        assert_eq!(rig.health.opacity(), 1.0);
    }

    #[test]
    fn test_invincibility_window_ends() {
        let mut rig = Rig::new();
        rig.hit(1, Vec2::new(1.0, 0.0));

        rig.advance(1.4, 0.05);
        assert!(rig.health.is_invincible());

        rig.advance(0.15, 0.05);
        assert!(!rig.health.is_invincible());
        assert_eq!(rig.health.opacity(), 1.0);
        assert!(rig.events.contains(&HealthEvent::InvincibilityEnded));

        // Снова уязвим
        assert!(rig.hit(1, Vec2::new(1.0, 0.0)).applied());
        assert_eq!(rig.health.current(), 3);
    }

    #[test]
    fn test_lethal_hit_is_terminal() {
        let mut rig = Rig::new();
        rig.body.velocity = Vec2::new(3.0, 1.0);

        let outcome = rig.hit(10, Vec2::new(1.0, 0.0));

        assert_eq!(outcome, DamageOutcome::Died);
        assert!(rig.health.is_dead());
        assert_eq!(rig.health.current(), 0);
        assert!(!rig.motion.is_enabled());
        assert!(rig.body.frozen);
        assert_eq!(rig.body.velocity, Vec2::ZERO);

        // Мёртвого больше не бьют
        assert_eq!(rig.hit(1, Vec2::ZERO), DamageOutcome::Ignored);
        assert_eq!(rig.events.iter().filter(|e| **e == HealthEvent::Died).count(), 1);
    }

    #[test]
    fn test_damageable_view_routes_to_health() {
        let mut rig = Rig::new();
        let mut target = PlayerTarget {
            health: &mut rig.health,
            motion: &mut rig.motion,
            body: &mut rig.body,
            events: &mut rig.events,
        };

        assert_eq!(
            target.take_damage(2, Vec2::new(-5.0, 0.0)),
            DamageOutcome::Hurt { remaining: 3 }
        );
        assert_eq!(rig.body.velocity.x, 10.0);
    }
}
