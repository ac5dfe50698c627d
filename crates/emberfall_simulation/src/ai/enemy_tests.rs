//! Tests for Enemy FSM (perception, chase/attack cycle, hit, death).

#[cfg(test)]
mod tests {
    use super::super::enemy::*;
    use super::super::enemy_states::*;
    use crate::combat::{DamageOutcome, Damageable};
    use crate::config::EnemyConfig;
    use crate::physics::Body2d;
    use bevy::prelude::*;

    const DT: f32 = 0.05;

    struct Rig {
        enemy: Enemy,
        body: Body2d,
        player: Entity,
        events: Vec<EnemyEvent>,
    }

    impl Rig {
        fn new() -> Self {
            let mut enemy = Enemy::default();
            let mut body = Body2d::at(Vec2::new(0.0, 0.5));
            enemy.initialize(&mut body);
            Self {
                enemy,
                body,
                player: Entity::from_raw(1),
                events: Vec::new(),
            }
        }

        /// Один кадр: perception → logic → physics (тело не интегрируется)
        fn step(&mut self, player_position: Option<Vec2>) {
            let target = player_position.map(|position| (self.player, position));
            let perception = Perception::evaluate(self.body.position, target, &self.enemy.config);
            self.enemy.set_perception(perception);
            self.enemy.tick(DT, &mut self.body);
            self.enemy.fixed_tick(DT, &mut self.body);
            self.events.extend(self.enemy.drain_events());
        }

        fn run(&mut self, frames: usize, player_position: Option<Vec2>) {
            for _ in 0..frames {
                self.step(player_position);
            }
        }

        fn entered(&self, kind: EnemyStateKind) -> usize {
            self.events
                .iter()
                .filter(|e| **e == EnemyEvent::Entered(kind))
                .count()
        }

        fn strikes(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, EnemyEvent::Strike { .. }))
                .count()
        }
    }

    #[test]
    fn test_perception_respects_range_and_height() {
        let config = EnemyConfig::default();
        let player = Entity::from_raw(1);
        let origin = Vec2::new(0.0, 0.5);

        let far = Perception::evaluate(origin, Some((player, Vec2::new(7.0, 0.5))), &config);
        assert!(!far.target_visible);

        let near = Perception::evaluate(origin, Some((player, Vec2::new(-4.0, 0.5))), &config);
        assert!(near.target_visible);
        assert!(!near.target_in_attack_range);

        let close = Perception::evaluate(origin, Some((player, Vec2::new(1.0, 0.5))), &config);
        assert!(close.target_in_attack_range);

        // На платформе высоко над врагом: не видим
        let above = Perception::evaluate(origin, Some((player, Vec2::new(1.0, 4.0))), &config);
        assert!(!above.target_visible);
        assert!(!above.target_in_attack_range);

        assert_eq!(Perception::evaluate(origin, None, &config), Perception::default());
    }

    #[test]
    fn test_full_cycle_idle_chase_attack_hit() {
        let mut rig = Rig::new();

        // Игрок далеко: Idle
        rig.run(5, Some(Vec2::new(10.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Idle));

        // Игрок в поле зрения: Chase ровно один раз, бежим к нему
        rig.run(5, Some(Vec2::new(4.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Chase));
        assert_eq!(rig.entered(EnemyStateKind::Chase), 1);
        assert_eq!(rig.body.velocity.x, 3.0);
        assert_eq!(rig.enemy.facing(), 1.0);

        // В радиусе атаки: Attack, стоим на месте
        rig.step(Some(Vec2::new(1.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Attack));
        assert_eq!(rig.body.velocity.x, 0.0);

        // Strike один раз, через attack_state_duration обратно в Chase
        rig.run(25, Some(Vec2::new(1.0, 0.5)));
        assert_eq!(rig.strikes(), 1);
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Chase));
        // Cooldown ещё не прошёл: вторая атака не началась
        assert_eq!(rig.entered(EnemyStateKind::Attack), 1);

        // Удар справа: Hit с knockback влево
        let outcome = rig.enemy.take_damage(1, Vec2::new(1.0, 0.5), &mut rig.body);
        assert_eq!(outcome, DamageOutcome::Hurt { remaining: 2 });
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Hit));
        assert_eq!(rig.body.velocity, Vec2::new(-6.0, 4.0));

        rig.run(7, Some(Vec2::new(1.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Hit));

        rig.run(2, Some(Vec2::new(1.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Chase));
    }

    #[test]
    fn test_strike_misses_when_player_left_range() {
        let mut rig = Rig::new();
        rig.run(2, Some(Vec2::new(1.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Attack));

        // Игрок отпрыгнул до активного кадра
        rig.run(12, Some(Vec2::new(3.0, 0.5)));
        assert_eq!(rig.strikes(), 0);
    }

    #[test]
    fn test_attack_waits_for_cooldown() {
        let mut rig = Rig::new();
        let player = Some(Vec2::new(1.0, 0.5));

        // 1.1s атаки + ещё 0.5s в Chase: cooldown (2s) не истёк
        rig.run(2 + 23 + 10, player);
        assert_eq!(rig.entered(EnemyStateKind::Attack), 1);

        // После 2s с начала атаки: следующая
        rig.run(10, player);
        assert_eq!(rig.entered(EnemyStateKind::Attack), 2);
    }

    #[test]
    fn test_chase_gives_up_after_losing_sight() {
        let mut rig = Rig::new();
        rig.run(2, Some(Vec2::new(4.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Chase));

        // lose_sight_time = 2s
        rig.run(35, Some(Vec2::new(20.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Chase));

        rig.run(10, Some(Vec2::new(20.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Idle));
        assert_eq!(rig.body.velocity.x, 0.0);
    }

    #[test]
    fn test_hit_while_hit_reenters() {
        let mut rig = Rig::new();
        rig.enemy.take_damage(1, Vec2::new(-1.0, 0.5), &mut rig.body);
        let enters = rig.enemy.machine().enter_count();
        let exits = rig.enemy.machine().exit_count();

        rig.enemy.take_damage(1, Vec2::new(2.0, 0.5), &mut rig.body);

        assert_eq!(rig.enemy.machine().enter_count(), enters + 1);
        assert_eq!(rig.enemy.machine().exit_count(), exits + 1);
        // Новое направление, velocity сброшена перед импульсом
        assert_eq!(rig.body.velocity, Vec2::new(-6.0, 4.0));
        assert_eq!(rig.enemy.health().current, 1);
    }

    #[test]
    fn test_death_is_terminal() {
        let mut rig = Rig::new();
        let mut target = EnemyTarget {
            enemy: &mut rig.enemy,
            body: &mut rig.body,
        };

        assert!(target.take_damage(1, Vec2::ZERO).applied());
        assert_eq!(target.take_damage(5, Vec2::ZERO), DamageOutcome::Died);
        assert_eq!(target.take_damage(1, Vec2::ZERO), DamageOutcome::Ignored);

        assert!(rig.enemy.is_dead());
        assert_eq!(rig.body.velocity, Vec2::ZERO);

        rig.run(40, Some(Vec2::new(1.0, 0.5)));
        assert_eq!(rig.enemy.state_kind(), Some(EnemyStateKind::Dead));
        assert_eq!(rig.entered(EnemyStateKind::Dead), 1);
        assert_eq!(rig.strikes(), 0);
    }

    #[test]
    fn test_contact_only_when_alive_and_not_hit() {
        let mut rig = Rig::new();
        let player = Vec2::new(0.5, 0.5);

        assert!(rig.enemy.touches(&rig.body, player));
        assert!(!rig.enemy.touches(&rig.body, Vec2::new(2.0, 0.5)));

        rig.enemy.take_damage(1, Vec2::ZERO, &mut rig.body);
        assert!(!rig.enemy.touches(&rig.body, player));

        let mut dead = Rig::new();
        dead.enemy.take_damage(99, Vec2::ZERO, &mut dead.body);
        assert!(!dead.enemy.touches(&dead.body, player));
    }
}
