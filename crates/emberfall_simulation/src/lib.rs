//! Emberfall Simulation Core
//!
//! Headless ECS-симуляция 2D action-platformer'а на Bevy 0.16:
//! движение игрока (coyote time, jump buffer, dash), combo атаки,
//! урон/knockback/неуязвимость и FSM врагов.
//!
//! Контроллеры: чистые структуры с явным `tick(dt)` / `fixed_tick`,
//! Bevy systems только прокидывают компоненты и события.
//! Рендер, звук и ввод: забота host'а (см. `services`, `input`).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod input;
pub mod logger;
pub mod physics;
pub mod player;
pub mod services;
pub mod timers;

// Re-export базовых типов для удобства
pub use ai::{Enemy, EnemyState, EnemyStateKind, MachineState, Perception, StateMachine};
pub use combat::{ActorDied, DamageDealt, DamageOutcome, DamageRequest, Damageable, PlayerCombat};
pub use components::{Dead, Health, Player};
pub use config::{AudioConfig, ComboConfig, ConfigError, EnemyConfig, HealthConfig, MotionConfig, SimulationConfig};
pub use input::PlayerInput;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use physics::{ActorCollider, Body2d, ColliderWorld, CollisionLayers, PhysicsQuery};
pub use player::{PlayerHealth, PlayerMotion};
pub use services::{AnimationPlayback, AnimationRequested, AudioPlayer, AudioService, SfxRequested, SoundCue};

/// Главный plugin симуляции (events, resources, systems)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для физики
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // init_resource не перетирает то, что host вставил заранее
            .init_resource::<DeterministicRng>()
            .init_resource::<SimulationConfig>()
            .init_resource::<ColliderWorld>()
            .add_event::<PlayerInput>()
            .add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<ActorDied>()
            .add_event::<SfxRequested>()
            .add_event::<AnimationRequested>()
            .add_systems(
                Update,
                (
                    player::route_player_input,
                    player::player_logic_tick,
                    player::player_attack_tick,
                    player::player_health_tick,
                    ai::enemy_perception,
                    ai::enemy_logic_tick,
                    ai::enemy_contact_damage,
                    combat::apply_damage_requests,
                    services::dispatch_sfx,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    player::player_physics_tick,
                    ai::enemy_physics_tick,
                    physics::integrate_bodies,
                    physics::sync_actor_colliders,
                )
                    .chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Spawn игрока (секции конфига берутся из `SimulationConfig` мира)
pub fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    let config = world
        .get_resource::<SimulationConfig>()
        .cloned()
        .unwrap_or_default();

    let body = Body2d {
        gravity_scale: config.motion.gravity_scale,
        ..Body2d::at(position)
    };

    let entity = world
        .spawn((
            Player,
            body,
            ActorCollider {
                layers: CollisionLayers::PLAYER,
            },
            PlayerMotion::new(config.motion),
            PlayerCombat::new(config.combo),
            PlayerHealth::new(config.health),
            AnimationPlayback::default(),
        ))
        .id();

    log_info(&format!("🧍 Player spawned: {:?} at {:?}", entity, position));
    entity
}

/// Spawn врага (FSM стартует в Idle сразу)
pub fn spawn_enemy(world: &mut World, position: Vec2) -> Entity {
    let config = world
        .get_resource::<SimulationConfig>()
        .map(|c| c.enemy.clone())
        .unwrap_or_default();

    let mut body = Body2d::at(position);
    let mut enemy = Enemy::new(config);
    enemy.initialize(&mut body);

    let entity = world
        .spawn((
            enemy,
            body,
            ActorCollider {
                layers: CollisionLayers::ENEMY,
            },
            AnimationPlayback::default(),
        ))
        .id();

    log_info(&format!("👹 Enemy spawned: {:?} at {:?}", entity, position));
    entity
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
