//! Projectiles plugin: fire → bounded pool → goal detection → visual sync.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) poll_ball_template: resolve the async ball mesh once                  │
//!│                                                                            │
//!│  (B) Producer: request_shots                                               │
//!│      - reads: MouseButton input, PointerLock, Player Transform/PlayerLook  │
//!│      - writes: SpawnBallRequest message                                    │
//!│                                                                            │
//!│  (C) Consumer: allocate_balls                                              │
//!│      - reads: SpawnBallRequest messages, BallTemplate                      │
//!│      - mutates: ProjectilePool (evict oldest, then admit)                  │
//!│      - writes: ProjectileEvicted message                                   │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Avian steps the simulation, writes Position / Rotation                │
//!│                                                                            │
//!│  (E) detect_goals                                                          │
//!│      - reads: Position, GoalVolume                                         │
//!│      - mutates: Projectile score state, SessionScore                       │
//!│      - writes: GoalScored message                                          │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!PostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (F) sync_ball_visuals: body pose + score state → visual (one direction)   │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Leaving the pitch releases every live ball; entering it resets the score.

pub mod allocator;
pub mod components;
pub mod goal;
pub mod launch;
pub mod messages;
pub mod pool;
pub mod request;
pub mod sync;
pub mod template;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player;

pub struct ProjectilesPlugin;

fn reset_session(mut score: ResMut<goal::SessionScore>) {
    *score = goal::SessionScore::default();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let tunables = app.world().resource::<Tunables>().clone();
        let volume = tunables.goal_volume().unwrap_or_else(|e| {
            warn!("Invalid goal volume ({e}), using default");
            goal::GoalVolume::default()
        });

        app.insert_resource(pool::ProjectilePool::new(tunables.ball_capacity))
            .insert_resource(goal::SessionScore::default())
            .insert_resource(volume)
            .add_message::<messages::SpawnBallRequest>()
            .add_message::<messages::ProjectileEvicted>()
            .add_message::<messages::GoalScored>()
            .add_systems(Startup, template::begin_ball_template)
            .add_systems(Update, template::poll_ball_template);

        // Session boundaries
        app.add_systems(OnEnter(GameState::Pitch), reset_session)
            .add_systems(OnExit(GameState::Pitch), pool::teardown_pool);

        // Update-phase pipeline: request -> allocate.
        // The click that locks the pointer must not also fire.
        app.add_systems(
            Update,
            (
                request::request_shots.before(player::update_pointer_lock),
                allocator::allocate_balls.after(request::request_shots),
            )
                .run_if(in_state(GameState::Pitch)),
        );

        // Scoring samples post-step positions.
        app.add_systems(
            FixedPostUpdate,
            goal::detect_goals
                .after(PhysicsSystems::Last)
                .run_if(in_state(GameState::Pitch)),
        );

        app.add_systems(
            PostUpdate,
            sync::sync_ball_visuals.before(TransformSystems::Propagate),
        );
    }
}
