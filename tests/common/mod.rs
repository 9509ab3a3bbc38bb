//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - `AssetPlugin` + asset storage for meshes/materials, since scene spawners
//!   and the ball template allocate handles even without a renderer.
//! - we then call `goal_range::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

use goal_range::common::state::GameState;
use goal_range::plugins::projectiles::template::BallTemplate;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.init_asset::<Mesh>();
    app.init_asset::<StandardMaterial>();

    goal_range::game::configure_headless(&mut app);
    // `App::run` would do this; headless tests drive `update()` by hand, and
    // Avian registers its diagnostics resources in `Plugin::finish`.
    app.finish();
    app.cleanup();

    // One fixed step per update keeps physics deterministic across machines.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));
    app
}

/// Headless app past Startup with a ball template that is already resolved.
pub fn app_ready_to_shoot() -> App {
    let mut app = app_headless();
    app.update();
    app.insert_resource(BallTemplate::ready(Handle::default(), Handle::default(), Handle::default()));
    app
}

pub fn enter(app: &mut App, state: GameState) {
    app.world_mut().resource_mut::<NextState<GameState>>().set(state);
    app.update();
}

pub fn ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}
