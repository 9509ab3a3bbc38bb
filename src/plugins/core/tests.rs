use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn clock_uses_fixed_rate_and_clamps_frame_delta() {
    let mut app = App::new();
    core::plugin(&mut app);

    let fixed = app.world().resource::<Time<Fixed>>();
    assert_eq!(fixed.timestep(), Duration::from_secs_f64(1.0 / 60.0));

    let virt = app.world().resource::<Time<Virtual>>();
    assert_eq!(virt.max_delta(), Duration::from_millis(100));
}

#[test]
fn invalid_tunables_fall_back_to_defaults() {
    let mut app = App::new();
    app.insert_resource(Tunables { ball_capacity: 0, ..default() });
    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().ball_capacity, 10);
}

#[test]
fn host_tunables_are_kept_when_valid() {
    let mut app = App::new();
    app.insert_resource(Tunables { ball_capacity: 3, ..default() });
    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().ball_capacity, 3);
}

#[test]
fn tab_toggles_scene() {
    let mut app = App::new();
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    core::plugin(&mut app);

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Tab);
    app.insert_resource(keys);

    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    app.update();

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Sandbox);
}
