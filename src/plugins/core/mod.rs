//! Core plugin: shared resources and the frame clock.
//!
//! - `Tunables` are validated once here; anything invalid falls back to defaults.
//! - Simulation runs at a fixed rate; the virtual clock clamps a single frame's
//!   delta so a stalled frame (suspended tab, debugger) cannot trigger an
//!   unbounded burst of catch-up steps.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();

    if let Err(e) = app.world().resource::<Tunables>().validate() {
        warn!("Invalid tunables ({e}), falling back to defaults");
        app.insert_resource(Tunables::default());
    }

    let tunables = app.world().resource::<Tunables>().clone();
    app.insert_resource(Time::<Fixed>::from_hz(tunables.fixed_hz))
        .insert_resource(Time::<Virtual>::from_max_delta(tunables.max_frame_delta))
        .insert_resource(ClearColor(Color::srgb(0.55, 0.75, 0.95)))
        .add_systems(Update, switch_scene);
}

/// Tab flips between the pitch and the sandbox.
fn switch_scene(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else { return; };
    if keys.just_pressed(KeyCode::Tab) {
        next.set(state.get().toggled());
    }
}

#[cfg(test)]
mod tests;
