//! Physics plugin: Avian runs in `FixedPostUpdate` on the fixed clock set up by core.
//!
//! Gravity is per scene: standard on the pitch, off in the sandbox.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;

pub const PITCH_GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(PITCH_GRAVITY))
        .add_systems(OnEnter(GameState::Pitch), |mut g: ResMut<Gravity>| g.0 = PITCH_GRAVITY)
        .add_systems(OnEnter(GameState::Sandbox), |mut g: ResMut<Gravity>| g.0 = Vec3::ZERO);
}
