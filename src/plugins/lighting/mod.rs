//! Lighting plugin (render-only).

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

pub fn plugin(app: &mut App) {
    app.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    })
    .add_systems(OnEnter(GameState::Pitch), spawn_sun)
    .add_systems(OnEnter(GameState::Sandbox), spawn_hemisphere_fill);
}

fn spawn_sun(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 15.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::Pitch),
    ));
}

/// Soft key light from above; the sandbox has no shadows to speak of.
fn spawn_hemisphere_fill(mut commands: Commands) {
    commands.spawn((
        Name::new("FillLight"),
        DirectionalLight {
            illuminance: 6_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        DespawnOnExit(GameState::Sandbox),
    ));
}
