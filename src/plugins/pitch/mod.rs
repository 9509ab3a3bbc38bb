//! Pitch plugin: ground plane, goal frame and net.
//!
//! Everything is a static collider sized from `Tunables`. The net panels sit on
//! the same boundaries as `GoalVolume`, so a ball resting against the back of the
//! net is still inside the scoring volume.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

const PITCH_HALF_EXTENT: f32 = 30.0;
const POST_RADIUS: f32 = 0.06;
const NET_THICKNESS: f32 = 0.05;

/// Surfaces the player can jump off.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ground;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Pitch), (spawn_ground, spawn_goal));
}

fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Ball])
}

fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let size = PITCH_HALF_EXTENT * 2.0;

    commands.spawn((
        Name::new("Ground"),
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
        MeshMaterial3d(materials.add(Color::srgb(0.18, 0.45, 0.2))),
        Transform::default(),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        world_layers(),
        DespawnOnExit(GameState::Pitch),
    ));
}

/// Posts and crossbar on the goal line, net panels behind it.
fn spawn_goal(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let w = tunables.goal_width;
    let h = tunables.goal_height;
    let d = tunables.net_depth;
    let z = tunables.goal_z;

    let frame_material = materials.add(Color::WHITE);
    let net_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.9, 0.9, 0.9, 0.35),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    let mut spawn_box = |name: &str, center: Vec3, size: Vec3, material: &Handle<StandardMaterial>| {
        commands.spawn((
            Name::new(name.to_owned()),
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(center),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            world_layers(),
            DespawnOnExit(GameState::Pitch),
        ));
    };

    let post = Vec3::new(POST_RADIUS * 2.0, h, POST_RADIUS * 2.0);
    spawn_box("PostLeft", Vec3::new(-w * 0.5, h * 0.5, z), post, &frame_material);
    spawn_box("PostRight", Vec3::new(w * 0.5, h * 0.5, z), post, &frame_material);
    spawn_box(
        "Crossbar",
        Vec3::new(0.0, h, z),
        Vec3::new(w + POST_RADIUS * 2.0, POST_RADIUS * 2.0, POST_RADIUS * 2.0),
        &frame_material,
    );

    let back_z = z - d;
    let mid_z = z - d * 0.5;
    spawn_box("NetBack", Vec3::new(0.0, h * 0.5, back_z), Vec3::new(w, h, NET_THICKNESS), &net_material);
    spawn_box("NetLeft", Vec3::new(-w * 0.5, h * 0.5, mid_z), Vec3::new(NET_THICKNESS, h, d), &net_material);
    spawn_box("NetRight", Vec3::new(w * 0.5, h * 0.5, mid_z), Vec3::new(NET_THICKNESS, h, d), &net_material);
    spawn_box("NetTop", Vec3::new(0.0, h, mid_z), Vec3::new(w, NET_THICKNESS, d), &net_material);
}
