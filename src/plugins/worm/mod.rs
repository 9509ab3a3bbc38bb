//! Worm sandbox: a chain of spheres held together by distance joints, floating
//! without gravity. Segments can be grabbed with the mouse and dragged around.
//!
//! Pipeline:
//! - Update: left press casts a ray from the cursor and grabs the segment it hits;
//!   while held, the grab anchor follows the cursor ray at a fixed depth
//! - FixedUpdate: the grabbed segment is pulled toward the anchor by velocity
//!
//! Each segment is a single entity, so Avian's own transform writeback is the
//! physics → visual sync here.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::window::PrimaryWindow;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::camera::MainCamera;

pub const SEGMENT_COUNT: usize = 10;
pub const SEGMENT_RADIUS: f32 = 0.3;
pub const SEGMENT_MASS: f32 = 0.3;
pub const SEGMENT_SPACING: f32 = 0.7;
const WORM_HEIGHT: f32 = 2.0;
/// Depth along the cursor ray at which a grabbed segment is held.
const GRAB_DEPTH: f32 = 5.0;
/// Velocity per metre of separation from the anchor.
const GRAB_STIFFNESS: f32 = 12.0;
const GRAB_MAX_SPEED: f32 = 20.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct WormSegment {
    pub index: usize,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct WormGrab {
    pub segment: Option<Entity>,
    pub anchor: Vec3,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<WormGrab>()
        .add_systems(OnEnter(GameState::Sandbox), (spawn_floor, spawn_worm))
        .add_systems(OnExit(GameState::Sandbox), |mut grab: ResMut<WormGrab>| *grab = WormGrab::default())
        .add_systems(
            Update,
            (grab_segment, drag_anchor.after(grab_segment), release_segment.after(drag_anchor))
                .run_if(in_state(GameState::Sandbox)),
        )
        .add_systems(FixedUpdate, pull_grabbed.run_if(in_state(GameState::Sandbox)));
}

/// Rest positions of the segments, laid out along +X.
pub fn segment_positions() -> impl Iterator<Item = Vec3> {
    (0..SEGMENT_COUNT).map(|i| Vec3::new(i as f32 * SEGMENT_SPACING, WORM_HEIGHT, 0.0))
}

/// Spring-like velocity that pulls `pos` toward `anchor`, capped.
pub fn pull_velocity(pos: Vec3, anchor: Vec3) -> Vec3 {
    ((anchor - pos) * GRAB_STIFFNESS).clamp_length_max(GRAB_MAX_SPEED)
}

fn spawn_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("SandboxFloor"),
        Mesh3d(meshes.add(Cuboid::new(20.0, 0.2, 20.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.53, 0.53, 0.53))),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Static,
        Collider::cuboid(20.0, 0.2, 20.0),
        CollisionLayers::new(Layer::World, [Layer::Worm]),
        DespawnOnExit(GameState::Sandbox),
    ));
}

fn spawn_worm(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(SEGMENT_RADIUS).mesh().uv(16, 16));
    let material = materials.add(Color::srgb(0.33, 1.0, 0.4));
    let layers = CollisionLayers::new(Layer::Worm, [Layer::World, Layer::Worm]);

    let segments: Vec<Entity> = segment_positions()
        .enumerate()
        .map(|(index, pos)| {
            commands
                .spawn((
                    Name::new(format!("WormSegment({index})")),
                    WormSegment { index },
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(pos),
                    RigidBody::Dynamic,
                    Collider::sphere(SEGMENT_RADIUS),
                    Mass(SEGMENT_MASS),
                    layers,
                    DespawnOnExit(GameState::Sandbox),
                ))
                .id()
        })
        .collect();

    for pair in segments.windows(2) {
        commands.spawn((
            Name::new("WormLink"),
            DistanceJoint::new(pair[0], pair[1]).with_limits(SEGMENT_SPACING, SEGMENT_SPACING),
            DespawnOnExit(GameState::Sandbox),
        ));
    }
}

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    q_camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Ray3d> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_tf) = q_camera.single().ok()?;
    camera.viewport_to_world(camera_tf, cursor).ok()
}

pub fn grab_segment(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    spatial: SpatialQuery,
    q_segments: Query<(), With<WormSegment>>,
    mut grab: ResMut<WormGrab>,
) {
    let Some(buttons) = buttons else { return; };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(ray) = cursor_ray(&windows, &q_camera) else {
        debug!("No cursor ray for picking");
        return;
    };
    let filter = SpatialQueryFilter::from_mask(Layer::Worm);
    let Some(hit) = spatial.cast_ray(ray.origin, ray.direction, 100.0, true, &filter) else {
        return;
    };
    if q_segments.contains(hit.entity) {
        grab.segment = Some(hit.entity);
        grab.anchor = ray.get_point(GRAB_DEPTH);
    }
}

fn release_segment(buttons: Option<Res<ButtonInput<MouseButton>>>, mut grab: ResMut<WormGrab>) {
    if buttons.is_some_and(|b| b.just_released(MouseButton::Left)) {
        grab.segment = None;
    }
}

fn drag_anchor(
    windows: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut grab: ResMut<WormGrab>,
) {
    if grab.segment.is_none() {
        return;
    }
    if let Some(ray) = cursor_ray(&windows, &q_camera) {
        grab.anchor = ray.get_point(GRAB_DEPTH);
    }
}

fn pull_grabbed(grab: Res<WormGrab>, mut q_segments: Query<(&Position, &mut LinearVelocity), With<WormSegment>>) {
    let Some(segment) = grab.segment else { return; };
    let Ok((pos, mut vel)) = q_segments.get_mut(segment) else { return; };
    vel.0 = pull_velocity(pos.0, grab.anchor);
}

#[cfg(test)]
mod tests;
