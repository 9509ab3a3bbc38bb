//! Camera plugin (render-only).
//!
//! One camera per scene:
//! - Pitch: first-person, copies the player's eye position and `PlayerLook`
//! - Sandbox: orbits the worm; left drag rotates (unless a segment is
//!   grabbed), the wheel zooms
//!
//! Also mirrors `PointerLock` onto the primary window's cursor.
//!
//! The follow system needs disjoint `Transform` queries (B0001), proven with
//! `Without<...>` filters.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::player::{Player, PlayerLook, PointerLock};
use crate::plugins::worm::{self, WormGrab};

const SANDBOX_EYE: Vec3 = Vec3::new(5.0, 5.0, 10.0);
const SANDBOX_FOCUS: Vec3 = Vec3::new(3.0, 1.0, 0.0);
/// Radians per pixel of mouse motion.
const ORBIT_SENSITIVITY: f32 = 0.005;
const ORBIT_MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.1;
const ZOOM_STEP: f32 = 1.0;
const MIN_DISTANCE: f32 = 3.0;
const MAX_DISTANCE: f32 = 50.0;

#[derive(Component)]
pub struct MainCamera;

/// Spherical coordinates of the camera around `focus`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    /// Around +Y, zero on the +Z side of the focus.
    pub yaw: f32,
    /// Elevation above the focus' horizontal plane.
    pub pitch: f32,
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let distance = offset.length().max(MIN_DISTANCE);
        Self {
            focus,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Pitch), spawn_pitch_camera)
        .add_systems(OnEnter(GameState::Sandbox), spawn_sandbox_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::Pitch)),
        )
        .add_systems(
            Update,
            orbit_controls
                .after(worm::grab_segment)
                .run_if(in_state(GameState::Sandbox)),
        )
        .add_systems(Update, apply_pointer_lock);
}

fn spawn_pitch_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera,
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 1.6, 5.0),
        DespawnOnExit(GameState::Pitch),
    ));
}

fn spawn_sandbox_camera(mut commands: Commands) {
    let orbit = OrbitCamera::looking_from(SANDBOX_EYE, SANDBOX_FOCUS);

    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera,
        orbit,
        Projection::from(PerspectiveProjection {
            fov: 60f32.to_radians(),
            near: 0.1,
            far: 500.0,
            ..default()
        }),
        orbit.transform(),
        DespawnOnExit(GameState::Sandbox),
    ));
}

/// Left drag orbits while no worm segment is held; the wheel zooms.
pub fn orbit_controls(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    grab: Res<WormGrab>,
    mut q_orbit: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let Ok((mut orbit, mut tf)) = q_orbit.single_mut() else { return; };

    let dragging = grab.segment.is_none() && buttons.is_some_and(|b| b.pressed(MouseButton::Left));
    if dragging && motion.delta != Vec2::ZERO {
        orbit.yaw -= motion.delta.x * ORBIT_SENSITIVITY;
        orbit.pitch = (orbit.pitch + motion.delta.y * ORBIT_SENSITIVITY).clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
    }
    if scroll.delta.y != 0.0 {
        orbit.distance = (orbit.distance - scroll.delta.y * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    if orbit.is_changed() {
        *tf = orbit.transform();
    }
}

fn follow_player(
    tunables: Res<Tunables>,
    q_player: Query<(&Transform, &PlayerLook), (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok((tf_player, look)) = q_player.single() else { return; };
    let Ok(mut tf_cam) = q_cam.single_mut() else { return; };

    tf_cam.translation = PlayerLook::eye(tf_player.translation, tunables.eye_height);
    tf_cam.rotation = look.rotation();
}

fn apply_pointer_lock(
    lock: Res<PointerLock>,
    mut q_cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if !lock.is_changed() {
        return;
    }
    let Ok(mut cursor) = q_cursor.single_mut() else { return; };

    match *lock {
        PointerLock::Locked => {
            cursor.grab_mode = CursorGrabMode::Locked;
            cursor.visible = false;
        }
        PointerLock::Free => {
            cursor.grab_mode = CursorGrabMode::None;
            cursor.visible = true;
        }
    }
}
