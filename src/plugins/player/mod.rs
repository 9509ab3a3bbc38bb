//! First-person player.
//!
//! Pipeline:
//! - Update: sample keyboard into `PlayerInput`, mouse motion into `PlayerLook`,
//!   clicks/Escape into `PointerLock`
//! - FixedUpdate: refresh ground contact, then write the body's velocity
//!
//! The body is a dynamic capsule with rotation locked; facing lives only in
//! `PlayerLook`, so physics never fights the camera.

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::pitch::Ground;

pub const PLAYER_RADIUS: f32 = 0.4;
/// Half of the capsule's total height (cylinder + both caps).
pub const PLAYER_HALF_HEIGHT: f32 = 0.9;
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

#[derive(Component)]
pub struct Player;

/// Look angles in radians. Yaw turns around +Y, pitch is clamped just short of vertical.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerLook {
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerLook {
    /// Eye position for a capsule centred at `center`.
    #[inline]
    pub fn eye(center: Vec3, eye_height: f32) -> Vec3 {
        center + Vec3::Y * (eye_height - PLAYER_HALF_HEIGHT)
    }

    #[inline]
    pub fn feet(center: Vec3) -> Vec3 {
        center - Vec3::Y * PLAYER_HALF_HEIGHT
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Horizontal forward and right unit vectors for the current yaw.
    fn ground_basis(&self) -> (Vec3, Vec3) {
        let (sin, cos) = self.yaw.sin_cos();
        (Vec3::new(-sin, 0.0, -cos), Vec3::new(cos, 0.0, -sin))
    }
}

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PointerLock {
    #[default]
    Free,
    Locked,
}

impl PointerLock {
    #[inline]
    pub fn is_locked(self) -> bool {
        self == Self::Locked
    }
}

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
    /// Latched in Update, consumed by the next fixed step.
    jump: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .insert_resource(PointerLock::default())
        .add_systems(OnEnter(GameState::Pitch), spawn)
        .add_systems(OnExit(GameState::Pitch), release_pointer)
        .add_systems(
            Update,
            (gather_input, update_look, update_pointer_lock).run_if(in_state(GameState::Pitch)),
        )
        .add_systems(
            FixedUpdate,
            (update_grounded, apply_movement.after(update_grounded))
                .run_if(in_state(GameState::Pitch)),
        );
}

fn spawn(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Ball]);

    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerLook::default(),
        Grounded::default(),
        Transform::from_xyz(0.0, PLAYER_HALF_HEIGHT + 0.05, 5.0),
        RigidBody::Dynamic,
        Collider::capsule(PLAYER_RADIUS, 2.0 * (PLAYER_HALF_HEIGHT - PLAYER_RADIUS)),
        LockedAxes::ROTATION_LOCKED,
        Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
        layers,
        LinearVelocity::ZERO,
        CollidingEntities::default(),
        DespawnOnExit(GameState::Pitch),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else { return; };
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    if keys.just_pressed(KeyCode::Space) {
        input.jump = true;
    }
}

fn update_look(
    motion: Option<Res<AccumulatedMouseMotion>>,
    lock: Res<PointerLock>,
    tunables: Res<Tunables>,
    mut q_player: Query<&mut PlayerLook, With<Player>>,
) {
    let Some(motion) = motion else { return; };
    if !lock.is_locked() || motion.delta == Vec2::ZERO {
        return;
    }
    let Ok(mut look) = q_player.single_mut() else { return; };

    look.yaw -= motion.delta.x * tunables.look_sensitivity;
    look.pitch = (look.pitch - motion.delta.y * tunables.look_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
}

/// Left click grabs the pointer, Escape releases it.
pub fn update_pointer_lock(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut lock: ResMut<PointerLock>,
) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::Escape)) {
        lock.set_if_neq(PointerLock::Free);
    } else if buttons.is_some_and(|b| b.just_pressed(MouseButton::Left)) {
        lock.set_if_neq(PointerLock::Locked);
    }
}

fn release_pointer(mut lock: ResMut<PointerLock>) {
    lock.set_if_neq(PointerLock::Free);
}

/// Grounded while touching anything tagged `Ground`.
fn update_grounded(
    q_ground: Query<(), With<Ground>>,
    mut q_player: Query<(&CollidingEntities, &mut Grounded), With<Player>>,
) {
    for (colliding, mut grounded) in &mut q_player {
        let on_ground = colliding.iter().any(|e| q_ground.contains(*e));
        grounded.set_if_neq(Grounded(on_ground));
    }
}

fn apply_movement(
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &PlayerLook, &Grounded), With<Player>>,
) {
    let jump = std::mem::take(&mut input.jump);
    let Ok((mut vel, look, grounded)) = q_player.single_mut() else {
        return;
    };

    let (forward, right) = look.ground_basis();
    let planar = (right * input.move_axis.x + forward * input.move_axis.y) * tunables.player_speed;
    vel.0.x = planar.x;
    vel.0.z = planar.z;

    if jump && grounded.0 {
        vel.0.y = tunables.jump_speed;
    }
}
