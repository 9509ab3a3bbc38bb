use bevy::prelude::*;
use bevy::ecs::message::MessageWriter;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Player, PlayerLook, PointerLock, PLAYER_HALF_HEIGHT, PLAYER_RADIUS};

use super::launch::{aim_from_look, compute_launch, Shooter, ShooterBody};
use super::messages::SpawnBallRequest;

/// Producer: on a left click while the pointer is locked, sample the shooter,
/// apply the spawn policy and write a `SpawnBallRequest`.
///
/// This system never touches `ProjectilePool`.
pub fn request_shots(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    lock: Res<PointerLock>,
    q_player: Query<(&Transform, &PlayerLook), With<Player>>,
    tunables: Res<Tunables>,
    mut writer: MessageWriter<SpawnBallRequest>,
) {
    let Some(buttons) = buttons else { return; };
    if !buttons.just_pressed(MouseButton::Left) || !lock.is_locked() {
        return;
    }

    let Ok((tf, look)) = q_player.single() else {
        debug!("Shot ignored: no single Player");
        return;
    };

    let shooter = shooter_at(tf.translation, tunables.eye_height);
    let aim = aim_from_look(look.yaw, look.pitch);
    let launch = compute_launch(tunables.launch, shooter, aim, tunables.ball_speed, tunables.ball_radius);

    writer.write(SpawnBallRequest { pos: launch.position, vel: launch.velocity });
}

/// Shooter sample for a player capsule centred at `center`.
pub(crate) fn shooter_at(center: Vec3, eye_height: f32) -> Shooter {
    Shooter {
        eye: PlayerLook::eye(center, eye_height),
        feet: PlayerLook::feet(center),
        body: ShooterBody {
            center,
            half_segment: PLAYER_HALF_HEIGHT - PLAYER_RADIUS,
            radius: PLAYER_RADIUS,
        },
    }
}
