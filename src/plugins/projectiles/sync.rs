//! Physics → visual synchronization.
//!
//! Data flows one way: body `Position`/`Rotation` and score state are copied onto
//! the paired visual. Visuals carry no collider and are never read back.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{BallVisual, Projectile};
use super::template::BallTemplate;

pub fn sync_ball_visuals(
    template: Option<Res<BallTemplate>>,
    q_bodies: Query<(&Projectile, &Position, &Rotation)>,
    mut q_visuals: Query<(&mut Transform, &mut MeshMaterial3d<StandardMaterial>), (With<BallVisual>, Without<Projectile>)>,
) {
    for (ball, pos, rot) in &q_bodies {
        let Ok((mut tf, mut material)) = q_visuals.get_mut(ball.visual) else {
            continue;
        };

        tf.translation = pos.0;
        tf.rotation = rot.0;

        if let Some(template) = template.as_deref() {
            if ball.is_scored() && material.0 != template.scored_material {
                material.0 = template.scored_material.clone();
            }
        }
    }
}
