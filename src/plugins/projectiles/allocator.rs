//! Spawn consumer: turn fire requests into live balls.
//!
//! This is the only system that mutates `ProjectilePool` during play.
//!
//! # Soft failures
//! - Template not built yet: request dropped, nothing spawned.
//! - Pool full: oldest ball evicted. If it had not scored yet, its pending
//!   goal is forfeited. That is steady-state behaviour, not an error.

use bevy::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};

use crate::common::tunables::Tunables;

use super::components::Projectile;
use super::launch::Launch;
use super::messages::{ProjectileEvicted, SpawnBallRequest};
use super::pool::{spawn_ball, ProjectilePool};
use super::template::BallTemplate;

pub fn allocate_balls(
    mut commands: Commands,
    mut pool: ResMut<ProjectilePool>,
    template: Option<Res<BallTemplate>>,
    tunables: Res<Tunables>,
    mut reader: MessageReader<SpawnBallRequest>,
    mut evicted_writer: MessageWriter<ProjectileEvicted>,
    q_balls: Query<&Projectile>,
) {
    for req in reader.read() {
        let Some(template) = template.as_deref().filter(|t| t.is_ready()) else {
            debug!("Ball template not ready, dropping fire request");
            continue;
        };

        let launch = Launch { position: req.pos, velocity: req.vel };
        let Some((id, evicted)) = spawn_ball(&mut commands, &mut pool, template, &tunables, launch) else {
            continue;
        };
        debug!("Spawned ball {:?} ({} live)", id, pool.len());

        let Some(old) = evicted else { continue; };
        if q_balls.get(old.body).is_ok_and(|ball| !ball.is_scored()) {
            debug!("Evicted ball {:?} before it scored", old.id);
        }
        evicted_writer.write(ProjectileEvicted { id: old.id });
    }
}
