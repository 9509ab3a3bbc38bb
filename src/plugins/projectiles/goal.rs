//! Goal detection.
//!
//! The detector samples each unscored ball's *end-of-step* physics position
//! against an axis-aligned volume behind the goal line. There is no swept test:
//! a ball fast enough to cross the whole volume inside one fixed step is not
//! counted. With the default tunables the volume is 3.5 m deep, so that takes
//! more than 210 m/s at 60 Hz.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::ecs::message::MessageWriter;

use crate::common::tunables::ConfigError;

use super::components::{Projectile, ProjectileId};
use super::messages::GoalScored;

/// Distance the ball must travel past the goal line before it counts.
pub const GOAL_LINE_MARGIN: f32 = 0.5;

/// Open box: `far < z < near`, `|x| < width / 2`, `y < height`.
///
/// `near` is the side facing the shooter. Anything at or beyond `far` has gone
/// through the back of the net and is a miss.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GoalVolume {
    width: f32,
    height: f32,
    near: f32,
    far: f32,
}

impl Default for GoalVolume {
    /// 10 x 5 goal mouth with its line at z = -7 and a 4 m deep net.
    fn default() -> Self {
        Self { width: 10.0, height: 5.0, near: -7.5, far: -11.0 }
    }
}

impl GoalVolume {
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Result<Self, ConfigError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::EmptyGoalMouth { width, height });
        }
        if !(far < near) {
            return Err(ConfigError::InvertedGoalDepth { near, far });
        }
        Ok(Self { width, height, near, far })
    }

    /// Volume for a goal whose line sits at `goal_z`, shooting toward -Z.
    pub fn behind_goal_line(goal_z: f32, net_depth: f32, width: f32, height: f32) -> Result<Self, ConfigError> {
        Self::new(width, height, goal_z - GOAL_LINE_MARGIN, goal_z - net_depth)
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        let half = self.width * 0.5;
        p.z > self.far && p.z < self.near && p.x > -half && p.x < half && p.y < self.height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

/// Goals scored in the current session. Only ever goes up.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionScore(u32);

impl SessionScore {
    #[inline]
    pub fn total(&self) -> u32 {
        self.0
    }

    /// Count one goal and return the new total.
    #[inline]
    fn record(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }
}

/// Score every unscored ball whose sampled position lies inside `volume`.
///
/// Returns the newly scored ids in iteration order.
pub fn evaluate<'a>(
    volume: &GoalVolume,
    balls: impl IntoIterator<Item = (&'a mut Projectile, Vec3)>,
) -> Vec<ProjectileId> {
    balls
        .into_iter()
        .filter(|(ball, pos)| !ball.is_scored() && volume.contains(*pos))
        .filter_map(|(ball, _)| ball.mark_scored().then_some(ball.id()))
        .collect()
}

/// Fixed-step detector. Runs after the physics step has written `Position`.
pub fn detect_goals(
    volume: Res<GoalVolume>,
    mut score: ResMut<SessionScore>,
    mut q: Query<(&mut Projectile, &Position)>,
    mut writer: MessageWriter<GoalScored>,
) {
    // Only hits reach `into_inner`, so misses keep their change ticks.
    let scored = evaluate(
        &volume,
        q.iter_mut()
            .filter(|(ball, pos)| !ball.is_scored() && volume.contains(pos.0))
            .map(|(ball, pos)| (ball.into_inner(), pos.0)),
    );

    for id in scored {
        let total = score.record();
        info!("Goal! ball {:?}, total {}", id, total);
        writer.write(GoalScored { id, total });
    }
}
