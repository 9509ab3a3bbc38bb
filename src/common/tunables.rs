//! Tunable gameplay constants.
//!
//! Installed with `init_resource`, so a host (or a test) can insert its own
//! `Tunables` before the core plugin runs.

use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use crate::plugins::projectiles::goal::GoalVolume;
use crate::plugins::projectiles::launch::LaunchStrategy;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("goal far boundary {far} must lie behind near boundary {near}")]
    InvertedGoalDepth { near: f32, far: f32 },
    #[error("goal mouth must have positive size, got {width}x{height}")]
    EmptyGoalMouth { width: f32, height: f32 },
    #[error("ball pool capacity must be at least 1")]
    ZeroCapacity,
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub player_speed: f32,
    pub jump_speed: f32,
    /// Radians per pixel of mouse motion.
    pub look_sensitivity: f32,
    pub eye_height: f32,

    pub ball_speed: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub ball_capacity: usize,
    pub launch: LaunchStrategy,

    /// Z of the goal line.
    pub goal_z: f32,
    pub net_depth: f32,
    pub goal_width: f32,
    pub goal_height: f32,

    pub fixed_hz: f64,
    /// Upper bound on a single frame's virtual delta.
    pub max_frame_delta: Duration,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 6.0,
            jump_speed: 5.0,
            look_sensitivity: 0.002,
            eye_height: 1.6,
            ball_speed: 15.0,
            ball_radius: 0.25,
            ball_mass: 0.45,
            ball_capacity: 10,
            launch: LaunchStrategy::default(),
            goal_z: -7.0,
            net_depth: 4.0,
            goal_width: 10.0,
            goal_height: 5.0,
            fixed_hz: 60.0,
            max_frame_delta: Duration::from_millis(100),
        }
    }
}

impl Tunables {
    /// The scoring volume behind the goal line.
    pub fn goal_volume(&self) -> Result<GoalVolume, ConfigError> {
        GoalVolume::behind_goal_line(self.goal_z, self.net_depth, self.goal_width, self.goal_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ball_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let positive = [
            ("player_speed", self.player_speed),
            ("ball_speed", self.ball_speed),
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
            ("fixed_hz", self.fixed_hz as f32),
            ("max_frame_delta", self.max_frame_delta.as_secs_f32()),
        ];
        if let Some(&(name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::NonPositive { name, value });
        }

        self.launch.validate()?;
        self.goal_volume().map(|_| ())
    }
}
