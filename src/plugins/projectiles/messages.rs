//! Buffered projectile messages.
//!
//! Producers write *intent* (`SpawnBallRequest`); the allocator is the single
//! writer of `ProjectilePool`. Lifecycle outcomes flow back out as
//! `ProjectileEvicted` / `GoalScored` for observers such as the HUD.

use bevy::prelude::*;

use super::components::ProjectileId;

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnBallRequest {
    pub pos: Vec3,
    pub vel: Vec3,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileEvicted {
    pub id: ProjectileId,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalScored {
    pub id: ProjectileId,
    /// Session total after this goal.
    pub total: u32,
}
