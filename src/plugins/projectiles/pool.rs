//! Bounded ball pool.
//!
//! Unlike a free-list pool, balls here are never recycled: the pool is a FIFO of
//! *live* entity pairs. When it is full, the oldest pair is released before the
//! new one is admitted, so `len() <= capacity` holds after every operation.
//!
//! Release always despawns the body and the visual together. The physics engine
//! drops the rigid body when its entity despawns; nothing else holds a handle.

use std::collections::VecDeque;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::tunables::Tunables;

use super::components::{BallVisual, Projectile, ProjectileId};
use super::launch::Launch;
use super::template::BallTemplate;

/// One entry in the pool: both halves of an entity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveBall {
    pub id: ProjectileId,
    pub body: Entity,
    pub visual: Entity,
}

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    live: VecDeque<LiveBall>,
    capacity: usize,
    next_id: u64,
}

impl ProjectilePool {
    /// A pool always holds at least one ball.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            live: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live balls, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LiveBall> {
        self.live.iter()
    }

    pub fn ids(&self) -> Vec<ProjectileId> {
        self.live.iter().map(|b| b.id).collect()
    }

    pub fn contains(&self, id: ProjectileId) -> bool {
        self.live.iter().any(|b| b.id == id)
    }

    fn allocate_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Pop the oldest ball if admitting one more would exceed capacity.
    fn make_room(&mut self) -> Option<LiveBall> {
        if self.live.len() >= self.capacity {
            self.live.pop_front()
        } else {
            None
        }
    }

    fn admit(&mut self, ball: LiveBall) {
        debug_assert!(self.live.len() < self.capacity, "admit without make_room");
        self.live.push_back(ball);
    }

    /// Empty the pool, handing back every live ball oldest first.
    fn drain(&mut self) -> impl Iterator<Item = LiveBall> + '_ {
        self.live.drain(..)
    }
}

#[inline]
pub fn ball_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Ball, [Layer::World, Layer::Player, Layer::Ball])
}

/// Despawn both halves of a pair.
pub fn release(commands: &mut Commands, ball: LiveBall) {
    commands.entity(ball.body).despawn();
    commands.entity(ball.visual).despawn();
}

/// Spawn a ball pair, evicting the oldest first if the pool is full.
///
/// Returns the evicted entry (if any) alongside the new id. Returns `None` and
/// touches nothing when the template is not ready yet.
pub fn spawn_ball(
    commands: &mut Commands,
    pool: &mut ProjectilePool,
    template: &BallTemplate,
    tunables: &Tunables,
    launch: Launch,
) -> Option<(ProjectileId, Option<LiveBall>)> {
    let mesh = template.mesh()?.clone();

    // Queue the eviction before the spawn so the world never holds N + 1.
    let evicted = pool.make_room();
    if let Some(old) = evicted {
        release(commands, old);
    }

    let id = pool.allocate_id();
    let visual = commands
        .spawn((
            Name::new(format!("BallVisual({})", id.0)),
            Mesh3d(mesh),
            MeshMaterial3d(template.material.clone()),
            Transform::from_translation(launch.position),
        ))
        .id();

    let body = commands
        .spawn((
            Name::new(format!("Ball({})", id.0)),
            Projectile::new(id, visual),
            Transform::from_translation(launch.position),
            RigidBody::Dynamic,
            Collider::sphere(tunables.ball_radius),
            Mass(tunables.ball_mass),
            Restitution::new(0.6),
            Friction::new(0.4),
            LinearDamping(0.1),
            AngularDamping(0.3),
            LinearVelocity(launch.velocity),
            ball_layers(),
        ))
        .id();

    commands.entity(visual).insert(BallVisual { body });

    pool.admit(LiveBall { id, body, visual });
    Some((id, evicted))
}

/// Release every live ball. Used when the session ends.
pub fn teardown_pool(mut commands: Commands, mut pool: ResMut<ProjectilePool>) {
    let mut released = 0usize;
    for ball in pool.drain() {
        release(&mut commands, ball);
        released += 1;
    }
    if released > 0 {
        debug!("Session teardown released {released} balls");
    }
}
