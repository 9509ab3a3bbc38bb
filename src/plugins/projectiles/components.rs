use bevy::prelude::*;

/// Opaque projectile identity, allocated by the pool in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

/// Per-ball scoring state machine. `Scored` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreState {
    #[default]
    Unscored,
    Scored,
}

/// Physics half of an entity pair: lives on the rigid body.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    id: ProjectileId,
    state: ScoreState,
    /// Render entity driven from this body's pose.
    pub visual: Entity,
}

impl Projectile {
    pub fn new(id: ProjectileId, visual: Entity) -> Self {
        Self { id, state: ScoreState::Unscored, visual }
    }

    #[inline]
    pub fn id(&self) -> ProjectileId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> ScoreState {
        self.state
    }

    #[inline]
    pub fn is_scored(&self) -> bool {
        self.state == ScoreState::Scored
    }

    /// The only transition: `Unscored -> Scored`.
    ///
    /// Returns `true` exactly once per projectile.
    #[inline]
    pub fn mark_scored(&mut self) -> bool {
        match self.state {
            ScoreState::Unscored => {
                self.state = ScoreState::Scored;
                true
            }
            ScoreState::Scored => false,
        }
    }
}

/// Render half of an entity pair. Never read back into physics.
#[derive(Component, Debug, Clone, Copy)]
pub struct BallVisual {
    pub body: Entity,
}
