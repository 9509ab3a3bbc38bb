//! Global state machine.
//!
//! Each variant is one demo scene. Entering a scene starts a fresh session;
//! leaving it despawns everything tagged `DespawnOnExit`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Pitch,
    Sandbox,
}

impl GameState {
    /// The scene Tab switches to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pitch => Self::Sandbox,
            Self::Sandbox => Self::Pitch,
        }
    }
}
