//! Test helpers.
//!
//! `World::run_system_once` (via `RunSystemOnce`) runs a single system without a schedule.
//! Systems that use `Commands` only enqueue structural changes, so we `flush()` afterwards
//! to make spawns/despawns visible to assertions.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A bare world with default tunables installed.
pub fn world_with_tunables() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world
}
