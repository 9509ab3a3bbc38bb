//! Ball render template.
//!
//! The ball mesh is built off the simulation thread on the async compute pool.
//! `BallTemplate` holds that in-flight task until it resolves exactly once into a
//! mesh handle. The allocator checks readiness synchronously and drops fire
//! requests until then.

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};

use crate::common::tunables::Tunables;

enum TemplateMesh {
    Building(Task<Mesh>),
    Ready(Handle<Mesh>),
}

#[derive(Resource)]
pub struct BallTemplate {
    mesh: TemplateMesh,
    pub material: Handle<StandardMaterial>,
    /// Swapped in once the ball has scored.
    pub scored_material: Handle<StandardMaterial>,
}

impl BallTemplate {
    pub fn building(
        task: Task<Mesh>,
        material: Handle<StandardMaterial>,
        scored_material: Handle<StandardMaterial>,
    ) -> Self {
        Self { mesh: TemplateMesh::Building(task), material, scored_material }
    }

    pub fn ready(
        mesh: Handle<Mesh>,
        material: Handle<StandardMaterial>,
        scored_material: Handle<StandardMaterial>,
    ) -> Self {
        Self { mesh: TemplateMesh::Ready(mesh), material, scored_material }
    }

    /// `None` until the mesh task has resolved.
    #[inline]
    pub fn mesh(&self) -> Option<&Handle<Mesh>> {
        match &self.mesh {
            TemplateMesh::Ready(handle) => Some(handle),
            TemplateMesh::Building(_) => None,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.mesh().is_some()
    }
}

/// Startup: kick off the mesh build and create both ball materials.
pub fn begin_ball_template(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let radius = tunables.ball_radius;
    let task = AsyncComputeTaskPool::get().spawn(async move { Sphere::new(radius).mesh().uv(32, 18) });

    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.6,
        ..default()
    });
    let scored_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.9, 0.3),
        emissive: LinearRgba::rgb(0.05, 0.4, 0.1),
        ..default()
    });

    commands.insert_resource(BallTemplate::building(task, material, scored_material));
}

/// Resolve the mesh task once it completes. No-op afterwards.
pub fn poll_ball_template(template: Option<ResMut<BallTemplate>>, mut meshes: ResMut<Assets<Mesh>>) {
    let Some(mut template) = template else { return; };
    let TemplateMesh::Building(task) = &mut template.mesh else { return; };
    let Some(mesh) = block_on(future::poll_once(task)) else { return; };

    template.mesh = TemplateMesh::Ready(meshes.add(mesh));
    debug!("Ball template ready");
}
