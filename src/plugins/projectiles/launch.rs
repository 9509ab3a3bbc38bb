//! Spawn policy: where a new ball appears and how fast it leaves.
//!
//! Pure math, no ECS access. The producer (`request.rs`) samples the shooter,
//! calls `compute_launch`, and forwards the result as a spawn request.
//!
//! The clearance is measured from the shooter's surface, not from the eye or
//! feet: the ball is pushed along the aim until it no longer touches the
//! shooter's capsule, then `clearance` further. A fixed offset from the eye
//! cannot do this, since looking straight down puts the whole body on the ray.

use bevy::prelude::*;

use crate::common::tunables::ConfigError;

/// Where to place the ball relative to the shooter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchStrategy {
    /// Offset from the eye (camera) position along the full aim direction.
    CameraOrigin { clearance: f32 },
    /// Offset from the shooter's feet, raised by `lift`, along the aim
    /// flattened onto the ground plane.
    ShooterFeet { clearance: f32, lift: f32 },
}

impl Default for LaunchStrategy {
    fn default() -> Self {
        Self::CameraOrigin { clearance: 0.1 }
    }
}

impl LaunchStrategy {
    pub fn clearance(&self) -> f32 {
        match *self {
            Self::CameraOrigin { clearance } | Self::ShooterFeet { clearance, .. } => clearance,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let clearance = self.clearance();
        if clearance.is_finite() && clearance > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositive { name: "launch clearance", value: clearance })
        }
    }
}

/// Upright capsule standing in for the shooter's collider.
#[derive(Debug, Clone, Copy)]
pub struct ShooterBody {
    pub center: Vec3,
    /// Half the length of the inner segment (caps excluded).
    pub half_segment: f32,
    pub radius: f32,
}

impl ShooterBody {
    /// Distance along the unit `dir` from `origin` past which a sphere of
    /// radius `inflate` no longer touches the capsule. Zero when the ray never
    /// reaches it.
    pub fn exit_distance(&self, origin: Vec3, dir: Vec3, inflate: f32) -> f32 {
        let r = self.radius + inflate;
        let o = origin - self.center;
        let cap = Vec3::Y * self.half_segment;

        [
            exit_cylinder(o, dir, r, self.half_segment),
            exit_sphere(o - cap, dir, r),
            exit_sphere(o + cap, dir, r),
        ]
        .into_iter()
        .flatten()
        .fold(0.0, f32::max)
    }

    /// Gap between a sphere at `p` and the capsule surface. Negative on overlap.
    pub fn gap(&self, p: Vec3, sphere_radius: f32) -> f32 {
        let axial = (p.y - self.center.y).clamp(-self.half_segment, self.half_segment);
        let nearest = self.center + Vec3::Y * axial;
        p.distance(nearest) - self.radius - sphere_radius
    }
}

/// Far root of `|o + t d| = r`, if the line meets the sphere.
fn exit_sphere(o: Vec3, d: Vec3, r: f32) -> Option<f32> {
    let b = o.dot(d);
    let disc = b * b - (o.length_squared() - r * r);
    (disc >= 0.0).then(|| -b + disc.sqrt())
}

/// Far root against the infinite vertical cylinder, kept only when it lands
/// between the caps.
fn exit_cylinder(o: Vec3, d: Vec3, r: f32, half: f32) -> Option<f32> {
    let (o2, d2) = (o.xz(), d.xz());
    let a = d2.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = o2.dot(d2);
    let disc = b * b - a * (o2.length_squared() - r * r);
    if disc < 0.0 {
        return None;
    }
    let t = (-b + disc.sqrt()) / a;
    ((o.y + t * d.y).abs() <= half).then_some(t)
}

/// Shooter sample taken on the frame the trigger was pulled.
#[derive(Debug, Clone, Copy)]
pub struct Shooter {
    pub eye: Vec3,
    pub feet: Vec3,
    pub body: ShooterBody,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Compute the spawn position and initial velocity of a ball of `ball_radius`.
///
/// Velocity is always `aim.normalize() * speed`; the strategy only changes the
/// spawn point. A degenerate aim falls back to world forward (-Z).
pub fn compute_launch(
    strategy: LaunchStrategy,
    shooter: Shooter,
    aim: Vec3,
    speed: f32,
    ball_radius: f32,
) -> Launch {
    let dir = aim.try_normalize().unwrap_or(Vec3::NEG_Z);
    let velocity = dir * speed;

    let (origin, offset_dir) = match strategy {
        LaunchStrategy::CameraOrigin { .. } => (shooter.eye, dir),
        LaunchStrategy::ShooterFeet { lift, .. } => {
            let flat = Vec3::new(dir.x, 0.0, dir.z)
                .try_normalize()
                .unwrap_or(Vec3::NEG_Z);
            (shooter.feet + Vec3::Y * lift, flat)
        }
    };
    let reach = shooter.body.exit_distance(origin, offset_dir, ball_radius) + strategy.clearance();

    Launch { position: origin + offset_dir * reach, velocity }
}

/// Unit aim vector for a first-person look (yaw around +Y, then pitch).
#[inline]
pub fn aim_from_look(yaw: f32, pitch: f32) -> Vec3 {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0) * Vec3::NEG_Z
}
