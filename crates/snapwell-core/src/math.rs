//! Math utilities and helpers.

use glam::{Mat3, Quat, Vec3};

use crate::error::{Error, Result};

/// Vectors shorter than this are treated as zero-length.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Infinite plane described by a unit normal and a point on the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Any point lying on the plane
    pub point: Vec3,
}

impl Plane {
    /// Create a plane through `point` with the given normal (normalized here)
    #[inline]
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            point,
        }
    }

    /// Signed distance from the plane, positive on the normal side
    #[inline]
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        self.normal.dot(position - self.point)
    }

    /// Orthogonal projection of `position` onto the plane
    #[inline]
    pub fn closest_point(&self, position: Vec3) -> Vec3 {
        position - self.normal * self.signed_distance(position)
    }
}

/// Normalize `v`, or `None` when it is shorter than `epsilon`.
#[inline]
pub fn checked_normalize(v: Vec3, epsilon: f32) -> Option<Vec3> {
    let length_squared = v.length_squared();
    if length_squared.is_finite() && length_squared > epsilon * epsilon {
        Some(v / length_squared.sqrt())
    } else {
        None
    }
}

/// Component of `v` along `onto`. Zero when `onto` is zero-length.
#[inline]
pub fn project(v: Vec3, onto: Vec3) -> Vec3 {
    let denom = onto.length_squared();
    if denom <= f32::EPSILON {
        Vec3::ZERO
    } else {
        onto * (v.dot(onto) / denom)
    }
}

/// Component of `v` in the plane whose normal is `normal`.
#[inline]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - project(v, normal)
}

/// Unsigned angle between two vectors in radians.
///
/// Returns 0 when either vector is degenerate, so a zero vector never wins a
/// strict "smaller angle" comparison against a previous candidate.
#[inline]
pub fn unsigned_angle(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Rotation whose forward (+Z) looks along `forward` and whose up (+Y) is as
/// close as possible to `up`.
///
/// Fails when `forward` is zero-length or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Result<Quat> {
    let forward = checked_normalize(forward, DEFAULT_EPSILON).ok_or_else(|| {
        Error::InvalidConfiguration(format!("look direction {forward} has zero length"))
    })?;
    let right = checked_normalize(up.cross(forward), DEFAULT_EPSILON).ok_or_else(|| {
        Error::InvalidConfiguration(format!(
            "up vector {up} is zero or parallel to look direction {forward}"
        ))
    })?;
    let up = forward.cross(right);
    Ok(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
}

/// Rotation about world Y extracted from `rotation`, in radians.
///
/// Uses the Y-X-Z decomposition (yaw applied last), which is how headset
/// tracking reports heading.
#[inline]
pub fn yaw_of(rotation: Quat) -> f32 {
    rotation.to_euler(glam::EulerRot::YXZ).0
}
