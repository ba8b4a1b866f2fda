//! Rigid poses (position + orientation).

use std::ops::Mul;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::frame::Frame;

/// Position and unit orientation of a rigid body, sampled at one instant.
///
/// Scale is never part of a pose: every transform this workspace reasons
/// about is rigid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position
    pub position: Vec3,
    /// World-space orientation (unit quaternion)
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Pose at the origin with no rotation
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a new pose
    #[inline]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity rotation
    #[inline]
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Orthonormal basis of this pose's orientation
    #[inline]
    pub fn frame(&self) -> Frame {
        Frame::from_rotation(self.rotation)
    }

    /// Map a point from this pose's local space to world space
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Map a direction from this pose's local space to world space
    #[inline]
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Map a world-space point into this pose's local space
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Inverse transform, so that `pose.inverse() * pose == IDENTITY`
    #[inline]
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            position: rotation * -self.position,
            rotation,
        }
    }

    /// Compose two poses: `child` expressed in this pose's frame, returned in world space
    #[inline]
    #[must_use]
    pub fn mul_pose(&self, child: &Self) -> Self {
        Self {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// This pose expressed in the local frame of `parent`
    #[inline]
    #[must_use]
    pub fn relative_to(&self, parent: &Self) -> Self {
        parent.inverse().mul_pose(self)
    }

    /// Angle in radians between the two orientations
    #[inline]
    pub fn angle_to(&self, other: &Self) -> f32 {
        self.rotation.angle_between(other.rotation)
    }

    /// Returns true if both positions and orientations match within `max_abs_diff`
    ///
    /// Orientations are compared as rotations, so `q` and `-q` are equal.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && self.angle_to(other) <= max_abs_diff
    }
}

impl Mul for Pose {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_pose(&rhs)
    }
}

impl From<(Vec3, Quat)> for Pose {
    fn from((position, rotation): (Vec3, Quat)) -> Self {
        Self::new(position, rotation)
    }
}
