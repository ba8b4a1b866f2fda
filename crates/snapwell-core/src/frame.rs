//! Orthonormal reference frames.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the three basis axes of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisAxis {
    /// Local +X
    Right,
    /// Local +Y
    Up,
    /// Local +Z
    Forward,
}

impl BasisAxis {
    /// Unit vector of this axis in local space
    #[inline]
    pub const fn local(self) -> Vec3 {
        match self {
            Self::Right => Vec3::X,
            Self::Up => Vec3::Y,
            Self::Forward => Vec3::Z,
        }
    }
}

/// Right/up/forward unit vectors of an orientation.
///
/// Frames built with [`Frame::from_rotation`] are orthonormal by
/// construction; [`Frame::try_from_axes`] validates raw vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    /// World axes
    pub const IDENTITY: Self = Self {
        right: Vec3::X,
        up: Vec3::Y,
        forward: Vec3::Z,
    };

    /// Basis of a (possibly slightly denormalized) rotation
    #[inline]
    pub fn from_rotation(rotation: Quat) -> Self {
        let rotation = rotation.normalize();
        Self {
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
            forward: rotation * Vec3::Z,
        }
    }

    /// Build a frame from raw axes, rejecting anything that is not unit-length
    /// and mutually orthogonal within `tolerance`.
    pub fn try_from_axes(right: Vec3, up: Vec3, forward: Vec3, tolerance: f32) -> Result<Self> {
        let frame = Self { right, up, forward };
        frame.validate(tolerance)?;
        Ok(frame)
    }

    /// Check unit length and mutual orthogonality of the three axes.
    pub fn validate(&self, tolerance: f32) -> Result<()> {
        for (name, axis) in [("right", self.right), ("up", self.up), ("forward", self.forward)] {
            if !axis.is_finite() || (axis.length() - 1.0).abs() > tolerance {
                return Err(Error::InvalidConfiguration(format!(
                    "{name} axis {axis} is not unit length"
                )));
            }
        }
        let pairs = [
            ("right", self.right, "up", self.up),
            ("up", self.up, "forward", self.forward),
            ("forward", self.forward, "right", self.right),
        ];
        for (a_name, a, b_name, b) in pairs {
            if a.dot(b).abs() > tolerance {
                return Err(Error::InvalidConfiguration(format!(
                    "{a_name} and {b_name} axes are not orthogonal"
                )));
            }
        }
        Ok(())
    }

    /// Select one basis axis
    #[inline]
    pub const fn axis(&self, axis: BasisAxis) -> Vec3 {
        match axis {
            BasisAxis::Right => self.right,
            BasisAxis::Up => self.up,
            BasisAxis::Forward => self.forward,
        }
    }

    /// The six signed cardinal directions, in the order used for tie-breaking:
    /// up, -up, right, -right, forward, -forward.
    #[inline]
    pub fn cardinals(&self) -> [Vec3; 6] {
        [
            self.up,
            -self.up,
            self.right,
            -self.right,
            self.forward,
            -self.forward,
        ]
    }
}

impl From<Quat> for Frame {
    fn from(rotation: Quat) -> Self {
        Self::from_rotation(rotation)
    }
}
