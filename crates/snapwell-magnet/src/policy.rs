//! Move and rotation policies carried by an attractor.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::axis::AttractorAxis;

/// How the attracted magnet's target position is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePolicy {
    /// Only move onto the plane through the attractor defined by its alignment axis.
    ProjectOntoAlignmentPlane,
    /// Move onto the attractor position.
    #[default]
    MatchAttractorPosition,
}

/// How the attracted magnet's target rotation is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Rotate only as much as needed to align the two axes.
    MatchAxisOnly,
    /// Also snap the remaining axes to right angles with the attractor's axes.
    #[default]
    MatchAxisWithOrthogonalSnap,
}

/// Static displacement of the snap point, in the attractor's local frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapOffset {
    /// Offset in attractor-local coordinates
    pub local: Vec3,
    /// In plane-projection mode, also try the negated offset and keep the closer result
    pub ignore_sign: bool,
}

impl Default for SnapOffset {
    fn default() -> Self {
        Self {
            local: Vec3::ZERO,
            ignore_sign: true,
        }
    }
}

impl SnapOffset {
    /// Offset with the default sign handling
    #[inline]
    pub fn new(local: Vec3) -> Self {
        Self {
            local,
            ..Self::default()
        }
    }

    /// Returns true if no displacement is configured
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.local == Vec3::ZERO
    }
}

/// Everything an attractor contributes to a snap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttractorSettings {
    pub axis: AttractorAxis,
    pub move_policy: MovePolicy,
    pub rotation_policy: RotationPolicy,
    pub offset: SnapOffset,
}

impl AttractorSettings {
    /// Settings with the given axis and default policies
    #[must_use]
    pub fn with_axis(axis: AttractorAxis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn move_policy(mut self, move_policy: MovePolicy) -> Self {
        self.move_policy = move_policy;
        self
    }

    #[must_use]
    pub const fn rotation_policy(mut self, rotation_policy: RotationPolicy) -> Self {
        self.rotation_policy = rotation_policy;
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: SnapOffset) -> Self {
        self.offset = offset;
        self
    }
}
