//! Rig relocalization from a pair of anchor observations.
//!
//! The same physical anchor is known in two frames: where the local device
//! sees it (`local_anchor`) and where the shared session says it is
//! (`target_anchor`). Moving the rig so that the headset's pose relative to
//! the local anchor becomes its pose relative to the target anchor makes the
//! two observations coincide.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use snapwell_core::constants::ORTHONORMAL_TOLERANCE;
use snapwell_core::{Error, Pose, Result};
use tracing::debug;

/// Inputs of one relocalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelocationInput {
    /// Anchor pose as observed by this device
    pub local_anchor: Pose,
    /// Anchor pose agreed by the session
    pub target_anchor: Pose,
    /// Current world pose of the rig
    pub rig: Pose,
    /// Current world pose of the tracked child (usually the headset)
    pub child: Pose,
    /// Keep the rig's current height and only correct horizontal position and rotation
    #[serde(default = "default_ignore_vertical_axis")]
    pub ignore_vertical_axis: bool,
}

const fn default_ignore_vertical_axis() -> bool {
    true
}

impl RelocationInput {
    /// Relocation that keeps the rig height, the common case for floor-tracked headsets.
    pub const fn new(local_anchor: Pose, target_anchor: Pose, rig: Pose, child: Pose) -> Self {
        Self {
            local_anchor,
            target_anchor,
            rig,
            child,
            ignore_vertical_axis: true,
        }
    }

    #[must_use]
    pub const fn ignore_vertical_axis(mut self, ignore: bool) -> Self {
        self.ignore_vertical_axis = ignore;
        self
    }
}

/// New rig pose produced by a relocalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigPlacement {
    pub position: Vec3,
    pub rotation: Quat,
}

impl RigPlacement {
    #[inline]
    pub const fn as_pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }
}

impl From<RigPlacement> for Pose {
    fn from(placement: RigPlacement) -> Self {
        placement.as_pose()
    }
}

/// Computes rig poses that reconcile a local anchor with a target anchor.
#[derive(Debug, Clone)]
pub struct ReferentialRelocator {
    tolerance: f32,
}

impl Default for ReferentialRelocator {
    fn default() -> Self {
        Self::new(ORTHONORMAL_TOLERANCE)
    }
}

impl ReferentialRelocator {
    /// `tolerance` bounds how far input quaternions may be from unit length.
    pub const fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Rig pose after relocalization. Closed form, no iteration.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn relocate(&self, input: &RelocationInput) -> Result<RigPlacement> {
        for (name, pose) in [
            ("local anchor", &input.local_anchor),
            ("target anchor", &input.target_anchor),
            ("rig", &input.rig),
            ("child", &input.child),
        ] {
            self.check_rotation(name, pose.rotation)?;
        }

        let desired = desired_child(&input.local_anchor, &input.target_anchor, &input.child);
        let child_local = input.child.relative_to(&input.rig);
        let mut rig = rig_pose_for_child(&desired, &child_local);

        if input.ignore_vertical_axis {
            rig.position.y = input.rig.position.y;
        }

        debug!(
            rig_position = %rig.position,
            moved = %(rig.position - input.rig.position),
            ignore_vertical_axis = input.ignore_vertical_axis,
            "computed rig relocation"
        );

        Ok(RigPlacement {
            position: rig.position,
            rotation: rig.rotation,
        })
    }

    fn check_rotation(&self, name: &str, rotation: Quat) -> Result<()> {
        if !rotation.is_finite() || (rotation.length() - 1.0).abs() > self.tolerance {
            return Err(Error::InvalidConfiguration(format!(
                "{name} rotation {rotation} is not a unit quaternion"
            )));
        }
        Ok(())
    }
}

/// Where the child must be so that its pose relative to `target_anchor`
/// equals its current pose relative to `local_anchor`.
pub fn desired_child(local_anchor: &Pose, target_anchor: &Pose, child: &Pose) -> Pose {
    let child_in_local = child.relative_to(local_anchor);
    *target_anchor * child_in_local
}

/// Pose of a parent such that a child at the fixed local offset `child_local`
/// lands exactly on `desired_child`.
pub fn rig_pose_for_child(desired_child: &Pose, child_local: &Pose) -> Pose {
    let rotation = (desired_child.rotation * child_local.rotation.inverse()).normalize();
    let position = desired_child.position - rotation * child_local.position;
    Pose::new(position, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use snapwell_core::constants::RELOCATION_TOLERANCE;
    use std::f32::consts::FRAC_PI_2;

    fn scenario() -> RelocationInput {
        let rig = Pose::new(Vec3::new(0.5, 0.0, -1.0), Quat::from_rotation_y(0.4));
        let headset_local = Pose::new(Vec3::new(0.1, 1.7, 0.2), Quat::from_rotation_x(-0.2));
        RelocationInput::new(
            Pose::new(Vec3::new(2.0, 1.0, 3.0), Quat::from_rotation_y(-0.8)),
            Pose::new(Vec3::new(-4.0, 1.2, 0.5), Quat::from_rotation_y(1.3) * Quat::from_rotation_x(0.05)),
            rig,
            rig * headset_local,
        )
    }

    #[test]
    fn round_trip_reproduces_target_relative_pose() {
        let relocator = ReferentialRelocator::default();
        let input = scenario().ignore_vertical_axis(false);
        let placement = relocator.relocate(&input).unwrap();

        let child_local = input.child.relative_to(&input.rig);
        let new_child = placement.as_pose() * child_local;

        let before = input.child.relative_to(&input.local_anchor);
        let after = new_child.relative_to(&input.target_anchor);
        assert!(before.abs_diff_eq(&after, RELOCATION_TOLERANCE));
        assert!(new_child.abs_diff_eq(
            &desired_child(&input.local_anchor, &input.target_anchor, &input.child),
            RELOCATION_TOLERANCE
        ));
    }

    #[test]
    fn vertical_override_keeps_rig_height() {
        let relocator = ReferentialRelocator::default();
        let input = scenario();
        assert!(input.ignore_vertical_axis);
        let placement = relocator.relocate(&input).unwrap();
        assert_eq!(placement.position.y, input.rig.position.y);

        let free = relocator.relocate(&input.ignore_vertical_axis(false)).unwrap();
        assert_eq!(free.position.x, placement.position.x);
        assert_eq!(free.position.z, placement.position.z);
        assert_eq!(free.rotation, placement.rotation);
    }

    #[test]
    fn identical_anchors_leave_rig_in_place() {
        let relocator = ReferentialRelocator::default();
        let mut input = scenario().ignore_vertical_axis(false);
        input.target_anchor = input.local_anchor;
        let placement = relocator.relocate(&input).unwrap();
        assert!(placement.as_pose().abs_diff_eq(&input.rig, 1e-4));
    }

    #[test]
    fn pure_translation_between_anchors() {
        let relocator = ReferentialRelocator::default();
        let input = RelocationInput::new(
            Pose::from_position(Vec3::new(1.0, 0.0, 0.0)),
            Pose::from_position(Vec3::new(4.0, 2.0, 0.0)),
            Pose::IDENTITY,
            Pose::from_position(Vec3::new(0.0, 1.6, 0.0)),
        )
        .ignore_vertical_axis(false);
        let placement = relocator.relocate(&input).unwrap();
        assert_abs_diff_eq!(placement.position, Vec3::new(3.0, 2.0, 0.0), epsilon = 1e-5);
        assert!(placement.rotation.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn rotated_target_anchor_turns_rig() {
        let relocator = ReferentialRelocator::default();
        let input = RelocationInput::new(
            Pose::IDENTITY,
            Pose::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2)),
            Pose::IDENTITY,
            Pose::from_position(Vec3::new(0.0, 1.6, 1.0)),
        );
        let placement = relocator.relocate(&input).unwrap();
        assert!(placement.rotation.angle_between(Quat::from_rotation_y(FRAC_PI_2)) < 1e-5);
        assert_abs_diff_eq!(placement.position, Vec3::ZERO, epsilon = 1e-5);
    }

    #[test]
    fn rig_pose_for_child_places_child() {
        let desired = Pose::new(Vec3::new(3.0, 1.5, -2.0), Quat::from_rotation_z(0.3));
        let child_local = Pose::new(Vec3::new(0.0, 1.6, 0.1), Quat::from_rotation_y(-0.7));
        let rig = rig_pose_for_child(&desired, &child_local);
        assert!((rig * child_local).abs_diff_eq(&desired, 1e-5));
    }

    #[test]
    fn rejects_non_unit_rotation() {
        let relocator = ReferentialRelocator::default();
        let mut input = scenario();
        input.target_anchor.rotation = Quat::from_xyzw(0.0, 0.0, 0.0, 2.0);
        assert!(matches!(relocator.relocate(&input), Err(Error::InvalidConfiguration(_))));

        input.target_anchor.rotation = Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0);
        assert!(matches!(relocator.relocate(&input), Err(Error::InvalidConfiguration(_))));
    }
}
