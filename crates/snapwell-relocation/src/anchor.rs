//! Anchor orientation helpers used before relocalizing.

use glam::{Quat, Vec3};
use snapwell_core::math::{look_rotation, project, yaw_of};
use snapwell_core::{Pose, Result};
use tracing::debug;

/// Orientation for a wall anchor that is stable across devices.
///
/// Detected wall planes have an arbitrary sign and roll. The anchor's
/// forward becomes the wall normal pointing toward the user's head, and its
/// up becomes whichever in-plane wall axis (up or right) is most aligned with
/// the rig's up, so two users facing the same wall derive the same frame.
///
/// Fails when the head lies in the wall plane or the rig's up is parallel to
/// the wall normal.
pub fn facing_anchor_rotation(wall: &Pose, head_position: Vec3, rig_up: Vec3) -> Result<Quat> {
    let frame = wall.frame();
    let forward = project(head_position - wall.position, frame.forward);
    let up_along_wall_up = project(rig_up, frame.up);
    let up_along_wall_right = project(rig_up, frame.right);
    let up = if up_along_wall_up.length_squared() > up_along_wall_right.length_squared() {
        up_along_wall_up
    } else {
        up_along_wall_right
    };
    look_rotation(forward, up)
}

/// Rig pose that brings an anchor observed in tracking space to the world
/// origin, correcting position and heading only.
///
/// Pitch and roll of the anchor are ignored, so the anchor lands exactly on
/// the origin only when it is level.
pub fn rig_pose_for_tracking_anchor(anchor: &Pose) -> Pose {
    let position = anchor.inverse_transform_point(Vec3::ZERO);
    let rotation = Quat::from_rotation_y(-yaw_of(anchor.rotation));
    debug!(%position, yaw = -yaw_of(anchor.rotation), "aligned rig to tracking anchor");
    Pose::new(position, rotation)
}
