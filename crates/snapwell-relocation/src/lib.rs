//! Anchor-based relocalization of a tracked rig.
//!
//! Independently tracked devices each see a shared physical anchor in their
//! own coordinates. This crate computes the rig pose that makes a device's
//! observation of the anchor coincide with the session's agreed anchor pose.
//!
//! # Usage
//!
//! ```
//! use glam::{Quat, Vec3};
//! use snapwell_core::Pose;
//! use snapwell_relocation::{ReferentialRelocator, RelocationInput};
//!
//! let rig = Pose::IDENTITY;
//! let headset = Pose::from_position(Vec3::new(0.0, 1.6, 0.0));
//! let seen_here = Pose::from_position(Vec3::new(1.0, 0.0, 2.0));
//! let agreed = Pose::new(Vec3::new(-3.0, 0.0, 0.0), Quat::from_rotation_y(0.5));
//!
//! let placement = ReferentialRelocator::default()
//!     .relocate(&RelocationInput::new(seen_here, agreed, rig, headset))
//!     .unwrap();
//! assert_eq!(placement.position.y, rig.position.y);
//! ```

pub mod anchor;
pub mod relocate;

pub use anchor::{facing_anchor_rotation, rig_pose_for_tracking_anchor};
pub use relocate::{desired_child, rig_pose_for_child, ReferentialRelocator, RelocationInput, RigPlacement};
