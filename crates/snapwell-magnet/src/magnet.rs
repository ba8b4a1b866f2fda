//! Magnet capabilities and the two concrete magnet kinds.
//!
//! Any magnet can attract ([`Magnet`]); only movable magnets can be attracted
//! ([`Attractable`]). Static magnets anchor things in place, magnet points
//! ride on a grabbable assembly and can both attract and be attracted.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use snapwell_core::{Error, Pose, Result};

use crate::axis::AttractedAxis;
use crate::policy::AttractorSettings;
use crate::session::SnapTiming;
use crate::solver::MagnetSnapSolver;

/// Default attraction radius, in meters.
pub const DEFAULT_MAGNET_RADIUS: f32 = 0.1;

/// Identity of a magnet, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MagnetId(pub u32);

/// Identity of a rigid assembly that carries one or more magnets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

/// Anything that can attract another magnet.
pub trait Magnet {
    fn id(&self) -> MagnetId;

    /// Current world pose
    fn pose(&self) -> Pose;

    fn attractor_settings(&self) -> &AttractorSettings;

    /// Assembly this magnet belongs to, if any
    fn group(&self) -> Option<GroupId> {
        None
    }

    /// Where an attracted magnet currently at `position` would be pulled to.
    fn snap_target_position(&self, solver: &MagnetSnapSolver, position: Vec3) -> Vec3 {
        solver.target_position(position, &self.pose(), self.attractor_settings())
    }
}

/// A magnet that can itself be pulled onto other magnets.
pub trait Attractable: Magnet {
    fn attracted_axis(&self) -> AttractedAxis;

    /// Search radius around the magnet's position
    fn radius(&self) -> f32;
}

/// Reject pairs that must never snap together: a magnet with itself, or two
/// magnets of the same assembly.
pub fn check_snap_pair<A, M>(attracted: &A, attractor: &M) -> Result<()>
where
    A: Attractable + ?Sized,
    M: Magnet + ?Sized,
{
    if attracted.id() == attractor.id() {
        return Err(Error::PreconditionViolated(format!(
            "magnet {:?} cannot attract itself",
            attracted.id()
        )));
    }
    if let (Some(a), Some(b)) = (attracted.group(), attractor.group()) {
        if a == b {
            return Err(Error::PreconditionViolated(format!(
                "magnets {:?} and {:?} belong to the same assembly {a:?}",
                attracted.id(),
                attractor.id()
            )));
        }
    }
    Ok(())
}

/// Fixed magnet that attracts others but never moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMagnet {
    pub id: MagnetId,
    pub pose: Pose,
    #[serde(default)]
    pub settings: AttractorSettings,
}

impl StaticMagnet {
    pub fn new(id: MagnetId, pose: Pose, settings: AttractorSettings) -> Self {
        Self { id, pose, settings }
    }
}

impl Magnet for StaticMagnet {
    fn id(&self) -> MagnetId {
        self.id
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn attractor_settings(&self) -> &AttractorSettings {
        &self.settings
    }
}

/// Magnet attached to a movable assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnetPoint {
    pub id: MagnetId,
    pub pose: Pose,
    #[serde(default)]
    pub group: Option<GroupId>,
    #[serde(default)]
    pub attracted_axis: AttractedAxis,
    #[serde(default = "default_radius")]
    pub radius: f32,
    /// Settings applied to magnets this point attracts
    #[serde(default)]
    pub settings: AttractorSettings,
    #[serde(default)]
    pub timing: SnapTiming,
}

const fn default_radius() -> f32 {
    DEFAULT_MAGNET_RADIUS
}

impl MagnetPoint {
    pub fn new(id: MagnetId, pose: Pose) -> Self {
        Self {
            id,
            pose,
            group: None,
            attracted_axis: AttractedAxis::default(),
            radius: DEFAULT_MAGNET_RADIUS,
            settings: AttractorSettings::default(),
            timing: SnapTiming::default(),
        }
    }

    #[must_use]
    pub const fn in_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    #[must_use]
    pub const fn with_attracted_axis(mut self, axis: AttractedAxis) -> Self {
        self.attracted_axis = axis;
        self
    }

    #[must_use]
    pub const fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub const fn with_settings(mut self, settings: AttractorSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: SnapTiming) -> Self {
        self.timing = timing;
        self
    }
}

impl Magnet for MagnetPoint {
    fn id(&self) -> MagnetId {
        self.id
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn attractor_settings(&self) -> &AttractorSettings {
        &self.settings
    }

    fn group(&self) -> Option<GroupId> {
        self.group
    }
}

impl Attractable for MagnetPoint {
    fn attracted_axis(&self) -> AttractedAxis {
        self.attracted_axis
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AttractorAxis;
    use crate::policy::MovePolicy;

    #[test]
    fn same_magnet_is_rejected() {
        let point = MagnetPoint::new(MagnetId(1), Pose::IDENTITY);
        let err = check_snap_pair(&point, &point).unwrap_err();
        assert!(matches!(err, Error::PreconditionViolated(_)));
    }

    #[test]
    fn same_group_is_rejected() {
        let a = MagnetPoint::new(MagnetId(1), Pose::IDENTITY).in_group(GroupId(7));
        let b = MagnetPoint::new(MagnetId(2), Pose::IDENTITY).in_group(GroupId(7));
        assert!(matches!(check_snap_pair(&a, &b), Err(Error::PreconditionViolated(_))));

        let c = MagnetPoint::new(MagnetId(3), Pose::IDENTITY).in_group(GroupId(8));
        assert!(check_snap_pair(&a, &c).is_ok());
    }

    #[test]
    fn static_magnets_have_no_group() {
        let point = MagnetPoint::new(MagnetId(1), Pose::IDENTITY).in_group(GroupId(1));
        let wall = StaticMagnet::new(MagnetId(2), Pose::IDENTITY, AttractorSettings::default());
        assert!(check_snap_pair(&point, &wall).is_ok());
    }

    #[test]
    fn snap_target_uses_attractor_settings() {
        let solver = MagnetSnapSolver::default();
        let wall = StaticMagnet::new(
            MagnetId(2),
            Pose::from_position(Vec3::new(0.0, 0.0, 3.0)),
            AttractorSettings::with_axis(AttractorAxis::Z).move_policy(MovePolicy::ProjectOntoAlignmentPlane),
        );
        let target = wall.snap_target_position(&solver, Vec3::new(1.0, 1.5, 2.9));
        assert!(target.abs_diff_eq(Vec3::new(1.0, 1.5, 3.0), 1e-6));
    }

    #[test]
    fn magnet_point_defaults() {
        let point = MagnetPoint::new(MagnetId(4), Pose::IDENTITY);
        assert_eq!(point.attracted_axis(), AttractedAxis::Y);
        assert_eq!(point.radius(), DEFAULT_MAGNET_RADIUS);
        assert_eq!(point.group(), None);
    }
}
