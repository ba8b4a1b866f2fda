//! Target pose computation for magnet snapping.
//!
//! The solver is stateless apart from its tolerances: every call is a pure
//! function of the poses and settings it is given.

use std::f32::consts::PI;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use snapwell_core::constants::ORTHONORMAL_TOLERANCE;
use snapwell_core::math::{checked_normalize, look_rotation, unsigned_angle, DEFAULT_EPSILON};
use snapwell_core::{BasisAxis, Frame, Plane, Pose, Result};
use tracing::{debug, warn};

use crate::axis::{AttractedAxis, AttractorAxis, Polarity, ResolvedAxis};
use crate::policy::{AttractorSettings, MovePolicy, RotationPolicy};

/// Solver tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Guide vectors shorter than this are considered degenerate.
    pub degenerate_epsilon: f32,
    /// Maximum deviation accepted when validating input frames.
    pub orthonormal_tolerance: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            degenerate_epsilon: DEFAULT_EPSILON,
            orthonormal_tolerance: ORTHONORMAL_TOLERANCE,
        }
    }
}

/// One snap attempt: the attracted magnet, the assembly carrying it, the
/// attractor and how far along the snap animation we are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRequest {
    /// World pose of the attracted magnet point
    pub attracted: Pose,
    /// World pose of the rigid assembly root that carries the magnet
    pub assembly_root: Pose,
    /// World pose of the attractor
    pub attractor: Pose,
    pub attracted_axis: AttractedAxis,
    pub settings: AttractorSettings,
    progress: f32,
}

impl SnapRequest {
    /// Instantaneous snap of a magnet that is its own assembly root.
    pub fn new(
        attracted: Pose,
        attractor: Pose,
        attracted_axis: AttractedAxis,
        settings: AttractorSettings,
    ) -> Self {
        Self {
            attracted,
            assembly_root: attracted,
            attractor,
            attracted_axis,
            settings,
            progress: 1.0,
        }
    }

    #[must_use]
    pub const fn with_assembly_root(mut self, assembly_root: Pose) -> Self {
        self.assembly_root = assembly_root;
        self
    }

    /// Set the animation progress, clamped to `[0, 1]` (NaN counts as 0).
    #[must_use]
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = clamp_progress(progress);
        self
    }

    #[inline]
    pub const fn progress(&self) -> f32 {
        self.progress
    }
}

/// Result of one snap step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    /// Pose to apply to the assembly root this step
    pub root: Pose,
    /// Pose the magnet point reaches once the snap completes
    pub magnet_target: Pose,
    /// Progress this step was computed for
    pub progress: f32,
}

impl SnapOutcome {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Computes where an attracted magnet must go to sit on an attractor.
#[derive(Debug, Clone, Default)]
pub struct MagnetSnapSolver {
    config: SolverConfig,
}

impl MagnetSnapSolver {
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Position the attracted magnet should reach, given where it is now.
    pub fn target_position(
        &self,
        attracted_position: Vec3,
        attractor: &Pose,
        settings: &AttractorSettings,
    ) -> Vec3 {
        let offset = attractor.rotation * settings.offset.local;
        match settings.move_policy {
            MovePolicy::MatchAttractorPosition => attractor.position + offset,
            MovePolicy::ProjectOntoAlignmentPlane => {
                let normal = settings.axis.plane_normal(&attractor.frame());
                let projection = Plane::new(normal, attractor.position).closest_point(attracted_position);
                let candidate = projection + offset;
                if settings.offset.ignore_sign && !settings.offset.is_zero() {
                    let reversed = projection - offset;
                    if attracted_position.distance(reversed) < attracted_position.distance(candidate) {
                        return reversed;
                    }
                }
                candidate
            }
        }
    }

    /// Orientation the attracted magnet should reach.
    ///
    /// The attracted primary axis ends up on the attractor's resolved axis.
    /// Fails with `InvalidConfiguration` if either orientation is not a valid
    /// rotation.
    pub fn target_rotation(
        &self,
        attracted: &Pose,
        attractor: &Pose,
        attracted_axis: AttractedAxis,
        attractor_axis: AttractorAxis,
        rotation_policy: RotationPolicy,
    ) -> Result<Quat> {
        let attracted_frame = attracted.frame();
        let attractor_frame = attractor.frame();
        attracted_frame.validate(self.config.orthonormal_tolerance)?;
        attractor_frame.validate(self.config.orthonormal_tolerance)?;

        let source_axis = attracted_axis.resolve(&attracted_frame);
        let source_guide = attracted_axis.plane_guide(&attracted_frame);
        let ResolvedAxis {
            axis: target_axis,
            plane_guide,
        } = attractor_axis.resolve(&attractor_frame, source_axis, source_guide);

        let plane_guide = match checked_normalize(plane_guide, self.config.degenerate_epsilon) {
            Some(guide) => guide,
            None => {
                let fallback = fallback_guide(&attractor_frame, target_axis);
                warn!(
                    ?attracted_axis,
                    ?attractor_axis,
                    %fallback,
                    "attracted guide axis is parallel to the attractor axis, using fallback guide"
                );
                fallback
            }
        };

        let snap = rotation_policy == RotationPolicy::MatchAxisWithOrthogonalSnap;
        let guide = if snap {
            nearest_cardinal(&attractor_frame, plane_guide)
        } else {
            plane_guide
        };

        // Direction the attracted basis axis (not the signed selector) must take
        let basis_target = match attracted_axis.polarity() {
            Polarity::Negative => -target_axis,
            Polarity::Positive | Polarity::Any => target_axis,
        };

        let rotation = match attracted_axis.basis() {
            BasisAxis::Up => look_rotation(guide, basis_target)?,
            BasisAxis::Forward => look_rotation(basis_target, guide)?,
            // X alignment is a reduced-fidelity case: no guide is honoured
            BasisAxis::Right if snap => attractor.rotation,
            BasisAxis::Right => {
                // Near-opposite axes: half turn about the guide axis first, the
                // remaining arc is then small and well conditioned
                let arc = if source_axis.dot(target_axis) < -1.0 + 1e-4 {
                    let half_turn =
                        Quat::from_axis_angle(attracted_frame.axis(attracted_axis.guide_basis()), PI);
                    Quat::from_rotation_arc(half_turn * source_axis, target_axis) * half_turn
                } else {
                    Quat::from_rotation_arc(source_axis, target_axis)
                };
                arc * attracted.rotation
            }
        };
        Ok(rotation.normalize())
    }

    /// Pose between `current` and `target`: `current` at or below 0, `target`
    /// at or above 1, lerp/slerp in between.
    pub fn interpolate(current: &Pose, target: &Pose, progress: f32) -> Pose {
        if progress.is_nan() || progress <= 0.0 {
            return *current;
        }
        if progress >= 1.0 {
            return *target;
        }
        Pose::new(
            current.position.lerp(target.position, progress),
            current.rotation.slerp(target.rotation, progress).normalize(),
        )
    }

    /// Full snap step for a magnet carried by an assembly.
    ///
    /// The magnet's target pose is converted into a target pose for the
    /// assembly root through the fixed root-to-magnet offset, then the root
    /// is interpolated toward it by the request's progress.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn solve(&self, request: &SnapRequest) -> Result<SnapOutcome> {
        let target_rotation = self.target_rotation(
            &request.attracted,
            &request.attractor,
            request.attracted_axis,
            request.settings.axis,
            request.settings.rotation_policy,
        )?;

        let local = request.attracted.relative_to(&request.assembly_root);
        let root_rotation = (target_rotation * local.rotation.inverse()).normalize();

        // Magnet position once the root is rotated in place
        let rotated_root = Pose::new(request.assembly_root.position, root_rotation);
        let rotated_magnet = rotated_root.transform_point(local.position);
        let target_position =
            self.target_position(rotated_magnet, &request.attractor, &request.settings);

        let root_target = Pose::new(
            target_position - rotated_magnet + request.assembly_root.position,
            root_rotation,
        );
        let root = Self::interpolate(&request.assembly_root, &root_target, request.progress);

        debug!(
            progress = request.progress,
            target_position = %target_position,
            root_position = %root.position,
            "computed magnet snap step"
        );

        Ok(SnapOutcome {
            root,
            magnet_target: Pose::new(target_position, target_rotation),
            progress: request.progress,
        })
    }
}

/// Clamp a snap progress value to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Attractor cardinal forming the smallest angle with `guide`; earlier
/// cardinals win ties.
fn nearest_cardinal(frame: &Frame, guide: Vec3) -> Vec3 {
    let mut best = guide;
    let mut min_angle = f32::INFINITY;
    for candidate in frame.cardinals() {
        let angle = unsigned_angle(guide, candidate);
        if angle < min_angle {
            min_angle = angle;
            best = candidate;
        }
    }
    best
}

/// First attractor cardinal that is not parallel to `axis`.
fn fallback_guide(frame: &Frame, axis: Vec3) -> Vec3 {
    frame
        .cardinals()
        .into_iter()
        .find(|candidate| candidate.dot(axis).abs() < 0.5)
        .unwrap_or(frame.forward)
}
