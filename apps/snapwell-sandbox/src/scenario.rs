//! TOML scenario files for the sandbox.
//!
//! A scenario holds an optional snap case and an optional relocation case.
//! Poses are written as a position plus Euler angles in degrees so files stay
//! hand-editable; [`Scenario::snap_request`] and
//! [`Scenario::relocation_input`] turn them into solver inputs.

use std::path::Path;

use glam::{EulerRot, Quat, Vec3};
use serde::Deserialize;
use snapwell_core::{Error, Pose, Result};
use snapwell_magnet::{AttractedAxis, AttractorSettings, SnapRequest, SolverConfig};
use snapwell_relocation::RelocationInput;

/// Pose as written in a scenario file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoseSpec {
    pub position: [f32; 3],
    /// `[x, y, z]` Euler angles in degrees, applied yaw, pitch, then roll
    pub rotation_deg: [f32; 3],
}

impl PoseSpec {
    pub fn to_pose(&self, name: &str) -> Result<Pose> {
        if self.position.iter().chain(&self.rotation_deg).any(|v| !v.is_finite()) {
            return Err(Error::InvalidScenario(format!("{name} contains a non-finite value")));
        }
        let [x, y, z] = self.rotation_deg;
        let rotation = Quat::from_euler(EulerRot::YXZ, y.to_radians(), x.to_radians(), z.to_radians());
        Ok(Pose::new(Vec3::from_array(self.position), rotation))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapSpec {
    pub attracted: PoseSpec,
    /// Assembly root, defaults to the attracted magnet itself
    pub root: Option<PoseSpec>,
    pub attractor: PoseSpec,
    #[serde(default)]
    pub attracted_axis: AttractedAxis,
    #[serde(default)]
    pub settings: AttractorSettings,
    #[serde(default = "default_progress")]
    pub progress: f32,
}

const fn default_progress() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelocationSpec {
    pub local_anchor: PoseSpec,
    pub target_anchor: PoseSpec,
    pub rig: PoseSpec,
    pub child: PoseSpec,
    #[serde(default = "default_ignore_vertical_axis")]
    pub ignore_vertical_axis: bool,
}

const fn default_ignore_vertical_axis() -> bool {
    true
}

/// Parsed scenario file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub solver: SolverConfig,
    pub snap: Option<SnapSpec>,
    pub relocation: Option<RelocationSpec>,
}

impl Scenario {
    pub fn from_toml(source: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(source).map_err(|e| Error::InvalidScenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidScenario(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&source)
    }

    fn validate(&self) -> Result<()> {
        if self.snap.is_none() && self.relocation.is_none() {
            return Err(Error::InvalidScenario(
                "scenario needs a [snap] or [relocation] section".into(),
            ));
        }
        let SolverConfig {
            degenerate_epsilon,
            orthonormal_tolerance,
        } = self.solver;
        if !(degenerate_epsilon > 0.0 && orthonormal_tolerance > 0.0) {
            return Err(Error::InvalidScenario("solver tolerances must be positive".into()));
        }
        if let Some(snap) = &self.snap {
            if !(0.0..=1.0).contains(&snap.progress) {
                return Err(Error::InvalidScenario(format!(
                    "snap progress {} is outside [0, 1]",
                    snap.progress
                )));
            }
            if !snap.settings.offset.local.is_finite() {
                return Err(Error::InvalidScenario("snap offset contains a non-finite value".into()));
            }
        }
        Ok(())
    }

    /// Snap case as a solver request, if the scenario has one.
    pub fn snap_request(&self) -> Result<Option<SnapRequest>> {
        let Some(snap) = &self.snap else {
            return Ok(None);
        };
        let attracted = snap.attracted.to_pose("snap.attracted")?;
        let root = match &snap.root {
            Some(root) => root.to_pose("snap.root")?,
            None => attracted,
        };
        let attractor = snap.attractor.to_pose("snap.attractor")?;
        let request = SnapRequest::new(attracted, attractor, snap.attracted_axis, snap.settings)
            .with_assembly_root(root)
            .with_progress(snap.progress);
        Ok(Some(request))
    }

    /// Relocation case as relocator input, if the scenario has one.
    pub fn relocation_input(&self) -> Result<Option<RelocationInput>> {
        let Some(relocation) = &self.relocation else {
            return Ok(None);
        };
        let input = RelocationInput::new(
            relocation.local_anchor.to_pose("relocation.local_anchor")?,
            relocation.target_anchor.to_pose("relocation.target_anchor")?,
            relocation.rig.to_pose("relocation.rig")?,
            relocation.child.to_pose("relocation.child")?,
        )
        .ignore_vertical_axis(relocation.ignore_vertical_axis);
        Ok(Some(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapwell_magnet::{AttractorAxis, MovePolicy, RotationPolicy};

    const SNAP_ONLY: &str = r#"
        [snap]
        attracted_axis = "minus_z"
        progress = 0.5

        [snap.attracted]
        position = [0.0, 1.0, 0.0]
        rotation_deg = [0.0, 90.0, 0.0]

        [snap.attractor]
        position = [0.0, 0.0, 0.0]

        [snap.settings]
        axis = "any_y"
        move_policy = "project_onto_alignment_plane"
        rotation_policy = "match_axis_only"
    "#;

    #[test]
    fn parses_snap_section() {
        let scenario = Scenario::from_toml(SNAP_ONLY).unwrap();
        assert!(scenario.relocation.is_none());
        assert_eq!(scenario.solver, SolverConfig::default());

        let request = scenario.snap_request().unwrap().unwrap();
        assert_eq!(request.attracted_axis, AttractedAxis::MinusZ);
        assert_eq!(request.settings.axis, AttractorAxis::AnyY);
        assert_eq!(request.settings.move_policy, MovePolicy::ProjectOntoAlignmentPlane);
        assert_eq!(request.settings.rotation_policy, RotationPolicy::MatchAxisOnly);
        assert_eq!(request.progress(), 0.5);
        assert_eq!(request.assembly_root, request.attracted);
        assert!((request.attracted.rotation * Vec3::Z).abs_diff_eq(Vec3::X, 1e-6));
        assert_eq!(scenario.relocation_input().unwrap(), None);
    }

    #[test]
    fn parses_relocation_section() {
        let scenario = Scenario::from_toml(
            r#"
            [relocation]
            ignore_vertical_axis = false
            local_anchor = { position = [1.0, 0.0, 0.0] }
            target_anchor = { position = [4.0, 2.0, 0.0] }
            rig = {}
            child = { position = [0.0, 1.6, 0.0] }
            "#,
        )
        .unwrap();
        let input = scenario.relocation_input().unwrap().unwrap();
        assert!(!input.ignore_vertical_axis);
        assert_eq!(input.target_anchor.position, Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(input.rig, Pose::IDENTITY);
        assert!(scenario.snap_request().unwrap().is_none());
    }

    #[test]
    fn bundled_example_parses() {
        let scenario = Scenario::from_toml(include_str!("../scenarios/example.toml")).unwrap();
        assert!(scenario.snap_request().unwrap().is_some());
        assert!(scenario.relocation_input().unwrap().is_some());
    }

    #[test]
    fn rejects_empty_scenario() {
        assert!(matches!(Scenario::from_toml(""), Err(Error::InvalidScenario(_))));
    }

    #[test]
    fn rejects_out_of_range_progress() {
        let source = SNAP_ONLY.replace("progress = 0.5", "progress = 1.5");
        assert!(matches!(Scenario::from_toml(&source), Err(Error::InvalidScenario(_))));
    }

    #[test]
    fn rejects_unknown_axis() {
        let source = SNAP_ONLY.replace("\"any_y\"", "\"diagonal\"");
        assert!(matches!(Scenario::from_toml(&source), Err(Error::InvalidScenario(_))));
    }

    #[test]
    fn rejects_unknown_keys() {
        let source = format!("{SNAP_ONLY}\n[extra]\nvalue = 1\n");
        assert!(matches!(Scenario::from_toml(&source), Err(Error::InvalidScenario(_))));
    }

    #[test]
    fn rejects_misspelled_nested_keys() {
        let settings_typo = SNAP_ONLY.replace("move_policy", "move_polcy");
        assert!(matches!(Scenario::from_toml(&settings_typo), Err(Error::InvalidScenario(_))));

        let offset_typo = format!("{SNAP_ONLY}offset = {{ local = [0.0, 0.0, 0.1], ignore_sgn = false }}\n");
        assert!(matches!(Scenario::from_toml(&offset_typo), Err(Error::InvalidScenario(_))));

        let solver_typo = format!("[solver]\ndegenerate_eps = 5.0\n{SNAP_ONLY}");
        assert!(matches!(Scenario::from_toml(&solver_typo), Err(Error::InvalidScenario(_))));
    }

    #[test]
    fn non_finite_pose_is_rejected() {
        let spec = PoseSpec {
            position: [f32::NAN, 0.0, 0.0],
            rotation_deg: [0.0; 3],
        };
        assert!(matches!(spec.to_pose("pose"), Err(Error::InvalidScenario(_))));
    }
}
