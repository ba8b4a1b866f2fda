//! Symbolic alignment axes and their resolution against a frame.
//!
//! Each selector maps to a table entry `(basis axis, polarity)`; attracted
//! selectors additionally carry the basis axis used as their plane guide.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use snapwell_core::math::project_on_plane;
use snapwell_core::{BasisAxis, Frame};

/// Sign of an alignment axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Axis as-is
    Positive,
    /// Axis negated
    Negative,
    /// Whichever sign is nearer a reference direction
    Any,
}

/// Axis of the attracted magnet that must end up on the attractor's axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttractedAxis {
    X,
    #[default]
    Y,
    Z,
    MinusX,
    MinusY,
    MinusZ,
}

impl AttractedAxis {
    /// Every selector, in declaration order
    pub const ALL: [Self; 6] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::MinusX,
        Self::MinusY,
        Self::MinusZ,
    ];

    /// Basis axis this selector is drawn from
    #[inline]
    pub const fn basis(self) -> BasisAxis {
        match self {
            Self::X | Self::MinusX => BasisAxis::Right,
            Self::Y | Self::MinusY => BasisAxis::Up,
            Self::Z | Self::MinusZ => BasisAxis::Forward,
        }
    }

    /// Sign applied to the basis axis (never [`Polarity::Any`])
    #[inline]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::X | Self::Y | Self::Z => Polarity::Positive,
            Self::MinusX | Self::MinusY | Self::MinusZ => Polarity::Negative,
        }
    }

    /// Basis axis paired with this selector as the secondary "plane guide".
    ///
    /// Y pairs with forward; X and Z pair with up.
    #[inline]
    pub const fn guide_basis(self) -> BasisAxis {
        match self.basis() {
            BasisAxis::Up => BasisAxis::Forward,
            BasisAxis::Right | BasisAxis::Forward => BasisAxis::Up,
        }
    }

    /// Signed axis in the attracted object's local space
    #[inline]
    pub fn local(self) -> Vec3 {
        signed(self.basis().local(), self.polarity())
    }

    /// Signed axis in world space for the given frame
    #[inline]
    pub fn resolve(self, frame: &Frame) -> Vec3 {
        signed(frame.axis(self.basis()), self.polarity())
    }

    /// Plane guide vector in world space for the given frame
    #[inline]
    pub fn plane_guide(self, frame: &Frame) -> Vec3 {
        frame.axis(self.guide_basis())
    }
}

/// Axis of the attractor that the attracted axis is pulled onto.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttractorAxis {
    X,
    Y,
    Z,
    MinusX,
    #[default]
    MinusY,
    MinusZ,
    AnyX,
    AnyY,
    AnyZ,
}

/// Attractor axis resolved against a concrete frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedAxis {
    /// Unit target direction for the attracted primary axis
    pub axis: Vec3,
    /// Guide vector projected onto the plane perpendicular to the axis
    pub plane_guide: Vec3,
}

impl AttractorAxis {
    /// Every selector, in declaration order
    pub const ALL: [Self; 9] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::MinusX,
        Self::MinusY,
        Self::MinusZ,
        Self::AnyX,
        Self::AnyY,
        Self::AnyZ,
    ];

    /// Basis axis this selector is drawn from
    #[inline]
    pub const fn basis(self) -> BasisAxis {
        match self {
            Self::X | Self::MinusX | Self::AnyX => BasisAxis::Right,
            Self::Y | Self::MinusY | Self::AnyY => BasisAxis::Up,
            Self::Z | Self::MinusZ | Self::AnyZ => BasisAxis::Forward,
        }
    }

    /// Sign applied to the basis axis, [`Polarity::Any`] for the "any" selectors
    #[inline]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::X | Self::Y | Self::Z => Polarity::Positive,
            Self::MinusX | Self::MinusY | Self::MinusZ => Polarity::Negative,
            Self::AnyX | Self::AnyY | Self::AnyZ => Polarity::Any,
        }
    }

    /// Unsigned family axis, the normal of the alignment plane
    #[inline]
    pub fn plane_normal(self, frame: &Frame) -> Vec3 {
        frame.axis(self.basis())
    }

    /// Resolve the target axis and the projected plane guide.
    ///
    /// `reference` picks the sign of "any" selectors: the signed axis with a
    /// non-negative dot product against it wins, so an exactly perpendicular
    /// reference resolves to the positive axis. `guide` is projected onto the
    /// plane perpendicular to the family axis.
    pub fn resolve(self, frame: &Frame, reference: Vec3, guide: Vec3) -> ResolvedAxis {
        let family = frame.axis(self.basis());
        let axis = match self.polarity() {
            Polarity::Positive => family,
            Polarity::Negative => -family,
            Polarity::Any => {
                if reference.dot(family) >= 0.0 {
                    family
                } else {
                    -family
                }
            }
        };
        ResolvedAxis {
            axis,
            plane_guide: project_on_plane(guide, family),
        }
    }
}

#[inline]
fn signed(axis: Vec3, polarity: Polarity) -> Vec3 {
    match polarity {
        Polarity::Negative => -axis,
        Polarity::Positive | Polarity::Any => axis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Quat;

    #[test]
    fn attracted_axes_on_identity_frame() {
        let frame = Frame::IDENTITY;
        assert_eq!(AttractedAxis::Y.resolve(&frame), Vec3::Y);
        assert_eq!(AttractedAxis::MinusY.resolve(&frame), -Vec3::Y);
        assert_eq!(AttractedAxis::Z.resolve(&frame), Vec3::Z);
        assert_eq!(AttractedAxis::MinusZ.resolve(&frame), -Vec3::Z);
        assert_eq!(AttractedAxis::X.resolve(&frame), Vec3::X);
        assert_eq!(AttractedAxis::MinusX.resolve(&frame), -Vec3::X);
    }

    #[test]
    fn attracted_guides() {
        let frame = Frame::IDENTITY;
        assert_eq!(AttractedAxis::Y.plane_guide(&frame), Vec3::Z);
        assert_eq!(AttractedAxis::MinusY.plane_guide(&frame), Vec3::Z);
        assert_eq!(AttractedAxis::Z.plane_guide(&frame), Vec3::Y);
        assert_eq!(AttractedAxis::MinusX.plane_guide(&frame), Vec3::Y);
    }

    #[test]
    fn attracted_axis_follows_rotation() {
        let rotation = Quat::from_rotation_z(0.8) * Quat::from_rotation_y(-0.3);
        let frame = Frame::from_rotation(rotation);
        for axis in AttractedAxis::ALL {
            assert_abs_diff_eq!(axis.resolve(&frame), rotation * axis.local(), epsilon = 1e-6);
        }
    }

    #[test]
    fn fixed_attractor_axis_projects_guide() {
        let resolved = AttractorAxis::MinusY.resolve(&Frame::IDENTITY, Vec3::X, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(resolved.axis, -Vec3::Y);
        assert_eq!(resolved.plane_guide, Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn any_axis_picks_nearest_sign() {
        let frame = Frame::IDENTITY;
        let up = AttractorAxis::AnyY.resolve(&frame, Vec3::new(0.2, 0.9, 0.0), Vec3::Z);
        assert_eq!(up.axis, Vec3::Y);
        let down = AttractorAxis::AnyY.resolve(&frame, Vec3::new(0.2, -0.9, 0.0), Vec3::Z);
        assert_eq!(down.axis, -Vec3::Y);
        let back = AttractorAxis::AnyZ.resolve(&frame, -Vec3::Z, Vec3::Y);
        assert_eq!(back.axis, -Vec3::Z);
    }

    #[test]
    fn any_axis_tie_prefers_positive() {
        // Reference (0,0,1) is perpendicular to Y: both signs are equidistant
        let resolved = AttractorAxis::AnyY.resolve(&Frame::IDENTITY, Vec3::Z, Vec3::Z);
        assert_eq!(resolved.axis, Vec3::Y);
        assert_eq!(resolved.plane_guide, Vec3::Z);
    }

    #[test]
    fn plane_normal_ignores_sign() {
        let frame = Frame::IDENTITY;
        assert_eq!(AttractorAxis::MinusZ.plane_normal(&frame), Vec3::Z);
        assert_eq!(AttractorAxis::AnyX.plane_normal(&frame), Vec3::X);
    }
}
