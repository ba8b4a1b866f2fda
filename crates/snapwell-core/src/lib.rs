//! Core types and math for the snapwell crates.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Rigid poses and their composition
//! - Orthonormal frames and basis axis selection
//! - Plane projection and look-rotation helpers
//! - Common error types

pub mod error;
pub mod frame;
pub mod math;
pub mod pose;

pub use error::{Error, Result};
pub use frame::{BasisAxis, Frame};
pub use math::Plane;
pub use pose::Pose;

/// Workspace-wide constants
pub mod constants {
    /// Tolerance used when validating that a frame is orthonormal
    pub const ORTHONORMAL_TOLERANCE: f32 = 1e-3;
    /// Positional tolerance guaranteed by the relocation round-trip
    pub const RELOCATION_TOLERANCE: f32 = 1e-4;
}
