//! Magnet attraction and snapping for snapwell.
//!
//! An attracted magnet is pulled onto an attractor so that a chosen local
//! axis lines up with the attractor's axis, optionally snapping the other
//! axes to right angles, and moves either onto the attractor or only onto the
//! attractor's alignment plane.
//!
//! # Core Types
//!
//! - [`AttractedAxis`] / [`AttractorAxis`]: symbolic axis selectors
//! - [`AttractorSettings`]: move/rotation policies and snap offset of an attractor
//! - [`MagnetSnapSolver`]: pure target pose computation
//! - [`SnapSession`]: per-magnet request lifecycle (instant or timed snaps)
//! - [`MagnetCoordinator`]: closest-pair search across an assembly's magnets
//! - [`ProximityTracker`]: enter/leave feedback while a magnet is carried
//!
//! # Usage
//!
//! ```
//! use glam::Vec3;
//! use snapwell_core::Pose;
//! use snapwell_magnet::{
//!     find_closest_attractor, AttractorSettings, MagnetId, MagnetPoint, MagnetSnapSolver,
//!     SnapRequest, StaticMagnet, Attractable,
//! };
//!
//! let solver = MagnetSnapSolver::default();
//! let note = MagnetPoint::new(MagnetId(1), Pose::from_position(Vec3::new(0.0, 0.05, 0.0)));
//! let board = StaticMagnet::new(MagnetId(2), Pose::IDENTITY, AttractorSettings::default());
//!
//! if let Some(found) = find_closest_attractor(&solver, &note, [&board]) {
//!     let request = SnapRequest::new(note.pose, board.pose, note.attracted_axis(), board.settings);
//!     let outcome = solver.solve(&request).unwrap();
//!     assert_eq!(found.attractor, MagnetId(2));
//!     assert!(outcome.root.position.abs_diff_eq(Vec3::ZERO, 1e-6));
//! }
//! ```

pub mod axis;
pub mod magnet;
pub mod policy;
pub mod proximity;
pub mod selection;
pub mod session;
pub mod solver;

pub use axis::{AttractedAxis, AttractorAxis, Polarity, ResolvedAxis};
pub use magnet::{check_snap_pair, Attractable, GroupId, Magnet, MagnetId, MagnetPoint, StaticMagnet};
pub use policy::{AttractorSettings, MovePolicy, RotationPolicy, SnapOffset};
pub use proximity::{ProximityEvent, ProximityTracker};
pub use selection::{find_closest_attractor, AttractorMatch, CoordinatedMatch, MagnetCoordinator};
pub use session::{SnapSession, SnapState, SnapTick, SnapTiming};
pub use solver::{MagnetSnapSolver, SnapOutcome, SnapRequest, SolverConfig};
