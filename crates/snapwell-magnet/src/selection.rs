//! Picking the attractor a magnet should snap to.
//!
//! Broad-phase (which magnets are near at all) belongs to the host; these
//! functions only rank candidates it hands over.

use glam::Vec3;
use tracing::trace;

use crate::magnet::{check_snap_pair, Attractable, Magnet, MagnetId, MagnetPoint};
use crate::solver::MagnetSnapSolver;

/// Best attractor found for one attracted magnet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractorMatch {
    pub attractor: MagnetId,
    /// Where the attracted magnet would be pulled to
    pub target_position: Vec3,
    /// Distance from the attracted magnet to `target_position`
    pub distance: f32,
}

/// Closest valid attractor whose snap target lies strictly within the
/// attracted magnet's radius.
///
/// Candidates that fail [`check_snap_pair`] are skipped. The first candidate
/// wins on equal distances.
pub fn find_closest_attractor<'a, A, M, I>(
    solver: &MagnetSnapSolver,
    attracted: &A,
    candidates: I,
) -> Option<AttractorMatch>
where
    A: Attractable + ?Sized,
    M: Magnet + ?Sized + 'a,
    I: IntoIterator<Item = &'a M>,
{
    let position = attracted.pose().position;
    let mut best: Option<AttractorMatch> = None;
    let mut min_distance = attracted.radius();

    for candidate in candidates {
        if let Err(err) = check_snap_pair(attracted, candidate) {
            trace!(candidate = ?candidate.id(), %err, "skipping magnet");
            continue;
        }
        let target_position = candidate.snap_target_position(solver, position);
        let distance = position.distance(target_position);
        if distance < min_distance {
            min_distance = distance;
            best = Some(AttractorMatch {
                attractor: candidate.id(),
                target_position,
                distance,
            });
        }
    }
    best
}

/// Winning pair across all magnets of an assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatedMatch {
    /// Magnet of the assembly that should snap
    pub attracted: MagnetId,
    pub found: AttractorMatch,
}

/// Runs the attractor search for every magnet point of one assembly and keeps
/// the globally closest pair, so a multi-magnet object snaps by a single
/// magnet.
#[derive(Debug, Clone, Default)]
pub struct MagnetCoordinator {
    magnets: Vec<MagnetPoint>,
    radius_override: Option<f32>,
}

impl MagnetCoordinator {
    pub fn new(magnets: Vec<MagnetPoint>) -> Self {
        Self {
            magnets,
            radius_override: None,
        }
    }

    /// Force every magnet's radius to `radius` on the next [`Self::apply_radius_override`].
    #[must_use]
    pub const fn with_radius_override(mut self, radius: f32) -> Self {
        self.radius_override = Some(radius);
        self
    }

    pub fn magnets(&self) -> &[MagnetPoint] {
        &self.magnets
    }

    pub fn magnets_mut(&mut self) -> &mut [MagnetPoint] {
        &mut self.magnets
    }

    /// Apply the configured radius override, typically when the assembly is released.
    pub fn apply_radius_override(&mut self) {
        if let Some(radius) = self.radius_override {
            for magnet in &mut self.magnets {
                magnet.radius = radius;
            }
        }
    }

    /// Closest `(own magnet, attractor)` pair; earlier magnets win ties.
    pub fn closest_pair<M>(&self, solver: &MagnetSnapSolver, candidates: &[&M]) -> Option<CoordinatedMatch>
    where
        M: Magnet + ?Sized,
    {
        let mut best: Option<CoordinatedMatch> = None;
        for magnet in &self.magnets {
            let Some(found) = find_closest_attractor(solver, magnet, candidates.iter().copied()) else {
                continue;
            };
            if best.map_or(true, |b| found.distance < b.found.distance) {
                best = Some(CoordinatedMatch {
                    attracted: magnet.id,
                    found,
                });
            }
        }
        best
    }
}
