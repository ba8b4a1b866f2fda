//! Snap request lifecycle.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::magnet::MagnetId;
use crate::solver::clamp_progress;

/// How a snap plays out over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapTiming {
    /// Complete the snap on the first tick
    pub instant: bool,
    /// Animation length in seconds when not instant
    pub duration: f32,
}

impl Default for SnapTiming {
    fn default() -> Self {
        Self {
            instant: true,
            duration: 1.0,
        }
    }
}

impl SnapTiming {
    /// Timed snap lasting `duration` seconds
    pub const fn animated(duration: f32) -> Self {
        Self {
            instant: false,
            duration,
        }
    }
}

/// State of a magnet's pending snap.
///
/// State transitions:
/// ```text
/// Idle ─request()─> Snapping ─tick() reaches 1 / grabbed / cancel()─> Idle
///                      ^  │
///                      └──┘ request() retargets and restarts the clock
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SnapState {
    /// No snap pending.
    #[default]
    Idle,
    /// Moving toward `target` since `started_at` (host clock, seconds).
    Snapping { target: MagnetId, started_at: f32 },
}

/// What to solve for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTick {
    pub target: MagnetId,
    /// Progress in `[0, 1]`
    pub progress: f32,
}

impl SnapTick {
    /// Returns true if this tick completes the snap
    #[inline]
    pub fn is_final(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Drives one attracted magnet's snap requests across host ticks.
#[derive(Debug, Clone, Default)]
pub struct SnapSession {
    state: SnapState,
    timing: SnapTiming,
}

impl SnapSession {
    pub fn new(timing: SnapTiming) -> Self {
        Self {
            state: SnapState::Idle,
            timing,
        }
    }

    #[inline]
    pub const fn state(&self) -> SnapState {
        self.state
    }

    #[inline]
    pub const fn timing(&self) -> &SnapTiming {
        &self.timing
    }

    #[inline]
    pub const fn is_snapping(&self) -> bool {
        matches!(self.state, SnapState::Snapping { .. })
    }

    /// Start snapping toward `target`, replacing any pending request.
    pub fn request(&mut self, target: MagnetId, now: f32) {
        trace!(?target, now, "snap requested");
        self.state = SnapState::Snapping {
            target,
            started_at: now,
        };
    }

    /// Drop any pending request.
    pub fn cancel(&mut self) {
        if self.is_snapping() {
            trace!("snap cancelled");
        }
        self.state = SnapState::Idle;
    }

    /// Advance the session. Grabbing the assembly cancels the snap.
    ///
    /// Returns the target and progress to solve for, or `None` when idle.
    /// The session returns to idle after handing out the final tick.
    pub fn tick(&mut self, now: f32, grabbed: bool) -> Option<SnapTick> {
        let SnapState::Snapping { target, started_at } = self.state else {
            return None;
        };
        if grabbed {
            trace!(?target, "snap cancelled by grab");
            self.state = SnapState::Idle;
            return None;
        }

        let progress = if self.timing.instant || self.timing.duration <= 0.0 {
            1.0
        } else {
            clamp_progress((now - started_at) / self.timing.duration)
        };
        if progress >= 1.0 {
            trace!(?target, "snap complete");
            self.state = SnapState::Idle;
        }
        Some(SnapTick { target, progress })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn idle_session_yields_nothing() {
        let mut session = SnapSession::default();
        assert!(!session.is_snapping());
        assert_eq!(session.tick(0.0, false), None);
    }

    #[test]
    fn instant_snap_completes_in_one_tick() {
        let mut session = SnapSession::new(SnapTiming::default());
        session.request(MagnetId(3), 10.0);
        let tick = session.tick(10.0, false).unwrap();
        assert_eq!(tick.target, MagnetId(3));
        assert!(tick.is_final());
        assert_eq!(session.state(), SnapState::Idle);
        assert_eq!(session.tick(10.1, false), None);
    }

    #[test]
    fn timed_snap_progresses() {
        let mut session = SnapSession::new(SnapTiming::animated(2.0));
        session.request(MagnetId(1), 5.0);

        let first = session.tick(5.5, false).unwrap();
        assert_abs_diff_eq!(first.progress, 0.25);
        assert!(!first.is_final());
        assert!(session.is_snapping());

        let second = session.tick(6.0, false).unwrap();
        assert_abs_diff_eq!(second.progress, 0.5);

        let last = session.tick(8.0, false).unwrap();
        assert_eq!(last.progress, 1.0);
        assert!(!session.is_snapping());
    }

    #[test]
    fn grabbing_cancels() {
        let mut session = SnapSession::new(SnapTiming::animated(1.0));
        session.request(MagnetId(1), 0.0);
        assert!(session.tick(0.2, false).is_some());
        assert_eq!(session.tick(0.4, true), None);
        assert_eq!(session.state(), SnapState::Idle);
    }

    #[test]
    fn new_request_restarts_clock() {
        let mut session = SnapSession::new(SnapTiming::animated(1.0));
        session.request(MagnetId(1), 0.0);
        session.request(MagnetId(2), 0.5);
        let tick = session.tick(0.75, false).unwrap();
        assert_eq!(tick.target, MagnetId(2));
        assert_abs_diff_eq!(tick.progress, 0.25);
    }

    #[test]
    fn clock_going_backwards_clamps_to_zero() {
        let mut session = SnapSession::new(SnapTiming::animated(1.0));
        session.request(MagnetId(1), 3.0);
        assert_eq!(session.tick(2.0, false).unwrap().progress, 0.0);
    }

    #[test]
    fn zero_duration_is_instant() {
        let mut session = SnapSession::new(SnapTiming::animated(0.0));
        session.request(MagnetId(1), 0.0);
        assert!(session.tick(0.0, false).unwrap().is_final());
    }

    #[test]
    fn cancel_clears_request() {
        let mut session = SnapSession::default();
        session.request(MagnetId(9), 0.0);
        session.cancel();
        assert_eq!(session.tick(1.0, false), None);
    }
}
