//! Proximity feedback while a magnet is being carried.
//!
//! The host feeds the closest attractor every frame; the tracker turns that
//! stream into enter/change/leave events (used e.g. to highlight a wall as a
//! grabbed note approaches it).

use tracing::trace;

use crate::magnet::MagnetId;
use crate::selection::AttractorMatch;

/// Proximity transition reported by [`ProximityTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProximityEvent {
    /// A new attractor became the closest one.
    Entered { target: MagnetId, distance: f32 },
    /// The current attractor is still the closest one.
    Changed {
        target: MagnetId,
        start_distance: f32,
        distance: f32,
    },
    /// The attractor is no longer the closest one (or none is in range).
    Left { target: MagnetId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tracked {
    target: MagnetId,
    start_distance: f32,
}

/// Tracks which attractor a carried magnet is currently near.
#[derive(Debug, Clone, Default)]
pub struct ProximityTracker {
    current: Option<Tracked>,
}

impl ProximityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attractor currently in proximity
    pub fn current(&self) -> Option<MagnetId> {
        self.current.map(|t| t.target)
    }

    /// Feed this frame's closest attractor, or `None` when nothing is in range.
    pub fn update(&mut self, closest: Option<&AttractorMatch>) -> Vec<ProximityEvent> {
        let mut events = Vec::new();
        match (self.current, closest) {
            (Some(tracked), Some(found)) if tracked.target == found.attractor => {
                events.push(ProximityEvent::Changed {
                    target: tracked.target,
                    start_distance: tracked.start_distance,
                    distance: found.distance,
                });
            }
            (previous, Some(found)) => {
                if let Some(previous) = previous {
                    events.push(ProximityEvent::Left {
                        target: previous.target,
                    });
                }
                trace!(target = ?found.attractor, distance = found.distance, "magnet entered proximity");
                self.current = Some(Tracked {
                    target: found.attractor,
                    start_distance: found.distance,
                });
                events.push(ProximityEvent::Entered {
                    target: found.attractor,
                    distance: found.distance,
                });
                events.push(ProximityEvent::Changed {
                    target: found.attractor,
                    start_distance: found.distance,
                    distance: found.distance,
                });
            }
            (Some(previous), None) => {
                trace!(target = ?previous.target, "magnet left proximity");
                self.current = None;
                events.push(ProximityEvent::Left {
                    target: previous.target,
                });
            }
            (None, None) => {}
        }
        events
    }

    /// End proximity without a leave event, e.g. once the magnet snapped.
    pub fn clear(&mut self) -> Option<MagnetId> {
        self.current.take().map(|t| t.target)
    }
}
