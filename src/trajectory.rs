//! Append-only trajectory buffer.
//!
//! Visited points are collected in chronological order and later replayed as
//! line segments, one per consecutive pair. A candidate closer than
//! [`MIN_SEGMENT_LENGTH`] to the current running state is skipped so the
//! drawing never contains near-zero-length segments.

use glam::DVec3;

/// Candidates closer than this to the running state are not recorded.
pub const MIN_SEGMENT_LENGTH: f64 = 0.1;

/// Ordered history of recorded attractor positions.
///
/// Entries are never removed or reordered; after N steps the buffer holds
/// between 1 and N + 1 points.
#[derive(Debug, Clone)]
pub struct Trajectory {
    points: Vec<DVec3>,
    min_segment_length: f64,
}

impl Trajectory {
    /// Create a buffer seeded with the initial state.
    pub fn new(initial: DVec3) -> Self {
        Self::with_threshold(initial, MIN_SEGMENT_LENGTH)
    }

    /// Create a buffer with a custom skip threshold.
    pub fn with_threshold(initial: DVec3, min_segment_length: f64) -> Self {
        Self {
            points: vec![initial],
            min_segment_length,
        }
    }

    /// Record a candidate point reached from the running state `from`.
    ///
    /// The candidate is appended only if it moved at least the minimum
    /// segment length away from `from`. The caller advances its running
    /// state to the candidate regardless of the outcome, so a skipped point
    /// is passed through but never drawn.
    ///
    /// Returns whether the candidate was appended.
    pub fn record(&mut self, from: DVec3, candidate: DVec3) -> bool {
        if from.distance(candidate) < self.min_segment_length {
            return false;
        }
        self.points.push(candidate);
        true
    }

    /// All recorded points, oldest first.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs in chronological order.
    pub fn segments(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}
