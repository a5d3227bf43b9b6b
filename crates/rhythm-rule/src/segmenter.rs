use serde::{Deserialize, Serialize};

use crate::stroke::{StartPoint, StrokePoint};

/// Default pen-lift gap (ms) that closes a beat segment.
pub const DEFAULT_GAP_THRESHOLD_MS: f64 = 300.0;

/// A contiguous run of samples with no internal gap above the threshold.
///
/// One beat segment is one pen stroke the player has to recreate. `judged` is
/// flipped exactly once by the engine; everything else is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatSegment {
    pub id: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub points: Vec<StrokePoint>,
    pub judged: bool,
    pub start_point: StartPoint,
}

impl BeatSegment {
    /// Build a segment from a non-empty run of samples.
    /// Returns None when `points` is empty.
    fn from_points(id: usize, points: Vec<StrokePoint>) -> Option<Self> {
        let first = *points.first()?;
        let last = *points.last()?;
        Some(Self {
            id,
            start_time: first.time,
            end_time: last.time,
            start_point: first.position(),
            points,
            judged: false,
        })
    }

    /// Time between the first and last sample (ms).
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Split a time-ordered sample stream into beat segments.
///
/// Consecutive samples stay together while `next.time - prev.time <= gap_threshold_ms`.
/// The trailing segment is always flushed. Ids run from 0 in output order.
pub fn segment_strokes(points: &[StrokePoint], gap_threshold_ms: f64) -> Vec<BeatSegment> {
    let mut segments = Vec::new();
    let mut current: Vec<StrokePoint> = Vec::new();

    for point in points {
        let pen_lift = current
            .last()
            .is_some_and(|prev| point.time - prev.time > gap_threshold_ms);
        if pen_lift {
            let run = std::mem::take(&mut current);
            segments.extend(BeatSegment::from_points(segments.len(), run));
        }
        current.push(*point);
    }
    segments.extend(BeatSegment::from_points(segments.len(), current));

    log::debug!(
        "segmented {} samples into {} beats (gap {} ms)",
        points.len(),
        segments.len(),
        gap_threshold_ms
    );
    segments
}
