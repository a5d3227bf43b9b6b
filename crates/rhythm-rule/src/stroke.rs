use serde::{Deserialize, Serialize};

/// One sampled pen/touch event.
///
/// Produced by the capture layer; `time` is a monotonic timestamp in
/// milliseconds and `pressure` is normalized to 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
    pub time: f64,
    pub pressure: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32, time: f64, pressure: f32) -> Self {
        Self {
            x,
            y,
            time,
            pressure,
        }
    }

    /// Spatial position of the sample.
    pub fn position(&self) -> StartPoint {
        StartPoint {
            x: self.x,
            y: self.y,
        }
    }
}

/// 2D position, used for a segment's starting point and for judge input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StartPoint {
    pub x: f32,
    pub y: f32,
}

impl StartPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Mean pressure over a run of samples. Returns 0.0 for an empty slice.
pub fn average_pressure(points: &[StrokePoint]) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points.iter().map(|p| p.pressure as f64).sum();
    (sum / points.len() as f64) as f32
}
