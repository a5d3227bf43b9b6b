use serde::{Deserialize, Serialize};

/// Gentle-touch bookkeeping, independent of timing accuracy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureStats {
    pub gentle_streak: u32,
    pub max_gentle_streak: u32,
    pub total_samples: u32,
    pub gentle_samples: u32,
}

impl PressureStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one judged stroke's pressure. A gentle stroke extends the
    /// streak; anything else resets it.
    pub fn record(&mut self, gentle: bool) {
        if gentle {
            self.gentle_streak += 1;
            self.gentle_samples += 1;
        } else {
            self.gentle_streak = 0;
        }
        self.total_samples += 1;
        self.max_gentle_streak = self.max_gentle_streak.max(self.gentle_streak);
    }

    pub fn break_streak(&mut self) {
        self.gentle_streak = 0;
    }

    /// Share of gentle strokes in 0.0..=1.0; 0.0 before any sample.
    pub fn gentle_percent(&self) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        self.gentle_samples as f64 / self.total_samples as f64
    }
}
