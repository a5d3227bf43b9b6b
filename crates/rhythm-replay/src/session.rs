use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rhythm_rule::{BeatSegment, StartPoint, StrokePoint, average_pressure};
use serde::{Deserialize, Serialize};

/// One recorded stroke attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub input_time: f64,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Mean pressure of the attempted stroke. When absent, the replay uses
    /// the mean pressure of the beat being judged.
    #[serde(default)]
    pub avg_pressure: Option<f32>,
}

impl Attempt {
    pub fn position(&self) -> StartPoint {
        StartPoint::new(self.x, self.y)
    }

    pub fn resolve_pressure(&self, active: Option<&BeatSegment>) -> f32 {
        self.avg_pressure
            .unwrap_or_else(|| active.map_or(0.0, |s| average_pressure(&s.points)))
    }
}

/// A recorded practice session: reference samples plus the player's attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    pub points: Vec<StrokePoint>,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

impl SessionFile {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        let session: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse session {}", path.display()))?;
        session.validate()?;
        Ok(session)
    }

    /// The engine trusts its input order; reject recordings it would misread.
    pub fn validate(&self) -> Result<()> {
        if let Some(i) = self
            .points
            .windows(2)
            .position(|w| w[1].time < w[0].time)
        {
            bail!(
                "sample {} goes back in time ({} ms after {} ms)",
                i + 1,
                self.points[i + 1].time,
                self.points[i].time
            );
        }
        if let Some(i) = self
            .attempts
            .windows(2)
            .position(|w| w[1].input_time < w[0].input_time)
        {
            bail!("attempt {} is out of order", i + 1);
        }
        Ok(())
    }
}
