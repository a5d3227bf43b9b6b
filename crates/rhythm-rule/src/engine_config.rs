use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::judgement::Judgement;
use crate::segmenter::DEFAULT_GAP_THRESHOLD_MS;

/// Timing tolerance bands in milliseconds, tightest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingWindows {
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self {
            perfect: 150.0,
            great: 300.0,
            good: 500.0,
        }
    }
}

impl TimingWindows {
    /// Classify an absolute timing error. Bands are inclusive and the first
    /// matching band wins.
    pub fn classify(&self, timing_error: f64) -> Judgement {
        if timing_error <= self.perfect {
            Judgement::Perfect
        } else if timing_error <= self.great {
            Judgement::Great
        } else if timing_error <= self.good {
            Judgement::Good
        } else {
            Judgement::Miss
        }
    }
}

/// Pressure targets in normalized units.
/// `min..=max` is the gentle band; anything above `hard_threshold` is a hard press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureWindow {
    pub min: f32,
    pub max: f32,
    pub hard_threshold: f32,
}

impl Default for PressureWindow {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 0.4,
            hard_threshold: 0.5,
        }
    }
}

impl PressureWindow {
    pub fn is_gentle(&self, pressure: f32) -> bool {
        pressure >= self.min && pressure <= self.max
    }

    pub fn is_hard(&self, pressure: f32) -> bool {
        pressure > self.hard_threshold
    }
}

/// Tunable engine parameters, injected at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timing_windows: TimingWindows,
    pub pressure: PressureWindow,
    /// Life lost per miss.
    pub drain_rate: i32,
    /// Life restored per hit.
    pub heal_rate: i32,
    /// Pen-lift gap used when `parse_stroke_data` is not given one.
    pub gap_threshold_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timing_windows: TimingWindows::default(),
            pressure: PressureWindow::default(),
            drain_rate: 10,
            heal_rate: 5,
            gap_threshold_ms: DEFAULT_GAP_THRESHOLD_MS,
        }
    }
}

impl EngineConfig {
    /// Loads config from a JSON file.
    /// Returns the default config if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no engine config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if let Err(e) = config.validate() {
            log::warn!("rejecting engine config {}: {e}", path.display());
            return Err(e.context(format!("invalid engine config {}", path.display())));
        }
        Ok(config)
    }

    /// Saves config as pretty JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.timing_windows;
        if !(w.perfect >= 0.0 && w.perfect <= w.great && w.great <= w.good) {
            bail!(
                "timing windows must be ascending and non-negative (perfect={}, great={}, good={})",
                w.perfect,
                w.great,
                w.good
            );
        }

        let p = &self.pressure;
        let unit = 0.0..=1.0;
        if !unit.contains(&p.min) || !unit.contains(&p.max) || !unit.contains(&p.hard_threshold) {
            bail!("pressure values must be within 0.0..=1.0");
        }
        if p.min > p.max {
            bail!("pressure.min ({}) exceeds pressure.max ({})", p.min, p.max);
        }

        if self.drain_rate < 0 || self.heal_rate < 0 {
            bail!("drain_rate and heal_rate must not be negative");
        }
        if !(self.gap_threshold_ms > 0.0) {
            bail!("gap_threshold_ms must be positive, got {}", self.gap_threshold_ms);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // =========================================================================
    // Timing band classification
    // =========================================================================

    #[test]
    fn classify_default_bands() {
        let w = TimingWindows::default();
        assert_eq!(w.classify(0.0), Judgement::Perfect);
        assert_eq!(w.classify(149.0), Judgement::Perfect);
        assert_eq!(w.classify(150.0), Judgement::Perfect);
        assert_eq!(w.classify(151.0), Judgement::Great);
        assert_eq!(w.classify(300.0), Judgement::Great);
        assert_eq!(w.classify(301.0), Judgement::Good);
        assert_eq!(w.classify(500.0), Judgement::Good);
        assert_eq!(w.classify(501.0), Judgement::Miss);
    }

    #[test]
    fn classify_first_band_wins_on_overlap() {
        let w = TimingWindows {
            perfect: 100.0,
            great: 100.0,
            good: 100.0,
        };
        assert_eq!(w.classify(100.0), Judgement::Perfect);
        assert_eq!(w.classify(100.5), Judgement::Miss);
    }

    // =========================================================================
    // Pressure band
    // =========================================================================

    #[test]
    fn gentle_band_is_inclusive() {
        let p = PressureWindow::default();
        assert!(p.is_gentle(0.1));
        assert!(p.is_gentle(0.4));
        assert!(!p.is_gentle(0.05));
        assert!(!p.is_gentle(0.45));
    }

    #[test]
    fn hard_threshold_is_exclusive() {
        let p = PressureWindow::default();
        assert!(!p.is_hard(0.5));
        assert!(p.is_hard(0.6));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_descending_windows() {
        let mut config = EngineConfig::default();
        config.timing_windows.great = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pressure_band() {
        let mut config = EngineConfig::default();
        config.pressure.min = 0.5;
        config.pressure.max = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_pressure() {
        let mut config = EngineConfig::default();
        config.pressure.hard_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_rates() {
        let mut config = EngineConfig::default();
        config.drain_rate = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_gap() {
        let mut config = EngineConfig::default();
        config.gap_threshold_ms = 0.0;
        assert!(config.validate().is_err());
        config.gap_threshold_ms = f64::NAN;
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // File I/O
    // =========================================================================

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"timing_windows": {"perfect": 80.0}, "heal_rate": 2}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.timing_windows.perfect, 80.0);
        assert_eq!(config.timing_windows.great, 300.0);
        assert_eq!(config.heal_rate, 2);
        assert_eq!(config.drain_rate, 10);
        assert_eq!(config.pressure, PressureWindow::default());
    }

    #[test]
    fn file_io() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.json");

        let mut config = EngineConfig::default();
        config.drain_rate = 25;
        config.pressure.max = 0.35;
        config.save_to(&path).unwrap();

        let loaded = EngineConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_nonexistent_returns_default() {
        let dir = tempdir().unwrap();
        let config = EngineConfig::load_from(dir.path().join("missing.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"gap_threshold_ms": -5.0}"#).unwrap();
        let err = EngineConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("gap_threshold_ms"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(EngineConfig::load_from(&path).is_err());
    }
}
