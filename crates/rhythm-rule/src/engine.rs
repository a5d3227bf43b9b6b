use serde::{Deserialize, Serialize};

use crate::engine_config::EngineConfig;
use crate::judgement::Judgement;
use crate::life_gauge::LifeGauge;
use crate::pressure_stats::PressureStats;
use crate::rank::{self, Rank};
use crate::score_data::ScoreData;
use crate::segmenter::{BeatSegment, segment_strokes};
use crate::stroke::{StartPoint, StrokePoint};

/// Timing error reported on every miss-shaped result.
pub const MISS_TIMING_ERROR: f64 = 999.0;

/// Outcome of one `judge` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    pub judgement: Judgement,
    /// Cumulative score after this call.
    pub score: u32,
    /// Cumulative combo after this call.
    pub combo: u32,
    /// Absolute timing error in ms, or [`MISS_TIMING_ERROR`] on a miss.
    pub timing_error: f64,
    /// 1.0 when the stroke was drawn inside the gentle band, else 0.0.
    pub pressure_bonus: f32,
}

impl HitResult {
    fn miss(score: u32, combo: u32) -> Self {
        Self {
            judgement: Judgement::Miss,
            score,
            combo,
            timing_error: MISS_TIMING_ERROR,
            pressure_bonus: 0.0,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.judgement.is_hit()
    }
}

/// End-of-session snapshot for whoever credits the reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub great_count: u32,
    pub good_count: u32,
    pub miss_count: u32,
    pub accuracy: Option<f64>,
    pub rank: Rank,
    pub coin_reward: u32,
    pub gentle_percent: f64,
    pub max_gentle_streak: u32,
    pub life: i32,
    pub beats_judged: usize,
    pub beats_total: usize,
}

/// Scores handwriting strokes against a recorded beat sequence.
///
/// Lifecycle: construct, `parse_stroke_data` once per letter, `judge` once per
/// completed stroke attempt in time order, then read `get_rank` and
/// `calculate_coin_reward`. Callers serialize access; nothing here is shared.
#[derive(Debug, Clone)]
pub struct RhythmEngine {
    config: EngineConfig,
    segments: Vec<BeatSegment>,
    active_segment_index: usize,
    score: ScoreData,
    pressure: PressureStats,
    life: LifeGauge,
}

impl Default for RhythmEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RhythmEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            segments: Vec::new(),
            active_segment_index: 0,
            score: ScoreData::new(),
            pressure: PressureStats::new(),
            life: LifeGauge::new(),
        }
    }

    /// Replace the beat list with segments parsed from `points`.
    ///
    /// `gap_threshold_ms` defaults to the config's gap. Counters and the
    /// active index are left alone. Returns the number of segments.
    pub fn parse_stroke_data(
        &mut self,
        points: &[StrokePoint],
        gap_threshold_ms: Option<f64>,
    ) -> usize {
        let gap = gap_threshold_ms.unwrap_or(self.config.gap_threshold_ms);
        self.segments = segment_strokes(points, gap);
        if self.active_segment_index > 0 {
            log::debug!(
                "reparsed stroke data with active index {} of {}",
                self.active_segment_index,
                self.segments.len()
            );
        }
        self.segments.len()
    }

    /// Judge one stroke attempt against the active beat.
    ///
    /// The input position is accepted for spatial checks but does not affect scoring.
    /// With no unjudged active beat this is a no-op returning a miss-shaped
    /// result carrying the current score and combo.
    pub fn judge(
        &mut self,
        input_time: f64,
        _input_pos: StartPoint,
        avg_pressure: f32,
    ) -> HitResult {
        let Some(segment) = self
            .segments
            .get(self.active_segment_index)
            .filter(|s| !s.judged)
        else {
            log::debug!(
                "judge at {input_time} ms with no active beat (index {} of {})",
                self.active_segment_index,
                self.segments.len()
            );
            return HitResult::miss(self.score.score, self.score.combo);
        };

        let timing_error = (input_time - segment.start_time).abs();
        let mut judgement = self.config.timing_windows.classify(timing_error);

        let pressure = self.config.pressure;
        if pressure.is_hard(avg_pressure) {
            judgement = Judgement::Miss;
        }
        let gentle = !pressure.is_hard(avg_pressure) && pressure.is_gentle(avg_pressure);
        let pressure_bonus = if gentle { 1.0 } else { 0.0 };
        self.pressure.record(gentle);

        let segment_id = segment.id;
        self.consume_active_segment();

        if judgement.is_hit() {
            self.life.heal(self.config.heal_rate);
            let delta = self.score.add_hit(judgement, pressure_bonus);
            log::trace!(
                "beat {segment_id}: {judgement:?} err={timing_error:.1}ms pressure={avg_pressure:.2} +{delta} combo={}",
                self.score.combo
            );
            HitResult {
                judgement,
                score: self.score.score,
                combo: self.score.combo,
                timing_error,
                pressure_bonus,
            }
        } else {
            self.score.add_miss();
            self.pressure.break_streak();
            self.life.drain(self.config.drain_rate);
            log::trace!(
                "beat {segment_id}: Miss err={timing_error:.1}ms pressure={avg_pressure:.2} life={}",
                self.life.value()
            );
            HitResult::miss(self.score.score, 0)
        }
    }

    fn consume_active_segment(&mut self) {
        if let Some(segment) = self.segments.get_mut(self.active_segment_index) {
            segment.judged = true;
            self.active_segment_index += 1;
        }
    }

    /// Weighted accuracy, None before any judgement.
    pub fn accuracy(&self) -> Option<f64> {
        self.score.accuracy()
    }

    pub fn get_rank(&self) -> Rank {
        Rank::from_optional_accuracy(self.accuracy())
    }

    pub fn calculate_coin_reward(&self) -> u32 {
        rank::coin_reward(self.accuracy(), self.pressure.gentle_percent())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score.score,
            max_combo: self.score.max_combo,
            perfect_count: self.score.perfect_count(),
            great_count: self.score.great_count(),
            good_count: self.score.good_count(),
            miss_count: self.score.miss_count(),
            accuracy: self.accuracy(),
            rank: self.get_rank(),
            coin_reward: self.calculate_coin_reward(),
            gentle_percent: self.pressure.gentle_percent(),
            max_gentle_streak: self.pressure.max_gentle_streak,
            life: self.life.value(),
            beats_judged: self.segments.iter().filter(|s| s.judged).count(),
            beats_total: self.segments.len(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn segments(&self) -> &[BeatSegment] {
        &self.segments
    }

    pub fn active_segment_index(&self) -> usize {
        self.active_segment_index
    }

    /// The beat the next `judge` call will be scored against, if any.
    pub fn active_segment(&self) -> Option<&BeatSegment> {
        self.segments
            .get(self.active_segment_index)
            .filter(|s| !s.judged)
    }

    pub fn remaining_beats(&self) -> usize {
        self.segments.len().saturating_sub(self.active_segment_index)
    }

    /// True once every beat has been consumed; further `judge` calls are no-ops.
    pub fn is_exhausted(&self) -> bool {
        self.active_segment().is_none()
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn combo(&self) -> u32 {
        self.score.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.score.max_combo
    }

    pub fn life(&self) -> i32 {
        self.life.value()
    }

    pub fn score_data(&self) -> &ScoreData {
        &self.score
    }

    pub fn pressure_stats(&self) -> &PressureStats {
        &self.pressure
    }
}
