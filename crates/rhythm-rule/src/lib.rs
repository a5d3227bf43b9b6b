// Stroke segmentation, judge windows, life gauge, score and reward rules

mod engine;
mod engine_config;
mod judgement;
mod life_gauge;
mod pressure_stats;
mod rank;
mod score_data;
mod segmenter;
mod stroke;

pub use engine::{HitResult, MISS_TIMING_ERROR, RhythmEngine, SessionSummary};
pub use engine_config::{EngineConfig, PressureWindow, TimingWindows};
pub use judgement::Judgement;
pub use life_gauge::{LIFE_MAX, LIFE_MIN, LifeGauge};
pub use pressure_stats::PressureStats;
pub use rank::{GENTLE_BONUS_THRESHOLD, Rank, coin_reward, gentle_bonus};
pub use score_data::{ScoreData, score_delta};
pub use segmenter::{BeatSegment, DEFAULT_GAP_THRESHOLD_MS, segment_strokes};
pub use stroke::{StartPoint, StrokePoint, average_pressure};
