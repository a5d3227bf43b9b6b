use serde::{Deserialize, Serialize};

use crate::judgement::Judgement;

/// Combo at which the combo multiplier caps out.
const COMBO_MULTIPLIER_CAP: f64 = 4.0;
/// Score boost for a stroke drawn inside the gentle pressure band.
const PRESSURE_MULTIPLIER_STEP: f64 = 0.3;

/// Points awarded for one hit.
///
/// `combo` is the combo *after* this hit has been counted.
/// `round(base * (1 + bonus * 0.3) * min(4, 1 + combo / 10))`
pub fn score_delta(judgement: Judgement, pressure_bonus: f32, combo: u32) -> u32 {
    let base = judgement.base_score() as f64;
    let pressure_multiplier = 1.0 + pressure_bonus as f64 * PRESSURE_MULTIPLIER_STEP;
    let combo_multiplier = (1.0 + combo as f64 / 10.0).min(COMBO_MULTIPLIER_CAP);
    (base * pressure_multiplier * combo_multiplier).round() as u32
}

/// Judgement counters, combo and cumulative score for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    /// Counts indexed by `Judgement as usize`: perfect, great, good, miss.
    pub counts: [u32; 4],
    pub combo: u32,
    pub max_combo: u32,
    pub score: u32,
}

impl ScoreData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, judgement: Judgement) -> u32 {
        self.counts[judgement as usize]
    }

    pub fn perfect_count(&self) -> u32 {
        self.count(Judgement::Perfect)
    }

    pub fn great_count(&self) -> u32 {
        self.count(Judgement::Great)
    }

    pub fn good_count(&self) -> u32 {
        self.count(Judgement::Good)
    }

    pub fn miss_count(&self) -> u32 {
        self.count(Judgement::Miss)
    }

    /// Every judgement recorded so far, misses included.
    pub fn total_judged(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Record a non-miss judgement: extend the combo and add its points.
    /// Returns the points added.
    pub fn add_hit(&mut self, judgement: Judgement, pressure_bonus: f32) -> u32 {
        debug_assert!(judgement.is_hit());
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        let delta = score_delta(judgement, pressure_bonus, self.combo);
        self.score = self.score.saturating_add(delta);
        self.counts[judgement as usize] += 1;
        delta
    }

    /// Record a miss: the combo breaks, the score stays.
    pub fn add_miss(&mut self) {
        self.combo = 0;
        self.counts[Judgement::Miss as usize] += 1;
    }

    /// Weighted accuracy in 0.0..=1.0, or None before anything was judged.
    ///
    /// `(perfect*100 + great*50 + good*20) / (total*100)`
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total_judged();
        if total == 0 {
            return None;
        }
        let weighted: u64 = Judgement::ALL
            .iter()
            .map(|&j| self.count(j) as u64 * j.accuracy_weight() as u64)
            .sum();
        Some(weighted as f64 / (total as f64 * 100.0))
    }
}
