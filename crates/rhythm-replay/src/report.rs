use std::fmt::Write;

use rhythm_rule::{HitResult, Judgement, SessionSummary};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReplayHit {
    /// Index of the beat this attempt was judged against.
    pub beat: usize,
    pub result: HitResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub hits: Vec<ReplayHit>,
    pub summary: SessionSummary,
}

fn judgement_label(judgement: Judgement) -> &'static str {
    match judgement {
        Judgement::Perfect => "PERFECT",
        Judgement::Great => "GREAT",
        Judgement::Good => "GOOD",
        Judgement::Miss => "MISS",
    }
}

impl ReplayReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Stroke Replay Report");
        let _ = writeln!(out, "====================");
        for hit in &self.hits {
            let r = &hit.result;
            let timing = if r.judgement.is_hit() {
                format!("{:>6.1} ms", r.timing_error)
            } else {
                "     - ms".to_string()
            };
            let gentle = if r.pressure_bonus > 0.0 { " gentle" } else { "" };
            let _ = writeln!(
                out,
                "beat {:>3}  {:<7}  {timing}  score {:>7}  combo {:>3}{gentle}",
                hit.beat,
                judgement_label(r.judgement),
                r.score,
                r.combo,
            );
        }

        let s = &self.summary;
        let accuracy = s
            .accuracy
            .map_or_else(|| "-".to_string(), |a| format!("{:.1}%", a * 100.0));
        let _ = writeln!(out);
        let _ = writeln!(out, "Beats:     {}/{}", s.beats_judged, s.beats_total);
        let _ = writeln!(
            out,
            "Judgements: PERFECT {}  GREAT {}  GOOD {}  MISS {}",
            s.perfect_count, s.great_count, s.good_count, s.miss_count
        );
        let _ = writeln!(out, "Score:     {}", s.score);
        let _ = writeln!(out, "Max combo: {}", s.max_combo);
        let _ = writeln!(out, "Accuracy:  {accuracy}");
        let _ = writeln!(
            out,
            "Gentle:    {:.0}% (best streak {})",
            s.gentle_percent * 100.0,
            s.max_gentle_streak
        );
        let _ = writeln!(out, "Life:      {}", s.life);
        let _ = writeln!(out, "Rank:      {}", s.rank);
        let _ = writeln!(out, "Coins:     {}", s.coin_reward);
        out
    }
}
