use serde::{Deserialize, Serialize};

/// Share of gentle strokes needed for the pressure bonus coins.
pub const GENTLE_BONUS_THRESHOLD: f64 = 0.80;

/// Letter grade summarizing session accuracy.
///
/// Accuracy is a fraction in 0.0..=1.0:
/// S >= 0.95, A >= 0.85, B >= 0.70, C >= 0.50, otherwise F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    F,
    C,
    B,
    A,
    S,
}

impl Rank {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 0.95 {
            Self::S
        } else if accuracy >= 0.85 {
            Self::A
        } else if accuracy >= 0.70 {
            Self::B
        } else if accuracy >= 0.50 {
            Self::C
        } else {
            Self::F
        }
    }

    /// Rank for an optional accuracy; no judgements at all is an F.
    pub fn from_optional_accuracy(accuracy: Option<f64>) -> Self {
        accuracy.map_or(Self::F, Self::from_accuracy)
    }

    /// Coins granted for reaching this rank.
    pub fn base_coins(self) -> u32 {
        match self {
            Self::S => 5,
            Self::A => 3,
            Self::B => 2,
            Self::C => 1,
            Self::F => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra coins for a gentle-handed session, scaled by the base reward.
pub fn gentle_bonus(base_coins: u32, gentle_percent: f64) -> u32 {
    if gentle_percent < GENTLE_BONUS_THRESHOLD {
        return 0;
    }
    match base_coins {
        5.. => 3,
        3.. => 2,
        1.. => 1,
        _ => 0,
    }
}

/// Total coin reward. No judgements at all earns nothing.
pub fn coin_reward(accuracy: Option<f64>, gentle_percent: f64) -> u32 {
    let Some(accuracy) = accuracy else {
        return 0;
    };
    let base = Rank::from_accuracy(accuracy).base_coins();
    base + gentle_bonus(base, gentle_percent)
}
