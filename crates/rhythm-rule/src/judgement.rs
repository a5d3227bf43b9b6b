use serde::{Deserialize, Serialize};

/// Accuracy classification for one attempted stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Judgement {
    Perfect = 0,
    Great = 1,
    Good = 2,
    Miss = 3,
}

impl Judgement {
    pub const ALL: [Self; 4] = [Self::Perfect, Self::Great, Self::Good, Self::Miss];

    /// Base points before pressure and combo multipliers.
    pub fn base_score(self) -> u32 {
        match self {
            Self::Perfect => 300,
            Self::Great => 100,
            Self::Good => 50,
            Self::Miss => 0,
        }
    }

    /// Weight used by the accuracy formula (out of 100).
    pub fn accuracy_weight(self) -> u32 {
        match self {
            Self::Perfect => 100,
            Self::Great => 50,
            Self::Good => 20,
            Self::Miss => 0,
        }
    }

    /// Whether this judgement keeps the combo going.
    pub fn is_hit(self) -> bool {
        self != Self::Miss
    }
}
