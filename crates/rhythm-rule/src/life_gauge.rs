/// Upper bound of the life gauge; also its starting value.
pub const LIFE_MAX: i32 = 100;
/// Lower bound of the life gauge.
pub const LIFE_MIN: i32 = 0;

/// Integer life gauge clamped to [`LIFE_MIN`, `LIFE_MAX`].
///
/// Unlike a groove gauge, reaching zero does not freeze the value: a hit
/// after an empty gauge heals it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeGauge {
    value: i32,
}

impl Default for LifeGauge {
    fn default() -> Self {
        Self { value: LIFE_MAX }
    }
}

impl LifeGauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    fn set_value(&mut self, value: i32) {
        self.value = value.clamp(LIFE_MIN, LIFE_MAX);
    }

    pub fn heal(&mut self, amount: i32) {
        self.set_value(self.value.saturating_add(amount));
    }

    pub fn drain(&mut self, amount: i32) {
        self.set_value(self.value.saturating_sub(amount));
    }

    pub fn is_empty(&self) -> bool {
        self.value == LIFE_MIN
    }

    pub fn is_full(&self) -> bool {
        self.value == LIFE_MAX
    }
}
