//! Experience and level progression
//!
//! The curve is quadratic: reaching level `L` takes `200 × (L−1)²`
//! cumulative experience, so level 1 starts at 0, level 2 at 200,
//! level 3 at 800 and level 4 at 1800.
//!
//! Level is never stored on its own; it is always recomputed from
//! experience with [`level`].

/// Experience multiplier of the quadratic curve
pub const XP_CURVE_FACTOR: u64 = 200;

/// Coins granted for every level gained
pub const COINS_PER_LEVEL_UP: u32 = 25;

/// Cumulative experience required to reach `level`
///
/// Level 0 is treated like level 1.
pub fn experience_threshold(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    XP_CURVE_FACTOR.saturating_mul(steps.saturating_mul(steps))
}

/// Cumulative experience required to leave `level` for the next one
pub fn next_level_threshold(level: u32) -> u64 {
    experience_threshold(level.saturating_add(1))
}

/// Level reached with the given cumulative experience (always ≥ 1)
///
/// Formula: level = ⌊√(experience / 200)⌋ + 1
pub fn level(experience: u64) -> u32 {
    let completed = integer_sqrt(experience / XP_CURVE_FACTOR);
    u32::try_from(completed.saturating_add(1)).unwrap_or(u32::MAX)
}

/// Fraction of the way from `level` to the next level, in [0, 1]
///
/// Returns 0 when the span between the two thresholds is empty.
pub fn level_progress(experience: u64, level: u32) -> f64 {
    let floor = experience_threshold(level);
    let ceiling = next_level_threshold(level);
    let span = ceiling.saturating_sub(floor);
    if span == 0 {
        return 0.0;
    }
    let earned = experience.saturating_sub(floor);
    (earned as f64 / span as f64).clamp(0.0, 1.0)
}

/// Experience still missing before the next level
pub fn experience_to_next_level(experience: u64) -> u64 {
    next_level_threshold(level(experience)).saturating_sub(experience)
}

/// A level change caused by an experience award
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

impl LevelUp {
    /// Detect a level change between two experience totals
    pub fn between(before: u64, after: u64) -> Option<Self> {
        let from = level(before);
        let to = level(after);
        (to > from).then_some(LevelUp { from, to })
    }

    /// Number of levels gained
    pub fn levels_gained(&self) -> u32 {
        self.to - self.from
    }

    /// Coins granted for this level change
    pub fn coin_bonus(&self) -> u32 {
        self.levels_gained().saturating_mul(COINS_PER_LEVEL_UP)
    }
}

fn integer_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root.saturating_mul(root) > n {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= n {
        root += 1;
    }
    root
}
