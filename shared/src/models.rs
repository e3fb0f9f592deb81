//! Data models for the PawFit application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::health_metrics;
use crate::missions::{self, MissionType};
use crate::mood::{self, Mood};
use crate::progression;

/// Upper bound of every need attribute
pub const NEED_MAX: u8 = 100;

// ============================================================================
// Needs
// ============================================================================

/// A need attribute (hunger, happiness, energy), always within [0, 100]
///
/// Construction and arithmetic clamp, so an out-of-range value cannot be
/// represented. Deserialization clamps as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Need(u8);

impl Need {
    pub const EMPTY: Need = Need(0);
    pub const FULL: Need = Need(NEED_MAX);

    pub fn new(value: i64) -> Self {
        Need(value.clamp(0, i64::from(NEED_MAX)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Apply a signed change, clamping the result
    pub fn adjust(&mut self, delta: i64) {
        *self = Need::new(i64::from(self.0) + delta);
    }
}

impl Default for Need {
    fn default() -> Self {
        Need(80)
    }
}

impl From<i64> for Need {
    fn from(value: i64) -> Self {
        Need::new(value)
    }
}

impl From<Need> for u8 {
    fn from(need: Need) -> Self {
        need.0
    }
}

// ============================================================================
// Pet
// ============================================================================

/// The virtual cat
///
/// Level is not stored; see [`Pet::level`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub hunger: Need,
    pub happiness: Need,
    pub energy: Need,
    /// Cumulative experience, only ever increases
    pub experience: u64,
    pub food_points: u32,
    pub coins: u32,
    pub sleeping: bool,
    pub sleep_end: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
    pub last_interaction: DateTime<Utc>,
}

impl Pet {
    /// Starting food points for a new pet
    pub const STARTING_FOOD_POINTS: u32 = 3;
    /// Starting coins for a new pet
    pub const STARTING_COINS: u32 = 20;

    /// Create a freshly adopted pet
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            hunger: Need::default(),
            happiness: Need::default(),
            energy: Need::default(),
            experience: 0,
            food_points: Self::STARTING_FOOD_POINTS,
            coins: Self::STARTING_COINS,
            sleeping: false,
            sleep_end: None,
            last_updated: now,
            last_interaction: now,
        }
    }

    pub fn level(&self) -> u32 {
        progression::level(self.experience)
    }

    /// Progress toward the next level, in [0, 1]
    pub fn level_progress(&self) -> f64 {
        progression::level_progress(self.experience, self.level())
    }

    pub fn mood(&self) -> Mood {
        mood::mood(
            self.sleeping,
            self.hunger.value(),
            self.happiness.value(),
            self.energy.value(),
        )
    }
}

// ============================================================================
// User Profile
// ============================================================================

/// Gender as entered during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
    #[default]
    Unspecified,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            "other" => Ok(Gender::Other),
            "unspecified" | "" => Ok(Gender::Unspecified),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Daily health goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DailyGoals {
    #[validate(range(min = 1, max = 100_000, message = "must be between 1 and 100000 steps"))]
    pub steps: u32,
    #[validate(range(min = 1, max = 10_000, message = "must be between 1 and 10000 ml"))]
    pub water_ml: u32,
    #[validate(range(min = 1, max = 10_000, message = "must be between 1 and 10000 kcal"))]
    pub calories: u32,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            steps: 8000,
            water_ml: 2000,
            calories: 400,
        }
    }
}

/// The app user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(length(min = 1, max = 32, message = "must be between 1 and 32 characters"))]
    pub name: String,
    pub gender: Gender,
    #[validate(nested)]
    pub goals: DailyGoals,
    pub current_streak: u32,
    /// Running maximum of `current_streak`
    pub longest_streak: u32,
    /// Cumulative experience earned across all sources
    pub total_experience: u64,
    /// Last calendar date whose streak outcome has been recorded
    #[serde(default)]
    pub last_settled: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, gender: Gender, goals: DailyGoals, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            gender,
            goals,
            current_streak: 0,
            longest_streak: 0,
            total_experience: 0,
            last_settled: None,
            created_at: now,
        }
    }

    /// Record the outcome of `date` once; earlier or repeated dates are ignored
    ///
    /// Returns `true` when the date was newly settled.
    pub fn settle(&mut self, date: NaiveDate, goals_met: bool) -> bool {
        if self.last_settled.is_some_and(|last| date <= last) {
            return false;
        }
        self.record_day(goals_met);
        self.last_settled = Some(date);
        true
    }

    /// Close out a day: extend the streak if all goals were met, else reset it
    pub fn record_day(&mut self, goals_met: bool) {
        if goals_met {
            self.current_streak = self.current_streak.saturating_add(1);
            self.longest_streak = self.longest_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }
}

// ============================================================================
// Daily Stats
// ============================================================================

/// Aggregated health counters for one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub steps: u32,
    pub water_ml: u32,
    pub calories_burned: u32,
    pub calories_consumed: u32,
    pub active_minutes: u32,
}

impl DailyStats {
    /// Empty record for a date, created lazily on first log
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            steps: 0,
            water_ml: 0,
            calories_burned: 0,
            calories_consumed: 0,
            active_minutes: 0,
        }
    }

    pub fn distance_km(&self) -> f64 {
        health_metrics::distance_km(self.steps)
    }

    pub fn calories_from_steps(&self) -> u32 {
        health_metrics::calories_from_steps(self.steps)
    }

    pub fn calorie_balance(&self) -> i64 {
        health_metrics::calorie_balance(self.calories_consumed, self.calories_burned)
    }
}

// ============================================================================
// Missions
// ============================================================================

/// A per-day goal with rewards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: Uuid,
    pub date: NaiveDate,
    pub mission_type: MissionType,
    pub title: String,
    pub description: String,
    pub target_value: u32,
    /// Observed value, capped at `target_value`
    pub current_value: u32,
    pub reward_experience: u32,
    pub reward_coins: u32,
    /// Set once and never cleared
    pub completed: bool,
}

impl Mission {
    /// Completion fraction, in [0, 1]
    pub fn progress(&self) -> f64 {
        missions::mission_progress(self.current_value, self.target_value)
    }

    /// Record an observed value
    ///
    /// Returns `true` only when this call completes the mission. A completed
    /// mission ignores further observations.
    pub fn record(&mut self, observed: u32) -> bool {
        if self.completed {
            return false;
        }
        self.current_value = observed.min(self.target_value);
        if self.target_value > 0 && self.current_value >= self.target_value {
            self.completed = true;
            return true;
        }
        false
    }
}
