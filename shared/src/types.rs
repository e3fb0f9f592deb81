//! View types handed to the UI layer
//!
//! Snapshots that combine stored records with their derived values
//! (mood, level, distance, progress fractions).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::health_metrics::goal_fraction;
use crate::missions::MissionType;
use crate::models::{DailyGoals, DailyStats, Mission, Pet, UserProfile};
use crate::mood::Mood;
use crate::progression;

/// Date range for history queries (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of days covered, 0 for an inverted range
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

// ============================================================================
// Pet
// ============================================================================

/// Everything the home screen shows about the pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetStatus {
    pub name: String,
    pub mood: Mood,
    pub caption: String,
    pub level: u32,
    pub experience: u64,
    /// Experience at which the next level starts
    pub next_level_experience: u64,
    /// Experience still missing before the next level
    pub experience_to_next_level: u64,
    pub level_progress: f64,
    pub hunger: u8,
    pub happiness: u8,
    pub energy: u8,
    pub food_points: u32,
    pub coins: u32,
    pub sleeping: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_end: Option<DateTime<Utc>>,
}

impl From<&Pet> for PetStatus {
    fn from(pet: &Pet) -> Self {
        let level = pet.level();
        let mood = pet.mood();
        Self {
            name: pet.name.clone(),
            mood,
            caption: mood.caption().to_string(),
            level,
            experience: pet.experience,
            next_level_experience: progression::next_level_threshold(level),
            experience_to_next_level: progression::experience_to_next_level(pet.experience),
            level_progress: pet.level_progress(),
            hunger: pet.hunger.value(),
            happiness: pet.happiness.value(),
            energy: pet.energy.value(),
            food_points: pet.food_points,
            coins: pet.coins,
            sleeping: pet.sleeping,
            sleep_end: pet.sleep_end,
        }
    }
}

// ============================================================================
// Daily Stats
// ============================================================================

/// Progress of each daily goal, in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub steps: f64,
    pub water: f64,
    pub calories: f64,
}

impl GoalProgress {
    pub fn new(stats: &DailyStats, goals: &DailyGoals) -> Self {
        Self {
            steps: goal_fraction(stats.steps, goals.steps),
            water: goal_fraction(stats.water_ml, goals.water_ml),
            calories: goal_fraction(stats.calories_burned, goals.calories),
        }
    }
}

/// One day of health data with derived estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub steps: u32,
    pub distance_km: f64,
    pub step_calories: u32,
    pub water_ml: u32,
    pub calories_burned: u32,
    pub calories_consumed: u32,
    pub calorie_balance: i64,
    pub active_minutes: u32,
    pub goals: DailyGoals,
    pub progress: GoalProgress,
}

impl DailySummary {
    pub fn new(stats: &DailyStats, goals: &DailyGoals) -> Self {
        Self {
            date: stats.date,
            steps: stats.steps,
            distance_km: stats.distance_km(),
            step_calories: stats.calories_from_steps(),
            water_ml: stats.water_ml,
            calories_burned: stats.calories_burned,
            calories_consumed: stats.calories_consumed,
            calorie_balance: stats.calorie_balance(),
            active_minutes: stats.active_minutes,
            goals: *goals,
            progress: GoalProgress::new(stats, goals),
        }
    }
}

// ============================================================================
// Missions & Profile
// ============================================================================

/// A mission as shown in the mission list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionView {
    pub id: String,
    pub mission_type: MissionType,
    pub title: String,
    pub description: String,
    pub current_value: u32,
    pub target_value: u32,
    pub progress: f64,
    pub completed: bool,
    pub reward_experience: u32,
    pub reward_coins: u32,
}

impl From<&Mission> for MissionView {
    fn from(mission: &Mission) -> Self {
        Self {
            id: mission.id.to_string(),
            mission_type: mission.mission_type,
            title: mission.title.clone(),
            description: mission.description.clone(),
            current_value: mission.current_value,
            target_value: mission.target_value,
            progress: mission.progress(),
            completed: mission.completed,
            reward_experience: mission.reward_experience,
            reward_coins: mission.reward_coins,
        }
    }
}

/// Profile card with streak information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub goals: DailyGoals,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_experience: u64,
}

impl From<&UserProfile> for ProfileSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            goals: profile.goals,
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            total_experience: profile.total_experience,
        }
    }
}
