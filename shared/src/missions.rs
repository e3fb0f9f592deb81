//! Daily missions
//!
//! Every calendar date gets one mission per [`MissionType`], generated
//! from the user's daily goals. Health missions track the day's counters;
//! the streak mission tracks how many health missions are done.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::{DailyGoals, DailyStats, Mission};

/// Number of health missions the streak mission waits on
pub const HEALTH_MISSION_COUNT: u32 = 3;

/// Mission category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    Steps,
    Water,
    Calories,
    Streak,
}

impl MissionType {
    /// All mission types in generation order
    pub const ALL: [MissionType; 4] = [
        MissionType::Steps,
        MissionType::Water,
        MissionType::Calories,
        MissionType::Streak,
    ];

    /// Whether the mission tracks a health counter
    pub fn is_health(&self) -> bool {
        !matches!(self, MissionType::Streak)
    }

    /// Reward granted on completion
    pub fn reward(&self) -> MissionReward {
        match self {
            MissionType::Steps => MissionReward { experience: 50, coins: 20 },
            MissionType::Water => MissionReward { experience: 30, coins: 10 },
            MissionType::Calories => MissionReward { experience: 40, coins: 15 },
            MissionType::Streak => MissionReward { experience: 60, coins: 30 },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MissionType::Steps => "Daily Walk",
            MissionType::Water => "Stay Hydrated",
            MissionType::Calories => "Burn It Off",
            MissionType::Streak => "Perfect Day",
        }
    }

    pub fn description(&self, target: u32) -> String {
        match self {
            MissionType::Steps => format!("Walk {} steps today", target),
            MissionType::Water => format!("Drink {} ml of water today", target),
            MissionType::Calories => format!("Burn {} kcal today", target),
            MissionType::Streak => format!("Complete all {} health missions today", target),
        }
    }

    /// Value observed for this mission type on a given day
    pub fn observed(&self, stats: &DailyStats, health_completed: u32) -> u32 {
        match self {
            MissionType::Steps => stats.steps,
            MissionType::Water => stats.water_ml,
            MissionType::Calories => stats.calories_burned,
            MissionType::Streak => health_completed,
        }
    }
}

impl fmt::Display for MissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionType::Steps => write!(f, "steps"),
            MissionType::Water => write!(f, "water"),
            MissionType::Calories => write!(f, "calories"),
            MissionType::Streak => write!(f, "streak"),
        }
    }
}

impl std::str::FromStr for MissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "steps" => Ok(MissionType::Steps),
            "water" => Ok(MissionType::Water),
            "calories" => Ok(MissionType::Calories),
            "streak" => Ok(MissionType::Streak),
            _ => Err(format!("Unknown mission type: {}", s)),
        }
    }
}

/// Experience and coins granted by a completed mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissionReward {
    pub experience: u32,
    pub coins: u32,
}

impl std::ops::Add for MissionReward {
    type Output = MissionReward;

    fn add(self, other: MissionReward) -> MissionReward {
        MissionReward {
            experience: self.experience.saturating_add(other.experience),
            coins: self.coins.saturating_add(other.coins),
        }
    }
}

/// A mission that flipped to completed during a refresh
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedMission {
    pub id: Uuid,
    pub mission_type: MissionType,
    pub reward: MissionReward,
}

/// Completion fraction of a mission, in [0, 1]
///
/// A target of 0 yields 0 instead of dividing by zero.
pub fn mission_progress(current: u32, target: u32) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (f64::from(current) / f64::from(target)).clamp(0.0, 1.0)
}

/// Build the mission set for a date from the user's goals
pub fn generate_daily_missions(date: NaiveDate, goals: &DailyGoals) -> Vec<Mission> {
    MissionType::ALL
        .iter()
        .map(|mission_type| {
            let target = match mission_type {
                MissionType::Steps => goals.steps,
                MissionType::Water => goals.water_ml,
                MissionType::Calories => goals.calories,
                MissionType::Streak => HEALTH_MISSION_COUNT,
            };
            let reward = mission_type.reward();
            Mission {
                id: Uuid::new_v4(),
                date,
                mission_type: *mission_type,
                title: mission_type.title().to_string(),
                description: mission_type.description(target),
                target_value: target,
                current_value: 0,
                reward_experience: reward.experience,
                reward_coins: reward.coins,
                completed: false,
            }
        })
        .collect()
}

/// Update missions from the day's counters
///
/// Health missions are evaluated first so the streak mission sees this
/// refresh's completions. Returns the missions completed by this call.
pub fn refresh_missions(missions: &mut [Mission], stats: &DailyStats) -> Vec<CompletedMission> {
    let mut completed = Vec::new();

    for mission in missions.iter_mut().filter(|m| m.mission_type.is_health()) {
        let observed = mission.mission_type.observed(stats, 0);
        if mission.record(observed) {
            completed.push(completed_from(mission));
        }
    }

    let health_completed = missions
        .iter()
        .filter(|m| m.mission_type.is_health() && m.completed)
        .count() as u32;

    for mission in missions
        .iter_mut()
        .filter(|m| m.mission_type == MissionType::Streak)
    {
        if mission.record(health_completed) {
            completed.push(completed_from(mission));
        }
    }

    completed
}

/// Whether every health mission of the day is completed
///
/// An empty mission set never counts as a met day.
pub fn all_health_goals_met(missions: &[Mission]) -> bool {
    let mut health = missions.iter().filter(|m| m.mission_type.is_health()).peekable();
    health.peek().is_some() && health.all(|m| m.completed)
}

fn completed_from(mission: &Mission) -> CompletedMission {
    CompletedMission {
        id: mission.id,
        mission_type: mission.mission_type,
        reward: MissionReward {
            experience: mission.reward_experience,
            coins: mission.reward_coins,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_mission_progress() {
        assert_eq!(mission_progress(50, 100), 0.5);
        assert_eq!(mission_progress(150, 100), 1.0);
        assert_eq!(mission_progress(0, 100), 0.0);
        assert_eq!(mission_progress(10, 0), 0.0);
    }

    #[test]
    fn test_generate_daily_missions() {
        let goals = DailyGoals { steps: 6000, water_ml: 1500, calories: 300 };
        let missions = generate_daily_missions(date(), &goals);

        assert_eq!(missions.len(), 4);
        assert!(missions.iter().all(|m| m.date == date() && !m.completed));

        let steps = &missions[0];
        assert_eq!(steps.mission_type, MissionType::Steps);
        assert_eq!(steps.target_value, 6000);
        assert_eq!(steps.description, "Walk 6000 steps today");
        assert_eq!(steps.reward_experience, 50);

        let streak = &missions[3];
        assert_eq!(streak.mission_type, MissionType::Streak);
        assert_eq!(streak.target_value, HEALTH_MISSION_COUNT);
    }

    #[test]
    fn test_refresh_completes_once() {
        let goals = DailyGoals { steps: 1000, water_ml: 500, calories: 100 };
        let mut missions = generate_daily_missions(date(), &goals);

        let mut stats = DailyStats::empty(date());
        stats.steps = 1200;
        let done = refresh_missions(&mut missions, &stats);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].mission_type, MissionType::Steps);
        assert_eq!(missions[0].current_value, 1000); // capped at target

        // Refreshing again does not pay twice
        let done = refresh_missions(&mut missions, &stats);
        assert!(done.is_empty());
    }

    #[test]
    fn test_streak_mission_completes_with_health_missions() {
        let goals = DailyGoals { steps: 1000, water_ml: 500, calories: 100 };
        let mut missions = generate_daily_missions(date(), &goals);

        let stats = DailyStats {
            steps: 1000,
            water_ml: 500,
            calories_burned: 100,
            ..DailyStats::empty(date())
        };
        let done = refresh_missions(&mut missions, &stats);

        let types: Vec<_> = done.iter().map(|c| c.mission_type).collect();
        assert_eq!(
            types,
            vec![MissionType::Steps, MissionType::Water, MissionType::Calories, MissionType::Streak]
        );
        assert!(all_health_goals_met(&missions));

        let total = done.iter().fold(MissionReward::default(), |acc, c| acc + c.reward);
        assert_eq!(total, MissionReward { experience: 180, coins: 75 });
    }

    #[test]
    fn test_completed_flag_is_sticky() {
        let goals = DailyGoals { steps: 1000, water_ml: 500, calories: 100 };
        let mut missions = generate_daily_missions(date(), &goals);
        let mut stats = DailyStats::empty(date());
        stats.steps = 2000;
        refresh_missions(&mut missions, &stats);

        // A lower observation (e.g. corrected data) never un-completes
        stats.steps = 10;
        refresh_missions(&mut missions, &stats);
        assert!(missions[0].completed);
        assert_eq!(missions[0].current_value, 1000);
    }

    #[test]
    fn test_all_health_goals_met_requires_missions() {
        assert!(!all_health_goals_met(&[]));
    }

    #[test]
    fn test_mission_type_parsing() {
        assert_eq!("Water".parse::<MissionType>().unwrap(), MissionType::Water);
        assert_eq!(MissionType::Calories.to_string(), "calories");
        assert!("sleep".parse::<MissionType>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: progress always lies in [0, 1]
        #[test]
        fn prop_progress_in_unit_range(current in any::<u32>(), target in any::<u32>()) {
            let p = mission_progress(current, target);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
