//! Health tracking service
//!
//! Provides business logic for health tracking including:
//! - Logging steps, water, calories and active minutes into the day's counters
//! - Converting newly logged activity into food, coins and happiness
//! - Refreshing today's missions after each log
//! - Daily summaries with derived estimates and goal progress

use crate::error::{EngineError, EngineResult};
use crate::services::missions::MissionService;
use crate::services::pet::PetService;
use crate::services::profile::ProfileService;
use crate::state::AppState;
use chrono::{DateTime, NaiveDate, Utc};
use pawfit_shared::care::{activity_reward, ActivityReward};
use pawfit_shared::missions::CompletedMission;
use pawfit_shared::validation::{
    validate_calories, validate_duration_minutes, validate_steps, validate_water_ml,
};
use pawfit_shared::{DailyStats, DailySummary, DateRange};
use tracing::info;

/// Longest history window served in one call (days)
pub const MAX_HISTORY_DAYS: i64 = 366;

/// One health log entry; every variant adds to the day's counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthEntry {
    Steps(u32),
    WaterMl(u32),
    CaloriesBurned(u32),
    CaloriesConsumed(u32),
    ActiveMinutes(u32),
}

impl HealthEntry {
    fn validate(&self) -> Result<(), String> {
        match *self {
            HealthEntry::Steps(steps) => validate_steps(steps),
            HealthEntry::WaterMl(ml) => validate_water_ml(ml),
            HealthEntry::CaloriesBurned(kcal) | HealthEntry::CaloriesConsumed(kcal) => {
                validate_calories(kcal)
            }
            HealthEntry::ActiveMinutes(minutes) => validate_duration_minutes(minutes),
        }
    }

    fn apply(&self, stats: &mut DailyStats) {
        match *self {
            HealthEntry::Steps(steps) => stats.steps = stats.steps.saturating_add(steps),
            HealthEntry::WaterMl(ml) => stats.water_ml = stats.water_ml.saturating_add(ml),
            HealthEntry::CaloriesBurned(kcal) => {
                stats.calories_burned = stats.calories_burned.saturating_add(kcal)
            }
            HealthEntry::CaloriesConsumed(kcal) => {
                stats.calories_consumed = stats.calories_consumed.saturating_add(kcal)
            }
            HealthEntry::ActiveMinutes(minutes) => {
                stats.active_minutes = stats.active_minutes.saturating_add(minutes)
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HealthEntry::Steps(_) => "steps",
            HealthEntry::WaterMl(_) => "water",
            HealthEntry::CaloriesBurned(_) => "calories_burned",
            HealthEntry::CaloriesConsumed(_) => "calories_consumed",
            HealthEntry::ActiveMinutes(_) => "active_minutes",
        }
    }
}

/// What a log call changed
#[derive(Debug, Clone, PartialEq)]
pub struct LogResult {
    pub stats: DailyStats,
    pub activity: ActivityReward,
    /// Missions completed by this log
    pub completed_missions: Vec<CompletedMission>,
}

/// Health service for business logic
pub struct HealthService;

impl HealthService {
    /// Add an entry to the counters of `date`
    ///
    /// Activity rewards apply to any past date; missions only exist for and
    /// refresh on today.
    pub async fn log(
        state: &AppState,
        date: NaiveDate,
        entry: HealthEntry,
        now: DateTime<Utc>,
    ) -> EngineResult<LogResult> {
        entry.validate().map_err(EngineError::Validation)?;
        let today = now.date_naive();
        if date > today {
            return Err(EngineError::Validation(
                "Cannot log activity for a future date".to_string(),
            ));
        }

        let _guard = state.write_lock().await;

        let before = state
            .daily_stats
            .find_by_date(date)
            .await?
            .unwrap_or_else(|| DailyStats::empty(date));
        let mut after = before;
        entry.apply(&mut after);
        state.daily_stats.upsert(&after).await?;

        let activity = activity_reward(&before, &after);
        if !activity.is_empty() {
            PetService::credit_activity(state, &activity, now).await?;
        }

        let completed_missions = if date == today {
            MissionService::refresh_locked(state, date, now).await?
        } else {
            Vec::new()
        };

        info!(
            %date,
            kind = entry.kind(),
            completed = completed_missions.len(),
            "Health entry logged"
        );

        Ok(LogResult {
            stats: after,
            activity,
            completed_missions,
        })
    }

    pub async fn log_steps(
        state: &AppState,
        date: NaiveDate,
        steps: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<LogResult> {
        Self::log(state, date, HealthEntry::Steps(steps), now).await
    }

    pub async fn log_water(
        state: &AppState,
        date: NaiveDate,
        amount_ml: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<LogResult> {
        Self::log(state, date, HealthEntry::WaterMl(amount_ml), now).await
    }

    pub async fn log_calories_burned(
        state: &AppState,
        date: NaiveDate,
        kcal: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<LogResult> {
        Self::log(state, date, HealthEntry::CaloriesBurned(kcal), now).await
    }

    pub async fn log_calories_consumed(
        state: &AppState,
        date: NaiveDate,
        kcal: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<LogResult> {
        Self::log(state, date, HealthEntry::CaloriesConsumed(kcal), now).await
    }

    pub async fn log_active_minutes(
        state: &AppState,
        date: NaiveDate,
        minutes: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<LogResult> {
        Self::log(state, date, HealthEntry::ActiveMinutes(minutes), now).await
    }

    /// Summary for one date; a date with no logs reports zeros
    pub async fn daily_summary(state: &AppState, date: NaiveDate) -> EngineResult<DailySummary> {
        let goals = ProfileService::goals(state).await?;
        let stats = state
            .daily_stats
            .find_by_date(date)
            .await?
            .unwrap_or_else(|| DailyStats::empty(date));
        Ok(DailySummary::new(&stats, &goals))
    }

    /// One summary per day in `[start, end]`, gaps filled with empty days
    pub async fn history(
        state: &AppState,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<DailySummary>> {
        let range = DateRange { start, end };
        if range.days() == 0 {
            return Err(EngineError::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }
        if range.days() > MAX_HISTORY_DAYS {
            return Err(EngineError::Validation(format!(
                "History is limited to {} days",
                MAX_HISTORY_DAYS
            )));
        }

        let goals = ProfileService::goals(state).await?;
        let stored = state.daily_stats.find_range(range).await?;
        let mut stored = stored.into_iter().peekable();

        let summaries = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| {
                let stats = stored
                    .next_if(|s| s.date == date)
                    .unwrap_or_else(|| DailyStats::empty(date));
                DailySummary::new(&stats, &goals)
            })
            .collect();
        Ok(summaries)
    }
}
