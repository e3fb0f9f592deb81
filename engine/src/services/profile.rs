//! User profile service
//!
//! Provides business logic for:
//! - First-launch profile creation from configured defaults
//! - Goal and profile updates
//! - Streak settlement per finished day
//! - Mirroring pet experience into the lifetime total

use crate::error::{EngineError, EngineResult};
use crate::state::AppState;
use chrono::{DateTime, NaiveDate, Utc};
use pawfit_shared::{DailyGoals, Gender, ProfileSummary, UserProfile};
use tracing::info;
use validator::Validate;

/// Input for updating the profile
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub gender: Option<Gender>,
}

/// Profile service for business logic
pub struct ProfileService;

impl ProfileService {
    /// Get the profile, creating it with default values on first launch
    pub async fn get_or_create(state: &AppState, now: DateTime<Utc>) -> EngineResult<UserProfile> {
        let _guard = state.write_lock().await;
        Self::load_or_create(state, now).await
    }

    /// Profile card with streak information
    pub async fn summary(state: &AppState, now: DateTime<Utc>) -> EngineResult<ProfileSummary> {
        let profile = Self::get_or_create(state, now).await?;
        Ok(ProfileSummary::from(&profile))
    }

    /// Update name and/or gender
    pub async fn update(
        state: &AppState,
        input: UpdateProfileInput,
        now: DateTime<Utc>,
    ) -> EngineResult<UserProfile> {
        let _guard = state.write_lock().await;
        let mut profile = Self::load_or_create(state, now).await?;

        if let Some(name) = input.name {
            profile.name = name.trim().to_string();
        }
        if let Some(gender) = input.gender {
            profile.gender = gender;
        }
        profile.validate()?;

        state.profiles.save(&profile).await?;
        Ok(profile)
    }

    /// Replace the daily goals
    ///
    /// Missions already generated keep their targets; new goals apply from
    /// the next generated day.
    pub async fn update_goals(
        state: &AppState,
        goals: DailyGoals,
        now: DateTime<Utc>,
    ) -> EngineResult<UserProfile> {
        goals.validate()?;

        let _guard = state.write_lock().await;
        let mut profile = Self::load_or_create(state, now).await?;
        profile.goals = goals;
        state.profiles.save(&profile).await?;

        info!(
            steps = goals.steps,
            water_ml = goals.water_ml,
            calories = goals.calories,
            "Daily goals updated"
        );
        Ok(profile)
    }

    /// Record whether all goals were met on `date`
    ///
    /// Dates at or before the last settled date are ignored.
    pub async fn settle_day(
        state: &AppState,
        date: NaiveDate,
        all_goals_met: bool,
        now: DateTime<Utc>,
    ) -> EngineResult<UserProfile> {
        let _guard = state.write_lock().await;
        let mut profile = Self::load_or_create(state, now).await?;
        if profile.settle(date, all_goals_met) {
            state.profiles.save(&profile).await?;
            info!(
                %date,
                all_goals_met,
                current_streak = profile.current_streak,
                longest_streak = profile.longest_streak,
                "Day settled"
            );
        }
        Ok(profile)
    }

    /// Add to the lifetime experience total
    pub async fn add_experience(
        state: &AppState,
        amount: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<UserProfile> {
        let _guard = state.write_lock().await;
        Self::credit_experience(state, amount, now).await
    }

    /// Daily goals, falling back to the configured defaults before onboarding
    pub async fn goals(state: &AppState) -> EngineResult<DailyGoals> {
        Ok(state
            .profiles
            .find()
            .await?
            .map(|p| p.goals)
            .unwrap_or(state.config().defaults.goals))
    }

    // ------------------------------------------------------------------------
    // Lock-free helpers; callers hold the write lock
    // ------------------------------------------------------------------------

    pub(crate) async fn load_or_create(
        state: &AppState,
        now: DateTime<Utc>,
    ) -> EngineResult<UserProfile> {
        if let Some(profile) = state.profiles.find().await? {
            return Ok(profile);
        }

        let defaults = &state.config().defaults;
        let profile = UserProfile::new(
            defaults.user_name.clone(),
            Gender::default(),
            defaults.goals,
            now,
        );
        profile
            .validate()
            .map_err(|e| EngineError::Validation(format!("Invalid default profile: {}", e)))?;

        state.profiles.save(&profile).await?;
        info!(name = %profile.name, "Profile created");
        Ok(profile)
    }

    pub(crate) async fn credit_experience(
        state: &AppState,
        amount: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<UserProfile> {
        let mut profile = Self::load_or_create(state, now).await?;
        if amount > 0 {
            profile.total_experience = profile.total_experience.saturating_add(u64::from(amount));
            state.profiles.save(&profile).await?;
        }
        Ok(profile)
    }
}
