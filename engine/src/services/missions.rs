//! Daily mission service
//!
//! Provides business logic for:
//! - Generating one mission set per date from the profile's goals
//! - Refreshing progress from the day's counters and paying rewards once
//! - Rolling over to a new day: streak settlement, generation, pruning

use crate::error::EngineResult;
use crate::services::pet::PetService;
use crate::services::profile::ProfileService;
use crate::state::AppState;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use pawfit_shared::missions::{
    all_health_goals_met, generate_daily_missions, refresh_missions, CompletedMission,
};
use pawfit_shared::{DailyStats, Mission, MissionReward, MissionView};
use tracing::{debug, info};

/// Days of mission history kept before pruning
pub const MISSION_RETENTION_DAYS: i64 = 30;

/// Outcome of a day rollover
#[derive(Debug, Clone, PartialEq)]
pub struct RollOver {
    /// Finished days whose streak outcome was recorded by this call
    pub settled_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub missions: Vec<Mission>,
    pub pruned: usize,
}

/// Mission service for business logic
pub struct MissionService;

impl MissionService {
    /// Missions for `date`, generating them on first request
    pub async fn generate_for(
        state: &AppState,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<Mission>> {
        let _guard = state.write_lock().await;
        Self::generate_locked(state, date, now).await
    }

    /// Re-evaluate the missions of `date`, returns the ones completed now
    ///
    /// Only today's missions move; a past day keeps the state it had when
    /// that day ended, matching how backfilled health entries are handled.
    pub async fn refresh(
        state: &AppState,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<CompletedMission>> {
        let _guard = state.write_lock().await;
        Self::refresh_locked(state, date, now).await
    }

    /// Mission list for display
    pub async fn list(state: &AppState, date: NaiveDate) -> EngineResult<Vec<MissionView>> {
        let missions = state.missions.find_by_date(date).await?;
        Ok(missions.iter().map(MissionView::from).collect())
    }

    /// Close out every finished day up to `today` and prepare today
    ///
    /// Days after the last settled one are settled in order; a day without
    /// missions counts as not met. Safe to call repeatedly.
    pub async fn roll_over(
        state: &AppState,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> EngineResult<RollOver> {
        let _guard = state.write_lock().await;

        let mut profile = ProfileService::load_or_create(state, now).await?;
        let first_unsettled = match profile.last_settled {
            Some(last) => last + Duration::days(1),
            None => profile.created_at.date_naive(),
        };

        let mut settled_days = 0;
        for date in first_unsettled.iter_days().take_while(|date| *date < today) {
            let missions = state.missions.find_by_date(date).await?;
            let met = all_health_goals_met(&missions);
            if profile.settle(date, met) {
                settled_days += 1;
                debug!(%date, met, streak = profile.current_streak, "Day settled");
            }
        }
        if settled_days > 0 {
            state.profiles.save(&profile).await?;
            info!(
                settled_days,
                current_streak = profile.current_streak,
                longest_streak = profile.longest_streak,
                "Streak updated"
            );
        }

        let missions = Self::generate_locked(state, today, now).await?;
        let pruned = state
            .missions
            .delete_before(today - Duration::days(MISSION_RETENTION_DAYS))
            .await?;
        if pruned > 0 {
            debug!(pruned, "Old missions pruned");
        }

        Ok(RollOver {
            settled_days,
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            missions,
            pruned,
        })
    }

    // ------------------------------------------------------------------------
    // Lock-free helpers; callers hold the write lock
    // ------------------------------------------------------------------------

    pub(crate) async fn generate_locked(
        state: &AppState,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<Mission>> {
        let existing = state.missions.find_by_date(date).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let profile = ProfileService::load_or_create(state, now).await?;
        let missions = generate_daily_missions(date, &profile.goals);
        state.missions.replace_for_date(date, &missions).await?;
        info!(%date, count = missions.len(), "Daily missions generated");

        // Counters may already exist for the date
        Self::refresh_locked(state, date, now).await?;
        Ok(state.missions.find_by_date(date).await?)
    }

    pub(crate) async fn refresh_locked(
        state: &AppState,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<CompletedMission>> {
        if date != now.date_naive() {
            debug!(%date, "Missions of another day are not refreshed");
            return Ok(Vec::new());
        }

        let mut missions = state.missions.find_by_date(date).await?;
        if missions.is_empty() {
            return Ok(Vec::new());
        }

        let stats = state
            .daily_stats
            .find_by_date(date)
            .await?
            .unwrap_or_else(|| DailyStats::empty(date));
        let completed = refresh_missions(&mut missions, &stats);
        state.missions.save_all(&missions).await?;

        if !completed.is_empty() {
            for mission in &completed {
                info!(
                    %date,
                    mission = %mission.mission_type,
                    experience = mission.reward.experience,
                    coins = mission.reward.coins,
                    "Mission completed"
                );
            }
            let total = completed
                .iter()
                .fold(MissionReward::default(), |acc, m| acc + m.reward);
            PetService::grant(state, total, now).await?;
        }

        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::repositories::MemoryStore;
    use crate::services::health::HealthService;
    use chrono::TimeZone;
    use pawfit_shared::MissionType;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), AppConfig::default())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_generate_is_idempotent() {
        let state = state();
        let first = MissionService::generate_for(&state, now().date_naive(), now())
            .await
            .unwrap();
        let second = MissionService::generate_for(&state, now().date_naive(), now())
            .await
            .unwrap();

        assert_eq!(first.len(), 4);
        let ids: Vec<_> = first.iter().map(|m| m.id).collect();
        let again: Vec<_> = second.iter().map(|m| m.id).collect();
        assert_eq!(ids, again);
    }

    #[tokio::test]
    async fn test_generation_picks_up_existing_counters() {
        let state = state();
        let today = now().date_naive();
        HealthService::log_water(&state, today, 1000, now()).await.unwrap();

        let missions = MissionService::generate_for(&state, today, now()).await.unwrap();
        let water = missions
            .iter()
            .find(|m| m.mission_type == MissionType::Water)
            .unwrap();
        assert_eq!(water.current_value, 1000);
        assert!(!water.completed);
    }

    #[tokio::test]
    async fn test_rewards_paid_once() {
        let state = state();
        let today = now().date_naive();
        MissionService::generate_for(&state, today, now()).await.unwrap();

        let result = HealthService::log_water(&state, today, 2000, now()).await.unwrap();
        assert_eq!(result.completed_missions.len(), 1);
        let coins = state.pets.find().await.unwrap().unwrap().coins;

        assert!(MissionService::refresh(&state, today, now()).await.unwrap().is_empty());
        assert_eq!(state.pets.find().await.unwrap().unwrap().coins, coins);
    }

    #[tokio::test]
    async fn test_past_missions_pay_nothing() {
        let state = state();
        let yesterday = now().date_naive() - Duration::days(1);
        HealthService::log_water(&state, yesterday, 2000, now()).await.unwrap();

        let missions = MissionService::generate_for(&state, yesterday, now()).await.unwrap();
        assert!(missions.iter().all(|m| m.current_value == 0 && !m.completed));

        let coins = state.pets.find().await.unwrap().unwrap().coins;
        assert!(MissionService::refresh(&state, yesterday, now())
            .await
            .unwrap()
            .is_empty());
        let pet = state.pets.find().await.unwrap().unwrap();
        assert_eq!(pet.coins, coins);
        assert_eq!(pet.experience, 0);
    }

    #[tokio::test]
    async fn test_roll_over_counts_missing_days_as_missed() {
        let state = state();
        let day1 = now().date_naive();
        MissionService::roll_over(&state, day1, now()).await.unwrap();

        // Day 1: all goals met
        HealthService::log_steps(&state, day1, 8000, now()).await.unwrap();
        HealthService::log_water(&state, day1, 2000, now()).await.unwrap();
        HealthService::log_calories_burned(&state, day1, 400, now()).await.unwrap();

        let day2 = day1 + Duration::days(1);
        let result = MissionService::roll_over(&state, day2, now() + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(result.settled_days, 1);
        assert_eq!(result.current_streak, 1);

        // Nothing logged on day 2 or day 3, app reopened on day 4
        let day4 = day1 + Duration::days(3);
        let result = MissionService::roll_over(&state, day4, now() + Duration::days(3))
            .await
            .unwrap();
        assert_eq!(result.settled_days, 2);
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 1);

        // Repeating the rollover changes nothing
        let again = MissionService::roll_over(&state, day4, now() + Duration::days(3))
            .await
            .unwrap();
        assert_eq!(again.settled_days, 0);
        assert_eq!(again.missions, result.missions);
    }

    #[tokio::test]
    async fn test_roll_over_prunes_old_missions() {
        let state = state();
        let old = now().date_naive() - Duration::days(45);
        MissionService::generate_for(&state, old, now()).await.unwrap();

        let result = MissionService::roll_over(&state, now().date_naive(), now())
            .await
            .unwrap();
        assert_eq!(result.pruned, 4);
        assert!(MissionService::list(&state, old).await.unwrap().is_empty());
    }
}
