//! Care Scheduler - periodic background upkeep
//!
//! Decays the pet's needs at a fixed interval and rolls missions and
//! streaks over when the UTC date changes.

use crate::error::EngineResult;
use crate::services::missions::MissionService;
use crate::services::pet::PetService;
use crate::state::AppState;
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;
use tokio::time::interval;

/// What one scheduler pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub decayed: bool,
    pub rolled_over: bool,
}

/// Background care scheduler
pub struct CareScheduler {
    state: AppState,
    interval: Duration,
    enabled: bool,
    last_date: Option<NaiveDate>,
}

impl CareScheduler {
    /// Creates a scheduler from the state's configuration
    pub fn new(state: AppState) -> Self {
        let scheduler = &state.config().scheduler;
        let interval = scheduler.tick_interval();
        let enabled = scheduler.enabled;
        Self {
            state,
            interval,
            enabled,
            last_date: None,
        }
    }

    /// Treat `date` as already rolled over
    pub fn with_last_date(mut self, date: NaiveDate) -> Self {
        self.last_date = Some(date);
        self
    }

    /// Start the scheduler (runs in background)
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(mut self) {
        if !self.enabled {
            tracing::info!("Care scheduler disabled");
            return;
        }

        tracing::info!(interval = ?self.interval, "Care scheduler started");

        let mut ticker = interval(self.interval);

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if let Err(e) = self.run_once(Utc::now()).await {
                tracing::warn!(error = %e, code = e.code(), "Care scheduler pass failed");
            }
        }
    }

    /// One upkeep pass at `now`
    pub async fn run_once(&mut self, now: DateTime<Utc>) -> EngineResult<TickReport> {
        let mut report = TickReport::default();
        let today = now.date_naive();

        if self.last_date != Some(today) {
            let result = MissionService::roll_over(&self.state, today, now).await?;
            tracing::info!(
                %today,
                settled_days = result.settled_days,
                current_streak = result.current_streak,
                "Scheduler: day rolled over"
            );
            self.last_date = Some(today);
            report.rolled_over = true;
        }

        if let Some(decay) = PetService::tick(&self.state, now).await? {
            report.decayed = !decay.is_noop();
        }

        Ok(report)
    }
}
