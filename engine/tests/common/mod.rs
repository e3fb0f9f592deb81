//! Common test utilities for integration tests
//!
//! This module provides shared setup for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fake::faker::name::en::FirstName;
use fake::Fake;
use pawfit_engine::{
    config::{AppConfig, DefaultsConfig, SchedulerConfig, StorageConfig},
    repositories::MemoryStore,
    services::MissionService,
    state::AppState,
};
use pawfit_shared::DailyGoals;
use std::sync::Arc;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    /// Clock the test advances by hand
    pub now: DateTime<Utc>,
}

impl TestApp {
    /// Create a fresh app with an empty store and a random pet name
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    pub async fn with_store(store: Arc<MemoryStore>) -> Self {
        let state = AppState::new(store.clone(), test_config());
        Self {
            state,
            store,
            now: start_time(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Move to 08:00 on the next day and roll over, as the app does on launch
    pub async fn next_day(&mut self) {
        let next = self.today() + Duration::days(1);
        self.now = Utc.from_utc_datetime(&next.and_hms_opt(8, 0, 0).expect("valid time"));
        MissionService::roll_over(&self.state, self.today(), self.now)
            .await
            .expect("roll over");
    }

    /// Roll over today without changing the clock
    pub async fn open(&self) {
        MissionService::roll_over(&self.state, self.today(), self.now)
            .await
            .expect("roll over");
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        scheduler: SchedulerConfig {
            enabled: false,
            tick_secs: 900,
        },
        storage: StorageConfig {
            snapshot_path: "unused.json".to_string(),
            autosave_secs: 0,
        },
        care: Default::default(),
        defaults: DefaultsConfig {
            pet_name: FirstName().fake(),
            user_name: FirstName().fake(),
            goals: DailyGoals {
                steps: 6000,
                water_ml: 1500,
                calories: 300,
            },
        },
    }
}
