//! Storage ports
//!
//! Abstract interfaces for persistence. The engine ships one
//! implementation, [`MemoryStore`], which keeps everything in memory and
//! snapshots it to a JSON file.

mod memory;

pub use memory::{MemoryStore, Snapshot};

use async_trait::async_trait;
use chrono::NaiveDate;
use pawfit_shared::{DailyStats, DateRange, Mission, Pet, UserProfile};

use crate::error::EngineError;

/// Repository interface for the single pet
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Find the pet, if one has been adopted
    async fn find(&self) -> Result<Option<Pet>, EngineError>;

    /// Save the pet (insert or update)
    async fn save(&self, pet: &Pet) -> Result<(), EngineError>;
}

/// Repository interface for the user profile
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self) -> Result<Option<UserProfile>, EngineError>;

    async fn save(&self, profile: &UserProfile) -> Result<(), EngineError>;
}

/// Repository interface for per-day health counters
#[async_trait]
pub trait DailyStatsRepository: Send + Sync {
    /// Find the counters for a date
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailyStats>, EngineError>;

    /// Insert or replace the counters for `stats.date`
    async fn upsert(&self, stats: &DailyStats) -> Result<(), EngineError>;

    /// All stored days within the range, oldest first
    async fn find_range(&self, range: DateRange) -> Result<Vec<DailyStats>, EngineError>;
}

/// Repository interface for daily missions
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Missions generated for a date, in generation order
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Mission>, EngineError>;

    /// Replace the whole mission set of a date
    async fn replace_for_date(
        &self,
        date: NaiveDate,
        missions: &[Mission],
    ) -> Result<(), EngineError>;

    /// Update existing missions by id
    async fn save_all(&self, missions: &[Mission]) -> Result<(), EngineError>;

    /// Delete missions dated before `date`, returns how many were removed
    async fn delete_before(&self, date: NaiveDate) -> Result<usize, EngineError>;
}
