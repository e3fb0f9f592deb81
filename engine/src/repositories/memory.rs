//! In-memory store with JSON snapshots
//!
//! Implements every repository port over one [`Snapshot`] guarded by an
//! async `RwLock`. The snapshot can be written to and restored from a
//! JSON file so state survives restarts.

use async_trait::async_trait;
use chrono::NaiveDate;
use pawfit_shared::{DailyStats, DateRange, Mission, Pet, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{DailyStatsRepository, MissionRepository, PetRepository, ProfileRepository};
use crate::error::EngineError;

/// Everything the app persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub pet: Option<Pet>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub daily_stats: BTreeMap<NaiveDate, DailyStats>,
    #[serde(default)]
    pub missions: Vec<Mission>,
}

/// Repository implementation backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Snapshot>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Load a store from a snapshot file; a missing file yields an empty store
    pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No snapshot found, starting fresh");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(EngineError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|e| {
            EngineError::Storage(format!("Corrupt snapshot {}: {}", path.display(), e))
        })?;

        info!(
            path = %path.display(),
            days = snapshot.daily_stats.len(),
            missions = snapshot.missions.len(),
            "Snapshot loaded"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the current state to `path`
    ///
    /// Writes a sibling temp file first and renames it over the target so a
    /// crash mid-write leaves the previous snapshot intact.
    pub async fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        let json = {
            let snapshot = self.inner.read().await;
            serde_json::to_vec_pretty(&*snapshot)
                .map_err(|e| EngineError::Storage(format!("Failed to encode snapshot: {}", e)))?
        };

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            EngineError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            EngineError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = json.len(), "Snapshot saved");
        Ok(())
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl PetRepository for MemoryStore {
    async fn find(&self) -> Result<Option<Pet>, EngineError> {
        Ok(self.inner.read().await.pet.clone())
    }

    async fn save(&self, pet: &Pet) -> Result<(), EngineError> {
        self.inner.write().await.pet = Some(pet.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find(&self) -> Result<Option<UserProfile>, EngineError> {
        Ok(self.inner.read().await.profile.clone())
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), EngineError> {
        self.inner.write().await.profile = Some(profile.clone());
        Ok(())
    }
}

#[async_trait]
impl DailyStatsRepository for MemoryStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailyStats>, EngineError> {
        Ok(self.inner.read().await.daily_stats.get(&date).copied())
    }

    async fn upsert(&self, stats: &DailyStats) -> Result<(), EngineError> {
        self.inner
            .write()
            .await
            .daily_stats
            .insert(stats.date, *stats);
        Ok(())
    }

    async fn find_range(&self, range: DateRange) -> Result<Vec<DailyStats>, EngineError> {
        if range.start > range.end {
            return Ok(Vec::new());
        }
        Ok(self
            .inner
            .read()
            .await
            .daily_stats
            .range(range.start..=range.end)
            .map(|(_, stats)| *stats)
            .collect())
    }
}

#[async_trait]
impl MissionRepository for MemoryStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Mission>, EngineError> {
        Ok(self
            .inner
            .read()
            .await
            .missions
            .iter()
            .filter(|m| m.date == date)
            .cloned()
            .collect())
    }

    async fn replace_for_date(
        &self,
        date: NaiveDate,
        missions: &[Mission],
    ) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        inner.missions.retain(|m| m.date != date);
        inner
            .missions
            .extend(missions.iter().filter(|m| m.date == date).cloned());
        Ok(())
    }

    async fn save_all(&self, missions: &[Mission]) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        for updated in missions {
            let stored = inner
                .missions
                .iter_mut()
                .find(|m| m.id == updated.id)
                .ok_or_else(|| EngineError::NotFound(format!("Mission {}", updated.id)))?;
            *stored = updated.clone();
        }
        Ok(())
    }

    async fn delete_before(&self, date: NaiveDate) -> Result<usize, EngineError> {
        let mut inner = self.inner.write().await;
        let before = inner.missions.len();
        inner.missions.retain(|m| m.date >= date);
        Ok(before - inner.missions.len())
    }
}
