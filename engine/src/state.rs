//! Application state management
//!
//! This module provides the shared application state that is passed
//! to every service call and to the background scheduler.
//!
//! # Design Principles
//!
//! 1. **Cheap cloning**: All fields are behind `Arc`
//! 2. **Storage behind ports**: services only see the repository traits
//! 3. **Single writer**: read-modify-write sequences hold `writer`

use crate::config::AppConfig;
use crate::error::EngineResult;
use crate::repositories::{
    DailyStatsRepository, MemoryStore, MissionRepository, PetRepository, ProfileRepository,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub pets: Arc<dyn PetRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub daily_stats: Arc<dyn DailyStatsRepository>,
    pub missions: Arc<dyn MissionRepository>,
    /// Serializes mutations coming from the UI and the scheduler
    writer: Arc<Mutex<()>>,
}

impl AppState {
    /// Create a new application state backed by one store implementing
    /// every repository
    pub fn new<S>(store: Arc<S>, config: AppConfig) -> Self
    where
        S: PetRepository + ProfileRepository + DailyStatsRepository + MissionRepository + 'static,
    {
        Self {
            config: Arc::new(config),
            pets: store.clone(),
            profiles: store.clone(),
            daily_stats: store.clone(),
            missions: store,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Acquire the write lock
    ///
    /// Only public service entry points take it; the lock is not reentrant.
    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Write `store` to `path` between service operations
    ///
    /// Waits for any in-flight operation so the file never holds a half
    /// applied change (a completed mission without its reward).
    pub async fn save_snapshot(&self, store: &MemoryStore, path: &Path) -> EngineResult<()> {
        let _guard = self.write_lock().await;
        store.save_snapshot(path).await
    }
}
