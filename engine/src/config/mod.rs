//! Configuration management for the PawFit engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: PAWFIT__)

use anyhow::Result;
use pawfit_shared::care::DecayRates;
use pawfit_shared::DailyGoals;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub care: CareConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Background care scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub enabled: bool,
    /// Seconds between decay / rollover passes
    pub tick_secs: u64,
}

impl SchedulerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs.max(1))
    }
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub snapshot_path: String,
    /// Seconds between automatic snapshot saves, 0 disables autosave
    pub autosave_secs: u64,
}

impl StorageConfig {
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.snapshot_path)
    }
}

/// Pet care tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareConfig {
    pub decay: DecayRates,
    /// Nap length used when the caller does not pick one
    pub default_sleep_hours: i64,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            decay: DecayRates::default(),
            default_sleep_hours: 8,
        }
    }
}

/// Values used when the pet and profile are created on first launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub pet_name: String,
    pub user_name: String,
    pub goals: DailyGoals,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            pet_name: "Mochi".to_string(),
            user_name: "Friend".to_string(),
            goals: DailyGoals::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig {
                enabled: true,
                tick_secs: 900, // 15 minutes
            },
            storage: StorageConfig {
                snapshot_path: "pawfit.json".to_string(),
                autosave_secs: 300,
            },
            care: CareConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with PAWFIT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., PAWFIT__SCHEDULER__TICK_SECS=60 sets scheduler.tick_secs
            .add_source(config::Environment::with_prefix("PAWFIT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
