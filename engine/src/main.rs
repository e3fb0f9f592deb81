//! PawFit Engine
//!
//! Headless host for the virtual pet: restores the last snapshot, keeps the
//! pet's needs and daily missions current in the background and saves
//! state on shutdown.
//!
//! ## Architecture
//!
//! - Services: Business logic over the shared domain rules
//! - Repositories: Storage ports with an in-memory, snapshot-backed store
//! - Scheduler: Periodic decay and day rollover

use anyhow::Result;
use chrono::Utc;
use pawfit_engine::{
    config,
    repositories::MemoryStore,
    services::{CareScheduler, MissionService, PetService, ProfileService},
    state::AppState,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting PawFit engine"
    );

    // Restore persisted state
    let snapshot_path = config.storage.snapshot_path();
    let store = Arc::new(MemoryStore::load_snapshot(&snapshot_path).await?);
    let autosave_secs = config.storage.autosave_secs;

    let state = AppState::new(store.clone(), config);

    // Bootstrap singletons and today's missions
    let now = Utc::now();
    let profile = ProfileService::get_or_create(&state, now).await?;
    let status = PetService::status(&state, now).await?;
    let rollover = MissionService::roll_over(&state, now.date_naive(), now).await?;
    info!(
        user = %profile.name,
        pet = %status.name,
        level = status.level,
        mood = %status.mood,
        streak = rollover.current_streak,
        missions = rollover.missions.len(),
        "State ready"
    );

    let scheduler = CareScheduler::new(state.clone())
        .with_last_date(now.date_naive())
        .start();
    let autosave = start_autosave(
        state.clone(),
        store.clone(),
        snapshot_path.clone(),
        autosave_secs,
    );

    shutdown_signal().await;

    // Let an in-flight operation finish before stopping the tasks
    let guard = state.write_lock().await;
    scheduler.abort();
    if let Some(handle) = autosave {
        handle.abort();
    }
    store.save_snapshot(&snapshot_path).await?;
    drop(guard);

    info!(path = %snapshot_path.display(), "Shutdown complete");
    Ok(())
}

/// Periodically write the snapshot; returns `None` when autosave is off
fn start_autosave(
    state: AppState,
    store: Arc<MemoryStore>,
    path: PathBuf,
    every_secs: u64,
) -> Option<tokio::task::JoinHandle<()>> {
    if every_secs == 0 {
        info!("Autosave disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(every_secs));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = state.save_snapshot(&store, &path).await {
                warn!(error = %e, "Autosave failed");
            }
        }
    }))
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "pawfit_engine=info".into()
        } else {
            "pawfit_engine=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
