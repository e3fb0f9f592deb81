//! Integration tests for snapshot persistence across restarts

mod common;

use chrono::Duration;
use pawfit_engine::repositories::MemoryStore;
use pawfit_engine::services::{CareScheduler, HealthService, MissionService, PetService, ProfileService};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pawfit.json");

    let app = common::TestApp::new().await;
    app.open().await;
    HealthService::log_steps(&app.state, app.today(), 2500, app.now).await.unwrap();
    PetService::feed(&app.state, app.now).await.unwrap();
    let before = PetService::status(&app.state, app.now).await.unwrap();
    let missions = MissionService::list(&app.state, app.today()).await.unwrap();
    app.store.save_snapshot(&path).await.unwrap();

    let store = Arc::new(MemoryStore::load_snapshot(&path).await.unwrap());
    let restarted = common::TestApp::with_store(store).await;

    let after = PetService::status(&restarted.state, app.now).await.unwrap();
    assert_eq!(after, before);
    assert_eq!(
        MissionService::list(&restarted.state, app.today()).await.unwrap(),
        missions
    );
    let summary = HealthService::daily_summary(&restarted.state, app.today()).await.unwrap();
    assert_eq!(summary.steps, 2500);
}

#[tokio::test]
async fn test_time_away_is_caught_up_after_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pawfit.json");

    let app = common::TestApp::new().await;
    app.open().await;
    PetService::status(&app.state, app.now).await.unwrap();
    app.store.save_snapshot(&path).await.unwrap();

    // Reopened three days and five hours later
    let store = Arc::new(MemoryStore::load_snapshot(&path).await.unwrap());
    let mut restarted = common::TestApp::with_store(store).await;
    restarted.now = app.now + Duration::days(3) + Duration::hours(5);

    let mut scheduler = CareScheduler::new(restarted.state.clone());
    let report = scheduler.run_once(restarted.now).await.unwrap();
    assert!(report.rolled_over);
    assert!(report.decayed);

    let profile = ProfileService::get_or_create(&restarted.state, restarted.now)
        .await
        .unwrap();
    assert_eq!(profile.last_settled, Some(restarted.today() - Duration::days(1)));
    assert_eq!(profile.current_streak, 0);

    let status = PetService::status(&restarted.state, restarted.now).await.unwrap();
    assert_eq!(status.hunger, 0);
    assert_eq!(
        MissionService::list(&restarted.state, restarted.today())
            .await
            .unwrap()
            .len(),
        4
    );
}
