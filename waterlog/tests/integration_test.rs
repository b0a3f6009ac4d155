//! Integration tests for waterlog
//!
//! These tests run against a real database file and verify:
//! - The add / total / undo workflow
//! - Validation leaves the store untouched
//! - Settings and drinks survive reopening the database
//! - Concurrent undos and open failures report the right outcome

use std::collections::HashSet;
use tempfile::TempDir;
use waterlog::app::AppState;
use waterlog::database::{create_pool, schema_version, DrinkType, Repository, Settings};
use waterlog::error::AppError;
use waterlog::services::{DrinksService, SettingsService};

/// Helper to create a test database with schema
async fn create_test_db() -> (Repository, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let pool = create_pool(&db_path).await.unwrap();
    let repo = Repository::new(pool);

    (repo, temp_dir)
}

#[tokio::test]
async fn test_water_and_coffee_scenario() {
    let (repo, _temp) = create_test_db().await;
    let drinks = DrinksService::new(repo.clone());

    let water = drinks.add_drink("water", 500.0).await.unwrap();
    assert_eq!(water.hydration, 500);

    let coffee = drinks.add_drink("coffee", 300.0).await.unwrap();
    assert_eq!(coffee.hydration, 180);

    let today = coffee.date;
    assert_eq!(repo.get_daily_total(today).await.unwrap(), 680);

    let events = repo.get_events_for_date(today).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, coffee.id);

    let removed = drinks.undo_last().await.unwrap();
    assert_eq!(removed.id, coffee.id);
    assert_eq!(removed.drink_type, DrinkType::Coffee);
    assert_eq!(repo.get_daily_total(today).await.unwrap(), 500);
}

#[tokio::test]
async fn test_rejected_amounts_do_not_write() {
    let (repo, _temp) = create_test_db().await;
    let id = repo.add_drink("water", 250.0).await.unwrap();
    let today = repo.get_event(id).await.unwrap().unwrap().date;
    let before = repo.get_events_for_date(today).await.unwrap().len();

    for bad in [0.0, -50.0, 5000.5, 5001.0, 99.9, f64::INFINITY] {
        let result = repo.add_drink("water", bad).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    let after = repo.get_events_for_date(today).await.unwrap().len();
    assert_eq!(before, after);
    assert_eq!(repo.count_events().await.unwrap(), 1);
}

#[tokio::test]
async fn test_weekly_report_has_seven_days() {
    let (repo, _temp) = create_test_db().await;
    let drinks = DrinksService::new(repo);

    let juice = drinks.add_drink("juice", 250.0).await.unwrap();

    let report = drinks.weekly().await.unwrap();
    assert_eq!(report.series.len(), 7);
    assert_eq!(report.series[6].date, juice.date);
    assert_eq!(report.summary.total, 200);
    assert_eq!(report.summary.average, 29);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let saved = Settings {
        daily_goal: 2750,
        notifications_enabled: true,
        location: None,
    };

    {
        let repo = Repository::new(create_pool(&db_path).await.unwrap());
        SettingsService::new(repo.clone()).save(&saved).await.unwrap();
        repo.add_drink("milk", 200.0).await.unwrap();
        repo.pool().close().await;
    }

    let pool = create_pool(&db_path).await.unwrap();
    assert_eq!(schema_version(&pool).await.unwrap(), 2);

    let repo = Repository::new(pool);
    assert_eq!(repo.get_settings().await.unwrap(), saved);

    let events = repo.get_all_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].hydration, 140);
}

#[tokio::test]
async fn test_app_state_opens_store_lazily() {
    let temp_dir = TempDir::new().unwrap();
    let state = AppState::new(temp_dir.path().to_path_buf());

    assert!(!state.db_path().exists());

    let settings = state.settings().await.unwrap().get().await.unwrap();
    assert_eq!(settings, Settings::default());
    assert!(state.db_path().exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_undo_removes_distinct_drinks() {
    let (repo, _temp) = create_test_db().await;

    for round in 0..20 {
        for _ in 0..4 {
            repo.add_drink("water", 100.0).await.unwrap();
        }

        let (a, b, c) = tokio::join!(
            repo.delete_most_recent(),
            repo.delete_most_recent(),
            repo.delete_most_recent()
        );

        let ids: HashSet<i64> = [a, b, c]
            .into_iter()
            .map(|result| result.unwrap_or_else(|e| panic!("round {}: {}", round, e)).id)
            .collect();
        assert_eq!(ids.len(), 3, "round {} removed the same drink twice", round);
        assert_eq!(repo.count_events().await.unwrap(), round + 1);
    }
}

#[tokio::test]
async fn test_unopenable_database_is_storage_error() {
    let temp_dir = TempDir::new().unwrap();

    // The path is an existing directory, which SQLite cannot use as a file
    let result = create_pool(temp_dir.path()).await;
    assert!(matches!(result, Err(AppError::Storage(_))));
}

#[tokio::test]
async fn test_uncreatable_data_dir_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let result = create_pool(&blocker.join("nested").join("test.db")).await;
    assert!(matches!(result, Err(AppError::Io(_))));
}
