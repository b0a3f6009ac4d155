//! Settings service
//!
//! Validation and read-modify-write helpers on top of the settings
//! singleton. The store itself only replaces whole records.

use crate::config::{MAX_DAILY_GOAL_ML, MIN_DAILY_GOAL_ML};
use crate::database::{Location, Repository, Settings};
use crate::error::{AppError, Result};
use chrono::Utc;

/// Service for managing application settings
#[derive(Clone)]
pub struct SettingsService {
    repo: Repository,
}

fn validate(settings: &Settings) -> Result<()> {
    if !(MIN_DAILY_GOAL_ML..=MAX_DAILY_GOAL_ML).contains(&settings.daily_goal) {
        return Err(AppError::validation(format!(
            "daily goal must be between {} and {} ml, got {}",
            MIN_DAILY_GOAL_ML, MAX_DAILY_GOAL_ML, settings.daily_goal
        )));
    }

    if let Some(location) = &settings.location {
        if !(-90.0..=90.0).contains(&location.lat) || !(-180.0..=180.0).contains(&location.lon) {
            return Err(AppError::validation(format!(
                "invalid coordinates: {}, {}",
                location.lat, location.lon
            )));
        }
    }

    Ok(())
}

impl SettingsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Load settings, falling back to defaults
    pub async fn get(&self) -> Result<Settings> {
        self.repo.get_settings().await
    }

    /// Validate and save the whole record
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        validate(settings)?;
        self.repo.save_settings(settings).await?;
        tracing::info!("Settings saved");
        Ok(())
    }

    pub async fn set_daily_goal(&self, daily_goal: i64) -> Result<Settings> {
        let mut settings = self.get().await?;
        settings.daily_goal = daily_goal;
        self.save(&settings).await?;
        tracing::info!("Daily goal set to {} ml", daily_goal);
        Ok(settings)
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<Settings> {
        let mut settings = self.get().await?;
        settings.notifications_enabled = enabled;
        self.save(&settings).await?;
        tracing::info!("Notifications enabled: {}", enabled);
        Ok(settings)
    }

    /// Store a location, stamped with the current time
    pub async fn set_location(
        &self,
        lat: f64,
        lon: f64,
        city: String,
        country: String,
    ) -> Result<Settings> {
        let mut settings = self.get().await?;
        settings.location = Some(Location {
            lat,
            lon,
            city,
            country,
            updated_at: Utc::now(),
        });
        self.save(&settings).await?;
        tracing::info!("Location updated");
        Ok(settings)
    }

    pub async fn clear_location(&self) -> Result<Settings> {
        let mut settings = self.get().await?;
        settings.location = None;
        self.save(&settings).await?;
        tracing::info!("Location cleared");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> SettingsService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        SettingsService::new(Repository::new(pool))
    }

    #[tokio::test]
    async fn test_defaults_before_first_save() {
        let service = create_test_service().await;

        let settings = service.get().await.unwrap();
        assert_eq!(settings.daily_goal, 2000);
        assert!(!settings.notifications_enabled);
        assert!(settings.location.is_none());
    }

    #[tokio::test]
    async fn test_helpers_preserve_other_fields() {
        let service = create_test_service().await;

        service.set_daily_goal(2500).await.unwrap();
        service.set_notifications_enabled(true).await.unwrap();
        service
            .set_location(48.85, 2.35, "Paris".to_string(), "France".to_string())
            .await
            .unwrap();

        let settings = service.get().await.unwrap();
        assert_eq!(settings.daily_goal, 2500);
        assert!(settings.notifications_enabled);
        assert_eq!(settings.location.as_ref().unwrap().city, "Paris");

        let cleared = service.clear_location().await.unwrap();
        assert!(cleared.location.is_none());
        assert_eq!(cleared.daily_goal, 2500);
        assert_eq!(service.get().await.unwrap(), cleared);
    }

    #[tokio::test]
    async fn test_rejects_goal_out_of_range() {
        let service = create_test_service().await;

        for goal in [0, 499, 5001] {
            let result = service.set_daily_goal(goal).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        assert_eq!(service.get().await.unwrap().daily_goal, 2000);
    }

    #[tokio::test]
    async fn test_rejects_bad_coordinates() {
        let service = create_test_service().await;

        let result = service
            .set_location(91.0, 0.0, String::new(), String::new())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.get().await.unwrap().location.is_none());
    }
}
