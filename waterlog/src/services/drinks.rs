//! Drinks service
//!
//! High-level operations over drink events: recording, undo, and the
//! statistics shown on the dashboard.

use crate::database::{DailyTotal, DrinkEvent, Repository};
use crate::error::{AppError, Result};
use crate::stats::{self, Breakdown, DailyProgress, WeeklySummary};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Weekly series plus its summary
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub series: Vec<DailyTotal>,
    pub summary: WeeklySummary,
}

/// Service for managing drink events
#[derive(Clone)]
pub struct DrinksService {
    repo: Repository,
}

impl DrinksService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Record a drink and return the stored event
    pub async fn add_drink(&self, drink_type: &str, amount: f64) -> Result<DrinkEvent> {
        tracing::info!("Recording drink: {} {} ml", drink_type, amount);

        let id = self.repo.add_drink(drink_type, amount).await?;
        let event = self.repo.get_event(id).await?.ok_or_else(|| {
            AppError::Generic(format!("Drink {} vanished after insert", id))
        })?;

        tracing::info!(
            "Drink recorded: {} ({} ml hydration)",
            event.id,
            event.hydration
        );

        Ok(event)
    }

    /// Remove the most recently recorded drink
    pub async fn undo_last(&self) -> Result<DrinkEvent> {
        let event = self.repo.delete_most_recent().await?;

        tracing::info!(
            "Undid drink {}: {} {} ml",
            event.id,
            event.drink_type,
            event.amount
        );

        Ok(event)
    }

    /// Delete a drink by ID; missing IDs are ignored
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.repo.delete_by_id(id).await? {
            tracing::info!("Deleted drink {}", id);
        } else {
            tracing::debug!("Drink {} not found, nothing deleted", id);
        }

        Ok(())
    }

    pub async fn events_for_date(&self, date: NaiveDate) -> Result<Vec<DrinkEvent>> {
        self.repo.get_events_for_date(date).await
    }

    /// Progress for `date` against the configured daily goal
    pub async fn progress_for(&self, date: NaiveDate) -> Result<DailyProgress> {
        let total = self.repo.get_daily_total(date).await?;
        let settings = self.repo.get_settings().await?;

        Ok(stats::daily_progress(total, settings.daily_goal))
    }

    pub async fn today_progress(&self) -> Result<DailyProgress> {
        self.progress_for(Local::now().date_naive()).await
    }

    pub async fn weekly(&self) -> Result<WeeklyReport> {
        let series = self.repo.get_weekly_series().await?;
        let summary = stats::weekly_summary(&series);

        Ok(WeeklyReport { series, summary })
    }

    /// All-time hydration per drink type
    pub async fn breakdown(&self) -> Result<Breakdown> {
        let totals = self.repo.get_drink_type_breakdown().await?;
        Ok(stats::breakdown_from_totals(totals))
    }
}
