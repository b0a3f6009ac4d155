//! Repository layer for database operations
//!
//! This module provides the read/write API over the two collections:
//! drink events and the settings singleton. Every write is atomic, either
//! as one statement or inside a transaction scoped to the collection it
//! touches; reads are single statements.

use super::models::*;
use crate::config::{MAX_DRINK_AMOUNT_ML, MIN_DRINK_AMOUNT_ML, SETTINGS_KEY, WEEKLY_SERIES_DAYS};
use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashMap};

const DRINK_COLUMNS: &str = "id, drink_type, amount, hydration, date, time, created_at";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

/// Check that `amount` is a whole number of millilitres within bounds.
pub fn validate_amount(amount: f64) -> Result<i64> {
    if !amount.is_finite() || amount.fract() != 0.0 {
        return Err(AppError::validation(format!(
            "amount must be a whole number of millilitres, got {}",
            amount
        )));
    }

    if amount < MIN_DRINK_AMOUNT_ML as f64 || amount > MAX_DRINK_AMOUNT_ML as f64 {
        return Err(AppError::validation(format!(
            "amount must be between {} and {} ml, got {}",
            MIN_DRINK_AMOUNT_ML, MAX_DRINK_AMOUNT_ML, amount
        )));
    }

    Ok(amount as i64)
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ===== Drinks =====

    /// Record a drink taken now
    pub async fn add_drink(&self, drink_type: &str, amount: f64) -> Result<i64> {
        self.add_drink_at(drink_type, amount, Local::now()).await
    }

    /// Record a drink taken at `at`. The event's date and time are the
    /// local calendar date and wall-clock time of that instant.
    pub async fn add_drink_at(
        &self,
        drink_type: &str,
        amount: f64,
        at: DateTime<Local>,
    ) -> Result<i64> {
        let amount = validate_amount(amount)?;
        let drink_type = DrinkType::normalize(drink_type);
        let hydration = drink_type.hydration_for(amount);

        let date = at.date_naive();
        let time = at.format("%H:%M:%S").to_string();
        let created_at = at.with_timezone(&Utc);

        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO drinks (drink_type, amount, hydration, date, time, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(drink_type)
        .bind(amount)
        .bind(hydration)
        .bind(date)
        .bind(&time)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Added drink {}: {} {} ml ({} ml hydration) on {}",
            id,
            drink_type,
            amount,
            hydration,
            date
        );
        Ok(id)
    }

    /// Get a single drink by ID
    pub async fn get_event(&self, id: i64) -> Result<Option<DrinkEvent>> {
        let event = sqlx::query_as::<_, DrinkEvent>(&format!(
            "SELECT {} FROM drinks WHERE id = ?",
            DRINK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Sum of hydration recorded on `date`
    pub async fn get_daily_total(&self, date: NaiveDate) -> Result<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(hydration), 0) FROM drinks WHERE date = ?")
                .bind(date)
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }

    /// Drinks recorded on `date`, most recent first
    pub async fn get_events_for_date(&self, date: NaiveDate) -> Result<Vec<DrinkEvent>> {
        let events = sqlx::query_as::<_, DrinkEvent>(&format!(
            "SELECT {} FROM drinks WHERE date = ? ORDER BY id DESC",
            DRINK_COLUMNS
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Every stored drink in insertion order
    pub async fn get_all_events(&self) -> Result<Vec<DrinkEvent>> {
        let events = sqlx::query_as::<_, DrinkEvent>(&format!(
            "SELECT {} FROM drinks ORDER BY id ASC",
            DRINK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn count_events(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drinks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Daily totals for the week ending today
    pub async fn get_weekly_series(&self) -> Result<Vec<DailyTotal>> {
        self.get_weekly_series_ending(Local::now().date_naive())
            .await
    }

    /// Daily totals for the seven days ending on `today`, oldest first.
    /// Days without drinks are reported as zero.
    pub async fn get_weekly_series_ending(&self, today: NaiveDate) -> Result<Vec<DailyTotal>> {
        let start = today - Duration::days(WEEKLY_SERIES_DAYS - 1);

        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT date, COALESCE(SUM(hydration), 0)
            FROM drinks
            WHERE date >= ? AND date <= ?
            GROUP BY date
            "#,
        )
        .bind(start)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        let totals: HashMap<NaiveDate, i64> = rows.into_iter().collect();

        let series = (0..WEEKLY_SERIES_DAYS)
            .map(|offset| {
                let date = start + Duration::days(offset);
                DailyTotal {
                    date,
                    hydration: totals.get(&date).copied().unwrap_or(0),
                }
            })
            .collect();

        Ok(series)
    }

    /// All-time hydration grouped by drink type. Types never recorded
    /// are absent.
    pub async fn get_drink_type_breakdown(&self) -> Result<BTreeMap<DrinkType, i64>> {
        let rows: Vec<(DrinkType, i64)> = sqlx::query_as(
            "SELECT drink_type, COALESCE(SUM(hydration), 0) FROM drinks GROUP BY drink_type",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Delete the most recently inserted drink and return it.
    ///
    /// One statement, so SQLite takes the write lock before reading the
    /// highest ID and concurrent undos each remove a different row.
    pub async fn delete_most_recent(&self) -> Result<DrinkEvent> {
        let event = sqlx::query_as::<_, DrinkEvent>(&format!(
            r#"
            DELETE FROM drinks
            WHERE id = (SELECT MAX(id) FROM drinks)
            RETURNING {}
            "#,
            DRINK_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NothingToDelete)?;

        tracing::debug!("Deleted most recent drink: {}", event.id);
        Ok(event)
    }

    /// Delete a drink by ID. Returns whether a row was removed; a missing
    /// ID is not an error.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!("Delete drink {}: {} row(s) removed", id, rows);
        Ok(rows > 0)
    }

    // ===== Settings =====

    /// Stored settings, or the defaults if none were ever saved.
    /// Reading does not persist the defaults.
    pub async fn get_settings(&self) -> Result<Settings> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.pool)
            .await?;

        match value {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Settings::default()),
        }
    }

    /// Replace the whole settings record
    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        let value = serde_json::to_string(settings)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(&value)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Saved settings: {}", value);
        Ok(())
    }
}
