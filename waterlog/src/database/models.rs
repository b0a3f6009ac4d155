//! Database models
//!
//! Rust structs representing stored entities.
//! All models use serde for JSON output.

use crate::config::DEFAULT_DAILY_GOAL_ML;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Kind of drink recorded with an event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DrinkType {
    Water,
    Tea,
    Juice,
    Milk,
    Coffee,
    Soda,
    Other,
}

impl DrinkType {
    pub const ALL: [DrinkType; 7] = [
        DrinkType::Water,
        DrinkType::Tea,
        DrinkType::Juice,
        DrinkType::Milk,
        DrinkType::Coffee,
        DrinkType::Soda,
        DrinkType::Other,
    ];

    /// Parse a user-supplied type name. Unknown names become `Other`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "water" => DrinkType::Water,
            "tea" => DrinkType::Tea,
            "juice" => DrinkType::Juice,
            "milk" => DrinkType::Milk,
            "coffee" => DrinkType::Coffee,
            "soda" => DrinkType::Soda,
            _ => DrinkType::Other,
        }
    }

    /// Share of the raw amount credited as hydration
    pub fn coefficient(self) -> f64 {
        match self {
            DrinkType::Water => 1.0,
            DrinkType::Tea => 0.9,
            DrinkType::Juice => 0.8,
            DrinkType::Milk => 0.7,
            DrinkType::Coffee => 0.6,
            DrinkType::Soda => 0.5,
            DrinkType::Other => 0.7,
        }
    }

    /// Effective hydration for `amount` millilitres of this drink
    pub fn hydration_for(self, amount: i64) -> i64 {
        (amount as f64 * self.coefficient()).round() as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrinkType::Water => "water",
            DrinkType::Tea => "tea",
            DrinkType::Juice => "juice",
            DrinkType::Milk => "milk",
            DrinkType::Coffee => "coffee",
            DrinkType::Soda => "soda",
            DrinkType::Other => "other",
        }
    }
}

impl From<&str> for DrinkType {
    fn from(raw: &str) -> Self {
        DrinkType::normalize(raw)
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One recorded drink. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DrinkEvent {
    pub id: i64,
    pub drink_type: DrinkType,
    /// Raw amount in millilitres
    pub amount: i64,
    /// Hydration credited at write time
    pub hydration: i64,
    /// Local calendar date of the drink
    pub date: NaiveDate,
    /// Local wall-clock time, `HH:MM:SS`
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// Hydration total for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub hydration: i64,
}

/// Last known location of the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub updated_at: DateTime<Utc>,
}

/// Application settings singleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_daily_goal")]
    pub daily_goal: i64,
    #[serde(default)]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub location: Option<Location>,
}

fn default_daily_goal() -> i64 {
    DEFAULT_DAILY_GOAL_ML
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: default_daily_goal(),
            notifications_enabled: false,
            location: None,
        }
    }
}
