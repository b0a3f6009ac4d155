//! Application configuration constants
//!
//! Central location for storage names, validation boundaries and
//! defaults used throughout the application.

// ===== Storage =====

/// Database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "waterlog.db";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "WATERLOG_DATA_DIR";

/// Fixed key of the settings singleton
pub const SETTINGS_KEY: &str = "app";

// ===== Drink Limits =====

/// Smallest accepted drink amount in millilitres
pub const MIN_DRINK_AMOUNT_ML: i64 = 1;

/// Largest accepted drink amount in millilitres.
/// Anything above is almost certainly a typo.
pub const MAX_DRINK_AMOUNT_ML: i64 = 5_000;

// ===== Goal Limits =====

/// Daily goal applied until the user saves one
pub const DEFAULT_DAILY_GOAL_ML: i64 = 2_000;

/// Minimum daily goal accepted from the settings surface
pub const MIN_DAILY_GOAL_ML: i64 = 500;

/// Maximum daily goal accepted from the settings surface
pub const MAX_DAILY_GOAL_ML: i64 = 5_000;

// ===== Statistics =====

/// Number of days in the weekly series, ending today
pub const WEEKLY_SERIES_DAYS: i64 = 7;
