//! Services module
//!
//! Business logic services that coordinate between commands and repository.

pub mod drinks;
pub mod settings;

pub use drinks::{DrinksService, WeeklyReport};
pub use settings::SettingsService;
