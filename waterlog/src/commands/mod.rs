//! Command-line commands
//!
//! This module organizes commands into logical submodules:
//! - `drinks`: recording, listing and deleting drinks
//! - `stats`: daily progress, weekly series and type breakdown
//! - `settings`: goal, notifications and location

pub mod drinks;
pub mod settings;
pub mod stats;

use crate::error::Result;
use serde::Serialize;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
