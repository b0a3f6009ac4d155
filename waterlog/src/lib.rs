//! waterlog library
//!
//! Local hydration log: drink events and settings persisted in SQLite,
//! plus the daily, weekly and per-type statistics derived from them.

pub mod app;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod services;
pub mod stats;
