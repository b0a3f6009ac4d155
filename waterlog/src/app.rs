//! Application state and initialization
//!
//! `AppState` owns the data directory and the lazily opened store handle.
//! Services are built on demand from that handle; there is no global
//! database connection.

use crate::config::{DATABASE_FILE_NAME, DATA_DIR_ENV};
use crate::database::{create_pool, Repository};
use crate::error::{AppError, Result};
use crate::services::{DrinksService, SettingsService};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// Central application state
pub struct AppState {
    pub app_data_dir: PathBuf,
    repo: OnceCell<Repository>,
}

impl AppState {
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self {
            app_data_dir,
            repo: OnceCell::new(),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.app_data_dir.join(DATABASE_FILE_NAME)
    }

    /// Open the store on first use. Concurrent callers wait for the same
    /// initialization and share the resulting handle.
    pub async fn repository(&self) -> Result<&Repository> {
        self.repo
            .get_or_try_init(|| async {
                let pool = create_pool(&self.db_path()).await?;
                Ok::<_, AppError>(Repository::new(pool))
            })
            .await
    }

    pub async fn drinks(&self) -> Result<DrinksService> {
        Ok(DrinksService::new(self.repository().await?.clone()))
    }

    pub async fn settings(&self) -> Result<SettingsService> {
        Ok(SettingsService::new(self.repository().await?.clone()))
    }
}

/// Platform data directory, unless `WATERLOG_DATA_DIR` is set
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "waterlog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AppError::Generic("Failed to resolve a data directory".to_string()))
}

/// Application setup - called once on startup
pub fn setup(app_data_dir: &Path) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", app_data_dir);

    std::fs::create_dir_all(app_data_dir)?;

    let state = AppState::new(app_data_dir.to_path_buf());

    tracing::info!("Application initialized successfully");

    Ok(state)
}
