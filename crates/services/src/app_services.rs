use std::sync::Arc;

use storage::repository::Storage;
use tutor_core::catalog::python_curriculum;
use tutor_core::model::Curriculum;

use crate::config::ProgressConfig;
use crate::error::AppServicesError;
use crate::progress::{LoadReport, ProgressService};

/// Assembles the app-facing progress service over the bundled curriculum.
pub struct AppServices {
    progress: ProgressService,
    load_report: LoadReport,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization, the bundled
    /// curriculum, or loading persisted progress fails.
    pub async fn new_sqlite(
        db_url: &str,
        config: ProgressConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::with_storage(&storage, Arc::new(python_curriculum()?), config).await
    }

    /// Build services over throwaway in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled curriculum is invalid.
    pub async fn in_memory(config: ProgressConfig) -> Result<Self, AppServicesError> {
        Self::with_storage(&Storage::in_memory(), Arc::new(python_curriculum()?), config).await
    }

    /// Build services from explicit parts and load persisted progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Progress` if loading persisted progress fails.
    pub async fn with_storage(
        storage: &Storage,
        curriculum: Arc<Curriculum>,
        config: ProgressConfig,
    ) -> Result<Self, AppServicesError> {
        let mut progress = ProgressService::new(curriculum, Arc::clone(&storage.progress), config);
        let load_report = progress.initialize().await?;
        Ok(Self {
            progress,
            load_report,
        })
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressService {
        &mut self.progress
    }

    #[must_use]
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }
}
