//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use snipsync_core::config::worker::WorkerConfig;
use snipsync_core::error::AppError;

use crate::jobs::cleanup::ShareCodeSweepJob;

/// Cron-based scheduler for periodic background tasks.
pub struct CronScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Worker configuration.
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, config })
    }

    /// Register all default scheduled tasks.
    pub async fn register_default_tasks(
        &self,
        sweep: Arc<ShareCodeSweepJob>,
    ) -> Result<(), AppError> {
        self.register_share_code_sweep(sweep).await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Expired share-code sweep, on the configured schedule.
    async fn register_share_code_sweep(
        &self,
        sweep: Arc<ShareCodeSweepJob>,
    ) -> Result<(), AppError> {
        let schedule = self.config.share_code_sweep_schedule.clone();

        let job = CronJob::new_async(schedule.as_str(), move |_uuid, _lock| {
            let sweep = Arc::clone(&sweep);
            Box::pin(async move {
                if let Err(e) = sweep.run().await {
                    tracing::error!("Share-code sweep failed: {e}");
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create share_code_sweep schedule: {e}"))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add share_code_sweep schedule: {e}"))
        })?;

        tracing::info!(schedule = %schedule, "Registered: share_code_sweep");
        Ok(())
    }
}
