//! Background job scheduler.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::pipeline::PipelineRunner;

/// Build and start the scheduler, registering the daily update when a
/// pipeline is configured.
///
/// The returned handle must be kept alive; dropping it stops all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be created, the
/// cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    runner: Option<Arc<PipelineRunner>>,
    cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    match runner {
        Some(runner) => register_daily_update_job(&scheduler, pool, runner, cron).await?,
        None => tracing::warn!("scheduler: pipeline credentials missing; daily update not scheduled"),
    }

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_daily_update_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    runner: Arc<PipelineRunner>,
    cron: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let pool = pool.clone();
        let runner = Arc::clone(&runner);

        Box::pin(async move {
            tracing::info!("scheduler: starting daily update");
            match runner.run(&pool).await {
                Ok(summary) => tracing::info!(
                    saved = summary.saved,
                    mode = ?summary.mode,
                    "scheduler: daily update complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: daily update failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron, "scheduler: daily update registered");
    Ok(())
}
