mod api;
mod middleware;
mod pipeline;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::CronAuth,
    pipeline::PipelineRunner,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = talkdb_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = talkdb_db::PoolConfig::from_app_config(&config);
    let pool = talkdb_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = talkdb_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let runner = PipelineRunner::from_app_config(&config)?.map(Arc::new);
    if runner.is_none() {
        tracing::warn!("news or model credentials missing; daily update is disabled");
    }
    if config.cron_secret == talkdb_core::DEV_CRON_SECRET {
        tracing::warn!("using the development cron secret; set TALKDB_CRON_SECRET outside development");
    }

    let _scheduler =
        scheduler::build_scheduler(pool.clone(), runner.clone(), &config.pipeline_cron).await?;

    let auth = CronAuth::new(&config.cron_secret);
    let app = build_app(
        AppState {
            pool,
            pipeline: runner,
        },
        auth,
        default_rate_limit_state(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "talkdb server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
