use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lexicon_worker::config::{LogFormat, WorkerConfig};
use lexicon_worker::jobs::daily_reset;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = WorkerConfig::from_env().expect("Invalid worker configuration");

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(
        reset_hour_utc = config.reset_hour_utc,
        run_once = config.run_once,
        max_connections = config.max_connections,
        "Loaded worker configuration"
    );

    // --- Database ---
    let pool = lexicon_db::create_pool(&config.database_url, config.max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    lexicon_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    lexicon_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    if config.run_once {
        match daily_reset::run_once(&pool).await {
            Ok(cleared) => tracing::info!(cleared, "Daily reset complete"),
            Err(e) => {
                tracing::error!(error = %e, "Daily reset failed");
                std::process::exit(1);
            }
        }
        return;
    }

    // --- Jobs ---
    let cancel = tokio_util::sync::CancellationToken::new();
    let reset_handle = tokio::spawn(daily_reset::run(
        pool.clone(),
        cancel.clone(),
        config.reset_hour_utc,
    ));

    shutdown_signal().await;

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), reset_handle).await;
    pool.close().await;
    tracing::info!("Worker shut down");
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lexicon_worker=debug,lexicon_db=info".into());

    let (plain, json) = match format {
        LogFormat::Plain => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
