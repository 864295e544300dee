//! Server initialization and startup logic for NodeQueue.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nodequeue_api::{shutdown_signal, ApiConfig, ApiServer, AppState};
use nodequeue_config::{Config, ConfigValidator, LoggingConfig};
use nodequeue_store::SqlitePriorityStore;

/// Initialize tracing with console and optional file output.
///
/// `RUST_LOG` takes precedence over the configured level. When a log
/// directory is configured, files rotate daily and the last 30 are kept.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)?,
    };

    let file_layer = match &logging.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("nodequeue")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Dropping the guard stops the writer thread.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Open the database and serve until a shutdown signal arrives.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    info!("Starting NodeQueue v{}", env!("CARGO_PKG_VERSION"));

    let db_path = &config.storage.path;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let busy_timeout = Duration::from_millis(config.storage.busy_timeout_ms);
    let store = Arc::new(SqlitePriorityStore::open(db_path, busy_timeout).await?);
    info!("Node database opened at {}", db_path.display());

    let state = Arc::new(AppState::new(store.clone()));
    let server = ApiServer::new(
        ApiConfig::new(config.server.host.clone(), config.server.port),
        state,
    );
    server.run(shutdown_signal()).await?;
    drop(server);

    match Arc::into_inner(store) {
        Some(store) => {
            store.close().await?;
            info!("Node database closed");
        }
        None => warn!("Node database still referenced at shutdown, closing on drop"),
    }

    Ok(())
}
