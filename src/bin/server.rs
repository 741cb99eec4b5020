//! # Renewal Health Server
//!
//! Standalone server exposing the admin health endpoint.
//!
//! ## Usage
//!
//! ```bash
//! RENEWAL_HEALTH__AUTH__ADMIN_API_KEY=change-me cargo run --bin renewal-health-server
//!
//! # Feed the in-process tracker
//! curl -X POST -H 'x-admin-api-key: change-me' -H 'content-type: application/json' \
//!   -d '{"kind": "renewal_failure"}' localhost:8080/admin/activity
//!
//! # Alternate config file and JSON logs
//! RENEWAL_HEALTH_CONFIG_PATH=/etc/renewal-health.toml \
//! RENEWAL_HEALTH_LOG_FORMAT=json \
//!   cargo run --bin renewal-health-server
//! ```

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use renewal_health::auth::AdminAuthenticator;
use renewal_health::config::ConfigManager;
use renewal_health::health::{HealthAggregationService, PipelineActivityTracker};
use renewal_health::logging;
use renewal_health::web::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    info!("Starting renewal health server");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));

    let manager = ConfigManager::load().context("Failed to load configuration")?;
    let config = manager.config();
    info!("   Environment: {}", manager.environment());

    let tracker = Arc::new(PipelineActivityTracker::new());
    let service = Arc::new(HealthAggregationService::from_config(tracker.clone(), config));
    let authenticator = Arc::new(
        AdminAuthenticator::from_config(&config.auth)
            .context("Failed to build admin authenticator")?,
    );

    // Snapshots fail as unavailable until the pipeline posts its first event
    let app = create_app(
        AppState::new(service, authenticator).with_activity_tracker(tracker),
        config.web.request_timeout(),
    );

    let listener = TcpListener::bind(&config.web.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.web.bind_address))?;
    info!("   Listening on {}", config.web.bind_address);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server terminated with an error")?;

    info!("Renewal health server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
