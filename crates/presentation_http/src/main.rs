//! Feedback moderation HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{
    ContentFilter, DenylistStore, FeedbackIntakeService, ModerationService, SpamDetector,
    ports::DenylistSourcePort,
};
use axum::http::{HeaderName, HeaderValue, Method};
use infrastructure::{
    AppConfig, ServerConfig, connect_submission_history, denylist_source_from_config,
    init_telemetry,
};
use presentation_http::{
    AppState, DenylistReloader, RequestIdLayer, routes, set_expose_internal_errors,
    spawn_denylist_reload_handler,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_telemetry(&config.telemetry)?;
    config.validate().context("Invalid configuration")?;
    set_expose_internal_errors(config.expose_internal_errors());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Feedback moderation server starting"
    );

    // The engine cannot run without a denylist and a reachable history
    let source: Arc<dyn DenylistSourcePort> =
        Arc::from(denylist_source_from_config(&config.moderation.denylist)?);
    let denylist = Arc::new(
        DenylistStore::load(source.as_ref(), config.moderation.denylist.empty_policy())
            .await
            .context("Failed to load denylist")?,
    );

    let history = connect_submission_history(&config.database)
        .await
        .context("Failed to open submission history")?;
    if !history.is_available().await {
        anyhow::bail!("Submission history is unreachable");
    }

    let policy = config.moderation.threshold_policy()?;
    info!(
        window_secs = policy.window().as_secs(),
        max_submissions = policy.max_submissions(),
        recording_policy = %config.moderation.recording_policy,
        denylist_terms = denylist.len(),
        "Moderation configured"
    );

    let moderation = ModerationService::new(
        SpamDetector::new(Arc::clone(&history), policy),
        ContentFilter::new(Arc::clone(&denylist)),
    );
    let intake = FeedbackIntakeService::new(
        moderation,
        history,
        config.moderation.recording_policy,
    );

    spawn_denylist_reload_handler(DenylistReloader::new(Arc::clone(&denylist), source));

    let server = config.server.clone();
    let state = AppState::new(intake, denylist, config);

    // Add middleware (order matters: last added = outermost)
    let mut app = routes::create_router(state).layer(TraceLayer::new_for_http());
    if let Some(cors) = cors_layer(&server) {
        app = app.layer(cors);
    }
    let app = app.layer(RequestIdLayer::new());

    let addr = server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);
    info!("API docs: http://{}/api-docs/openapi.json", addr);
    info!("SIGHUP reloads the denylist (Unix only)");

    let shutdown_timeout = Duration::from_secs(server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Build the CORS layer, or `None` when CORS is disabled
fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }

    let layer = if server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| {
                o.parse::<HeaderValue>()
                    .inspect_err(|_| warn!(origin = %o, "Ignoring invalid CORS origin"))
                    .ok()
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    Some(layer.expose_headers([HeaderName::from_static("x-request-id")]))
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    info!("Waiting up to {:?} for connections to close", timeout);
    // Connection draining is handled by axum's graceful_shutdown
}
