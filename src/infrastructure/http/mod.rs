use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{audio::AudioController, health, script::ScriptController};
use crate::domain::audio::JobTable;
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::request_id_middleware;

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    job_table: Arc<JobTable>,
    audio_controller: Arc<AudioController>,
    script_controller: Arc<ScriptController>,
) -> Router {
    // Queued audio generation: POST submits, GET polls by requestId
    let audio_routes = Router::new()
        .route(
            "/api/queue-audio-generation",
            axum::routing::post(AudioController::queue).get(AudioController::status),
        )
        .with_state(audio_controller);

    let script_routes = Router::new()
        .route(
            "/api/generate-text",
            axum::routing::post(ScriptController::generate),
        )
        .with_state(script_controller);

    let app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(job_table)
        .merge(audio_routes)
        .merge(script_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    // The browser front end is served from its own dev server while developing
    if config.is_development() {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Start the HTTP server and run until ctrl-c
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped; in-flight jobs are dropped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
