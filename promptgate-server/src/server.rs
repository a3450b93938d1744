use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::post;
use promptgate::{Client, ServiceTarget};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers;

/// Inline media is base64-expanded into the JSON body, so the cap is well
/// above typical payloads.
const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

/// Shared, immutable per-process state. Cloned handles only; no mutable
/// state is shared across requests.
pub struct AppState {
    pub client: Client,
    pub target: ServiceTarget,
    pub media_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: Arc<AppState>) -> Router {
    let media_dir = state.media_dir.clone();

    Router::new()
        .route("/generate-text", post(handlers::generate_text))
        .route("/generate-text-streaming", post(handlers::generate_text_streaming))
        .route("/generate-with-image", post(handlers::generate_with_image))
        .route("/generate-with-images", post(handlers::generate_with_images))
        .route("/generate-with-audio", post(handlers::generate_with_audio))
        .route("/generate-with-video", post(handlers::generate_with_video))
        .nest_service("/public", ServeDir::new(media_dir))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let client = Client::builder().with_poll_interval(config.poll_interval).build();
    let target = ServiceTarget::default().with_model(config.model.as_str());

    let state = Arc::new(AppState {
        client,
        target,
        media_dir: config.media_dir.clone(),
    });
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        media_dir = %config.media_dir.display(),
        model = %config.model,
        "promptgate server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
