pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, patch, post, put};
use axum::Router;
use rocketmap_scorer::ScorerClient;
use std::path::PathBuf;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// The scorer client is injected so tests can point it at a mock server.
pub fn build_router(root: PathBuf, scorer: ScorerClient) -> Router {
    let app_state = state::AppState::new(root, scorer);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Canvases
        .route("/api/canvases", get(routes::canvases::list_canvases))
        .route("/api/canvases", post(routes::canvases::create_canvas))
        .route("/api/canvases/{slug}", get(routes::canvases::get_canvas))
        .route(
            "/api/canvases/{slug}/blocks/{block_type}",
            put(routes::canvases::update_block),
        )
        // Assumptions
        .route(
            "/api/canvases/{slug}/assumptions",
            get(routes::assumptions::list_assumptions),
        )
        .route(
            "/api/canvases/{slug}/assumptions",
            post(routes::assumptions::create_assumption),
        )
        .route(
            "/api/canvases/{slug}/assumptions/{id}",
            patch(routes::assumptions::patch_assumption),
        )
        // Experiments
        .route(
            "/api/canvases/{slug}/assumptions/{id}/experiments",
            post(routes::experiments::create_experiment),
        )
        .route(
            "/api/canvases/{slug}/assumptions/{id}/experiments/{eid}/complete",
            post(routes::experiments::complete_experiment),
        )
        // Risk heat map
        .route("/api/canvases/{slug}/risk", get(routes::risk::get_risk))
        // Viability
        .route(
            "/api/canvases/{slug}/viability",
            get(routes::viability::get_viability),
        )
        .route(
            "/api/canvases/{slug}/viability",
            post(routes::viability::compute_viability),
        )
        .layer(cors)
        .with_state(app_state)
}

/// Build a scorer client from the project config (or defaults when the
/// project is not initialized yet).
pub fn scorer_from_config(root: &std::path::Path) -> ScorerClient {
    let config = rocketmap_core::config::Config::load(root)
        .map(|c| c.scorer)
        .unwrap_or_default();
    ScorerClient::new(config.endpoint, Duration::from_secs(config.timeout_secs))
}

/// Start the RocketMap API server.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let scorer = scorer_from_config(&root);
    let app = build_router(root, scorer);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("RocketMap server listening on http://localhost:{port}");

    if open_browser {
        let url = format!("http://localhost:{port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the RocketMap API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let scorer = scorer_from_config(&root);
    let app = build_router(root, scorer);

    tracing::info!("RocketMap server listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
