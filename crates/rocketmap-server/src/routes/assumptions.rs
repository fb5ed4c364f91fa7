use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use rocketmap_core::assumption::NewAssumption;
use rocketmap_core::canvas::{AssumptionPatch, Canvas};
use rocketmap_core::config::Config;

/// GET /api/canvases/:slug/assumptions — list the canvas's assumptions,
/// capped at the configured per-query maximum.
pub async fn list_assumptions(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root).unwrap_or_else(|_| Config::new("default"));
        let canvas = Canvas::load(&root, &slug)?;
        let list = canvas.assumptions_capped(&config);
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "slug": canvas.slug,
            "assumptions": list,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/canvases/:slug/assumptions — add an assumption. Block tags may
/// arrive as bare block-type strings or nested objects; both are normalized
/// here at the boundary.
pub async fn create_assumption(
    State(app): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<NewAssumption>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut canvas = Canvas::load(&root, &slug)?;
        let assumption = canvas.add_assumption(body)?.clone();
        canvas.save(&root)?;
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!(assumption))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// PATCH /api/canvases/:slug/assumptions/:id — partial update; status and
/// risk level are edited independently.
pub async fn patch_assumption(
    State(app): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Json(body): Json<AssumptionPatch>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut canvas = Canvas::load(&root, &slug)?;
        let assumption = canvas.patch_assumption(&id, body)?.clone();
        canvas.save(&root)?;
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!(assumption))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
