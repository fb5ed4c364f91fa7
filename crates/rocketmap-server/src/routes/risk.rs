use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::config::Config;
use rocketmap_core::risk;

/// GET /api/canvases/:slug/risk — risk metrics for all nine blocks, keyed
/// by block type, for the heat-map view.
pub async fn get_risk(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root).unwrap_or_else(|_| Config::new("default"));
        let canvas = Canvas::load(&root, &slug)?;
        let assumptions = canvas.assumptions_capped(&config);

        let mut blocks = serde_json::Map::new();
        for (block_type, metrics) in risk::heat_map(assumptions) {
            let tier = metrics.border_tier();
            let mut cell = serde_json::to_value(&metrics)?;
            if let Some(obj) = cell.as_object_mut() {
                obj.insert("border_tier".to_string(), serde_json::json!(tier));
            }
            blocks.insert(block_type.to_string(), cell);
        }

        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "slug": canvas.slug,
            "blocks": blocks,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
