use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::config::Config;
use rocketmap_core::types::BlockType;
use rocketmap_core::viability::{self, ViabilityData};
use rocketmap_scorer::{BlockPayload, ScoreRequest};

/// GET /api/canvases/:slug/viability — the stored viability record.
pub async fn get_viability(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let canvas = Canvas::load(&root, &slug)?;
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "slug": canvas.slug,
            "viability": canvas.viability,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/canvases/:slug/viability — score the canvas and persist the
/// record, fully replacing any prior one.
///
/// Preconditions (all nine blocks present with enough content) are checked
/// before the scorer is contacted; scorer failure leaves the canvas
/// untouched.
pub async fn compute_viability(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Phase 1: load, check preconditions, build the scoring request.
    let root = app.root.clone();
    let load_slug = slug.clone();
    let request = tokio::task::spawn_blocking(move || {
        let config = Config::load(&root).unwrap_or_else(|_| Config::new("default"));
        let canvas = Canvas::load(&root, &load_slug)?;
        viability::validate_blocks(&canvas)?;

        let blocks = BlockType::all()
            .iter()
            .filter_map(|&bt| canvas.block(bt))
            .map(|b| BlockPayload {
                block_type: b.block_type,
                content: b.text().trim().to_string(),
            })
            .collect();
        let validated = viability::validated_summaries(&canvas)
            .into_iter()
            .map(Into::into)
            .collect();

        Ok::<_, rocketmap_core::RocketMapError>(ScoreRequest {
            model: config.scorer.model,
            blocks,
            validated_assumptions: validated,
        })
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    // Phase 2: one external scoring call. Any failure propagates with no
    // partial write.
    let response = app.scorer.score(&request).await?;

    // Phase 3: aggregate and persist in a single save.
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut canvas = Canvas::load(&root, &slug)?;
        let summaries = viability::validated_summaries(&canvas);
        let record = ViabilityData::aggregate(
            response.assumptions_score,
            response.market_score,
            response.unmet_need_score,
            response.reasoning,
            summaries,
        );
        canvas.set_viability(record);
        canvas.save(&root)?;
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "slug": canvas.slug,
            "viability": canvas.viability,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
