use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::types::{ExperimentResult, ExperimentType};

#[derive(serde::Deserialize)]
pub struct CreateExperimentBody {
    pub experiment_type: ExperimentType,
    pub success_criteria: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// POST /api/canvases/:slug/assumptions/:id/experiments — plan an experiment.
/// An untested assumption moves to `testing`.
pub async fn create_experiment(
    State(app): State<AppState>,
    Path((slug, assumption_id)): Path<(String, String)>,
    Json(body): Json<CreateExperimentBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut canvas = Canvas::load(&root, &slug)?;
        let experiment = canvas
            .add_experiment(
                &assumption_id,
                body.experiment_type,
                body.success_criteria,
                body.source_url,
            )?
            .clone();
        canvas.save(&root)?;
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!(experiment))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CompleteExperimentBody {
    pub result: ExperimentResult,
    #[serde(default)]
    pub evidence: Option<String>,
}

/// POST /api/canvases/:slug/assumptions/:id/experiments/:eid/complete —
/// record the result and settle the owning assumption's status.
pub async fn complete_experiment(
    State(app): State<AppState>,
    Path((slug, assumption_id, experiment_id)): Path<(String, String, String)>,
    Json(body): Json<CompleteExperimentBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut canvas = Canvas::load(&root, &slug)?;
        canvas.complete_experiment(&assumption_id, &experiment_id, body.result, body.evidence)?;
        canvas.save(&root)?;
        let assumption = canvas.assumption(&assumption_id)?;
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "assumption_id": assumption.id,
            "status": assumption.status,
            "last_tested_at": assumption.last_tested_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
