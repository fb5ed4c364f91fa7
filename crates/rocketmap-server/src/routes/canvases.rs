use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::types::BlockType;

/// GET /api/canvases — list all canvases.
pub async fn list_canvases(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let canvases = Canvas::list(&root)?;
        let list: Vec<serde_json::Value> = canvases
            .iter()
            .map(|c| {
                serde_json::json!({
                    "slug": c.slug,
                    "title": c.title,
                    "description": c.description,
                    "assumption_count": c.assumptions.len(),
                    "overall_score": c.viability.as_ref().map(|v| v.overall_score),
                    "updated_at": c.updated_at,
                })
            })
            .collect();
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct CreateCanvasBody {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/canvases — create a canvas; the slug is derived from the title
/// with collision probing.
pub async fn create_canvas(
    State(app): State<AppState>,
    Json(body): Json<CreateCanvasBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let slug = rocketmap_core::slug::unique_slug(&root, &body.title);
        let mut canvas = Canvas::create(&root, slug, body.title)?;
        if body.description.is_some() {
            canvas.description = body.description;
            canvas.save(&root)?;
        }
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "slug": canvas.slug,
            "title": canvas.title,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/canvases/:slug — full canvas detail.
pub async fn get_canvas(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let c = Canvas::load(&root, &slug)?;
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "slug": c.slug,
            "title": c.title,
            "description": c.description,
            "blocks": c.blocks,
            "assumptions": c.assumptions,
            "viability": c.viability,
            "created_at": c.created_at,
            "updated_at": c.updated_at,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct UpdateBlockBody {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub lean_content: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// PUT /api/canvases/:slug/blocks/:block_type — update one block's content.
pub async fn update_block(
    State(app): State<AppState>,
    Path((slug, block_type)): Path<(String, String)>,
    Json(body): Json<UpdateBlockBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let block_type: BlockType = block_type.parse()?;
        let mut canvas = Canvas::load(&root, &slug)?;
        canvas.update_block(block_type, body.content, body.lean_content, body.notes)?;
        canvas.save(&root)?;
        let block = canvas.block(block_type);
        Ok::<_, rocketmap_core::RocketMapError>(serde_json::json!({
            "slug": canvas.slug,
            "block": block,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
