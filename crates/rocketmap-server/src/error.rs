use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rocketmap_core::RocketMapError;
use rocketmap_scorer::ScorerError;

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Scorer failures are an upstream-collaborator problem, not ours.
        if self.0.downcast_ref::<ScorerError>().is_some() {
            tracing::warn!(error = %self.0, "viability scoring failed");
            let body = serde_json::json!({ "error": "viability scoring failed" });
            return (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<RocketMapError>() {
            match e {
                RocketMapError::NotInitialized => StatusCode::BAD_REQUEST,
                RocketMapError::CanvasNotFound(_)
                | RocketMapError::AssumptionNotFound(_)
                | RocketMapError::ExperimentNotFound(_) => StatusCode::NOT_FOUND,
                RocketMapError::CanvasExists(_)
                | RocketMapError::ExperimentAlreadyCompleted(_) => StatusCode::CONFLICT,
                RocketMapError::InvalidSlug(_)
                | RocketMapError::InvalidBlockType(_)
                | RocketMapError::InvalidStatus(_)
                | RocketMapError::InvalidCategory(_)
                | RocketMapError::InvalidRiskLevel(_)
                | RocketMapError::InvalidScore { .. } => StatusCode::BAD_REQUEST,
                RocketMapError::IncompleteCanvas { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                RocketMapError::Io(_) | RocketMapError::Yaml(_) | RocketMapError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
