use crate::error::{Result, ScorerError};
use crate::types::{ScoreRequest, ScoreResponse};
use std::time::Duration;

/// Environment variable holding the scoring service API key.
pub const API_KEY_ENV: &str = "ROCKETMAP_SCORER_KEY";

// ---------------------------------------------------------------------------
// ScorerClient
// ---------------------------------------------------------------------------

/// HTTP client for the viability scoring service. One POST per score, no
/// internal retry; callers that need resilience add it at their boundary.
#[derive(Debug, Clone)]
pub struct ScorerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ScorerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: std::env::var(API_KEY_ENV).ok(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Score a canvas. Validates the response against the expected schema;
    /// any HTTP failure, non-2xx status, or schema mismatch fails the whole
    /// operation so no partial result escapes.
    pub async fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse> {
        let url = format!("{}/v1/score", self.base_url);
        tracing::debug!(url = %url, model = %request.model, blocks = request.blocks.len(), "scoring canvas");

        let mut req = self.http.post(&url).json(request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ScorerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed: ScoreResponse =
            serde_json::from_str(&body).map_err(|e| ScorerError::Schema(e.to_string()))?;
        parsed.validate()?;
        Ok(parsed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
