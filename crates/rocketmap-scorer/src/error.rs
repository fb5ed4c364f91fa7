use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("scorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scorer returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("scorer response did not match the expected schema: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, ScorerError>;
