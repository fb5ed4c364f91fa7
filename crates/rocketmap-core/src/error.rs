use thiserror::Error;

#[derive(Debug, Error)]
pub enum RocketMapError {
    #[error("not initialized: run 'rocketmap init'")]
    NotInitialized,

    #[error("canvas not found: {0}")]
    CanvasNotFound(String),

    #[error("canvas already exists: {0}")]
    CanvasExists(String),

    #[error("assumption not found: {0}")]
    AssumptionNotFound(String),

    #[error("experiment not found: {0}")]
    ExperimentNotFound(String),

    #[error("experiment already completed: {0}")]
    ExperimentAlreadyCompleted(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid block type: {0}")]
    InvalidBlockType(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("invalid risk level: {0}")]
    InvalidRiskLevel(String),

    #[error("invalid {field}: {value} (expected {range})")]
    InvalidScore {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("canvas incomplete: block '{block}' {reason}")]
    IncompleteCanvas { block: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RocketMapError>;
