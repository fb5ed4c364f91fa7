//! `rocketmap-scorer` — client for the external viability scoring service.
//!
//! The scoring service receives the nine canvas block texts plus any
//! validated-assumption evidence, and returns three 0-100 sub-scores
//! (assumption validity, market, unmet need) with its reasoning. This crate
//! owns the wire types, strict response validation, and the `reqwest`
//! client; aggregation of the sub-scores into an overall viability score
//! lives in `rocketmap-core`.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ScorerClient, API_KEY_ENV};
pub use error::ScorerError;
pub use types::{AssumptionPayload, BlockPayload, ScoreRequest, ScoreResponse};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, ScorerError>;
