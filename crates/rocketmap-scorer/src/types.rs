use crate::error::{Result, ScorerError};
use rocketmap_core::types::{AssumptionStatus, BlockType};
use rocketmap_core::viability::ValidatedAssumption;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockPayload {
    pub block_type: BlockType,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumptionPayload {
    pub block_type: BlockType,
    pub statement: String,
    pub status: AssumptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl From<ValidatedAssumption> for AssumptionPayload {
    fn from(v: ValidatedAssumption) -> Self {
        Self {
            block_type: v.block_type,
            statement: v.statement,
            status: v.status,
            evidence: v.evidence,
        }
    }
}

/// The fixed request shape sent to the scoring service: the nine block
/// texts plus the canvas's validated-assumption evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub model: String,
    pub blocks: Vec<BlockPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validated_assumptions: Vec<AssumptionPayload>,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Three 0-100 sub-scores plus the reasoning behind them. `validate()`
/// enforces the schema contract before anything downstream runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub assumptions_score: u32,
    pub market_score: u32,
    pub unmet_need_score: u32,
    pub reasoning: String,
}

impl ScoreResponse {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("assumptions_score", self.assumptions_score),
            ("market_score", self.market_score),
            ("unmet_need_score", self.unmet_need_score),
        ] {
            if value > 100 {
                return Err(ScorerError::Schema(format!(
                    "{name} out of range: {value} (expected 0-100)"
                )));
            }
        }
        if self.reasoning.trim().is_empty() {
            return Err(ScorerError::Schema("reasoning is empty".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
