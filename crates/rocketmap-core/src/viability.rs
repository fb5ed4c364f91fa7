use crate::canvas::Canvas;
use crate::error::{Result, RocketMapError};
use crate::types::{AssumptionStatus, BlockType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum trimmed length for every block before viability can be scored.
pub const MIN_BLOCK_CONTENT: usize = 10;

// ---------------------------------------------------------------------------
// ValidatedAssumption
// ---------------------------------------------------------------------------

/// Per-block summary of a validated assumption, carried alongside the
/// overall score as its justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedAssumption {
    pub block_type: BlockType,
    pub statement: String,
    pub status: AssumptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

// ---------------------------------------------------------------------------
// ViabilityData
// ---------------------------------------------------------------------------

/// The persisted viability record. A fresh aggregation fully replaces any
/// prior record; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViabilityData {
    pub overall_score: u32,
    pub assumptions_score: u32,
    pub market_score: u32,
    pub unmet_need_score: u32,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validated_assumptions: Vec<ValidatedAssumption>,
    pub calculated_at: DateTime<Utc>,
}

impl ViabilityData {
    /// Bundle three sub-scores and their justification into the record,
    /// stamped at aggregation time (not at the external scoring call).
    pub fn aggregate(
        assumptions_score: u32,
        market_score: u32,
        unmet_need_score: u32,
        reasoning: impl Into<String>,
        validated_assumptions: Vec<ValidatedAssumption>,
    ) -> ViabilityData {
        ViabilityData {
            overall_score: overall_score(assumptions_score, market_score, unmet_need_score),
            assumptions_score,
            market_score,
            unmet_need_score,
            reasoning: reasoning.into(),
            validated_assumptions,
            calculated_at: Utc::now(),
        }
    }
}

/// Fixed 40/30/30 weighting of the three sub-scores, rounded to the
/// nearest integer.
pub fn overall_score(assumptions: u32, market: u32, unmet_need: u32) -> u32 {
    (f64::from(assumptions) * 0.4 + f64::from(market) * 0.3 + f64::from(unmet_need) * 0.3).round()
        as u32
}

/// Viability precondition: all nine blocks present and every block's
/// effective text at least [`MIN_BLOCK_CONTENT`] chars after trimming.
/// Checked before the external scorer is contacted; a violation names the
/// offending block.
pub fn validate_blocks(canvas: &Canvas) -> Result<()> {
    for &bt in BlockType::all() {
        let Some(block) = canvas.block(bt) else {
            return Err(RocketMapError::IncompleteCanvas {
                block: bt.to_string(),
                reason: "is missing".to_string(),
            });
        };
        if block.text().trim().chars().count() < MIN_BLOCK_CONTENT {
            return Err(RocketMapError::IncompleteCanvas {
                block: bt.to_string(),
                reason: format!("needs at least {MIN_BLOCK_CONTENT} characters of content"),
            });
        }
    }
    Ok(())
}

/// Collect the validated-assumption summaries sent to the scorer: one
/// entry per (block, validated assumption) pair, in canonical block order.
pub fn validated_summaries(canvas: &Canvas) -> Vec<ValidatedAssumption> {
    let mut out = Vec::new();
    for &bt in BlockType::all() {
        for a in &canvas.assumptions {
            if a.status == AssumptionStatus::Validated && a.blocks.contains(&bt) {
                let evidence = a
                    .experiments
                    .iter()
                    .rev()
                    .find_map(|e| e.evidence.clone());
                out.push(ValidatedAssumption {
                    block_type: bt,
                    statement: a.statement.clone(),
                    status: a.status,
                    evidence,
                });
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
