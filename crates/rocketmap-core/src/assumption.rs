use crate::error::{Result, RocketMapError};
use crate::experiment::Experiment;
use crate::types::{AssumptionCategory, AssumptionStatus, BlockType, RiskLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BlockRef — tag normalization at the API boundary
// ---------------------------------------------------------------------------

/// A block-type tag as it arrives from clients: either a bare block-type
/// string or a nested object carrying a `block_type` field. Everything past
/// the API boundary works with plain `BlockType` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockRef {
    Bare(BlockType),
    Object { block_type: BlockType },
}

impl BlockRef {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockRef::Bare(bt) => *bt,
            BlockRef::Object { block_type } => *block_type,
        }
    }
}

/// Resolve a mixed list of tag shapes to a deduplicated `Vec<BlockType>`,
/// preserving first-seen order.
pub fn normalize_blocks(refs: &[BlockRef]) -> Vec<BlockType> {
    let mut out = Vec::with_capacity(refs.len());
    for r in refs {
        let bt = r.block_type();
        if !out.contains(&bt) {
            out.push(bt);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// NewAssumption
// ---------------------------------------------------------------------------

/// Creation parameters for an assumption. `risk_level` may be supplied
/// directly; when absent it is derived once from `severity_score`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAssumption {
    pub statement: String,
    pub category: AssumptionCategory,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    pub severity_score: u8,
    #[serde(default = "default_confidence")]
    pub confidence_score: f64,
    #[serde(default)]
    pub blocks: Vec<BlockRef>,
    #[serde(default)]
    pub segments: Vec<String>,
}

fn default_confidence() -> f64 {
    0.0
}

// ---------------------------------------------------------------------------
// Assumption
// ---------------------------------------------------------------------------

/// A testable claim about the business, tied to zero or more canvas blocks.
///
/// `status` and `risk_level` are independent axes: a refuted assumption may
/// still carry `risk_level = high`, and the severity-to-risk-level mapping
/// is applied only at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assumption {
    pub id: String,
    pub statement: String,
    pub category: AssumptionCategory,
    pub status: AssumptionStatus,
    pub risk_level: RiskLevel,
    pub severity_score: u8,
    pub confidence_score: f64,
    #[serde(default)]
    pub blocks: Vec<BlockType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experiments: Vec<Experiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tested_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assumption {
    pub fn new(params: NewAssumption) -> Result<Self> {
        validate_severity(params.severity_score)?;
        validate_confidence(params.confidence_score)?;

        let risk_level = params
            .risk_level
            .unwrap_or_else(|| RiskLevel::from_severity(params.severity_score));
        let now = Utc::now();

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            statement: params.statement,
            category: params.category,
            status: AssumptionStatus::Untested,
            risk_level,
            severity_score: params.severity_score,
            confidence_score: params.confidence_score,
            blocks: normalize_blocks(&params.blocks),
            segments: params.segments,
            experiments: Vec::new(),
            last_tested_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn experiment(&self, id: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.id == id)
    }

    pub fn experiment_mut(&mut self, id: &str) -> Option<&mut Experiment> {
        self.experiments.iter_mut().find(|e| e.id == id)
    }
}

pub(crate) fn validate_severity(severity: u8) -> Result<()> {
    if severity > 10 {
        return Err(RocketMapError::InvalidScore {
            field: "severity_score",
            value: f64::from(severity),
            range: "0-10",
        });
    }
    Ok(())
}

pub(crate) fn validate_confidence(confidence: f64) -> Result<()> {
    if !confidence.is_finite() || !(0.0..=100.0).contains(&confidence) {
        return Err(RocketMapError::InvalidScore {
            field: "confidence_score",
            value: confidence,
            range: "0-100",
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn params(statement: &str) -> NewAssumption {
        NewAssumption {
            statement: statement.to_string(),
            category: AssumptionCategory::Market,
            risk_level: None,
            severity_score: 5,
            confidence_score: 40.0,
            blocks: vec![BlockRef::Bare(BlockType::Problem)],
            segments: vec![],
        }
    }

    #[test]
    fn new_assumption_starts_untested() {
        let a = Assumption::new(params("Customers will pay monthly")).unwrap();
        assert_eq!(a.status, AssumptionStatus::Untested);
        assert!(a.last_tested_at.is_none());
        assert!(a.experiments.is_empty());
    }

    #[test]
    fn risk_level_derived_from_severity_when_absent() {
        let mut p = params("x");
        p.severity_score = 8;
        assert_eq!(Assumption::new(p).unwrap().risk_level, RiskLevel::High);

        let mut p = params("x");
        p.severity_score = 2;
        assert_eq!(Assumption::new(p).unwrap().risk_level, RiskLevel::Low);
    }

    #[test]
    fn explicit_risk_level_wins_over_severity() {
        let mut p = params("x");
        p.severity_score = 9;
        p.risk_level = Some(RiskLevel::Low);
        assert_eq!(Assumption::new(p).unwrap().risk_level, RiskLevel::Low);
    }

    #[test]
    fn severity_out_of_range_rejected() {
        let mut p = params("x");
        p.severity_score = 11;
        assert!(Assumption::new(p).is_err());
    }

    #[test]
    fn confidence_out_of_range_rejected() {
        let mut p = params("x");
        p.confidence_score = 101.0;
        assert!(Assumption::new(p).is_err());

        let mut p = params("x");
        p.confidence_score = -1.0;
        assert!(Assumption::new(p).is_err());

        let mut p = params("x");
        p.confidence_score = f64::NAN;
        assert!(Assumption::new(p).is_err());
    }

    #[test]
    fn normalize_blocks_handles_both_shapes() {
        let refs = vec![
            BlockRef::Bare(BlockType::Channels),
            BlockRef::Object {
                block_type: BlockType::Problem,
            },
            BlockRef::Bare(BlockType::Channels), // duplicate
        ];
        assert_eq!(
            normalize_blocks(&refs),
            vec![BlockType::Channels, BlockType::Problem]
        );
    }

    #[test]
    fn block_ref_deserializes_bare_and_object() {
        let refs: Vec<BlockRef> =
            serde_json::from_str(r#"["channels", {"block_type": "problem"}]"#).unwrap();
        assert_eq!(
            normalize_blocks(&refs),
            vec![BlockType::Channels, BlockType::Problem]
        );
    }

    #[test]
    fn refuted_keeps_independent_risk_level() {
        let mut p = params("x");
        p.risk_level = Some(RiskLevel::High);
        let mut a = Assumption::new(p).unwrap();
        a.status = AssumptionStatus::Refuted;
        assert_eq!(a.risk_level, RiskLevel::High);
    }
}
