use crate::assumption::Assumption;
use crate::types::{AssumptionStatus, BlockType, BorderTier, RiskLevel};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RiskMetrics
// ---------------------------------------------------------------------------

/// Per-block risk summary rendered as a heat-map cell. Derived on demand
/// from the canvas's assumption list; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub risk_score: u32,
    pub confidence_score: u32,
    pub untested_high_risk: u32,
    pub untested_medium_risk: u32,
    pub untested_low_risk: u32,
    pub top_risks: Vec<String>,
}

/// Most statements shown per heat-map cell.
const TOP_RISKS_LIMIT: usize = 3;

impl RiskMetrics {
    /// Compute the metrics for one block from the canvas's full assumption
    /// set. Pure and total: any well-formed input yields a result, an empty
    /// or unmatched list yields all zeros.
    ///
    /// The risk score is a clamped sum of status/risk-level penalties;
    /// severity scores do not weight it.
    pub fn compute(block_type: BlockType, assumptions: &[Assumption]) -> RiskMetrics {
        let linked: Vec<&Assumption> = assumptions
            .iter()
            .filter(|a| a.blocks.contains(&block_type))
            .collect();

        let mut risk_score: u32 = 0;
        let mut untested_high_risk = 0;
        let mut untested_medium_risk = 0;
        let mut untested_low_risk = 0;
        let mut top_risks = Vec::new();

        for a in &linked {
            risk_score += match a.status {
                AssumptionStatus::Untested => match a.risk_level {
                    RiskLevel::High => 30,
                    RiskLevel::Medium => 15,
                    RiskLevel::Low => 5,
                },
                AssumptionStatus::Refuted => 40,
                AssumptionStatus::Inconclusive => 10,
                AssumptionStatus::Validated | AssumptionStatus::Testing => 0,
            };

            if a.status == AssumptionStatus::Untested {
                match a.risk_level {
                    RiskLevel::High => {
                        untested_high_risk += 1;
                        if top_risks.len() < TOP_RISKS_LIMIT {
                            top_risks.push(a.statement.clone());
                        }
                    }
                    RiskLevel::Medium => untested_medium_risk += 1,
                    RiskLevel::Low => untested_low_risk += 1,
                }
            }
        }

        let confidence_score = if linked.is_empty() {
            0
        } else {
            let sum: f64 = linked.iter().map(|a| a.confidence_score).sum();
            (sum / linked.len() as f64).round() as u32
        };

        RiskMetrics {
            risk_score: risk_score.min(100),
            confidence_score,
            untested_high_risk,
            untested_medium_risk,
            untested_low_risk,
            top_risks,
        }
    }

    pub fn border_tier(&self) -> BorderTier {
        border_tier(self.risk_score, self.confidence_score)
    }
}

/// Map (risk, confidence) to a presentation tier. Fixed thresholds,
/// first match wins; the risk rules take priority over the confidence rule.
pub fn border_tier(risk_score: u32, confidence_score: u32) -> BorderTier {
    if risk_score >= 70 {
        BorderTier::Critical
    } else if risk_score >= 40 {
        BorderTier::Warning
    } else if confidence_score >= 70 {
        BorderTier::Healthy
    } else {
        BorderTier::Neutral
    }
}

/// Compute metrics for all nine blocks in canonical order, for the
/// heat-map view.
pub fn heat_map(assumptions: &[Assumption]) -> Vec<(BlockType, RiskMetrics)> {
    BlockType::all()
        .iter()
        .map(|&bt| (bt, RiskMetrics::compute(bt, assumptions)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
