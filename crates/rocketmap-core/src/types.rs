use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// BlockType
// ---------------------------------------------------------------------------

/// The nine fixed lean-canvas blocks that partition a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Problem,
    Solution,
    KeyMetrics,
    UniqueValueProposition,
    UnfairAdvantage,
    Channels,
    CustomerSegments,
    CostStructure,
    RevenueStreams,
}

impl BlockType {
    pub fn all() -> &'static [BlockType] {
        &[
            BlockType::Problem,
            BlockType::Solution,
            BlockType::KeyMetrics,
            BlockType::UniqueValueProposition,
            BlockType::UnfairAdvantage,
            BlockType::Channels,
            BlockType::CustomerSegments,
            BlockType::CostStructure,
            BlockType::RevenueStreams,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Problem => "problem",
            BlockType::Solution => "solution",
            BlockType::KeyMetrics => "key_metrics",
            BlockType::UniqueValueProposition => "unique_value_proposition",
            BlockType::UnfairAdvantage => "unfair_advantage",
            BlockType::Channels => "channels",
            BlockType::CustomerSegments => "customer_segments",
            BlockType::CostStructure => "cost_structure",
            BlockType::RevenueStreams => "revenue_streams",
        }
    }

    /// Human-readable label for tables and the heat-map view.
    pub fn label(self) -> &'static str {
        match self {
            BlockType::Problem => "Problem",
            BlockType::Solution => "Solution",
            BlockType::KeyMetrics => "Key Metrics",
            BlockType::UniqueValueProposition => "Unique Value Proposition",
            BlockType::UnfairAdvantage => "Unfair Advantage",
            BlockType::Channels => "Channels",
            BlockType::CustomerSegments => "Customer Segments",
            BlockType::CostStructure => "Cost Structure",
            BlockType::RevenueStreams => "Revenue Streams",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BlockType {
    type Err = crate::error::RocketMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(BlockType::Problem),
            "solution" => Ok(BlockType::Solution),
            "key_metrics" | "key-metrics" => Ok(BlockType::KeyMetrics),
            "unique_value_proposition" | "unique-value-proposition" => {
                Ok(BlockType::UniqueValueProposition)
            }
            "unfair_advantage" | "unfair-advantage" => Ok(BlockType::UnfairAdvantage),
            "channels" => Ok(BlockType::Channels),
            "customer_segments" | "customer-segments" => Ok(BlockType::CustomerSegments),
            "cost_structure" | "cost-structure" => Ok(BlockType::CostStructure),
            "revenue_streams" | "revenue-streams" => Ok(BlockType::RevenueStreams),
            _ => Err(crate::error::RocketMapError::InvalidBlockType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// AssumptionCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionCategory {
    Market,
    Product,
    Ops,
    Legal,
}

impl AssumptionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AssumptionCategory::Market => "market",
            AssumptionCategory::Product => "product",
            AssumptionCategory::Ops => "ops",
            AssumptionCategory::Legal => "legal",
        }
    }
}

impl fmt::Display for AssumptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssumptionCategory {
    type Err = crate::error::RocketMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "market" => Ok(AssumptionCategory::Market),
            "product" => Ok(AssumptionCategory::Product),
            "ops" => Ok(AssumptionCategory::Ops),
            "legal" => Ok(AssumptionCategory::Legal),
            _ => Err(crate::error::RocketMapError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// AssumptionStatus
// ---------------------------------------------------------------------------

/// Lifecycle: created as `untested`; `testing` once an experiment exists;
/// `validated`/`refuted`/`inconclusive` once an experiment completes.
/// Independently editable via explicit update at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssumptionStatus {
    Untested,
    Testing,
    Validated,
    Refuted,
    Inconclusive,
}

impl AssumptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssumptionStatus::Untested => "untested",
            AssumptionStatus::Testing => "testing",
            AssumptionStatus::Validated => "validated",
            AssumptionStatus::Refuted => "refuted",
            AssumptionStatus::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for AssumptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssumptionStatus {
    type Err = crate::error::RocketMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "untested" => Ok(AssumptionStatus::Untested),
            "testing" => Ok(AssumptionStatus::Testing),
            "validated" => Ok(AssumptionStatus::Validated),
            "refuted" => Ok(AssumptionStatus::Refuted),
            "inconclusive" => Ok(AssumptionStatus::Inconclusive),
            _ => Err(crate::error::RocketMapError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Creation-time convenience mapping from a 0-10 severity score.
    /// Not re-applied after creation; risk level is independently editable.
    pub fn from_severity(severity: u8) -> RiskLevel {
        match severity {
            7.. => RiskLevel::High,
            4.. => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = crate::error::RocketMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            _ => Err(crate::error::RocketMapError::InvalidRiskLevel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ExperimentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentType {
    Survey,
    Interview,
    Mvp,
    AbTest,
    Research,
    Other,
}

impl ExperimentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentType::Survey => "survey",
            ExperimentType::Interview => "interview",
            ExperimentType::Mvp => "mvp",
            ExperimentType::AbTest => "ab_test",
            ExperimentType::Research => "research",
            ExperimentType::Other => "other",
        }
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExperimentType {
    type Err = crate::error::RocketMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "survey" => Ok(ExperimentType::Survey),
            "interview" => Ok(ExperimentType::Interview),
            "mvp" => Ok(ExperimentType::Mvp),
            "ab_test" | "ab-test" => Ok(ExperimentType::AbTest),
            "research" => Ok(ExperimentType::Research),
            "other" => Ok(ExperimentType::Other),
            _ => Err(crate::error::RocketMapError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ExperimentStatus / ExperimentResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    Planned,
    Completed,
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExperimentStatus::Planned => "planned",
            ExperimentStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentResult {
    Supports,
    Contradicts,
    Inconclusive,
}

impl ExperimentResult {
    /// The assumption status this result settles on once the experiment
    /// completes. This is the only cross-entity transition in the system.
    pub fn assumption_status(self) -> AssumptionStatus {
        match self {
            ExperimentResult::Supports => AssumptionStatus::Validated,
            ExperimentResult::Contradicts => AssumptionStatus::Refuted,
            ExperimentResult::Inconclusive => AssumptionStatus::Inconclusive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentResult::Supports => "supports",
            ExperimentResult::Contradicts => "contradicts",
            ExperimentResult::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for ExperimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExperimentResult {
    type Err = crate::error::RocketMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supports" => Ok(ExperimentResult::Supports),
            "contradicts" => Ok(ExperimentResult::Contradicts),
            "inconclusive" => Ok(ExperimentResult::Inconclusive),
            _ => Err(crate::error::RocketMapError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// BorderTier
// ---------------------------------------------------------------------------

/// Presentation tier for a heat-map cell, derived from (risk, confidence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderTier {
    Critical,
    Warning,
    Healthy,
    Neutral,
}

impl BorderTier {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderTier::Critical => "critical",
            BorderTier::Warning => "warning",
            BorderTier::Healthy => "healthy",
            BorderTier::Neutral => "neutral",
        }
    }
}

impl fmt::Display for BorderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
