use crate::assumption::{normalize_blocks, Assumption, BlockRef, NewAssumption};
use crate::config::Config;
use crate::error::{Result, RocketMapError};
use crate::experiment::Experiment;
use crate::paths;
use crate::types::{
    AssumptionCategory, AssumptionStatus, BlockType, ExperimentResult, ExperimentStatus,
    ExperimentType, RiskLevel,
};
use crate::viability::ViabilityData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// One of the nine canvas blocks. Content comes in two variants (canvas
/// mode and lean mode); `text()` resolves to whichever is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub block_type: BlockType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub lean_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Block {
    pub fn new(block_type: BlockType) -> Self {
        Self {
            block_type,
            content: String::new(),
            lean_content: String::new(),
            notes: None,
        }
    }

    /// Effective text of the block: the canvas-mode content when non-empty,
    /// otherwise the lean-mode variant.
    pub fn text(&self) -> &str {
        if !self.content.trim().is_empty() {
            &self.content
        } else {
            &self.lean_content
        }
    }
}

// ---------------------------------------------------------------------------
// AssumptionPatch
// ---------------------------------------------------------------------------

/// Partial update for an assumption. Absent fields are left untouched;
/// status and risk level remain independently editable axes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssumptionPatch {
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub category: Option<AssumptionCategory>,
    #[serde(default)]
    pub status: Option<AssumptionStatus>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub severity_score: Option<u8>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub blocks: Option<Vec<BlockRef>>,
    #[serde(default)]
    pub segments: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A single business-model document: nine blocks, its assumptions, and the
/// last computed viability record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub assumptions: Vec<Assumption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viability: Option<ViabilityData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Canvas {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            title: title.into(),
            description: None,
            blocks: BlockType::all().iter().map(|&bt| Block::new(bt)).collect(),
            assumptions: Vec::new(),
            viability: None,
            created_at: now,
            updated_at: now,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn create(root: &Path, slug: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        let canvas_dir = paths::canvas_dir(root, &slug);
        if canvas_dir.exists() {
            return Err(RocketMapError::CanvasExists(slug));
        }

        let canvas = Self::new(slug, title);
        canvas.save(root)?;
        Ok(canvas)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let manifest = paths::canvas_manifest(root, slug);
        if !manifest.exists() {
            return Err(RocketMapError::CanvasNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let canvas: Canvas = serde_yaml::from_str(&data)?;
        Ok(canvas)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let manifest = paths::canvas_manifest(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&manifest, data.as_bytes())
    }

    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let canvases_dir = paths::canvases_dir(root);
        if !canvases_dir.exists() {
            return Ok(Vec::new());
        }

        let mut canvases = Vec::new();
        for entry in std::fs::read_dir(&canvases_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let slug = entry.file_name().to_string_lossy().into_owned();
                match Self::load(root, &slug) {
                    Ok(c) => canvases.push(c),
                    Err(RocketMapError::CanvasNotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        canvases.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(canvases)
    }

    // ---------------------------------------------------------------------------
    // Block mutations
    // ---------------------------------------------------------------------------

    pub fn block(&self, block_type: BlockType) -> Option<&Block> {
        self.blocks.iter().find(|b| b.block_type == block_type)
    }

    pub fn update_block(
        &mut self,
        block_type: BlockType,
        content: Option<String>,
        lean_content: Option<String>,
        notes: Option<String>,
    ) -> Result<()> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.block_type == block_type)
            .ok_or_else(|| RocketMapError::InvalidBlockType(block_type.to_string()))?;
        if let Some(c) = content {
            block.content = c;
        }
        if let Some(l) = lean_content {
            block.lean_content = l;
        }
        if let Some(n) = notes {
            block.notes = Some(n);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Assumption mutations
    // ---------------------------------------------------------------------------

    pub fn add_assumption(&mut self, params: NewAssumption) -> Result<&Assumption> {
        let assumption = Assumption::new(params)?;
        let id = assumption.id.clone();
        self.assumptions.push(assumption);
        self.updated_at = Utc::now();
        self.assumption(&id)
    }

    pub fn assumption(&self, id: &str) -> Result<&Assumption> {
        self.assumptions
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| RocketMapError::AssumptionNotFound(id.to_string()))
    }

    pub fn assumption_mut(&mut self, id: &str) -> Result<&mut Assumption> {
        self.assumptions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RocketMapError::AssumptionNotFound(id.to_string()))
    }

    pub fn patch_assumption(&mut self, id: &str, patch: AssumptionPatch) -> Result<&Assumption> {
        if let Some(s) = patch.severity_score {
            crate::assumption::validate_severity(s)?;
        }
        if let Some(c) = patch.confidence_score {
            crate::assumption::validate_confidence(c)?;
        }

        let a = self
            .assumptions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RocketMapError::AssumptionNotFound(id.to_string()))?;

        if let Some(statement) = patch.statement {
            a.statement = statement;
        }
        if let Some(category) = patch.category {
            a.category = category;
        }
        if let Some(status) = patch.status {
            a.status = status;
        }
        if let Some(risk_level) = patch.risk_level {
            a.risk_level = risk_level;
        }
        if let Some(severity) = patch.severity_score {
            a.severity_score = severity;
        }
        if let Some(confidence) = patch.confidence_score {
            a.confidence_score = confidence;
        }
        if let Some(blocks) = patch.blocks {
            a.blocks = normalize_blocks(&blocks);
        }
        if let Some(segments) = patch.segments {
            a.segments = segments;
        }
        a.updated_at = Utc::now();
        self.updated_at = a.updated_at;

        self.assumption(id)
    }

    /// List assumptions, capped at the configured per-query maximum.
    pub fn assumptions_capped<'a>(&'a self, config: &Config) -> &'a [Assumption] {
        let cap = config.limits.max_assumptions;
        let end = self.assumptions.len().min(cap);
        &self.assumptions[..end]
    }

    // ---------------------------------------------------------------------------
    // Experiment mutations
    // ---------------------------------------------------------------------------

    /// Attach a planned experiment to an assumption. An untested assumption
    /// moves to `testing`.
    pub fn add_experiment(
        &mut self,
        assumption_id: &str,
        experiment_type: ExperimentType,
        success_criteria: impl Into<String>,
        source_url: Option<String>,
    ) -> Result<&Experiment> {
        let a = self.assumption_mut(assumption_id)?;
        let mut experiment = Experiment::new(experiment_type, success_criteria);
        experiment.source_url = source_url;
        let eid = experiment.id.clone();
        a.experiments.push(experiment);
        if a.status == AssumptionStatus::Untested {
            a.status = AssumptionStatus::Testing;
        }
        a.updated_at = Utc::now();
        self.updated_at = a.updated_at;

        let a = self.assumption(assumption_id)?;
        a.experiment(&eid)
            .ok_or_else(|| RocketMapError::ExperimentNotFound(eid))
    }

    /// Complete an experiment with a result. This is the one cross-entity
    /// transition: the owning assumption's status is settled from the result
    /// and its `last_tested_at` stamped.
    pub fn complete_experiment(
        &mut self,
        assumption_id: &str,
        experiment_id: &str,
        result: ExperimentResult,
        evidence: Option<String>,
    ) -> Result<()> {
        let now = Utc::now();
        let a = self.assumption_mut(assumption_id)?;
        let e = a
            .experiment_mut(experiment_id)
            .ok_or_else(|| RocketMapError::ExperimentNotFound(experiment_id.to_string()))?;
        if e.is_completed() {
            return Err(RocketMapError::ExperimentAlreadyCompleted(
                experiment_id.to_string(),
            ));
        }

        e.status = ExperimentStatus::Completed;
        e.result = Some(result);
        if evidence.is_some() {
            e.evidence = evidence;
        }
        e.completed_at = Some(now);

        a.status = result.assumption_status();
        a.last_tested_at = Some(now);
        a.updated_at = now;
        self.updated_at = now;
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Viability
    // ---------------------------------------------------------------------------

    /// Replace the viability record wholesale. No history is retained.
    pub fn set_viability(&mut self, viability: ViabilityData) {
        self.viability = Some(viability);
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
