use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use rocketmap_core::assumption::{BlockRef, NewAssumption};
use rocketmap_core::canvas::{AssumptionPatch, Canvas};
use rocketmap_core::config::Config;
use rocketmap_core::types::{AssumptionCategory, AssumptionStatus, BlockType, RiskLevel};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum AssumptionSubcommand {
    /// Add an assumption to a canvas
    Add {
        /// Canvas slug
        slug: String,
        /// The testable claim
        #[arg(long)]
        statement: String,
        /// Category: market, product, ops, legal
        #[arg(long)]
        category: String,
        /// Severity 0-10; derives the initial risk level when --risk is absent
        #[arg(long)]
        severity: u8,
        /// Risk level override: high, medium, low
        #[arg(long)]
        risk: Option<String>,
        /// Confidence 0-100
        #[arg(long, default_value = "0")]
        confidence: f64,
        /// Block types this assumption touches (repeatable)
        #[arg(long = "block")]
        blocks: Vec<String>,
    },

    /// List a canvas's assumptions
    List {
        /// Canvas slug
        slug: String,
    },

    /// Update an assumption's status, risk level, or confidence
    Update {
        /// Canvas slug
        slug: String,
        /// Assumption id
        id: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        risk: Option<String>,
        #[arg(long)]
        confidence: Option<f64>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: AssumptionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AssumptionSubcommand::Add {
            slug,
            statement,
            category,
            severity,
            risk,
            confidence,
            blocks,
        } => add(
            root, &slug, statement, &category, severity, risk, confidence, blocks, json,
        ),
        AssumptionSubcommand::List { slug } => list(root, &slug, json),
        AssumptionSubcommand::Update {
            slug,
            id,
            status,
            risk,
            confidence,
        } => update(root, &slug, &id, status, risk, confidence, json),
    }
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn add(
    root: &Path,
    slug: &str,
    statement: String,
    category: &str,
    severity: u8,
    risk: Option<String>,
    confidence: f64,
    blocks: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let category: AssumptionCategory = category.parse()?;
    let risk_level = risk.as_deref().map(str::parse::<RiskLevel>).transpose()?;
    let blocks = blocks
        .iter()
        .map(|b| b.parse::<BlockType>().map(BlockRef::Bare))
        .collect::<Result<Vec<_>, _>>()?;

    let mut canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    let assumption = canvas
        .add_assumption(NewAssumption {
            statement,
            category,
            risk_level,
            severity_score: severity,
            confidence_score: confidence,
            blocks,
            segments: vec![],
        })?
        .clone();
    canvas.save(root)?;

    if json {
        print_json(&assumption)?;
    } else {
        println!(
            "Added assumption {} [{} / {}]",
            assumption.id, assumption.risk_level, assumption.status
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).unwrap_or_else(|_| Config::new("default"));
    let canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    let assumptions = canvas.assumptions_capped(&config);

    if json {
        return print_json(&assumptions);
    }

    if assumptions.is_empty() {
        println!("No assumptions on '{slug}'.");
        return Ok(());
    }

    let rows = assumptions
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.statement.clone(),
                a.status.to_string(),
                a.risk_level.to_string(),
                format!("{:.0}", a.confidence_score),
            ]
        })
        .collect();
    print_table(&["ID", "STATEMENT", "STATUS", "RISK", "CONF"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

fn update(
    root: &Path,
    slug: &str,
    id: &str,
    status: Option<String>,
    risk: Option<String>,
    confidence: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let status = status
        .as_deref()
        .map(str::parse::<AssumptionStatus>)
        .transpose()?;
    let risk_level = risk.as_deref().map(str::parse::<RiskLevel>).transpose()?;

    let mut canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    let assumption = canvas
        .patch_assumption(
            id,
            AssumptionPatch {
                status,
                risk_level,
                confidence_score: confidence,
                ..Default::default()
            },
        )?
        .clone();
    canvas.save(root)?;

    if json {
        print_json(&assumption)?;
    } else {
        println!(
            "Updated assumption {} [{} / {}]",
            assumption.id, assumption.risk_level, assumption.status
        );
    }
    Ok(())
}
