use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::config::Config;
use rocketmap_core::types::BlockType;
use rocketmap_core::viability::{self, ViabilityData};
use rocketmap_scorer::{BlockPayload, ScoreRequest, ScorerClient};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ViabilitySubcommand {
    /// Show the stored viability record for a canvas
    Show {
        /// Canvas slug
        slug: String,
    },

    /// Score the canvas via the configured scorer and persist the record
    Score {
        /// Canvas slug
        slug: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ViabilitySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ViabilitySubcommand::Show { slug } => show(root, &slug, json),
        ViabilitySubcommand::Score { slug } => score(root, &slug, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let canvas = Canvas::load(root, slug).context("failed to load canvas")?;

    if json {
        print_json(&serde_json::json!({
            "slug": canvas.slug,
            "viability": canvas.viability,
        }))?;
        return Ok(());
    }

    match &canvas.viability {
        Some(v) => print_record(v),
        None => println!("No viability record for '{slug}'. Run `rocketmap viability score {slug}`."),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

fn score(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let mut canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    viability::validate_blocks(&canvas)?;

    let blocks: Vec<BlockPayload> = BlockType::all()
        .iter()
        .filter_map(|&bt| canvas.block(bt))
        .map(|b| BlockPayload {
            block_type: b.block_type,
            content: b.text().trim().to_string(),
        })
        .collect();
    let summaries = viability::validated_summaries(&canvas);
    let request = ScoreRequest {
        model: config.scorer.model.clone(),
        blocks,
        validated_assumptions: summaries.iter().cloned().map(Into::into).collect(),
    };

    let client = ScorerClient::new(
        config.scorer.endpoint.clone(),
        Duration::from_secs(config.scorer.timeout_secs),
    );
    let rt = tokio::runtime::Runtime::new()?;
    let response = rt
        .block_on(client.score(&request))
        .context("viability scoring failed")?;

    let record = ViabilityData::aggregate(
        response.assumptions_score,
        response.market_score,
        response.unmet_need_score,
        response.reasoning,
        summaries,
    );
    canvas.set_viability(record);
    canvas.save(root)?;

    if json {
        print_json(&serde_json::json!({
            "slug": canvas.slug,
            "viability": canvas.viability,
        }))?;
    } else if let Some(v) = &canvas.viability {
        print_record(v);
    }
    Ok(())
}

fn print_record(v: &ViabilityData) {
    println!("Overall viability: {}/100", v.overall_score);
    print_table(
        &["COMPONENT", "SCORE", "WEIGHT"],
        vec![
            vec![
                "assumptions".to_string(),
                v.assumptions_score.to_string(),
                "40%".to_string(),
            ],
            vec![
                "market".to_string(),
                v.market_score.to_string(),
                "30%".to_string(),
            ],
            vec![
                "unmet_need".to_string(),
                v.unmet_need_score.to_string(),
                "30%".to_string(),
            ],
        ],
    );
    println!();
    println!("{}", v.reasoning);
    println!();
    println!("Calculated at: {}", v.calculated_at.to_rfc3339());
}
