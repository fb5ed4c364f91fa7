use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::types::{ExperimentResult, ExperimentType};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ExperimentSubcommand {
    /// Plan an experiment for an assumption
    Add {
        /// Canvas slug
        slug: String,
        /// Assumption id
        assumption: String,
        /// Experiment type: survey, interview, mvp, ab_test, research, other
        #[arg(long = "type")]
        experiment_type: String,
        /// What outcome counts as success
        #[arg(long)]
        criteria: String,
        /// Optional source URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Complete an experiment with a result
    Complete {
        /// Canvas slug
        slug: String,
        /// Assumption id
        assumption: String,
        /// Experiment id
        experiment: String,
        /// Result: supports, contradicts, inconclusive
        #[arg(long)]
        result: String,
        /// Evidence gathered
        #[arg(long)]
        evidence: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ExperimentSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ExperimentSubcommand::Add {
            slug,
            assumption,
            experiment_type,
            criteria,
            url,
        } => add(root, &slug, &assumption, &experiment_type, criteria, url, json),
        ExperimentSubcommand::Complete {
            slug,
            assumption,
            experiment,
            result,
            evidence,
        } => complete(root, &slug, &assumption, &experiment, &result, evidence, json),
    }
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

fn add(
    root: &Path,
    slug: &str,
    assumption_id: &str,
    experiment_type: &str,
    criteria: String,
    url: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let experiment_type: ExperimentType = experiment_type.parse()?;
    let mut canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    let experiment = canvas
        .add_experiment(assumption_id, experiment_type, criteria, url)?
        .clone();
    canvas.save(root)?;

    if json {
        print_json(&experiment)?;
    } else {
        println!(
            "Planned {} experiment {} for assumption {}",
            experiment.experiment_type, experiment.id, assumption_id
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// complete
// ---------------------------------------------------------------------------

fn complete(
    root: &Path,
    slug: &str,
    assumption_id: &str,
    experiment_id: &str,
    result: &str,
    evidence: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let result: ExperimentResult = result.parse()?;
    let mut canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    canvas.complete_experiment(assumption_id, experiment_id, result, evidence)?;
    canvas.save(root)?;

    let assumption = canvas.assumption(assumption_id)?;
    if json {
        print_json(&serde_json::json!({
            "assumption_id": assumption.id,
            "status": assumption.status,
        }))?;
    } else {
        println!(
            "Experiment {} completed: assumption is now {}",
            experiment_id, assumption.status
        );
    }
    Ok(())
}
