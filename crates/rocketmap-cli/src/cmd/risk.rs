use crate::output::{print_json, print_table};
use anyhow::Context;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::config::Config;
use rocketmap_core::risk;
use std::path::Path;

/// Print the per-block risk heat map for a canvas.
pub fn run(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).unwrap_or_else(|_| Config::new("default"));
    let canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    let cells = risk::heat_map(canvas.assumptions_capped(&config));

    if json {
        let mut map = serde_json::Map::new();
        for (block_type, metrics) in &cells {
            let mut cell = serde_json::to_value(metrics)?;
            if let Some(obj) = cell.as_object_mut() {
                obj.insert(
                    "border_tier".to_string(),
                    serde_json::to_value(metrics.border_tier())?,
                );
            }
            map.insert(block_type.as_str().to_string(), cell);
        }
        print_json(&serde_json::Value::Object(map))?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = cells
        .iter()
        .map(|(block_type, m)| {
            vec![
                block_type.as_str().to_string(),
                m.risk_score.to_string(),
                m.confidence_score.to_string(),
                format!(
                    "{}/{}/{}",
                    m.untested_high_risk, m.untested_medium_risk, m.untested_low_risk
                ),
                m.border_tier().to_string(),
                m.top_risks.join("; "),
            ]
        })
        .collect();
    print_table(
        &["BLOCK", "RISK", "CONF", "H/M/L", "TIER", "TOP RISKS"],
        rows,
    );
    Ok(())
}
