use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use rocketmap_core::canvas::Canvas;
use rocketmap_core::slug::unique_slug;
use rocketmap_core::types::BlockType;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum CanvasSubcommand {
    /// Create a new canvas (slug derived from the title)
    Create {
        /// Canvas title
        #[arg(long)]
        title: String,
        /// Optional one-line description
        #[arg(long)]
        description: Option<String>,
    },

    /// List all canvases
    List,

    /// Show one canvas with its blocks
    Show {
        /// Canvas slug
        slug: String,
    },

    /// Set a block's content
    SetBlock {
        /// Canvas slug
        slug: String,
        /// Block type (e.g. problem, channels, revenue_streams)
        #[arg(long)]
        block: String,
        /// Canvas-mode content
        #[arg(long)]
        content: Option<String>,
        /// Lean-mode content variant
        #[arg(long)]
        lean: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: CanvasSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        CanvasSubcommand::Create { title, description } => {
            create(root, &title, description, json)
        }
        CanvasSubcommand::List => list(root, json),
        CanvasSubcommand::Show { slug } => show(root, &slug, json),
        CanvasSubcommand::SetBlock {
            slug,
            block,
            content,
            lean,
            notes,
        } => set_block(root, &slug, &block, content, lean, notes),
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

fn create(root: &Path, title: &str, description: Option<String>, json: bool) -> anyhow::Result<()> {
    let slug = unique_slug(root, title);
    let mut canvas = Canvas::create(root, slug, title).context("failed to create canvas")?;
    if description.is_some() {
        canvas.description = description;
        canvas.save(root)?;
    }

    if json {
        print_json(&serde_json::json!({ "slug": canvas.slug, "title": canvas.title }))?;
    } else {
        println!("Created canvas '{}' ({})", canvas.title, canvas.slug);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let canvases = Canvas::list(root)?;

    if json {
        let value: Vec<_> = canvases
            .iter()
            .map(|c| {
                serde_json::json!({
                    "slug": c.slug,
                    "title": c.title,
                    "assumptions": c.assumptions.len(),
                    "overall_score": c.viability.as_ref().map(|v| v.overall_score),
                })
            })
            .collect();
        return print_json(&value);
    }

    if canvases.is_empty() {
        println!("No canvases yet.");
        return Ok(());
    }

    let rows = canvases
        .iter()
        .map(|c| {
            vec![
                c.slug.clone(),
                c.title.clone(),
                c.assumptions.len().to_string(),
                c.viability
                    .as_ref()
                    .map(|v| v.overall_score.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["SLUG", "TITLE", "ASSUMPTIONS", "VIABILITY"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let canvas = Canvas::load(root, slug).context("failed to load canvas")?;

    if json {
        return print_json(&canvas);
    }

    println!("{} ({})", canvas.title, canvas.slug);
    if let Some(desc) = &canvas.description {
        println!("{desc}");
    }
    println!();
    for &bt in BlockType::all() {
        let text = canvas.block(bt).map(|b| b.text()).unwrap_or("");
        let text = if text.is_empty() { "(empty)" } else { text };
        println!("  {:<26} {}", bt.label(), text);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// set-block
// ---------------------------------------------------------------------------

fn set_block(
    root: &Path,
    slug: &str,
    block: &str,
    content: Option<String>,
    lean: Option<String>,
    notes: Option<String>,
) -> anyhow::Result<()> {
    let block_type: BlockType = block.parse()?;
    let mut canvas = Canvas::load(root, slug).context("failed to load canvas")?;
    canvas.update_block(block_type, content, lean, notes)?;
    canvas.save(root)?;
    println!("Updated block '{block_type}' on '{slug}'");
    Ok(())
}
