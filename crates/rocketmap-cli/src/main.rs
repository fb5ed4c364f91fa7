mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    assumption::AssumptionSubcommand, canvas::CanvasSubcommand, experiment::ExperimentSubcommand,
    viability::ViabilitySubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rocketmap",
    about = "Lean-canvas validation — manage canvases, assumptions, experiments, and viability",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .rocketmap/ or .git/)
    #[arg(long, global = true, env = "ROCKETMAP_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize RocketMap in the current project
    Init,

    /// Manage canvases
    Canvas {
        #[command(subcommand)]
        subcommand: CanvasSubcommand,
    },

    /// Manage assumptions on a canvas
    Assumption {
        #[command(subcommand)]
        subcommand: AssumptionSubcommand,
    },

    /// Manage experiments on assumptions
    Experiment {
        #[command(subcommand)]
        subcommand: ExperimentSubcommand,
    },

    /// Show the per-block risk heat map
    Risk {
        /// Canvas slug
        slug: String,
    },

    /// Show or compute canvas viability
    Viability {
        #[command(subcommand)]
        subcommand: ViabilitySubcommand,
    },

    /// Launch the API server
    Ui {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "0")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Canvas { subcommand } => cmd::canvas::run(&root, subcommand, cli.json),
        Commands::Assumption { subcommand } => cmd::assumption::run(&root, subcommand, cli.json),
        Commands::Experiment { subcommand } => cmd::experiment::run(&root, subcommand, cli.json),
        Commands::Risk { slug } => cmd::risk::run(&root, &slug, cli.json),
        Commands::Viability { subcommand } => cmd::viability::run(&root, subcommand, cli.json),
        Commands::Ui { port, no_open } => cmd::ui::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
