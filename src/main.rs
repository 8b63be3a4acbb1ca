use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use catalog_publish::cli::{run_release_pipeline, PipelineArgs};
use catalog_publish::{config, ui, PublishError};

#[derive(clap::Parser)]
#[command(
    name = "catalog-publish",
    about = "Derive release metadata and resolve product files for a catalog release"
)]
struct Args {
    #[arg(short, long, help = "Path to the release metadata YAML file")]
    metadata: PathBuf,

    #[arg(short, long, help = "Version being released, e.g. 6.12.0")]
    release_version: String,

    #[arg(short, long, help = "Directory to look for declared product files in")]
    search_path: Option<PathBuf>,

    #[arg(long, help = "JSON export of previously published releases")]
    history: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,

    #[arg(long, help = "Print the release plan as JSON")]
    json: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let pipeline_args = PipelineArgs {
        metadata_path: args.metadata,
        release_version: args.release_version,
        search_path: args.search_path,
        history_file: args.history,
        today: None,
    };

    let plan = match run_release_pipeline(&pipeline_args, &config) {
        Ok(plan) => plan,
        Err(PublishError::Validation(messages)) => {
            ui::display_violations(&messages);
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    for warning in &plan.warnings {
        ui::display_warning(warning);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        ui::display_release_plan(&plan);
        ui::display_success(&format!(
            "Planned {} with {} file(s)",
            plan.release.version,
            plan.product_files.len()
                + plan
                    .file_groups
                    .iter()
                    .map(|g| g.product_files.len())
                    .sum::<usize>()
        ));
    }

    Ok(())
}
