//! apidrift - API surface drift detection tool
//!
//! Detects public API changes between two versions of a Python source
//! file and reports the documentation that needs updating.

use anyhow::Result;
use apidrift::cli::{analyze, config, diff_files, extract, Cli, Commands};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Get repository path
    let repo_path = Path::new(&cli.path);

    // Execute command
    match cli.command {
        Commands::Analyze(args) => {
            analyze(repo_path, &args.file, &args.base, cli.format)?;
        }

        Commands::Extract(args) => {
            extract(&args.file, cli.format)?;
        }

        Commands::Diff(args) => {
            diff_files(&args.old, &args.new, cli.format)?;
        }

        Commands::Config(args) => {
            config(repo_path, args.reset)?;
        }
    }

    Ok(())
}
