//! CLI interface using clap
//!
//! Provides the command-line interface for apidrift

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};

/// apidrift - API surface drift detection tool
#[derive(Parser, Debug)]
#[command(name = "apidrift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub path: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a file's API changes against a previous revision
    Analyze(AnalyzeArgs),

    /// Extract and print the API surface of a file
    Extract(ExtractArgs),

    /// Diff the API surfaces of two files
    Diff(DiffArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for analyze command
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze, relative to the repository root
    pub file: String,

    /// Base revision to compare against
    #[arg(short, long, default_value = "HEAD^")]
    pub base: String,
}

/// Arguments for extract command
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// File to extract declarations from
    pub file: String,
}

/// Arguments for diff command
#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Old version of the file
    pub old: String,

    /// New version of the file
    pub new: String,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Reset to defaults
    #[arg(long)]
    pub reset: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["apidrift", "analyze", "src/api/users.py"]);
        assert!(matches!(cli.command, Commands::Analyze(_)));

        if let Commands::Analyze(args) = cli.command {
            assert_eq!(args.file, "src/api/users.py");
            assert_eq!(args.base, "HEAD^");
        }
    }

    #[test]
    fn test_diff_command() {
        let cli = Cli::parse_from(["apidrift", "diff", "old.py", "new.py"]);
        if let Commands::Diff(args) = cli.command {
            assert_eq!(args.old, "old.py");
            assert_eq!(args.new, "new.py");
        } else {
            panic!("expected diff command");
        }
    }

    #[test]
    fn test_json_format_flag() {
        let cli = Cli::parse_from(["apidrift", "-o", "json", "extract", "m.py"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
