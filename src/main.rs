//! Trace Selftime CLI
//!
//! Reports how much self time each category of work (script, style/layout,
//! painting, ...) consumed across one or more Chromium trace files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_selftime::commands::{
    build_categorizer, display_rules, display_version, execute_analyze, validate_args,
    AnalyzeArgs,
};

/// Trace Selftime - self time per category for Chromium traces
#[derive(Parser, Debug)]
#[command(name = "trace-selftime")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one or more trace files and print a merged report
    Analyze {
        /// Trace files (JSON object with "traceEvents", or a bare event array)
        #[arg(required = true)]
        traces: Vec<PathBuf>,

        /// Only count events on renderer main threads (CrRendererMain)
        #[arg(long)]
        renderer_main: bool,

        /// Categorization rules file (JSON) replacing the built-in rules
        #[arg(long, env = "TRACE_SELFTIME_RULES")]
        rules: Option<PathBuf>,

        /// Also write the report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Display the categorization rules in priority order
    Rules {
        /// Rules file to display instead of the built-in rules
        #[arg(long, env = "TRACE_SELFTIME_RULES")]
        rules: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            traces,
            renderer_main,
            rules,
            json,
        } => {
            let args = AnalyzeArgs {
                traces,
                renderer_main_only: renderer_main,
                rules,
                output_json: json,
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Rules { rules } => {
            let args = AnalyzeArgs {
                rules,
                ..Default::default()
            };
            display_rules(&build_categorizer(&args)?);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
