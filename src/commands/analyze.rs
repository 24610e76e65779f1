//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads each trace file (bad files are skipped with a warning)
//! 2. Optionally narrows events to renderer main threads
//! 3. Rebuilds call stacks and computes self time
//! 4. Categorizes and merges totals across files
//! 5. Prints the report (and optionally writes it as JSON)

use crate::aggregator::{process_events, CategoryTotals};
use crate::categorizer::{load_rules, Categorizer};
use crate::output::{write_report, Report, ReportDocument};
use crate::parser::{load_trace_file, renderer_main_threads};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Trace files to analyze and merge
    pub traces: Vec<PathBuf>,

    /// Only count events on renderer main threads (CrRendererMain)
    pub renderer_main_only: bool,

    /// Custom categorization rules (JSON), replacing the built-in list
    pub rules: Option<PathBuf>,

    /// Also write the report as JSON to this path
    pub output_json: Option<PathBuf>,
}

/// Outcome of analyzing a set of files
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Totals merged over every successfully processed file
    pub totals: CategoryTotals,

    pub processed: Vec<PathBuf>,

    /// Files that could not be read or parsed, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

impl Analysis {
    pub fn report(&self) -> Report {
        Report::from_totals(&self.totals)
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// The report is always printed, even when every total is zero. Returns an
/// error only when no trace file could be processed at all.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    let categorizer = build_categorizer(&args)?;
    let analysis = analyze_files(&args, &categorizer);
    let report = analysis.report();

    print!("{}", report.render());

    if let Some(json_path) = &args.output_json {
        let files = analysis
            .processed
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        write_report(&ReportDocument::new(report, files), json_path)
            .context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    info!(
        "Analyzed {} of {} files in {:.2}s",
        analysis.processed.len(),
        args.traces.len(),
        start_time.elapsed().as_secs_f64()
    );

    if analysis.processed.is_empty() {
        anyhow::bail!("No trace file could be processed");
    }

    Ok(())
}

/// Load the custom rules file, or fall back to the built-in rules
///
/// **Public** - also used by the `rules` command
pub fn build_categorizer(args: &AnalyzeArgs) -> Result<Categorizer> {
    match &args.rules {
        Some(path) => {
            let rules = load_rules(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?;
            Ok(Categorizer::new(rules))
        }
        None => Ok(Categorizer::default()),
    }
}

/// Process every trace file and merge the results
///
/// **Public** - the testable core of the command (no printing)
pub fn analyze_files(args: &AnalyzeArgs, categorizer: &Categorizer) -> Analysis {
    let mut analysis = Analysis::default();

    for path in &args.traces {
        info!("Analyzing trace: {}", path.display());

        let mut parsed = match load_trace_file(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                analysis.skipped.push((path.clone(), e.to_string()));
                continue;
            }
        };

        if args.renderer_main_only {
            let threads = renderer_main_threads(&parsed.events);
            if threads.is_empty() {
                warn!("No renderer main thread found in {}", path.display());
            }
            debug!("Renderer main threads: {:?}", threads);
            parsed.retain_threads(&threads);
        }

        let file_totals = process_events(&parsed.events, categorizer, CategoryTotals::new());
        debug!(
            "{}: {} events, {}µs self time",
            path.display(),
            file_totals.event_count(),
            file_totals.total_self_time()
        );

        analysis.totals.merge(file_totals);
        analysis.processed.push(path.clone());
    }

    analysis
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.traces.is_empty() {
        anyhow::bail!("At least one trace file is required");
    }

    if args.traces.iter().any(|p| p.as_os_str().is_empty()) {
        anyhow::bail!("Trace file path cannot be empty");
    }

    if let Some(json_path) = &args.output_json {
        if json_path.as_os_str().is_empty() {
            anyhow::bail!("JSON output path cannot be empty");
        }
        if args.traces.contains(json_path) {
            anyhow::bail!("JSON output path would overwrite an input trace");
        }
    }

    Ok(())
}
