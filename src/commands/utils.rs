use crate::categorizer::Categorizer;
use crate::utils::config::{REPORT_SCHEMA_VERSION, UNKNOWN_BUCKET};

/// Render the categorization rules in priority order
pub fn format_rules(categorizer: &Categorizer) -> String {
    let mut lines = Vec::new();
    lines.push("Categorization rules (first match wins):".to_string());

    for (i, rule) in categorizer.rules().iter().enumerate() {
        lines.push(format!("  {:>2}. {:<36} -> {}", i + 1, rule.matcher.to_string(), rule.bucket));
    }
    lines.push(format!("      {:<36} -> {}", "(no match)", UNKNOWN_BUCKET));

    lines.join("\n")
}

/// Display the active categorization rules
pub fn display_rules(categorizer: &Categorizer) {
    println!("{}", format_rules(categorizer));
}

/// Display version information
pub fn display_version() {
    println!("Trace Selftime v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Per-category self time analysis for Chromium trace-event files.");
}
