//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod utils;

// Re-export main command functions
pub use analyze::{analyze_files, build_categorizer, execute_analyze, validate_args, Analysis, AnalyzeArgs};
pub use utils::{display_rules, display_version, format_rules};
