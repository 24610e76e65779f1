//! Report rendering and output writers.
//!
//! - Plain text report (the default, printed to stdout)
//! - JSON report files

pub mod json;
pub mod report;

// Re-export main types and functions
pub use json::{read_report, report_to_string, write_report, ReportDocument};
pub use report::{micros_to_millis, CategoryLine, Report};
