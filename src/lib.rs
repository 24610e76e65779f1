//! Trace Selftime
//!
//! Per-category self time analysis for Chromium trace-event files.
//!
//! Call stacks are rebuilt per thread from Begin/End and Complete events,
//! each frame's exclusive time is attributed to a bucket by an ordered rule
//! list, and bucket totals are merged across every input file.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install trace-selftime
//! trace-selftime analyze trace.json
//! ```

pub mod aggregator;
pub mod categorizer;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
