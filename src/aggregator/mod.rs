//! Aggregation of trace events into per-category self time.
//!
//! This module transforms parsed trace events into:
//! - Resolved frames with exclusive (self) time
//! - Per-bucket totals merged across files

pub mod stack_builder;
pub mod totals;

// Re-export main types and functions
pub use stack_builder::{reconstruct, Contribution, Reconstruction};
pub use totals::{process_events, CategoryTotals};
