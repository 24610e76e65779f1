//! Trace parsing.
//!
//! This module handles:
//! - Reading Chrome trace-event JSON files
//! - Normalizing raw records into `RawEvent`s
//! - Locating renderer main threads from metadata

pub mod event;
pub mod trace_file;

// Re-export main types
pub use event::{parse_event, Phase, RawEvent};
pub use trace_file::{load_trace_file, parse_trace_document, renderer_main_threads, ParsedTrace};
