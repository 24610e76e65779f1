//! Trace file loading.
//!
//! Accepts the two shapes Chrome produces:
//! - an object with a `traceEvents` array (chrome://tracing, DevTools export)
//! - a bare array of events (streaming / legacy format)

use super::event::{parse_event, Phase, RawEvent};
use crate::utils::config::{
    PROCESS_NAME_EVENT, RENDERER_MAIN_THREAD_NAME, RENDERER_PROCESS_NAME, THREAD_NAME_EVENT,
    TRACE_EVENTS_FIELD,
};
use crate::utils::error::{EventError, ParseError};
use log::{debug, warn};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Events extracted from one trace file
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    pub events: Vec<RawEvent>,

    /// Records rejected for missing or malformed fields
    pub malformed_events: usize,

    /// Records with a phase we do not model (async, flow, counters, ...)
    pub unsupported_events: usize,
}

impl ParsedTrace {
    /// Keep only events belonging to the given (pid, tid) pairs
    pub fn retain_threads(&mut self, threads: &[(u64, u64)]) {
        self.events.retain(|e| threads.contains(&e.thread_key()));
    }
}

/// Read and parse a trace file from disk
///
/// **Public** - main entry point for file loading
///
/// # Errors
/// * `ParseError::Io` - file cannot be opened
/// * `ParseError::JsonError` - file is not valid JSON
/// * `ParseError::InvalidFormat` - JSON has the wrong top-level shape
pub fn load_trace_file(path: impl AsRef<Path>) -> Result<ParsedTrace, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace file: {}", path.display());

    let file = File::open(path)?;
    let document: Value = serde_json::from_reader(BufReader::new(file))?;

    parse_trace_document(&document)
}

/// Parse an already-decoded trace document
///
/// **Public** - used by `load_trace_file` and tests
pub fn parse_trace_document(document: &Value) -> Result<ParsedTrace, ParseError> {
    let records = match document {
        Value::Array(records) => records,
        Value::Object(obj) => obj
            .get(TRACE_EVENTS_FIELD)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!("Missing '{}' array", TRACE_EVENTS_FIELD))
            })?,
        _ => {
            return Err(ParseError::InvalidFormat(
                "Trace must be a JSON object or array".to_string(),
            ))
        }
    };

    let mut parsed = ParsedTrace {
        events: Vec::with_capacity(records.len()),
        ..Default::default()
    };

    for (index, record) in records.iter().enumerate() {
        match parse_event(record) {
            Ok(event) => parsed.events.push(event),
            Err(EventError::UnsupportedPhase(ph)) => {
                debug!("Ignoring event {} with phase '{}'", index, ph);
                parsed.unsupported_events += 1;
            }
            Err(e) => {
                // Log but don't fail - some records may be malformed
                debug!("Skipping event {}: {}", index, e);
                parsed.malformed_events += 1;
            }
        }
    }

    if parsed.malformed_events > 0 {
        warn!(
            "Skipped {} malformed events out of {}",
            parsed.malformed_events,
            records.len()
        );
    }

    debug!(
        "Parsed {} events ({} unsupported phases ignored)",
        parsed.events.len(),
        parsed.unsupported_events
    );

    Ok(parsed)
}

/// Find renderer main threads from process and thread name metadata
///
/// **Public** - used by the renderer-only filter
///
/// Returns (pid, tid) pairs of `CrRendererMain` threads that live in a
/// process named `Renderer`, in the order their metadata appears.
pub fn renderer_main_threads(events: &[RawEvent]) -> Vec<(u64, u64)> {
    let metadata = || events.iter().filter(|e| e.phase == Phase::Metadata);

    let renderer_pids: Vec<u64> = metadata()
        .filter(|e| {
            e.name == PROCESS_NAME_EVENT
                && e.metadata_name.as_deref() == Some(RENDERER_PROCESS_NAME)
        })
        .map(|e| e.process_id)
        .collect();

    let mut threads = Vec::new();
    for event in metadata() {
        if event.name == THREAD_NAME_EVENT
            && event.metadata_name.as_deref() == Some(RENDERER_MAIN_THREAD_NAME)
            && renderer_pids.contains(&event.process_id)
            && !threads.contains(&event.thread_key())
        {
            threads.push(event.thread_key());
        }
    }
    threads
}
