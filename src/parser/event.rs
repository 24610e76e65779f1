//! Normalization of raw Chrome trace records.
//!
//! Every record in a trace file goes through [`parse_event`], which turns the
//! loosely-typed JSON object into a [`RawEvent`] or rejects it. Rejected
//! records are skipped by the caller; they never abort a file.

use crate::utils::config::METADATA_CATEGORY;
use crate::utils::error::EventError;
use serde_json::Value;

/// Role of a trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Opens a duration span (`B`)
    Begin,
    /// Closes the innermost open span (`E`)
    End,
    /// Self-contained span carrying its own duration (`X`)
    Complete,
    /// Point-in-time marker (`I` / `i`)
    Instant,
    /// Process/thread naming record (`M`)
    Metadata,
}

impl std::str::FromStr for Phase {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Self::Begin),
            "E" => Ok(Self::End),
            "X" => Ok(Self::Complete),
            "I" | "i" => Ok(Self::Instant),
            "M" => Ok(Self::Metadata),
            other => Err(EventError::UnsupportedPhase(other.to_string())),
        }
    }
}

/// A single trace event in uniform form
///
/// **Public** - produced by the parser, consumed by the stack builder
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    /// Event name (e.g. "FunctionCall", "Layout")
    pub name: String,

    /// Raw category string, possibly comma separated ("blink,devtools.timeline")
    pub category: String,

    pub phase: Phase,

    /// Timestamp in microseconds
    pub timestamp: u64,

    /// Duration in microseconds (always present for Complete events)
    pub duration: Option<u64>,

    pub process_id: u64,
    pub thread_id: u64,

    /// `args.name` of metadata records (process or thread name)
    pub metadata_name: Option<String>,
}

impl RawEvent {
    /// (process id, thread id) pair this event belongs to
    pub fn thread_key(&self) -> (u64, u64) {
        (self.process_id, self.thread_id)
    }

    /// Timestamp at which a Complete event ends
    pub fn end_timestamp(&self) -> Option<u64> {
        self.duration.map(|dur| self.timestamp.saturating_add(dur))
    }
}

/// Parse one raw JSON record into a [`RawEvent`]
///
/// **Public** - main entry point of the event model
///
/// # Errors
/// * `EventError::MissingField` - `name`, `ph`, `ts` or `tid` absent
/// * `EventError::InvalidField` - a field has the wrong type or a negative value
/// * `EventError::UnsupportedPhase` - phase outside B/E/X/I/M
///
/// Metadata records only need a name: Chrome writes process names without
/// `ts` or `tid`, so those default to 0.
pub fn parse_event(record: &Value) -> Result<RawEvent, EventError> {
    let obj = record.as_object().ok_or_else(|| EventError::InvalidField {
        field: "event",
        value: truncate(record.to_string()),
    })?;

    let name = match obj.get("name") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(invalid("name", other)),
        None => return Err(EventError::MissingField("name")),
    };

    let category = match obj.get("cat") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => return Err(invalid("cat", other)),
    };

    let phase = match obj.get("ph") {
        Some(Value::String(s)) => s.parse::<Phase>()?,
        Some(other) => return Err(invalid("ph", other)),
        None if category == METADATA_CATEGORY => Phase::Metadata,
        None => return Err(EventError::MissingField("ph")),
    };

    let is_metadata = phase == Phase::Metadata;

    let timestamp = match obj.get("ts") {
        Some(val) => parse_micros("ts", val)?,
        None if is_metadata => 0,
        None => return Err(EventError::MissingField("ts")),
    };

    let thread_id = match obj.get("tid") {
        Some(val) => parse_id("tid", val)?,
        None if is_metadata => 0,
        None => return Err(EventError::MissingField("tid")),
    };

    let process_id = match obj.get("pid") {
        Some(val) => parse_id("pid", val)?,
        None => 0,
    };

    let duration = match obj.get("dur") {
        Some(val) => Some(parse_micros("dur", val)?),
        None => None,
    };

    if phase == Phase::Complete && duration.is_none() {
        return Err(EventError::MissingField("dur"));
    }

    let metadata_name = if is_metadata {
        obj.get("args")
            .and_then(|args| args.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
    } else {
        None
    };

    Ok(RawEvent {
        name,
        category,
        phase,
        timestamp,
        duration,
        process_id,
        thread_id,
        metadata_name,
    })
}

/// Parse a microsecond value (integer or fractional, never negative)
///
/// **Private** - fractional values are rounded to the nearest microsecond
fn parse_micros(field: &'static str, val: &Value) -> Result<u64, EventError> {
    if let Some(n) = val.as_u64() {
        return Ok(n);
    }
    match val.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 => Ok(f.round() as u64),
        _ => Err(invalid(field, val)),
    }
}

/// Parse a process or thread id
///
/// **Private** - ids must be non-negative integers
fn parse_id(field: &'static str, val: &Value) -> Result<u64, EventError> {
    val.as_u64().ok_or_else(|| invalid(field, val))
}

fn invalid(field: &'static str, val: &Value) -> EventError {
    EventError::InvalidField {
        field,
        value: truncate(val.to_string()),
    }
}

// Keep error messages readable when a record holds a large blob
fn truncate(mut s: String) -> String {
    const MAX: usize = 64;
    if s.len() > MAX {
        let mut cut = MAX;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}
