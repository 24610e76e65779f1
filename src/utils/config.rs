//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Microseconds per millisecond (trace timestamps are in microseconds)
pub const MICROS_PER_MILLI: f64 = 1000.0;

/// Top-level field holding the event array in object-shaped trace files
pub const TRACE_EVENTS_FIELD: &str = "traceEvents";

/// Category Chrome uses for process/thread naming records
pub const METADATA_CATEGORY: &str = "__metadata";

/// Metadata record naming a process
pub const PROCESS_NAME_EVENT: &str = "process_name";

/// Metadata record naming a thread
pub const THREAD_NAME_EVENT: &str = "thread_name";

/// Process name of renderer processes
pub const RENDERER_PROCESS_NAME: &str = "Renderer";

/// Thread name of the renderer main thread
pub const RENDERER_MAIN_THREAD_NAME: &str = "CrRendererMain";

/// Bucket for events no rule matches
pub const UNKNOWN_BUCKET: &str = "unknown";
