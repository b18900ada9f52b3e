//! Tracing/logging setup shared by the binaries.

/// Output format of the process-wide log subscriber.
pub mod format;

/// Tracing subscriber initialization (filters, layers).
pub mod logging;

pub use format::LogFormat;
