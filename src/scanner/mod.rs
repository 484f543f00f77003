pub mod trace_filter;
pub mod trace_scanner;

pub use trace_filter::{TraceFileFilter, TRACE_EXTENSION, TRACE_NAME_PATTERN};
pub use trace_scanner::{TraceFile, TraceScanner};
