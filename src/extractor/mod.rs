pub mod record;
pub mod record_extractor;
pub mod trace_parser;

pub use record::{ErrorRecord, MaintenanceRecord, MaintenanceStatus, ScanRecord, MAINTENANCE_METHOD};
pub use record_extractor::{Extractor, ScanProgress, ScanReport};
pub use trace_parser::{TraceParser, UNKNOWN_SERIAL};
