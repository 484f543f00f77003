use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maintenance routine every daily-maintenance trace belongs to.
pub const MAINTENANCE_METHOD: &str = "VOVDailyMaintenance.hsl";

/// Outcome of one trace.
///
/// `Error` covers both traces that mention neither outcome phrase and traces
/// that could not be read at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Success,
    Failed,
    Error,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Success => "Success",
            MaintenanceStatus::Failed => "Failed",
            MaintenanceStatus::Error => "Error",
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub filename: String,
    pub instrument_name: String,
    pub serial_number: String,
    /// Local date of the trace's last modification, not a date read from its text.
    pub date: NaiveDate,
    pub status: MaintenanceStatus,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub filename: String,
    pub error: String,
    pub status: MaintenanceStatus,
}

impl ErrorRecord {
    pub fn new<F: Into<String>, E: Into<String>>(filename: F, error: E) -> Self {
        Self {
            filename: filename.into(),
            error: error.into(),
            status: MaintenanceStatus::Error,
        }
    }
}

/// One entry of a scan: a parsed trace or a trace that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanRecord {
    Maintenance(MaintenanceRecord),
    Error(ErrorRecord),
}

impl ScanRecord {
    pub fn filename(&self) -> &str {
        match self {
            ScanRecord::Maintenance(record) => &record.filename,
            ScanRecord::Error(record) => &record.filename,
        }
    }

    pub fn status(&self) -> MaintenanceStatus {
        match self {
            ScanRecord::Maintenance(record) => record.status,
            ScanRecord::Error(record) => record.status,
        }
    }

    pub fn instrument_name(&self) -> Option<&str> {
        match self {
            ScanRecord::Maintenance(record) => Some(&record.instrument_name),
            ScanRecord::Error(_) => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ScanRecord::Maintenance(record) => Some(record.date),
            ScanRecord::Error(_) => None,
        }
    }

    pub fn as_maintenance(&self) -> Option<&MaintenanceRecord> {
        match self {
            ScanRecord::Maintenance(record) => Some(record),
            ScanRecord::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorRecord> {
        match self {
            ScanRecord::Maintenance(_) => None,
            ScanRecord::Error(record) => Some(record),
        }
    }

    pub fn is_error_record(&self) -> bool {
        matches!(self, ScanRecord::Error(_))
    }
}

impl From<MaintenanceRecord> for ScanRecord {
    fn from(record: MaintenanceRecord) -> Self {
        ScanRecord::Maintenance(record)
    }
}

impl From<ErrorRecord> for ScanRecord {
    fn from(record: ErrorRecord) -> Self {
        ScanRecord::Error(record)
    }
}
