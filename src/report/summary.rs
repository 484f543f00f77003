use crate::extractor::{MaintenanceStatus, ScanRecord};
use serde::{Deserialize, Serialize};

/// Headline counts shown above the results table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total: usize,
    pub successful: usize,
    /// `Failed` and `Error` outcomes, unreadable traces included.
    pub failed: usize,
    pub read_errors: usize,
}

impl ScanSummary {
    pub fn from_records(records: &[ScanRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total += 1;
            match record.status() {
                MaintenanceStatus::Success => summary.successful += 1,
                MaintenanceStatus::Failed | MaintenanceStatus::Error => summary.failed += 1,
            }
            if record.is_error_record() {
                summary.read_errors += 1;
            }
            summary
        })
    }

    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Total files: {}\nSuccessful maintenance: {}\nFailed maintenance: {}\n",
            self.total, self.successful, self.failed
        );
        if self.read_errors > 0 {
            summary.push_str(&format!("Unreadable files: {}\n", self.read_errors));
        }
        summary
    }
}
