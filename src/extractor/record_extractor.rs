use crate::error::{MaintMonError, Result};
use crate::extractor::record::{
    ErrorRecord, MaintenanceRecord, ScanRecord, MAINTENANCE_METHOD,
};
use crate::extractor::trace_parser::{classify_status, instrument_name, TraceParser};
use crate::scanner::{TraceFile, TraceScanner};
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ScanProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub current_file: Option<String>,
    pub failed_files: usize,
}

impl ScanProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            current_file: None,
            failed_files: 0,
        }
    }

    pub fn update_file(&mut self, filename: String) {
        self.files_processed += 1;
        self.current_file = Some(filename);
    }

    pub fn add_failure(&mut self) {
        self.failed_files += 1;
    }
}

/// Result of scanning one directory.
///
/// When the directory itself could not be listed, `error` holds the reason and
/// `records` is empty. Failures of individual traces never appear here; they
/// are [`ErrorRecord`]s inside `records`.
#[derive(Debug)]
pub struct ScanReport {
    pub directory: PathBuf,
    pub records: Vec<ScanRecord>,
    pub error: Option<MaintMonError>,
    pub elapsed: Duration,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_error_records(&self) -> bool {
        self.records.iter().any(ScanRecord::is_error_record)
    }
}

/// Turns a folder of daily-maintenance traces into records, one file at a time.
pub struct Extractor {
    scanner: TraceScanner,
    parser: TraceParser,
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            scanner: TraceScanner::default(),
            parser: TraceParser::default(),
        }
    }

    pub fn scan<P: AsRef<Path>>(&self, directory: P) -> ScanReport {
        self.scan_with_progress(directory, None)
    }

    pub fn scan_with_progress<P: AsRef<Path>>(
        &self,
        directory: P,
        progress_callback: Option<&dyn Fn(&ScanProgress)>,
    ) -> ScanReport {
        let directory = directory.as_ref();
        let start_time = Instant::now();

        let traces = match self.scanner.scan_directory(directory) {
            Ok(traces) => traces,
            Err(e) => {
                debug!(directory = %directory.display(), "scan aborted: {}", e);
                return ScanReport {
                    directory: directory.to_path_buf(),
                    records: Vec::new(),
                    error: Some(e),
                    elapsed: start_time.elapsed(),
                };
            }
        };

        let mut progress = ScanProgress::new(traces.len());
        let mut records = Vec::with_capacity(traces.len());

        for trace in &traces {
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            match self.extract_record(trace) {
                Ok(record) => {
                    debug!(
                        file = %record.filename,
                        serial = %record.serial_number,
                        status = %record.status,
                        "parsed trace"
                    );
                    records.push(ScanRecord::Maintenance(record));
                }
                Err(e) => {
                    warn!("{}: ERROR - {}", trace.filename, failure_message(&e));
                    records.push(ScanRecord::Error(ErrorRecord::new(
                        trace.filename.clone(),
                        failure_message(&e),
                    )));
                    progress.add_failure();
                }
            }

            progress.update_file(trace.filename.clone());
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        ScanReport {
            directory: directory.to_path_buf(),
            records,
            error: None,
            elapsed: start_time.elapsed(),
        }
    }

    pub fn extract_record(&self, trace: &TraceFile) -> Result<MaintenanceRecord> {
        let date = modified_date(&trace.path).map_err(|e| read_failure(trace, &e))?;

        let bytes = fs::read(&trace.path).map_err(|e| read_failure(trace, &e))?;
        let content = decode_dropping_invalid(&bytes);

        let serial_number = self.parser.extract_serial(&content);

        Ok(MaintenanceRecord {
            filename: trace.filename.clone(),
            instrument_name: instrument_name(&serial_number),
            serial_number,
            date,
            status: classify_status(&content),
            method: MAINTENANCE_METHOD.to_string(),
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Local calendar date of a file's last modification.
pub fn modified_date(path: &Path) -> std::io::Result<NaiveDate> {
    let modified: SystemTime = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).date_naive())
}

/// Decode `bytes` as UTF-8, leaving out every invalid sequence.
///
/// A stray byte inside "Serial" or the serial digits must not split the token.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn read_failure(trace: &TraceFile, error: &std::io::Error) -> MaintMonError {
    MaintMonError::FileRead {
        filename: trace.filename.clone(),
        message: error.to_string(),
    }
}

fn failure_message(error: &MaintMonError) -> String {
    match error {
        MaintMonError::FileRead { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
