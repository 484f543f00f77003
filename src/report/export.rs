use crate::error::{MaintMonError, Result};
use crate::extractor::ScanRecord;
use std::fs;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 7] = [
    "filename",
    "instrument_name",
    "serial_number",
    "date",
    "status",
    "method",
    "error",
];

/// Write `records` as CSV to `path`, creating parent directories as needed.
/// Returns the number of data rows written.
pub fn export_csv<P: AsRef<Path>>(records: &[&ScanRecord], path: P) -> Result<usize> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MaintMonError::Export {
            message: format!("cannot create {}: {}", parent.display(), e),
        })?;
    }

    let file = fs::File::create(path).map_err(|e| MaintMonError::Export {
        message: format!("cannot create {}: {}", path.display(), e),
    })?;

    write_csv(records, file)
}

pub fn write_csv<W: Write>(records: &[&ScanRecord], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for record in records {
        match record {
            ScanRecord::Maintenance(r) => wtr.write_record([
                r.filename.as_str(),
                r.instrument_name.as_str(),
                r.serial_number.as_str(),
                r.date.to_string().as_str(),
                r.status.as_str(),
                r.method.as_str(),
                "",
            ])?,
            ScanRecord::Error(r) => wtr.write_record([
                r.filename.as_str(),
                "",
                "",
                "",
                r.status.as_str(),
                "",
                r.error.as_str(),
            ])?,
        }
    }

    wtr.flush().map_err(|e| MaintMonError::Export {
        message: e.to_string(),
    })?;

    Ok(records.len())
}
