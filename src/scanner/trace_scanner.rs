use crate::error::{MaintMonError, Result};
use crate::scanner::trace_filter::TraceFileFilter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory entry selected as a daily-maintenance trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFile {
    pub path: PathBuf,
    pub filename: String,
}

impl TraceFile {
    pub fn new(directory: &Path, filename: String) -> Self {
        Self {
            path: directory.join(&filename),
            filename,
        }
    }
}

/// Lists a single directory (no recursion) and keeps the trace candidates.
pub struct TraceScanner {
    filter: TraceFileFilter,
}

impl TraceScanner {
    pub fn new(filter: TraceFileFilter) -> Self {
        Self { filter }
    }

    /// Candidates of `root`, sorted by file name.
    ///
    /// Only the listing itself can fail here. Entries are selected by name, so
    /// a sub-directory with a matching name is still returned and fails later
    /// when its content is read.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<TraceFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(MaintMonError::DirectoryNotFound {
                path: root_path.display().to_string(),
            });
        }

        let entries = fs::read_dir(root_path).map_err(|e| directory_read_error(root_path, &e))?;

        let mut candidates = Vec::new();
        let mut skipped = 0usize;

        for entry in entries {
            let entry = entry.map_err(|e| directory_read_error(root_path, &e))?;

            // Names that are not valid UTF-8 can never match the pattern.
            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                skipped += 1;
                continue;
            };

            if self.filter.matches_name(&filename) {
                candidates.push(TraceFile::new(root_path, filename));
            } else {
                skipped += 1;
            }
        }

        candidates.sort_by(|a, b| a.filename.cmp(&b.filename));

        debug!(
            directory = %root_path.display(),
            candidates = candidates.len(),
            skipped,
            "listed trace directory"
        );

        Ok(candidates)
    }
}

impl Default for TraceScanner {
    fn default() -> Self {
        Self::new(TraceFileFilter::default())
    }
}

fn directory_read_error(path: &Path, error: &std::io::Error) -> MaintMonError {
    MaintMonError::DirectoryRead {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
