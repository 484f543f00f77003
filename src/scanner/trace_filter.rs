use crate::error::{MaintMonError, Result};
use glob::{MatchOptions, Pattern};

/// Extension every daily-maintenance trace carries, compared case-insensitively.
pub const TRACE_EXTENSION: &str = ".trc";

/// File name glob for the daily-maintenance method, compared case-sensitively.
pub const TRACE_NAME_PATTERN: &str = "VOVDailyMaintenance*";

/// Decides which directory entries are daily-maintenance trace files.
///
/// A name is a candidate only when it ends with [`TRACE_EXTENSION`] (any case)
/// and matches [`TRACE_NAME_PATTERN`] (exact case). The decision is made from
/// the name alone.
#[derive(Debug, Clone)]
pub struct TraceFileFilter {
    extension: String,
    pattern: Pattern,
}

impl TraceFileFilter {
    pub fn new(extension: &str, name_pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(name_pattern).map_err(|e| MaintMonError::InvalidPattern {
            pattern: name_pattern.to_string(),
            message: e.msg.to_string(),
        })?;

        Ok(Self {
            extension: extension.to_lowercase(),
            pattern,
        })
    }

    pub fn matches_name(&self, filename: &str) -> bool {
        filename.to_lowercase().ends_with(&self.extension)
            && self.pattern.matches_with(filename, Self::match_options())
    }

    // `*` must also cross path separators and leading dots, as in fnmatch.
    fn match_options() -> MatchOptions {
        MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        }
    }
}

impl Default for TraceFileFilter {
    fn default() -> Self {
        Self::new(TRACE_EXTENSION, TRACE_NAME_PATTERN).unwrap_or_else(|_| Self {
            extension: TRACE_EXTENSION.to_string(),
            pattern: Pattern::default(),
        })
    }
}
