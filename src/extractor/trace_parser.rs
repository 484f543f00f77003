//! Text-level interpretation of a daily-maintenance trace.

use crate::extractor::record::MaintenanceStatus;
use regex::{Regex, RegexBuilder};

/// Serial number used when no pattern matches.
pub const UNKNOWN_SERIAL: &str = "Unknown";

/// Serial number patterns, tried in order. The last one that matches wins.
pub const SERIAL_PATTERNS: &[&str] = &[r"Instrument\s+Serial\s+No:\s+(\d+)"];

/// Known instruments keyed by serial number.
pub const INSTRUMENTS: &[(&str, &str)] = &[
    ("1000", "Banyan"),
    ("1526", "Eucalyptus"),
    ("1650", "Palm"),
];

const SUCCESS_PHRASE: &str = "daily maintenance succeeded";
const FAILURE_PHRASE: &str = "daily maintenance failed";

/// Human-readable name for a serial number.
pub fn instrument_name(serial_number: &str) -> String {
    INSTRUMENTS
        .iter()
        .find(|(serial, _)| *serial == serial_number)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Unknown instrument: {}", serial_number))
}

/// Classify a trace by its outcome phrase. Success is checked first.
pub fn classify_status(content: &str) -> MaintenanceStatus {
    let content = content.to_lowercase();

    if content.contains(SUCCESS_PHRASE) {
        MaintenanceStatus::Success
    } else if content.contains(FAILURE_PHRASE) {
        MaintenanceStatus::Failed
    } else {
        MaintenanceStatus::Error
    }
}

pub struct TraceParser {
    serial_patterns: Vec<Regex>,
}

impl TraceParser {
    pub fn new() -> Self {
        Self::with_serial_patterns(SERIAL_PATTERNS)
    }

    /// Patterns that fail to compile are ignored. Every pattern must capture
    /// the serial digits in group 1.
    pub fn with_serial_patterns(patterns: &[&str]) -> Self {
        let serial_patterns = patterns
            .iter()
            .filter_map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .ok()
            })
            .collect();

        Self { serial_patterns }
    }

    pub fn extract_serial(&self, content: &str) -> String {
        let mut serial_number = UNKNOWN_SERIAL.to_string();

        for pattern in &self.serial_patterns {
            if let Some(serial) = pattern
                .captures(content)
                .and_then(|captures| captures.get(1))
            {
                serial_number = serial.as_str().trim().to_string();
            }
        }

        serial_number
    }

}

impl Default for TraceParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_extraction() {
        let parser = TraceParser::new();

        assert_eq!(parser.extract_serial("Instrument Serial No: 1526\n"), "1526");
        assert_eq!(
            parser.extract_serial("header\ninstrument   serial\tNO:  1000 trailing"),
            "1000"
        );
    }

    #[test]
    fn test_serial_requires_whitespace_between_tokens() {
        let parser = TraceParser::new();

        assert_eq!(parser.extract_serial("Instrument Serial No:1526"), UNKNOWN_SERIAL);
        assert_eq!(parser.extract_serial("InstrumentSerial No: 1526"), UNKNOWN_SERIAL);
        assert_eq!(parser.extract_serial("Instrument Serial No: abc"), UNKNOWN_SERIAL);
        assert_eq!(parser.extract_serial(""), UNKNOWN_SERIAL);
    }

    #[test]
    fn test_first_occurrence_within_a_pattern() {
        let parser = TraceParser::new();
        let content = "Instrument Serial No: 1000\nInstrument Serial No: 1650\n";

        assert_eq!(parser.extract_serial(content), "1000");
    }

    #[test]
    fn test_last_matching_pattern_wins() {
        let parser = TraceParser::with_serial_patterns(&[
            r"Instrument\s+Serial\s+No:\s+(\d+)",
            r"Unit\s+ID:\s+(\d+)",
            r"Never\s+Present:\s+(\d+)",
        ]);
        let content = "Instrument Serial No: 1000\nUnit ID: 1650\n";

        assert_eq!(parser.extract_serial(content), "1650");
    }

    #[test]
    fn test_invalid_patterns_are_ignored() {
        let parser = TraceParser::with_serial_patterns(&[r"(unclosed", r"ID:\s+(\d+)"]);

        assert_eq!(parser.extract_serial("ID: 42"), "42");
        assert_eq!(parser.extract_serial("Instrument Serial No: 7"), UNKNOWN_SERIAL);
    }

    #[test]
    fn test_instrument_lookup() {
        assert_eq!(instrument_name("1000"), "Banyan");
        assert_eq!(instrument_name("1526"), "Eucalyptus");
        assert_eq!(instrument_name("1650"), "Palm");
        assert_eq!(instrument_name("0042"), "Unknown instrument: 0042");
        assert_eq!(
            instrument_name(UNKNOWN_SERIAL),
            "Unknown instrument: Unknown"
        );
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            classify_status("... Daily Maintenance Succeeded ..."),
            MaintenanceStatus::Success
        );
        assert_eq!(
            classify_status("DAILY MAINTENANCE FAILED at step 3"),
            MaintenanceStatus::Failed
        );
        assert_eq!(
            classify_status("trace ended unexpectedly"),
            MaintenanceStatus::Error
        );
    }

    #[test]
    fn test_success_phrase_takes_precedence() {
        let content = "daily maintenance failed\nretry...\ndaily maintenance succeeded";
        assert_eq!(classify_status(content), MaintenanceStatus::Success);
    }
}
