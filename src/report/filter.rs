use crate::extractor::ScanRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Instrument and date selection. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub instrument: Option<String>,
    pub date: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instrument(mut self, instrument: Option<String>) -> Self {
        self.instrument = instrument;
        self
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn is_active(&self) -> bool {
        self.instrument.is_some() || self.date.is_some()
    }

    /// Error records carry neither attribute, so any active criterion drops them.
    pub fn matches(&self, record: &ScanRecord) -> bool {
        if let Some(ref instrument) = self.instrument {
            if record.instrument_name() != Some(instrument.as_str()) {
                return false;
            }
        }

        if let Some(date) = self.date {
            if record.date() != Some(date) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, records: &'a [ScanRecord]) -> Vec<&'a ScanRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn describe(&self) -> String {
        let instrument = self.instrument.as_deref().unwrap_or("All");
        let date = self
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "All".to_string());
        format!("instrument: {}, date: {}", instrument, date)
    }
}

/// Values offered for filtering, sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterChoices {
    pub instruments: Vec<String>,
    pub dates: Vec<NaiveDate>,
}

pub fn filter_choices(records: &[ScanRecord]) -> FilterChoices {
    let mut instruments = BTreeSet::new();
    let mut dates = BTreeSet::new();

    for record in records {
        if let Some(name) = record.instrument_name() {
            instruments.insert(name.to_string());
        }
        if let Some(date) = record.date() {
            dates.insert(date);
        }
    }

    FilterChoices {
        instruments: instruments.into_iter().collect(),
        dates: dates.into_iter().collect(),
    }
}
