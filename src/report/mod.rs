pub mod export;
pub mod filter;
pub mod summary;

pub use export::{export_csv, write_csv};
pub use filter::{filter_choices, FilterChoices, RecordFilter};
pub use summary::ScanSummary;
