pub mod output;
pub mod progress;

pub use output::{OutputFormatter, OutputMode, ResultsView};
pub use progress::ProgressManager;
