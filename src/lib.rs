pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod report;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, ScanConfig};
pub use error::{MaintMonError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ErrorRecord, Extractor, MaintenanceRecord, MaintenanceStatus, ScanProgress, ScanRecord,
    ScanReport, TraceParser,
};
pub use report::{export_csv, filter_choices, FilterChoices, RecordFilter, ScanSummary};
pub use scanner::{TraceFile, TraceFileFilter, TraceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager, ResultsView};

use std::path::{Path, PathBuf};

/// Main library interface: scans a folder and presents the results.
pub struct MaintenanceMonitor {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    extractor: Extractor,
}

impl MaintenanceMonitor {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_progress =
            config.scan.show_progress && !quiet && output_mode != OutputMode::Json;
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            output_formatter,
            progress_manager,
            extractor: Extractor::new(),
        }
    }

    /// Create a monitor from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Scan `directory` with a progress bar.
    ///
    /// Never fails: a folder that cannot be listed yields an empty report whose
    /// `error` says why.
    pub fn run_scan(&self, directory: &Path) -> ScanReport {
        self.output_formatter
            .start_operation(&format!("Scanning {}", directory.display()));

        let file_progress = self.progress_manager.create_file_progress(0);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ScanProgress| {
                ui::progress::update_file_progress(&pb, progress);
            }
        };

        let report = self
            .extractor
            .scan_with_progress(directory, Some(&progress_callback));

        if report.error.is_some() {
            file_progress.finish_and_clear();
            self.progress_manager.clear();
        } else {
            ui::progress::finish_progress_with_summary(
                &file_progress,
                &format!("Processed {} traces", report.records.len()),
                report.elapsed,
            );
            self.progress_manager.clear();
            self.output_formatter.info(&format!(
                "Found {} maintenance traces in {}",
                report.records.len(),
                directory.display()
            ));
        }

        report
    }

    /// Render the `shown` subset of `report`, with metrics over the whole scan.
    pub fn print_results(&self, report: &ScanReport, filter: &RecordFilter, shown: &[&ScanRecord]) {
        let summary = ScanSummary::from_records(&report.records);
        self.output_formatter.debug(&summary.display_summary());

        let choices = filter_choices(&report.records);
        let view = ResultsView {
            directory: &report.directory,
            summary,
            shown,
            filter,
            choices: &choices,
            show_method: self.config.output.show_method,
            elapsed: report.elapsed,
        };

        self.output_formatter.print_scan_results(&view);
    }

    /// Write `shown` to the configured export file and return its path.
    pub fn export_results(&self, shown: &[&ScanRecord]) -> Result<PathBuf> {
        let path = self.config.output.export_file.clone();
        let rows = export_csv(shown, &path)?;
        tracing::info!(path = %path.display(), rows, "exported results");
        Ok(path)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &MaintMonError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Scan a folder with default settings and no terminal output.
pub fn scan_directory<P: AsRef<Path>>(directory: P) -> ScanReport {
    Extractor::new().scan(directory)
}
