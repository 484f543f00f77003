use crate::config::{CliOverrides, Config};
use crate::error::{MaintMonError, Result};
use crate::report::RecordFilter;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "maintmon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarize instrument daily maintenance results from trace files")]
#[command(
    long_about = "maintmon scans a folder of VOVDailyMaintenance*.trc trace files, extracts the \
                  instrument and outcome of each run, and prints a filterable summary table."
)]
#[command(after_help = "EXAMPLES:\n  \
    maintmon /srv/traces\n  \
    maintmon --location \"Main Laboratory\" --instrument Palm\n  \
    maintmon /srv/traces --date 2024-03-01 --export today.csv\n  \
    maintmon /srv/traces --output-format json")]
pub struct Cli {
    /// Folder containing the trace files
    pub directory: Option<PathBuf>,

    /// Named folder from the [locations] table of the configuration
    #[arg(short, long, conflicts_with = "directory")]
    pub location: Option<String>,

    /// List the configured locations and exit
    #[arg(long)]
    pub list_locations: bool,

    /// Only show records for this instrument (e.g. Palm)
    #[arg(short, long)]
    pub instrument: Option<String>,

    /// Only show records last modified on this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Export the shown records as CSV (defaults to output.export_file)
    #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
    pub export: Option<Option<PathBuf>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let export_file = self.export.as_ref().and_then(|path| path.clone());

        CliOverrides::new()
            .with_export_file(export_file)
            .with_no_progress(self.no_progress)
    }

    /// Folder to scan: the positional argument, else `--location`, else the
    /// configured default location.
    pub fn resolve_directory(&self, config: &Config) -> Result<PathBuf> {
        if let Some(ref directory) = self.directory {
            return Ok(directory.clone());
        }

        if let Some(ref location) = self.location {
            return config.location(location).map(|p| p.to_path_buf());
        }

        config
            .default_directory()?
            .map(|p| p.to_path_buf())
            .ok_or(MaintMonError::NoDirectory)
    }

    pub fn record_filter(&self) -> RecordFilter {
        RecordFilter::new()
            .with_instrument(self.instrument.clone())
            .with_date(self.date)
    }

    pub fn wants_export(&self) -> bool {
        self.export.is_some()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD, e.g. 2024-03-01", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn base_cli() -> Cli {
        Cli {
            directory: None,
            location: None,
            list_locations: false,
            instrument: None,
            date: None,
            export: None,
            config: None,
            output_format: OutputFormat::Human,
            no_progress: false,
            verbose: 0,
            quiet: false,
            generate_config: false,
        }
    }

    fn config_with_locations() -> Config {
        let mut config = Config::default();
        config
            .locations
            .insert("Main Laboratory".to_string(), PathBuf::from("/srv/main"));
        config
            .locations
            .insert("Lab Station 1".to_string(), PathBuf::from("/srv/lab1"));
        config
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date("01/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_directory_takes_precedence() {
        let mut config = config_with_locations();
        config.scan.default_location = Some("Main Laboratory".to_string());

        let mut cli = base_cli();
        cli.directory = Some(PathBuf::from("/tmp/traces"));

        assert_eq!(
            cli.resolve_directory(&config).unwrap(),
            PathBuf::from("/tmp/traces")
        );
    }

    #[test]
    fn test_location_resolution() {
        let config = config_with_locations();

        let mut cli = base_cli();
        cli.location = Some("Lab Station 1".to_string());
        assert_eq!(cli.resolve_directory(&config).unwrap(), Path::new("/srv/lab1"));

        cli.location = Some("Lab Station 9".to_string());
        assert!(matches!(
            cli.resolve_directory(&config),
            Err(MaintMonError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn test_default_location_resolution() {
        let mut config = config_with_locations();
        let cli = base_cli();

        assert!(matches!(
            cli.resolve_directory(&config),
            Err(MaintMonError::NoDirectory)
        ));

        config.scan.default_location = Some("Main Laboratory".to_string());
        assert_eq!(cli.resolve_directory(&config).unwrap(), Path::new("/srv/main"));
    }

    #[test]
    fn test_export_overrides() {
        let mut cli = base_cli();
        assert!(!cli.wants_export());
        assert!(cli.create_cli_overrides().export_file.is_none());

        cli.export = Some(None);
        assert!(cli.wants_export());
        assert!(cli.create_cli_overrides().export_file.is_none());

        cli.export = Some(Some(PathBuf::from("out.csv")));
        assert_eq!(
            cli.create_cli_overrides().export_file,
            Some(PathBuf::from("out.csv"))
        );
    }

    #[test]
    fn test_record_filter_from_args() {
        let mut cli = base_cli();
        cli.instrument = Some("Palm".to_string());
        cli.date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let filter = cli.record_filter();
        assert_eq!(filter.instrument.as_deref(), Some("Palm"));
        assert!(filter.is_active());
    }

    #[test]
    fn test_arguments_parse() {
        let cli = Cli::try_parse_from([
            "maintmon",
            "/srv/traces",
            "--instrument",
            "Palm",
            "--date",
            "2024-03-01",
            "--export",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.directory, Some(PathBuf::from("/srv/traces")));
        assert_eq!(cli.export, Some(None));
        assert_eq!(cli.verbosity_level(), 2);

        assert!(Cli::try_parse_from(["maintmon", "/srv/traces", "--location", "Lab"]).is_err());
        assert!(Cli::try_parse_from(["maintmon", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn test_help_has_no_banner() {
        use clap::CommandFactory;
        let mut command = Cli::command();
        assert!(command.get_before_help().is_none());

        let help = command.render_help().to_string();
        assert!(help.contains("Summarize instrument daily maintenance results"));
        assert!(!help.contains('🔬'));
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
