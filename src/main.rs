use clap::Parser;
use maintmon::{
    Cli, MaintMonError, MaintenanceMonitor, OutputFormatter, OutputMode, ScanReport,
    UserFriendlyError,
};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    setup_logging(cli.verbosity_level(), cli.quiet);

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let monitor = match MaintenanceMonitor::from_cli(&cli) {
        Ok(monitor) => monitor,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    if cli.list_locations {
        monitor
            .output_formatter()
            .print_locations(&monitor.config().locations);
        return 0;
    }

    let directory = match cli.resolve_directory(monitor.config()) {
        Ok(directory) => directory,
        Err(e) => {
            monitor.handle_error(&e);
            return exit_code(&e);
        }
    };

    let report = monitor.run_scan(&directory);
    handle_scan_report(&cli, &monitor, &report)
}

fn handle_scan_report(cli: &Cli, monitor: &MaintenanceMonitor, report: &ScanReport) -> i32 {
    let formatter = monitor.output_formatter();

    if let Some(ref e) = report.error {
        monitor.handle_error(e);
        return exit_code(e);
    }

    if report.is_empty() {
        formatter.warning("No maintenance files found in the specified folder.");
        return 6;
    }

    let filter = cli.record_filter();
    let shown = filter.apply(&report.records);
    monitor.print_results(report, &filter, &shown);

    if cli.wants_export() {
        if shown.is_empty() {
            formatter.warning("Nothing to export: no records match the selected filters.");
        } else {
            match monitor.export_results(&shown) {
                Ok(path) => formatter.success(&format!(
                    "Exported {} records to {}",
                    shown.len(),
                    path.display()
                )),
                Err(e) => {
                    monitor.handle_error(&e);
                    return exit_code(&e);
                }
            }
        }
    }

    if report.has_error_records() {
        7 // Completed, but some traces could not be read
    } else {
        0
    }
}

fn exit_code(error: &MaintMonError) -> i32 {
    match error {
        MaintMonError::DirectoryNotFound { .. } => 3,
        MaintMonError::DirectoryRead { .. } => 4,
        MaintMonError::Export { .. } => 5,
        _ => 1, // General error
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "maintmon.toml".to_string());

    match MaintenanceMonitor::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  maintmon --config {} --location \"Main Laboratory\"", config_path);
            println!("\nEdit the [locations] table to point at your trace folders.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &MaintMonError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from `warn`.
fn setup_logging(verbosity: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("maintmon={}", level)));

    // A subscriber may already be installed when running under tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use maintmon::Config;
    use std::fs;
    use tempfile::TempDir;

    fn base_cli() -> Cli {
        Cli {
            directory: None,
            location: None,
            list_locations: false,
            instrument: None,
            date: None,
            export: None,
            config: None,
            output_format: maintmon::OutputFormat::Plain,
            no_progress: true,
            verbose: 0,
            quiet: true,
            generate_config: false,
        }
    }

    fn quiet_monitor(config: Config) -> MaintenanceMonitor {
        MaintenanceMonitor::new(config, OutputMode::Plain, 0, true)
    }

    fn write_trace(dir: &std::path::Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut cli = base_cli();
        cli.config = Some(config_path.clone());
        cli.generate_config = true;

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[locations]"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&MaintMonError::DirectoryNotFound {
                path: "/x".to_string()
            }),
            3
        );
        assert_eq!(
            exit_code(&MaintMonError::DirectoryRead {
                path: "/x".to_string(),
                message: "denied".to_string()
            }),
            4
        );
        assert_eq!(
            exit_code(&MaintMonError::Export {
                message: "disk full".to_string()
            }),
            5
        );
        assert_eq!(exit_code(&MaintMonError::NoDirectory), 1);
    }

    #[test]
    fn test_empty_folder_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let cli = base_cli();
        let monitor = quiet_monitor(Config::default());

        let report = monitor.run_scan(temp_dir.path());
        assert_eq!(handle_scan_report(&cli, &monitor, &report), 6);
    }

    #[test]
    fn test_scan_with_unreadable_trace() {
        let temp_dir = TempDir::new().unwrap();
        write_trace(
            temp_dir.path(),
            "VOVDailyMaintenance_a.trc",
            "Instrument Serial No: 1000\ndaily maintenance succeeded",
        );
        fs::create_dir(temp_dir.path().join("VOVDailyMaintenance_b.trc")).unwrap();

        let cli = base_cli();
        let monitor = quiet_monitor(Config::default());

        let report = monitor.run_scan(temp_dir.path());
        assert_eq!(handle_scan_report(&cli, &monitor, &report), 7);
    }

    #[test]
    fn test_export_with_filter() {
        let temp_dir = TempDir::new().unwrap();
        write_trace(
            temp_dir.path(),
            "VOVDailyMaintenance_a.trc",
            "Instrument Serial No: 1000\ndaily maintenance succeeded",
        );
        write_trace(
            temp_dir.path(),
            "VOVDailyMaintenance_b.trc",
            "Instrument Serial No: 1650\ndaily maintenance failed",
        );

        let export_path = temp_dir.path().join("palm.csv");
        let mut cli = base_cli();
        cli.instrument = Some("Palm".to_string());
        cli.export = Some(Some(export_path.clone()));

        let mut config = Config::default();
        config.output.export_file = export_path.clone();
        let monitor = quiet_monitor(config);

        let report = monitor.run_scan(temp_dir.path());
        assert_eq!(handle_scan_report(&cli, &monitor, &report), 0);

        let content = fs::read_to_string(&export_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Palm,1650"));
        assert!(!content.contains("Banyan"));
    }

    #[test]
    fn test_export_failure_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        write_trace(
            temp_dir.path(),
            "VOVDailyMaintenance_a.trc",
            "Instrument Serial No: 1526\ndaily maintenance succeeded",
        );
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a folder").unwrap();

        let mut cli = base_cli();
        cli.export = Some(None);

        let mut config = Config::default();
        config.output.export_file = blocker.join("out.csv");
        let monitor = quiet_monitor(config);

        let report = monitor.run_scan(temp_dir.path());
        assert_eq!(handle_scan_report(&cli, &monitor, &report), 5);
    }
}
