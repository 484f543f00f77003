use crate::error::{MaintMonError, UserFriendlyError};
use crate::extractor::{MaintenanceStatus, ScanRecord};
use crate::report::{FilterChoices, RecordFilter, ScanSummary};
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static MICROSCOPE: Emoji = Emoji("🔬 ", "> ");

/// Everything needed to render one scan.
pub struct ResultsView<'a> {
    pub directory: &'a Path,
    /// Counts over the whole scan, before filtering.
    pub summary: ScanSummary,
    pub shown: &'a [&'a ScanRecord],
    pub filter: &'a RecordFilter,
    /// Instruments and dates present in the whole scan.
    pub choices: &'a FilterChoices,
    pub show_method: bool,
    pub elapsed: Duration,
}

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        // JSON mode prints a single document on stdout.
        if self.should_show_message(0) && self.mode != OutputMode::Json {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", MICROSCOPE, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                _ => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &MaintMonError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    eprintln!(
                        "{}",
                        serde_json::json!({ "type": "suggestion", "message": suggestion })
                    );
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_scan_results(&self, view: &ResultsView<'_>) {
        match self.mode {
            OutputMode::Json => {
                let document = scan_results_json(view);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputMode::Human | OutputMode::Plain => self.print_text_results(view),
        }
    }

    pub fn print_locations(&self, locations: &BTreeMap<String, PathBuf>) {
        match self.mode {
            OutputMode::Json => {
                let map: BTreeMap<_, _> = locations
                    .iter()
                    .map(|(name, path)| (name.clone(), path.display().to_string()))
                    .collect();
                self.print_json_object(&serde_json::json!({ "locations": map }));
            }
            _ if locations.is_empty() => {
                println!("No locations configured. Add a [locations] table to maintmon.toml.");
            }
            _ => {
                let width = locations.keys().map(|k| k.chars().count()).max().unwrap_or(0);
                for (name, path) in locations {
                    println!("{:<width$}  {}", name, path.display(), width = width);
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{}{}", MICROSCOPE, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {}
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_text_results(&self, view: &ResultsView<'_>) {
        self.print_header("Maintenance Results");

        if !self.quiet {
            println!("Folder: {}", view.directory.display());
            println!();
            self.print_metric("Total Files", view.summary.total, None);
            self.print_metric("Successful Maintenance", view.summary.successful, Some(true));
            self.print_metric("Failed Maintenance", view.summary.failed, Some(false));
            println!();

            if view.filter.is_active() {
                println!("Filter: {}", view.filter.describe());
                println!();
            }
        }

        let error_rows: Vec<Vec<String>> = view
            .shown
            .iter()
            .filter_map(|r| r.as_error())
            .map(|r| vec![r.filename.clone(), r.error.clone()])
            .collect();

        if !error_rows.is_empty() {
            self.error("Errors found in processing");
            for line in render_table(&["filename", "error"], &error_rows, None, |_, cell| {
                cell.to_string()
            }) {
                println!("{}", line);
            }
            println!();
        }

        let mut headers = vec!["instrument_name", "serial_number", "date", "status"];
        if view.show_method {
            headers.push("method");
        }

        let rows: Vec<Vec<String>> = view
            .shown
            .iter()
            .filter_map(|r| r.as_maintenance())
            .map(|r| {
                let mut row = vec![
                    r.instrument_name.clone(),
                    r.serial_number.clone(),
                    r.date.to_string(),
                    r.status.to_string(),
                ];
                if view.show_method {
                    row.push(r.method.clone());
                }
                row
            })
            .collect();

        if rows.is_empty() && error_rows.is_empty() {
            println!("No records match the selected filters.");
            if !self.quiet {
                print_choices(view.choices);
            }
        } else if !rows.is_empty() {
            for line in render_table(&headers, &rows, Some(3), |raw, padded| {
                self.highlight_status(raw, padded)
            }) {
                println!("{}", line);
            }
        }

        if !self.quiet {
            println!();
            println!(
                "Showing {} of {} records ({})",
                view.shown.len(),
                view.summary.total,
                format_duration(view.elapsed)
            );
        }
    }

    fn print_metric(&self, label: &str, value: usize, good: Option<bool>) {
        let rendered = if self.use_colors {
            match good {
                Some(true) => style(value).green().bold().to_string(),
                Some(false) if value > 0 => style(value).red().bold().to_string(),
                _ => style(value).cyan().bold().to_string(),
            }
        } else {
            value.to_string()
        };
        println!("  {:<24}{}", format!("{}:", label), rendered);
    }

    fn highlight_status(&self, raw: &str, padded: &str) -> String {
        if !self.use_colors {
            return padded.to_string();
        }
        match raw {
            s if s == MaintenanceStatus::Success.as_str() => style(padded).black().on_green().to_string(),
            s if s == MaintenanceStatus::Failed.as_str() || s == MaintenanceStatus::Error.as_str() => {
                style(padded).white().on_red().to_string()
            }
            _ => padded.to_string(),
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        // Messages go to stderr so stdout stays a single JSON document.
        eprintln!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "type": "message",
                "level": level,
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
            .unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

pub fn scan_results_json(view: &ResultsView<'_>) -> serde_json::Value {
    serde_json::json!({
        "directory": view.directory.display().to_string(),
        "summary": view.summary,
        "filter": {
            "instrument": view.filter.instrument,
            "date": view.filter.date,
        },
        "records": view.shown,
        "choices": view.choices,
        "duration_ms": view.elapsed.as_millis() as u64,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
}

fn print_choices(choices: &FilterChoices) {
    let instruments = if choices.instruments.is_empty() {
        "none".to_string()
    } else {
        choices.instruments.join(", ")
    };
    let dates = if choices.dates.is_empty() {
        "none".to_string()
    } else {
        choices
            .dates
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Available instruments: {}", instruments);
    println!("Available dates: {}", dates);
}

/// Lay out `rows` under `headers` with space-padded columns.
///
/// `style_cell` receives the raw text and the padded text of each cell in
/// column `styled_column`, so colouring never disturbs alignment.
fn render_table<F>(
    headers: &[&str],
    rows: &[Vec<String>],
    styled_column: Option<usize>,
    style_cell: F,
) -> Vec<String>
where
    F: Fn(&str, &str) -> String,
{
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<w$}", h, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string(),
    );
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = format!("{:<w$}", cell, w = w);
                if Some(i) == styled_column {
                    style_cell(cell, &padded)
                } else {
                    padded
                }
            })
            .collect();
        lines.push(cells.join("  ").trim_end().to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{ErrorRecord, MaintenanceRecord, MAINTENANCE_METHOD};
    use chrono::NaiveDate;

    #[test]
    fn test_formatter_creation() {
        let formatter = OutputFormatter::new(OutputMode::Human, 1, false);
        assert_eq!(formatter.mode, OutputMode::Human);
        assert_eq!(formatter.verbose_level, 1);
        assert!(!formatter.quiet);
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(formatter.should_show_message(2));
        assert!(!formatter.should_show_message(3));

        let quiet_formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert!(!quiet_formatter.should_show_message(0));
    }

    #[test]
    fn test_render_table_alignment() {
        let rows = vec![
            vec!["Eucalyptus".to_string(), "Success".to_string()],
            vec!["Palm".to_string(), "Failed".to_string()],
        ];
        let lines = render_table(&["instrument_name", "status"], &rows, Some(1), |raw, _| {
            format!("<{}>", raw)
        });

        assert_eq!(lines[0], "instrument_name  status");
        assert_eq!(lines[1], "---------------  -------");
        assert_eq!(lines[2], "Eucalyptus       <Success>");
        assert_eq!(lines[3], "Palm             <Failed>");
    }

    #[test]
    fn test_plain_status_is_not_styled() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        assert_eq!(formatter.highlight_status("Success", "Success "), "Success ");
    }

    #[test]
    fn test_scan_results_json() {
        let records = vec![
            ScanRecord::Maintenance(MaintenanceRecord {
                filename: "VOVDailyMaintenance_1.trc".to_string(),
                instrument_name: "Banyan".to_string(),
                serial_number: "1000".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                status: MaintenanceStatus::Success,
                method: MAINTENANCE_METHOD.to_string(),
            }),
            ScanRecord::Error(ErrorRecord::new("VOVDailyMaintenance_2.trc", "denied")),
        ];
        let shown: Vec<&ScanRecord> = records.iter().collect();
        let filter = RecordFilter::new().with_instrument(Some("Banyan".to_string()));
        let choices = crate::report::filter_choices(&records);

        let view = ResultsView {
            directory: Path::new("/traces"),
            summary: ScanSummary::from_records(&records),
            shown: &shown,
            filter: &filter,
            choices: &choices,
            show_method: true,
            elapsed: Duration::from_millis(12),
        };

        let value = scan_results_json(&view);
        assert_eq!(value["directory"], "/traces");
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["filter"]["instrument"], "Banyan");
        assert!(value["filter"]["date"].is_null());
        assert_eq!(value["records"][0]["instrument_name"], "Banyan");
        assert_eq!(value["records"][1]["kind"], "error");
        assert_eq!(value["choices"]["instruments"][0], "Banyan");
        assert_eq!(value["choices"]["dates"][0], "2024-03-01");
    }
}
