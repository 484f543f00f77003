use crate::error::{MaintMonError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
    /// Named trace folders, e.g. `"Main Laboratory" = "/srv/traces/main"`.
    pub locations: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub default_location: Option<String>,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub export_file: PathBuf,
    pub show_method: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_location: None,
            show_progress: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_file: PathBuf::from("maintenance_results.csv"),
            show_method: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MaintMonError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MaintMonError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| MaintMonError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["maintmon.toml", ".maintmon.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref export_file) = cli_args.export_file {
            self.output.export_file = export_file.clone();
        }

        if cli_args.no_progress {
            self.scan.show_progress = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.export_file.as_os_str().is_empty() {
            return Err(MaintMonError::Config {
                message: "Export file name must not be empty".to_string(),
            });
        }

        for (name, path) in &self.locations {
            if name.trim().is_empty() {
                return Err(MaintMonError::Config {
                    message: "Location names must not be empty".to_string(),
                });
            }
            if path.as_os_str().is_empty() {
                return Err(MaintMonError::Config {
                    message: format!("Location '{}' has an empty path", name),
                });
            }
        }

        if let Some(ref default_location) = self.scan.default_location {
            if !self.locations.contains_key(default_location) {
                return Err(MaintMonError::Config {
                    message: format!(
                        "Default location '{}' is not defined in [locations]",
                        default_location
                    ),
                });
            }
        }

        Ok(())
    }

    /// Look up a named location.
    pub fn location(&self, name: &str) -> Result<&Path> {
        self.locations
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| MaintMonError::UnknownLocation {
                name: name.to_string(),
                known: self.locations.keys().cloned().collect(),
            })
    }

    /// Folder of the configured default location, if any.
    pub fn default_directory(&self) -> Result<Option<&Path>> {
        match self.scan.default_location {
            Some(ref name) => self.location(name).map(Some),
            None => Ok(None),
        }
    }

    pub fn create_sample_config() -> String {
        let mut sample_config = Self::default();
        for (name, path) in [
            ("Main Laboratory", "/path/to/main/laboratory/traces"),
            ("Backup Server", "/path/to/backup/server/traces"),
            ("Lab Station 1", "/path/to/lab1/traces"),
            ("Lab Station 2", "/path/to/lab2/traces"),
        ] {
            sample_config
                .locations
                .insert(name.to_string(), PathBuf::from(path));
        }
        sample_config.scan.default_location = Some("Main Laboratory".to_string());

        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub export_file: Option<PathBuf>,
    pub no_progress: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export_file(mut self, export_file: Option<PathBuf>) -> Self {
        self.export_file = export_file;
        self
    }

    pub fn with_no_progress(mut self, no_progress: bool) -> Self {
        self.no_progress = no_progress;
        self
    }
}
