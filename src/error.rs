use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaintMonError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Folder not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Error accessing directory {path}: {message}")]
    DirectoryRead { path: String, message: String },

    #[error("Failed to read {filename}: {message}")]
    FileRead { filename: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown location: {name}")]
    UnknownLocation { name: String, known: Vec<String> },

    #[error("No directory to scan")]
    NoDirectory,

    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("Invalid file name pattern: {pattern}")]
    InvalidPattern { pattern: String, message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for MaintMonError {
    fn user_message(&self) -> String {
        match self {
            MaintMonError::DirectoryNotFound { path } => {
                format!("Folder not found: {}", path)
            }
            MaintMonError::DirectoryRead { path, message } => {
                format!("Error accessing directory {}: {}", path, message)
            }
            MaintMonError::FileRead { filename, message } => {
                format!("{}: ERROR - {}", filename, message)
            }
            MaintMonError::UnknownLocation { name, known } => {
                if known.is_empty() {
                    format!("Unknown location '{}' (no locations are configured)", name)
                } else {
                    format!(
                        "Unknown location '{}' (known locations: {})",
                        name,
                        known.join(", ")
                    )
                }
            }
            MaintMonError::NoDirectory => {
                "No folder given: pass a directory, a --location, or set scan.default_location"
                    .to_string()
            }
            MaintMonError::Export { message } => {
                format!("Could not export results: {}", message)
            }
            MaintMonError::InvalidPattern { pattern, message } => {
                format!("Invalid file name pattern '{}': {}", pattern, message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            MaintMonError::DirectoryNotFound { .. } => Some(
                "Check the folder path, or pick one of the configured locations with --location.".to_string()
            ),
            MaintMonError::DirectoryRead { .. } => Some(
                "Ensure the folder is a directory and that you have permission to list it.".to_string()
            ),
            MaintMonError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            MaintMonError::UnknownLocation { .. } => Some(
                "Run with --list-locations to see the configured locations.".to_string()
            ),
            MaintMonError::NoDirectory => Some(
                "Example: maintmon /path/to/traces".to_string()
            ),
            MaintMonError::Export { .. } => Some(
                "Check that the export path is writable, or choose another one with --export <PATH>.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for MaintMonError {
    fn from(error: toml::de::Error) -> Self {
        MaintMonError::Config {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for MaintMonError {
    fn from(error: csv::Error) -> Self {
        MaintMonError::Export {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MaintMonError>;
