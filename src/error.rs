//! Error types shared by configuration, household construction, and export.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid configuration, reported against the offending field.
///
/// Raised at construction time for unknown pricing profiles, bad calendar
/// values, bad appliance parameters, and duplicate appliance names.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"household.month_days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Re-roots the field path under `prefix`, e.g. `name` -> `appliances[1].name`.
    pub fn within(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

/// Top-level error for the advisor binary and file-facing helpers.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("cannot read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}
