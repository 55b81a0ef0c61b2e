//! Configuration module for upmirror.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, and first-run bootstrapping
//! (writing a commented template for the operator to fill in).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::newtypes::RemotePath;
use crate::domain::target::SyncTarget;

/// Top-level configuration for upmirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub sync: SyncConfig,
    pub upyun: UpyunConfig,
    pub logging: LoggingConfig,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Local directory whose top-level files are mirrored.
    pub source_directory: PathBuf,
    /// Destination path inside the bucket. Must start with `/` and must
    /// not end with `/` unless it is exactly `/`.
    pub destination_path: String,
    /// Seconds between sync cycles.
    pub check_interval: u64,
}

/// Upyun credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpyunConfig {
    /// Bucket (service) name.
    pub bucket: String,
    /// Operator name.
    pub operator: String,
    /// Operator password. Never logged in plaintext.
    pub password: String,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/upmirror/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("upmirror")
            .join("config.yaml")
    }

    /// Write the commented default template to `path`.
    ///
    /// Used on first run when no configuration file exists yet: the daemon
    /// writes this template, tells the operator to edit it, and exits.
    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
        Ok(())
    }

    /// Build the immutable [`SyncTarget`] from a validated configuration.
    ///
    /// Call [`Config::validate`] first; this only fails if the destination
    /// path is malformed.
    pub fn sync_target(&self) -> anyhow::Result<SyncTarget> {
        let destination: RemotePath = self.sync.destination_path.parse()?;
        Ok(SyncTarget::new(
            self.sync.source_directory.clone(),
            destination,
            self.sync.check_interval,
        ))
    }
}

/// Commented template written on first run.
const DEFAULT_CONFIG_TEMPLATE: &str = "\
# upmirror configuration
#
# Edit the values below, then start the daemon again.

sync:
  # Local directory whose top-level files are mirrored to the bucket.
  source_directory: /srv/upload
  # Destination path inside the bucket. Must start with \"/\" and must not
  # end with \"/\" unless it is exactly \"/\".
  destination_path: /
  # Seconds between sync cycles.
  check_interval: 30

upyun:
  bucket: \"\"
  operator: \"\"
  password: \"\"

logging:
  level: info
";

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from("/srv/upload"),
            destination_path: "/".to_string(),
            check_interval: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.destination_path"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. Any error is fatal
    /// at startup: the daemon must not run a single cycle against a broken
    /// configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- sync ---
        if !self.sync.source_directory.is_dir() {
            errors.push(ValidationError {
                field: "sync.source_directory".into(),
                message: format!(
                    "not an existing directory: {}",
                    self.sync.source_directory.display()
                ),
            });
        }

        let dest = &self.sync.destination_path;
        if !dest.starts_with('/') || (dest != "/" && dest.ends_with('/')) {
            errors.push(ValidationError {
                field: "sync.destination_path".into(),
                message: "must start with '/' and must not end with '/' \
                          (except for the root directory)"
                    .into(),
            });
        }

        // --- upyun ---
        if self.upyun.bucket.is_empty() {
            errors.push(ValidationError {
                field: "upyun.bucket".into(),
                message: "must not be empty".into(),
            });
        }
        if self.upyun.operator.is_empty() {
            errors.push(ValidationError {
                field: "upyun.operator".into(),
                message: "must not be empty".into(),
            });
        }
        if self.upyun.password.is_empty() {
            errors.push(ValidationError {
                field: "upyun.password".into(),
                message: "must not be empty".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}
