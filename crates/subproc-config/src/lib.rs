// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for subproc.
//!
//! This crate provides [`SubprocConfig`] — defaults applied to every request
//! the CLI builds — together with helpers for loading from TOML files,
//! applying environment overrides, merging overlays, and producing advisory
//! [`ConfigWarning`]s.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use subproc_core::{Encoding, SubprocessRequest};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A search-path entry is relative and depends on the caller's cwd.
    RelativeSearchPath {
        /// The relative entry.
        entry: String,
    },
    /// The configured working directory does not exist right now.
    MissingWorkingDir {
        /// The configured path.
        path: String,
    },
    /// An explicit but empty search path means bare names never resolve.
    EmptySearchPath,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::RelativeSearchPath { entry } => {
                write!(f, "search path entry '{entry}' is relative")
            }
            ConfigWarning::MissingWorkingDir { path } => {
                write!(f, "working directory '{path}' does not exist")
            }
            ConfigWarning::EmptySearchPath => {
                write!(f, "search_path is empty; only explicit paths can be run")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Defaults for subprocess runs started from the CLI.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct SubprocConfig {
    /// Directories searched for bare command names. Unset means the
    /// inherited `PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_path: Option<Vec<String>>,

    /// Encoding label for captured output (e.g. `"utf-8"`, `"latin1"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Working directory for children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,

    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for SubprocConfig {
    fn default() -> Self {
        Self {
            search_path: None,
            encoding: None,
            working_dir: None,
            log_level: Some("info".into()),
        }
    }
}

impl SubprocConfig {
    /// The configured encoding, or UTF-8 when unset.
    pub fn encoding(&self) -> Result<Encoding, ConfigError> {
        match &self.encoding {
            Some(label) => label
                .parse()
                .map_err(|reason| ConfigError::ValidationError {
                    reasons: vec![reason],
                }),
            None => Ok(Encoding::default()),
        }
    }

    /// A request for `command` seeded with this configuration's defaults.
    pub fn request_for(&self, command: &str) -> Result<SubprocessRequest, ConfigError> {
        let mut request = SubprocessRequest::new(command).encoding(self.encoding()?);
        if let Some(dirs) = &self.search_path {
            request = request.search_path(dirs.iter().map(PathBuf::from));
        }
        if let Some(dir) = &self.working_dir {
            request = request.working_directory(dir);
        }
        Ok(request)
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`SubprocConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`SubprocConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<SubprocConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => SubprocConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into a [`SubprocConfig`].
pub fn parse_toml(content: &str) -> Result<SubprocConfig, ConfigError> {
    toml::from_str::<SubprocConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `SUBPROC_LOG_LEVEL`
/// - `SUBPROC_ENCODING`
/// - `SUBPROC_WORKING_DIR`
pub fn apply_env_overrides(config: &mut SubprocConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary variable lookup.
pub fn apply_overrides<F>(config: &mut SubprocConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("SUBPROC_LOG_LEVEL") {
        config.log_level = Some(val);
    }
    if let Some(val) = lookup("SUBPROC_ENCODING") {
        config.encoding = Some(val);
    }
    if let Some(val) = lookup("SUBPROC_WORKING_DIR") {
        config.working_dir = Some(val);
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (unknown log level or encoding, empty search-path entries) are
/// returned as a [`ConfigError::ValidationError`]; soft issues come back as
/// warnings.
pub fn validate_config(config: &SubprocConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    if let Some(ref label) = config.encoding
        && let Err(reason) = label.parse::<Encoding>()
    {
        errors.push(reason);
    }

    if let Some(ref dirs) = config.search_path {
        if dirs.is_empty() {
            warnings.push(ConfigWarning::EmptySearchPath);
        }
        for entry in dirs {
            if entry.trim().is_empty() {
                errors.push("search_path entries must not be empty".into());
            } else if Path::new(entry).is_relative() {
                warnings.push(ConfigWarning::RelativeSearchPath {
                    entry: entry.clone(),
                });
            }
        }
    }

    if let Some(ref dir) = config.working_dir
        && !Path::new(dir).is_dir()
    {
        warnings.push(ConfigWarning::MissingWorkingDir { path: dir.clone() });
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations.  Values in `overlay` take precedence over `base`.
pub fn merge_configs(base: SubprocConfig, overlay: SubprocConfig) -> SubprocConfig {
    SubprocConfig {
        search_path: overlay.search_path.or(base.search_path),
        encoding: overlay.encoding.or(base.encoding),
        working_dir: overlay.working_dir.or(base.working_dir),
        log_level: overlay.log_level.or(base.log_level),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
