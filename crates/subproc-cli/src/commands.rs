// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared command implementations for the `subproc` CLI.
//!
//! These functions are kept free of process-level side effects so they can
//! be tested without spawning the binary.

use anyhow::{Context, Result};
use schemars::schema_for;
use std::path::{Path, PathBuf};
use subproc_config::{ConfigWarning, SubprocConfig, load_config, merge_configs, validate_config};
use subproc_core::{Encoding, SubprocessRequest, SubprocessResult};

/// Schema types that can be printed by the `schema` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// JSON schema for [`SubprocConfig`].
    Config,
    /// JSON schema for [`SubprocessRequest`].
    Request,
    /// JSON schema for [`SubprocessResult`].
    Result,
}

/// Return the JSON schema string for the given kind.
pub fn schema_json(kind: SchemaKind) -> Result<String> {
    let value = match kind {
        SchemaKind::Config => serde_json::to_value(schema_for!(SubprocConfig))?,
        SchemaKind::Request => serde_json::to_value(schema_for!(SubprocessRequest))?,
        SchemaKind::Result => serde_json::to_value(schema_for!(SubprocessResult))?,
    };
    serde_json::to_string_pretty(&value).context("serialize schema")
}

/// Command-line overrides layered on top of the loaded config for `run`.
#[derive(Debug, Default, Clone)]
pub struct RunOverrides {
    /// Explicit search path directories (`--path`).
    pub search_path: Vec<PathBuf>,
    /// Search nothing, even when the config names directories (`--no-path`).
    pub no_path: bool,
    /// Working directory (`--cwd`).
    pub working_dir: Option<PathBuf>,
    /// Output encoding (`--encoding`).
    pub encoding: Option<Encoding>,
}

impl RunOverrides {
    /// The overrides as a config layer with only the flags that were given.
    pub fn as_config(&self) -> SubprocConfig {
        let search_path = if self.no_path {
            Some(Vec::new())
        } else if self.search_path.is_empty() {
            None
        } else {
            Some(
                self.search_path
                    .iter()
                    .map(|dir| dir.to_string_lossy().into_owned())
                    .collect(),
            )
        };
        SubprocConfig {
            search_path,
            encoding: self.encoding.map(|enc| enc.label().to_owned()),
            working_dir: self
                .working_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned()),
            log_level: None,
        }
    }
}

/// Build the request for `command args..` from config plus overrides.
///
/// The overrides are merged over `config`, so any flag given wins.
pub fn build_request(
    config: &SubprocConfig,
    command: &str,
    args: &[String],
    overrides: &RunOverrides,
) -> Result<SubprocessRequest> {
    let effective = merge_configs(config.clone(), overrides.as_config());
    let request = effective
        .request_for(command)
        .context("apply config to request")?
        .args(args.iter().cloned());
    Ok(request)
}

/// Find the executable `command` would launch, or `None`.
///
/// An empty `search_path` means the inherited `PATH`.
pub fn locate(command: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    if search_path.is_empty() {
        return subproc_which::which(command);
    }
    let resolved = subproc_which::resolve(command, search_path);
    if !subproc_which::has_path_components(command) && resolved == Path::new(command) {
        return None;
    }
    subproc_which::is_executable_file(&resolved).then_some(resolved)
}

/// Load and validate the config at `path`, returning warnings.
pub fn check_config(path: Option<&Path>) -> Result<Vec<ConfigWarning>> {
    let config = load_config(path).context("load config")?;
    validate_config(&config).context("validate config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_names_fields() {
        let schema = schema_json(SchemaKind::Config).unwrap();
        assert!(schema.contains("search_path"));
        assert!(schema.contains("log_level"));
    }

    #[test]
    fn result_schema_names_fields() {
        let schema = schema_json(SchemaKind::Result).unwrap();
        assert!(schema.contains("termination_status"));
        assert!(schema.contains("standard_error"));
    }

    #[test]
    fn request_schema_is_valid_json() {
        let schema = schema_json(SchemaKind::Request).unwrap();
        let v: serde_json::Value = serde_json::from_str(&schema).unwrap();
        assert!(v.is_object());
    }

    #[test]
    fn overrides_take_precedence_over_config() {
        let config = SubprocConfig {
            search_path: Some(vec!["/from/config".into()]),
            encoding: Some("ascii".into()),
            ..SubprocConfig::default()
        };
        let overrides = RunOverrides {
            search_path: vec![PathBuf::from("/from/cli")],
            encoding: Some(Encoding::IsoLatin1),
            ..RunOverrides::default()
        };
        let req = build_request(&config, "ls", &["-l".into()], &overrides).unwrap();
        assert_eq!(
            req.explicit_search_path(),
            Some(&[PathBuf::from("/from/cli")][..])
        );
        assert_eq!(req.output_encoding(), Encoding::IsoLatin1);
        assert_eq!(req.arguments(), ["-l"]);
    }

    #[test]
    fn config_values_used_without_overrides() {
        let config = SubprocConfig {
            search_path: Some(vec!["/from/config".into()]),
            encoding: Some("ascii".into()),
            working_dir: Some("/tmp".into()),
            ..SubprocConfig::default()
        };
        let req = build_request(&config, "ls", &[], &RunOverrides::default()).unwrap();
        assert_eq!(
            req.explicit_search_path(),
            Some(&[PathBuf::from("/from/config")][..])
        );
        assert_eq!(req.output_encoding(), Encoding::Ascii);
        assert_eq!(req.working_dir(), Some(Path::new("/tmp")));
    }

    #[test]
    fn no_path_clears_search_path() {
        let config = SubprocConfig {
            search_path: Some(vec!["/from/config".into()]),
            ..SubprocConfig::default()
        };
        let overrides = RunOverrides {
            no_path: true,
            ..RunOverrides::default()
        };
        let req = build_request(&config, "ls", &[], &overrides).unwrap();
        assert_eq!(req.explicit_search_path(), Some(&[][..]));
    }

    #[test]
    fn overrides_layer_keeps_unset_fields_empty() {
        let layer = RunOverrides {
            working_dir: Some(PathBuf::from("/work")),
            ..RunOverrides::default()
        }
        .as_config();
        assert_eq!(layer.working_dir.as_deref(), Some("/work"));
        assert_eq!(layer.search_path, None);
        assert_eq!(layer.encoding, None);
        assert_eq!(layer.log_level, None);
    }

    #[test]
    fn cwd_override_replaces_config_working_dir() {
        let config = SubprocConfig {
            working_dir: Some("/from/config".into()),
            ..SubprocConfig::default()
        };
        let overrides = RunOverrides {
            working_dir: Some(PathBuf::from("/from/cli")),
            ..RunOverrides::default()
        };
        let req = build_request(&config, "ls", &[], &overrides).unwrap();
        assert_eq!(req.working_dir(), Some(Path::new("/from/cli")));
    }

    #[test]
    fn bad_config_encoding_is_an_error() {
        let config = SubprocConfig {
            encoding: Some("klingon".into()),
            ..SubprocConfig::default()
        };
        assert!(build_request(&config, "ls", &[], &RunOverrides::default()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn locate_finds_sh_in_bin() {
        let found = locate("sh", &[PathBuf::from("/bin")]).unwrap();
        assert_eq!(found, PathBuf::from("/bin/sh"));
    }

    #[test]
    fn locate_missing_name_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(locate("definitely-not-here", &[dir.path().to_path_buf()]).is_none());
    }

    #[test]
    fn check_missing_file_fails() {
        assert!(check_config(Some(Path::new("/nonexistent/subproc.toml"))).is_err());
    }
}
