// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]

mod commands;
mod format;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use commands::{RunOverrides, SchemaKind};
use format::OutputFormat;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use subproc_config::{SubprocConfig, load_config, validate_config};
use subproc_core::Encoding;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "subproc", version, about = "Run commands and capture their output")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a command to completion and print its captured output.
    Run {
        /// Directory to search for bare command names. Can be repeated.
        #[arg(long = "path", value_name = "DIR")]
        path: Vec<PathBuf>,

        /// Search no directories at all.
        #[arg(long, conflicts_with = "path")]
        no_path: bool,

        /// Working directory for the child.
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,

        /// Output encoding (utf-8, ascii, latin1, utf-16, utf-16le, utf-16be).
        #[arg(long, value_name = "ENC")]
        encoding: Option<Encoding>,

        /// Print a JSON document instead of the raw output.
        #[arg(long)]
        json: bool,

        /// Command followed by its arguments.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print the executable a command name resolves to.
    Which {
        /// Directory to search. Can be repeated; defaults to `PATH`.
        #[arg(long = "path", value_name = "DIR")]
        path: Vec<PathBuf>,

        /// Command name.
        command: String,
    },

    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print a JSON schema.
    Schema {
        #[arg(value_enum, default_value_t = SchemaArg::Config)]
        kind: SchemaArg,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Load and validate the config, printing any warnings.
    Check,
}

#[derive(Debug, Clone, ValueEnum)]
enum SchemaArg {
    Config,
    Request,
    Result,
}

impl From<SchemaArg> for SchemaKind {
    fn from(v: SchemaArg) -> Self {
        match v {
            SchemaArg::Config => SchemaKind::Config,
            SchemaArg::Request => SchemaKind::Request,
            SchemaArg::Result => SchemaKind::Result,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Config { .. } => None,
        _ => Some(load_config(cli.config.as_deref()).context("load config")?),
    };
    let warnings = match &config {
        Some(config) => validate_config(config).context("invalid config")?,
        None => Vec::new(),
    };

    let filter = if cli.debug {
        EnvFilter::new("subproc=debug")
    } else {
        let level = config
            .as_ref()
            .and_then(|c| c.log_level.as_deref())
            .unwrap_or("info");
        EnvFilter::new(format!("subproc={level}"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    for w in &warnings {
        warn!(target: "subproc.cli", "{w}");
    }

    match cli.command {
        Commands::Run {
            path,
            no_path,
            cwd,
            encoding,
            json,
            command,
        } => {
            let overrides = RunOverrides {
                search_path: path,
                no_path,
                working_dir: cwd,
                encoding,
            };
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            cmd_run(&config.unwrap_or_default(), &command, &overrides, format).await
        }
        Commands::Which { path, command } => cmd_which(&command, &path),
        Commands::Config {
            action: ConfigAction::Check,
        } => cmd_config_check(cli.config.as_deref()),
        Commands::Schema { kind } => {
            println!("{}", commands::schema_json(kind.into())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn cmd_run(
    config: &SubprocConfig,
    command: &[String],
    overrides: &RunOverrides,
    output: OutputFormat,
) -> Result<ExitCode> {
    let Some((program, args)) = command.split_first() else {
        anyhow::bail!("no command given");
    };
    let request = commands::build_request(config, program, args, overrides)?;
    debug!(target: "subproc.cli", command = %program, search_path = ?request.explicit_search_path(), "running");

    match subproc_runner::run(&request).await {
        Ok(result) => {
            match output {
                OutputFormat::Json => println!("{}", format::result_json(&result)?),
                OutputFormat::Text => {
                    std::io::stdout()
                        .write_all(result.standard_output().as_bytes())
                        .context("write stdout")?;
                    std::io::stderr()
                        .write_all(result.standard_error().as_bytes())
                        .context("write stderr")?;
                }
            }
            Ok(ExitCode::from(format::result_exit_code(&result)))
        }
        Err(err) => {
            match output {
                OutputFormat::Json => println!("{}", format::error_json(&err)?),
                OutputFormat::Text => eprintln!("subproc: {err}"),
            }
            Ok(ExitCode::from(format::error_exit_code(&err)))
        }
    }
}

fn cmd_which(command: &str, path: &[PathBuf]) -> Result<ExitCode> {
    match commands::locate(command, path) {
        Some(found) => {
            println!("{}", found.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("subproc: {command} not found");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_config_check(path: Option<&std::path::Path>) -> Result<ExitCode> {
    match commands::check_config(path) {
        Ok(warnings) => {
            for w in &warnings {
                println!("warning: {w}");
            }
            println!("ok");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}
