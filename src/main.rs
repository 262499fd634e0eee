//! Required-header authorization CLI.
//!
//! Loads a plugin config file and either validates it or runs the plugin
//! against a set of headers given on the command line.
//!
//! ```text
//! config.toml ──▶ loader + validation ──▶ RequiredHeaderPlugin
//!                                              │ get_auth_service
//!                                              ▼
//!   -H name:value ──▶ AuthorizationRequest ──▶ AuthService::authorize ──▶ JSON decision
//! ```
//!
//! Exit codes: 0 allowed / valid, 1 denied, 2 error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use required_header_authz::config::{
    load_config, validate_log_level, LoadedConfig, LogFormat, ObservabilityConfig, ValidationError,
};
use required_header_authz::observability::logging::init_logging;
use required_header_authz::observability::TracingLog;
use required_header_authz::plugin::{ExtAuthPlugin, RequiredHeaderPlugin};
use required_header_authz::AuthorizationRequest;

#[derive(Parser)]
#[command(name = "required-header-authz")]
#[command(about = "Check requests against a required-header allow-list", long_about = None)]
struct Cli {
    /// Log level or filter directive; overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format; overrides the config file
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a config file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Authorize a set of request headers
    Check {
        #[arg(short, long)]
        config: PathBuf,

        /// Request header as name:value (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
}

/// Split `name:value` at the first colon that is not a pseudo-header prefix.
/// The value is taken verbatim.
fn parse_header(arg: &str) -> Result<(String, String), String> {
    let (prefix, rest) = match arg.strip_prefix(':') {
        Some(rest) => (":", rest),
        None => ("", arg),
    };
    let (name, value) = rest
        .split_once(':')
        .ok_or_else(|| format!("expected name:value, got {arg:?}"))?;
    if name.is_empty() {
        return Err(format!("empty header name in {arg:?}"));
    }
    Ok((format!("{prefix}{name}"), value.to_string()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Validate { ref config } => {
            let loaded = load(config, &cli)?;
            println!(
                "{}: ok (required_header={:?}, {} allowed value(s))",
                config.display(),
                loaded.config.authorizer.required_header,
                loaded.config.authorizer.allowed_values.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            ref config,
            ref headers,
        } => {
            let loaded = load(config, &cli)?;

            let plugin = RequiredHeaderPlugin;
            let service = plugin.get_auth_service(Box::new(loaded.config.authorizer))?;
            let log = TracingLog::default();
            service.start(&log)?;

            let request: AuthorizationRequest = headers.iter().cloned().collect();
            let decision = service.authorize(&request, &log);

            println!("{}", serde_json::to_string_pretty(&decision)?);
            Ok(if decision.is_allowed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

/// Apply `--log-level` / `--log-format`. The level override goes through the
/// same directive check as the config file.
fn apply_overrides(observability: &mut ObservabilityConfig, cli: &Cli) -> Result<(), ValidationError> {
    if let Some(level) = &cli.log_level {
        validate_log_level(level)?;
        observability.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        observability.log_format = format;
    }
    Ok(())
}

/// Load the config file, apply CLI overrides, start logging and report warnings.
fn load(path: &Path, cli: &Cli) -> Result<LoadedConfig, Box<dyn std::error::Error>> {
    let mut loaded = load_config(path)?;

    apply_overrides(&mut loaded.config.observability, cli)?;
    init_logging(&loaded.config.observability)?;

    tracing::info!(
        config = %path.display(),
        required_header = %loaded.config.authorizer.required_header,
        allowed_values = loaded.config.authorizer.allowed_values.len(),
        "Configuration loaded"
    );
    for warning in &loaded.warnings {
        tracing::warn!(config = %path.display(), "{}", warning);
    }

    Ok(loaded)
}
