use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tspaths_core::{DefaultPaths, Os, PathResolver, PathsError};

#[derive(Debug, Parser)]
#[command(name = "tspaths", about = "Print default tailscaled paths")]
struct Cli {
    /// Resolve for this OS instead of the host.
    #[arg(long, value_name = "OS")]
    os: Option<String>,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    All,
    LegacyConfig,
    Socket,
    StateFile,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Paths(#[from] PathsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tspaths error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let resolver = resolver_for(cli.os.as_deref())?;
    let defaults = resolver.defaults();
    info!(os = %defaults.os, "resolved default paths");

    let command = cli.command.unwrap_or(Command::All);
    let mut stdout = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &select_json(&defaults, command)?)?;
        writeln!(stdout)?;
    } else {
        stdout.write_all(render_text(&defaults, command).as_bytes())?;
    }
    Ok(())
}

fn resolver_for(os: Option<&str>) -> Result<PathResolver, PathsError> {
    match os {
        Some(name) => Ok(PathResolver::new(name.parse::<Os>()?)),
        None => Ok(PathResolver::host()),
    }
}

fn select_json(defaults: &DefaultPaths, command: Command) -> Result<Value, serde_json::Error> {
    let value = match command {
        Command::All => serde_json::to_value(defaults)?,
        Command::LegacyConfig => Value::from(defaults.legacy_config.as_str()),
        Command::Socket => Value::from(defaults.socket.as_str()),
        Command::StateFile => Value::from(defaults.state_file.as_str()),
    };
    Ok(value)
}

/// Single lookups print the raw value (an empty line means no default).
fn render_text(defaults: &DefaultPaths, command: Command) -> String {
    match command {
        Command::All => format!(
            "os: {}\nlegacy-config: {}\nsocket: {}\nstate-file: {}\n",
            defaults.os,
            or_none(&defaults.legacy_config),
            or_none(&defaults.socket),
            or_none(&defaults.state_file),
        ),
        Command::LegacyConfig => format!("{}\n", defaults.legacy_config),
        Command::Socket => format!("{}\n", defaults.socket),
        Command::StateFile => format!("{}\n", defaults.state_file),
    }
}

fn or_none(path: &str) -> &str {
    if path.is_empty() { "(no default)" } else { path }
}
