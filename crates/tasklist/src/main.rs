//! CLI entry point for tasklist.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod tui;

/// Keyboard-driven in-memory task list.
#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    version,
    about = "tasklist: a keyboard-driven task list for the terminal"
)]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append logs to this file; the TUI is silent otherwise.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch interactive terminal UI (default).
    Tui,

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default configuration file.
    Init {
        /// Destination path (defaults to the platform config directory).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite without asking.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration.
    Show,
}

fn main() -> Result<()> {
    let Cli { config, log_file, cmd } = Cli::parse();
    let cmd = cmd.unwrap_or(Command::Tui);

    let logging_to_file = match log_file.as_deref() {
        Some(path) => {
            install_file_tracing(path)?;
            true
        }
        None => {
            install_tracing();
            false
        }
    };

    execute_command(config.as_deref(), cmd, logging_to_file)
}

fn execute_command(config_path: Option<&Path>, command: Command, logging_to_file: bool) -> Result<()> {
    match command {
        Command::Tui => {
            let config = config::load_or_default(config_path)?;
            tui::run(config.tui.keybindings, !logging_to_file)
        }
        Command::Config {
            cmd: ConfigCommand::Init { output, force },
        } => config::init_config(output.as_deref().or(config_path), force),
        Command::Config {
            cmd: ConfigCommand::Show,
        } => config::show_config(config_path),
    }
}

fn env_filter() -> EnvFilter {
    // RUST_LOG overrides; INFO by default.
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn install_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

fn install_file_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
    Ok(())
}
