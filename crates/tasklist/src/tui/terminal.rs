use std::env;
use std::fs;
use std::io::{Stdout, Write};
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tempfile::NamedTempFile;
use tracing::debug;

pub(super) fn with_terminal_suspended<F, T>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    f: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    suspend_terminal(terminal)?;
    let result = f();
    resume_terminal(terminal)?;
    result
}

pub(super) fn suspend_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    terminal.flush()?;
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("failed to leave alternate screen")?;
    Ok(())
}

pub(super) fn resume_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    execute!(terminal.backend_mut(), EnterAlternateScreen).context("failed to re-enter alternate screen")?;
    enable_raw_mode().context("failed to enable raw mode")?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    terminal.flush()?;
    Ok(())
}

pub(super) fn resolve_editor_command() -> String {
    env::var("TASKLIST_EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".into())
}

pub(super) fn launch_editor(initial: &str) -> Result<String> {
    let mut tempfile = NamedTempFile::new().context("Failed to create temporary file")?;
    tempfile
        .write_all(initial.as_bytes())
        .context("Failed to write temporary file")?;
    tempfile.flush().context("Failed to flush temporary file")?;

    let temp_path: PathBuf = tempfile.path().to_path_buf();

    let editor = resolve_editor_command();
    let mut parts = shell_words::split(&editor).map_err(|err| anyhow!("Cannot parse editor command: {err}"))?;
    if parts.is_empty() {
        parts.push(editor);
    }
    let program = parts.remove(0);
    debug!(%program, path = %temp_path.display(), "launching editor");

    let status = Command::new(&program)
        .args(&parts)
        .arg(&temp_path)
        .status()
        .with_context(|| format!("Failed to launch editor {program}"))?;
    if !status.success() {
        return Err(anyhow!("Editor exited abnormally ({status})"));
    }

    let contents = fs::read_to_string(&temp_path).context("Failed to read the edited file")?;
    Ok(contents)
}
