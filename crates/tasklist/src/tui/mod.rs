use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing::subscriber::NoSubscriber;

use crate::config::KeyBindingsConfig;

mod clipboard;
pub mod constants;
mod editor;
mod handlers;
mod task_visibility;
mod terminal;
mod view;
mod widgets;

use self::constants::TUI_TICK_RATE_MS;
use self::handlers::handle_ui_action;
use self::view::Ui;

/// Launch the interactive TUI.
///
/// With `silence_logs` every log event is dropped while the alternate screen
/// is active, so that terminal output does not corrupt the drawing.
pub fn run(keybindings: KeyBindingsConfig, silence_logs: bool) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = if silence_logs {
        tracing::subscriber::with_default(NoSubscriber::default(), || {
            run_event_loop(&mut terminal, keybindings)
        })
    } else {
        run_event_loop(&mut terminal, keybindings)
    };

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    keybindings: KeyBindingsConfig,
) -> Result<()> {
    let mut ui = Ui::new(keybindings);
    info!("tui started");

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)? {
            let evt = event::read()?;
            if let CrosstermEvent::Key(key) = evt
                && let Some(action) = ui.handle_key(key)
                && let Err(err) = handle_ui_action(terminal, &mut ui, action)
            {
                ui.error(format!("Editor failed: {err}"));
            }
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick();
            last_tick = Instant::now();
        }
    }

    info!(
        revision = ui.controller.revision(),
        tasks = ui.controller.tasks().len(),
        "tui stopped"
    );
    Ok(())
}

#[cfg(test)]
mod tests;
