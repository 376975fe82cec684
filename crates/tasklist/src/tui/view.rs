use std::cell::Cell;
use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};
use tasklist_core::{Controller, Task, TaskId};

use super::clipboard::{ClipboardSink, default_clipboard};
use super::constants::UI_MESSAGE_TTL_SECS;
use super::task_visibility::TaskVisibility;
use crate::config::KeyBindingsConfig;

#[derive(Debug, Clone)]
pub(super) struct DescriptionViewerState {
    pub(super) task_id: TaskId,
    pub(super) scroll_offset: u16,
    /// Text area of the popup as of the last draw; zero-sized until then.
    pub(super) inner_area: Cell<Rect>,
}

/// Focus state for overlay components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DetailFocus {
    /// No focus (browsing task list).
    None,
    /// Focus on description viewer popup.
    DescriptionViewer,
}

pub(super) struct Ui {
    pub(super) controller: Controller,
    pub(super) visibility: TaskVisibility,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    /// Current overlay focus.
    pub(super) detail_focus: DetailFocus,
    /// Description viewer popup state.
    pub(super) description_viewer: Option<DescriptionViewerState>,
    pub(super) clipboard: Box<dyn ClipboardSink>,
    /// Keybindings configuration.
    pub(super) keybindings: KeyBindingsConfig,
}

impl Ui {
    pub(super) const FILTER_BAR_HEIGHT: u16 = 3;
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const INSTRUCTIONS_HEIGHT: u16 = 4;
    pub(super) const STATUS_MESSAGE_HEIGHT: u16 = 3;
    pub(super) const STATUS_FOOTER_HEIGHT: u16 = Self::INSTRUCTIONS_HEIGHT + Self::STATUS_MESSAGE_HEIGHT;

    pub(super) fn new(keybindings: KeyBindingsConfig) -> Self {
        Self::with_clipboard(Controller::new(), keybindings, default_clipboard())
    }

    pub(super) fn with_clipboard(
        controller: Controller,
        keybindings: KeyBindingsConfig,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let mut ui = Self {
            controller,
            visibility: TaskVisibility::default(),
            message: None,
            should_quit: false,
            detail_focus: DetailFocus::None,
            description_viewer: None,
            clipboard,
            keybindings,
        };
        ui.refresh_visibility(None);
        ui
    }

    /// Re-project the list after a state change, keeping `preferred` selected if visible.
    pub(super) fn refresh_visibility(&mut self, preferred: Option<TaskId>) {
        let preferred = preferred.or_else(|| self.selected_task_id());
        self.visibility.rebuild(
            self.controller.tasks().as_slice(),
            self.controller.filter(),
            preferred,
        );
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.visibility.selected_task(self.controller.tasks().as_slice())
    }

    pub(super) fn selected_task_id(&self) -> Option<TaskId> {
        self.visibility.selected_task_id(self.controller.tasks().as_slice())
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::FILTER_BAR_HEIGHT),
                Constraint::Min(Self::MAIN_MIN_HEIGHT),
                Constraint::Length(Self::STATUS_FOOTER_HEIGHT),
            ])
            .split(size);

        self.draw_filter_bar(f, chunks[0]);
        self.draw_main(f, chunks[1]);
        self.draw_status(f, chunks[2]);

        if self.detail_focus == DetailFocus::DescriptionViewer {
            self.draw_description_viewer_popup(f);
        }
    }

    fn draw_main(&self, f: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_task_list(f, columns[0]);
        self.draw_task_details(f, columns[1]);
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UiAction {
    CreateTask,
    EditTask { task: TaskId },
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
