use std::cell::Cell;

use crossterm::event::{KeyEvent, KeyEventKind};
use tasklist_core::{Change, PriorityFilter, StatusFilter};

use super::super::clipboard::task_clipboard_text;
use super::super::constants::VIEWER_FAST_SCROLL_LINES;
use super::super::view::{DescriptionViewerState, DetailFocus, Ui, UiAction};
use crate::config::{Action, ViewType};

impl Ui {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.detail_focus {
            DetailFocus::None => self.handle_task_list_key(key),
            DetailFocus::DescriptionViewer => {
                self.handle_description_viewer_key(key);
                None
            }
        }
    }

    fn task_list_action(&self, key: &KeyEvent) -> Option<Action> {
        use Action::{
            ClearCompleted, CopyTask, CreateTask, CyclePriorityFilter, DeleteTask, Down, EditTask,
            FilterActive, FilterAll, FilterCompleted, OpenDescriptionViewer, Quit, ToggleCompleted,
            TogglePriority, Up,
        };
        [
            Quit,
            Down,
            Up,
            CreateTask,
            EditTask,
            DeleteTask,
            ToggleCompleted,
            TogglePriority,
            FilterAll,
            FilterActive,
            FilterCompleted,
            CyclePriorityFilter,
            ClearCompleted,
            CopyTask,
            OpenDescriptionViewer,
        ]
        .into_iter()
        .find(|action| self.keybindings.matches(ViewType::TaskList, *action, key))
    }

    fn handle_task_list_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        let action = self.task_list_action(&key)?;
        match action {
            Action::Quit => self.should_quit = true,
            Action::Down => self.visibility.select_next(),
            Action::Up => self.visibility.select_prev(),
            Action::CreateTask => return Some(UiAction::CreateTask),
            Action::EditTask => {
                return self.selected_task_id().map_or_else(
                    || {
                        self.error("No task selected to edit");
                        None
                    },
                    |task| Some(UiAction::EditTask { task }),
                );
            }
            Action::DeleteTask => self.delete_selected_task(),
            Action::ToggleCompleted => self.toggle_selected_completed(),
            Action::TogglePriority => self.toggle_selected_priority(),
            Action::FilterAll => self.select_status(StatusFilter::All),
            Action::FilterActive => self.select_status(StatusFilter::Active),
            Action::FilterCompleted => self.select_status(StatusFilter::Completed),
            Action::CyclePriorityFilter => self.cycle_priority_filter(),
            Action::ClearCompleted => self.clear_completed(),
            Action::CopyTask => self.copy_selected_task(),
            Action::OpenDescriptionViewer => self.open_description_viewer(),
            _ => {}
        }
        None
    }

    fn handle_description_viewer_key(&mut self, key: KeyEvent) {
        let view = ViewType::DescriptionViewer;
        if self.keybindings.matches(view, Action::Close, &key) {
            self.close_description_viewer();
        } else if self.keybindings.matches(view, Action::ScrollDown, &key) {
            self.description_viewer_scroll_down(1);
        } else if self.keybindings.matches(view, Action::ScrollUp, &key) {
            self.description_viewer_scroll_up(1);
        } else if self.keybindings.matches(view, Action::ScrollDownFast, &key) {
            self.description_viewer_scroll_down(VIEWER_FAST_SCROLL_LINES);
        } else if self.keybindings.matches(view, Action::ScrollUpFast, &key) {
            self.description_viewer_scroll_up(VIEWER_FAST_SCROLL_LINES);
        }
    }

    pub(in crate::tui) fn delete_selected_task(&mut self) {
        let Some(task) = self.selected_task() else {
            self.error("No task selected to delete");
            return;
        };
        let (id, title) = (task.id(), task.title().to_owned());
        if self.controller.delete(id).is_some() {
            self.refresh_visibility(None);
            self.info(format!("Deleted task: {title}"));
        }
    }

    pub(in crate::tui) fn toggle_selected_completed(&mut self) {
        let Some(id) = self.selected_task_id() else {
            self.error("No task selected");
            return;
        };
        if let Some(Change::CompletedToggled { completed, .. }) = self.controller.toggle_completed(id) {
            self.refresh_visibility(Some(id));
            self.info(if completed { "Marked as completed" } else { "Marked as active" });
        }
    }

    pub(in crate::tui) fn toggle_selected_priority(&mut self) {
        let Some(id) = self.selected_task_id() else {
            self.error("No task selected");
            return;
        };
        if let Some(Change::PriorityToggled { priority, .. }) = self.controller.toggle_priority(id) {
            self.refresh_visibility(Some(id));
            self.info(if priority { "Marked as priority" } else { "Priority removed" });
        }
    }

    pub(in crate::tui) fn select_status(&mut self, status: StatusFilter) {
        if self.controller.select_status(status).is_some() {
            self.refresh_visibility(None);
        }
        self.report_filter();
    }

    pub(in crate::tui) fn cycle_priority_filter(&mut self) {
        let next = self.controller.cycle_priority();
        self.refresh_visibility(None);
        if next == PriorityFilter::Unset {
            self.info(format!("Priority filter off, {}", self.controller.filter().summary()));
        } else {
            self.report_filter();
        }
    }

    fn report_filter(&mut self) {
        let summary = self.controller.filter().summary();
        if self.visibility.has_visible_tasks() {
            self.info(format!("Filter: {summary}"));
        } else {
            self.info(format!("Filter: {summary} (no matching tasks)"));
        }
    }

    pub(in crate::tui) fn clear_completed(&mut self) {
        match self.controller.clear_completed() {
            Some(Change::Cleared { removed }) => {
                self.refresh_visibility(None);
                self.info(format!("Cleared {removed} completed task(s)"));
            }
            _ => self.info("No completed tasks to clear"),
        }
    }

    pub(in crate::tui) fn copy_selected_task(&mut self) {
        let Some(task) = self.selected_task() else {
            self.error("No task selected to copy");
            return;
        };

        let text = task_clipboard_text(task);
        let title = task.title().to_owned();
        if let Err(err) = self.clipboard.set_text(&text) {
            self.error(format!("Failed to copy task: {err}"));
        } else {
            self.info(format!("Copied task: {title}"));
        }
    }

    pub(in crate::tui) fn open_description_viewer(&mut self) {
        let Some(task) = self.selected_task() else {
            self.error("No task selected to view");
            return;
        };
        self.description_viewer = Some(DescriptionViewerState {
            task_id: task.id(),
            scroll_offset: 0,
            inner_area: Cell::default(),
        });
        self.detail_focus = DetailFocus::DescriptionViewer;
    }

    const fn close_description_viewer(&mut self) {
        self.description_viewer = None;
        self.detail_focus = DetailFocus::None;
    }

    fn description_viewer_scroll_down(&mut self, lines: u16) {
        let max_scroll = self.description_viewer_max_scroll();
        if let Some(viewer) = &mut self.description_viewer {
            viewer.scroll_offset = viewer.scroll_offset.saturating_add(lines).min(max_scroll);
        }
    }

    const fn description_viewer_scroll_up(&mut self, lines: u16) {
        if let Some(viewer) = &mut self.description_viewer {
            viewer.scroll_offset = viewer.scroll_offset.saturating_sub(lines);
        }
    }
}
