use std::io::Stdout;

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tasklist_core::{Change, TaskId};

use super::super::editor::{edit_task_editor_template, new_task_editor_template, parse_task_editor_output};
use super::super::terminal::{launch_editor, with_terminal_suspended};
use super::super::view::{Ui, UiAction};

pub(super) fn handle_ui_action(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut Ui,
    action: UiAction,
) -> Result<()> {
    match action {
        UiAction::CreateTask => {
            ui.controller.cancel_edit();
            let template = new_task_editor_template();
            let raw = with_terminal_suspended(terminal, || launch_editor(&template))?;
            ui.apply_task_form_input(&raw);
        }
        UiAction::EditTask { task } => {
            let Some(template) = ui.begin_edit(task) else {
                ui.error("Task to edit was not found");
                return Ok(());
            };
            let raw = match with_terminal_suspended(terminal, || launch_editor(&template)) {
                Ok(raw) => raw,
                Err(err) => {
                    ui.controller.cancel_edit();
                    return Err(err);
                }
            };
            ui.apply_task_form_input(&raw);
        }
    }
    Ok(())
}

impl Ui {
    /// Enter edit mode for `task` and render its form.
    pub(in crate::tui) fn begin_edit(&mut self, task: TaskId) -> Option<String> {
        self.controller
            .begin_edit(task)
            .map(|draft| edit_task_editor_template(&draft))
    }

    /// Apply a saved form to the controller, adding or updating depending on edit mode.
    pub(in crate::tui) fn apply_task_form_input(&mut self, raw: &str) {
        let editing = self.controller.editing().is_some();
        let draft = match parse_task_editor_output(raw) {
            Ok(Some(draft)) => draft,
            Ok(None) => {
                self.controller.cancel_edit();
                self.info(if editing { "Edit cancelled" } else { "Task creation cancelled" });
                return;
            }
            Err(msg) => {
                self.controller.cancel_edit();
                self.error(msg);
                return;
            }
        };

        match self.controller.submit(draft) {
            Some(Change::Added(id)) => {
                self.refresh_visibility(Some(id));
                let title = self
                    .controller
                    .tasks()
                    .get(id)
                    .map(|task| task.title().to_owned())
                    .unwrap_or_default();
                if self.selected_task_id() == Some(id) {
                    self.info(format!("Created task: {title}"));
                } else {
                    self.info(format!("Created task: {title} (hidden by the current filter)"));
                }
            }
            Some(Change::Updated(id)) => {
                self.refresh_visibility(Some(id));
                self.info("Task updated");
            }
            _ => {
                self.controller.cancel_edit();
                self.info("No changes");
            }
        }
    }
}
