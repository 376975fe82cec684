use std::collections::HashMap;

use tasklist_core::{Task, TaskFilter, TaskId};

/// Visible rows and the selection cursor over them, independent of drawing.
#[derive(Debug, Default)]
pub(super) struct TaskVisibility {
    visible: Vec<usize>,
    visible_index: HashMap<TaskId, usize>,
    selected: usize,
}

#[allow(clippy::missing_const_for_fn)]
impl TaskVisibility {
    /// Recompute visible rows, keeping `preferred` selected when it is still shown.
    pub(super) fn rebuild(&mut self, tasks: &[Task], filter: &TaskFilter, preferred: Option<TaskId>) {
        self.visible.clear();
        self.visible_index.clear();

        for (idx, task) in tasks.iter().enumerate() {
            if filter.matches(task) {
                let pos = self.visible.len();
                self.visible.push(idx);
                self.visible_index.insert(task.id(), pos);
            }
        }

        self.selected = self.resolve_selection(preferred);
    }

    fn resolve_selection(&self, preferred: Option<TaskId>) -> usize {
        if self.visible.is_empty() {
            return 0;
        }
        if let Some(id) = preferred
            && let Some(&index) = self.visible_index.get(&id)
        {
            return index;
        }
        self.selected.min(self.visible.len() - 1)
    }

    pub(super) fn has_visible_tasks(&self) -> bool {
        !self.visible.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.visible.len()
    }

    #[cfg(test)]
    pub(super) fn visible_indexes(&self) -> &[usize] {
        &self.visible
    }

    pub(super) fn visible_tasks<'a>(&'a self, tasks: &'a [Task]) -> impl Iterator<Item = &'a Task> + 'a {
        self.visible.iter().filter_map(move |&idx| tasks.get(idx))
    }

    pub(super) fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn selected_task<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.visible.get(self.selected).and_then(|&idx| tasks.get(idx))
    }

    pub(super) fn selected_task_id(&self, tasks: &[Task]) -> Option<TaskId> {
        self.selected_task(tasks).map(Task::id)
    }

    pub(super) fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub(super) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
