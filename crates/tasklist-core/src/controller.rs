//! View-state controller: the task collection, filter selection and edit mode
//! behind one set of user actions.

use tracing::debug;

use crate::filter::{PriorityFilter, StatusFilter, TaskFilter};
use crate::id::TaskId;
use crate::list::TaskList;
use crate::task::{Task, TaskDraft};

/// Effective state transition produced by a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A task was appended.
    Added(TaskId),
    /// A task's editable fields were replaced.
    Updated(TaskId),
    /// A task was removed.
    Deleted(TaskId),
    /// `completed` was flipped to the given value.
    CompletedToggled {
        /// Affected task.
        id: TaskId,
        /// New value.
        completed: bool,
    },
    /// `priority` was flipped to the given value.
    PriorityToggled {
        /// Affected task.
        id: TaskId,
        /// New value.
        priority: bool,
    },
    /// Completed tasks were removed.
    Cleared {
        /// Number of removed tasks.
        removed: usize,
    },
    /// The filter selection changed.
    FilterChanged(TaskFilter),
}

/// Owns all view state. Every method runs to completion synchronously;
/// the caller redraws afterwards.
#[derive(Debug, Default)]
pub struct Controller {
    tasks: TaskList,
    filter: TaskFilter,
    editing: Option<TaskId>,
    revision: u64,
}

impl Controller {
    /// Start with an empty collection and the default filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full collection.
    #[must_use]
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Current filter selection.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Task currently loaded into the form, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    /// Counter bumped on every effective change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Visible tasks in insertion order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        self.filter.project(&self.tasks).collect()
    }

    fn record(&mut self, change: Change) -> Option<Change> {
        self.revision += 1;
        debug!(revision = self.revision, ?change, "state changed");
        Some(change)
    }

    /// Append a task built from the draft. No-op for a blank title.
    pub fn add(&mut self, draft: TaskDraft) -> Option<Change> {
        let id = self.tasks.add(draft).map(Task::id)?;
        self.record(Change::Added(id))
    }

    /// Replace the editable fields of a task. No-op for an unknown id or blank title.
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> Option<Change> {
        self.tasks.update(id, draft)?;
        self.record(Change::Updated(id))
    }

    /// Remove a task. Leaves edit mode when the edited task is removed.
    pub fn delete(&mut self, id: TaskId) -> Option<Change> {
        self.tasks.delete(id)?;
        if self.editing == Some(id) {
            self.editing = None;
        }
        self.record(Change::Deleted(id))
    }

    /// Flip the completion flag.
    pub fn toggle_completed(&mut self, id: TaskId) -> Option<Change> {
        let completed = self.tasks.toggle_completed(id)?;
        self.record(Change::CompletedToggled { id, completed })
    }

    /// Flip the priority flag.
    pub fn toggle_priority(&mut self, id: TaskId) -> Option<Change> {
        let priority = self.tasks.toggle_priority(id)?;
        self.record(Change::PriorityToggled { id, priority })
    }

    /// Remove every completed task. No-op when none is completed.
    pub fn clear_completed(&mut self) -> Option<Change> {
        let removed = self.tasks.clear_completed();
        if removed == 0 {
            return None;
        }
        if let Some(id) = self.editing
            && !self.tasks.contains(id)
        {
            self.editing = None;
        }
        self.record(Change::Cleared { removed })
    }

    /// Select a status filter; the priority filter is reset.
    pub fn select_status(&mut self, status: StatusFilter) -> Option<Change> {
        let before = self.filter;
        self.filter.select_status(status);
        if self.filter == before {
            return None;
        }
        self.record(Change::FilterChanged(self.filter))
    }

    /// Advance the priority filter `unset -> true -> false -> unset`.
    pub fn cycle_priority(&mut self) -> PriorityFilter {
        let next = self.filter.cycle_priority();
        self.record(Change::FilterChanged(self.filter));
        next
    }

    /// Load a task into a form draft and enter edit mode.
    pub fn begin_edit(&mut self, id: TaskId) -> Option<TaskDraft> {
        let draft = self.tasks.get(id)?.to_draft();
        self.editing = Some(id);
        Some(draft)
    }

    /// Leave edit mode without changes.
    pub const fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the form: update in edit mode, add otherwise.
    ///
    /// A blank title is a no-op and keeps the current mode. A successful
    /// submit always leaves edit mode.
    pub fn submit(&mut self, draft: TaskDraft) -> Option<Change> {
        if draft.has_blank_title() {
            return None;
        }
        match self.editing.take() {
            Some(id) => self.update(id, draft),
            None => self.add(draft),
        }
    }
}
