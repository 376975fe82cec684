use std::fmt;

use crate::list::TaskList;
use crate::task::Task;

/// Completion-based view selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl StatusFilter {
    /// All variants in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Short label shown on the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-state priority selection. When set it overrides [`StatusFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriorityFilter {
    /// No priority constraint.
    #[default]
    Unset,
    /// Only tasks with `priority == true`.
    Prioritized,
    /// Only tasks with `priority == false`.
    NotPrioritized,
}

impl PriorityFilter {
    /// Next state in the `unset -> true -> false -> unset` cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Unset => Self::Prioritized,
            Self::Prioritized => Self::NotPrioritized,
            Self::NotPrioritized => Self::Unset,
        }
    }

    /// Required `priority` value, if any.
    #[must_use]
    pub const fn value(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Prioritized => Some(true),
            Self::NotPrioritized => Some(false),
        }
    }

    /// `true` when a priority value is required.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("unset"),
            Self::Prioritized => f.write_str("priority only"),
            Self::NotPrioritized => f.write_str("non-priority only"),
        }
    }
}

/// Filter selection used to project the visible subset of a [`TaskList`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskFilter {
    status: StatusFilter,
    priority: PriorityFilter,
}

impl TaskFilter {
    /// Current status selection.
    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Current priority selection.
    #[must_use]
    pub const fn priority(&self) -> PriorityFilter {
        self.priority
    }

    /// Select a status filter. Always resets the priority filter.
    pub const fn select_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.priority = PriorityFilter::Unset;
    }

    /// Advance the priority filter one step and return the new state.
    pub const fn cycle_priority(&mut self) -> PriorityFilter {
        self.priority = self.priority.next();
        self.priority
    }

    /// `true` when every task is visible.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self.status, StatusFilter::All) && !self.priority.is_set()
    }

    /// Whether the task belongs to the visible subset.
    #[must_use]
    pub const fn matches(&self, task: &Task) -> bool {
        match self.priority.value() {
            Some(wanted) => task.priority == wanted,
            None => self.status.matches(task),
        }
    }

    /// Visible tasks in insertion order. The collection is left untouched.
    pub fn project<'a>(&'a self, list: &'a TaskList) -> impl Iterator<Item = &'a Task> + 'a {
        list.iter().filter(move |task| self.matches(task))
    }

    /// Human-readable description for the status bar.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.priority.is_set() {
            format!("priority: {} (status filter overridden)", self.priority)
        } else {
            format!("status: {}", self.status)
        }
    }
}
