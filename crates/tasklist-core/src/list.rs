use crate::id::TaskId;
use crate::task::{Task, TaskDraft};

/// Aggregate counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    /// Every stored task.
    pub total: usize,
    /// Tasks with `completed == false`.
    pub active: usize,
    /// Tasks with `completed == true`.
    pub completed: usize,
    /// Tasks flagged as priority.
    pub priority: usize,
}

/// Ordered task collection. Insertion order is the display order.
///
/// Every transition on an unknown id, or with a blank title, is a silent
/// no-op reported through the return value.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a new task. Returns `None` when the title is blank.
    pub fn add(&mut self, draft: TaskDraft) -> Option<&Task> {
        let task = Task::from_draft(draft)?;
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Replace the mutable fields of the matching task.
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> Option<&Task> {
        let task = self.get_mut(id)?;
        if task.apply_draft(draft) {
            Some(&*task)
        } else {
            None
        }
    }

    /// Remove the matching task and hand it back.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        Some(self.tasks.remove(index))
    }

    /// Flip `completed`, returning the new value.
    pub fn toggle_completed(&mut self, id: TaskId) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Flip `priority`, returning the new value.
    pub fn toggle_priority(&mut self, id: TaskId) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.priority = !task.priority;
        Some(task.priority)
    }

    /// Remove every completed task, returning how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        before - self.tasks.len()
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    /// `true` when a task with this id is stored.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Tasks as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of stored tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// `true` when nothing is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Totals used by the status bar.
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        self.tasks.iter().fold(
            TaskCounts {
                total: self.tasks.len(),
                ..TaskCounts::default()
            },
            |mut counts, task| {
                if task.completed {
                    counts.completed += 1;
                } else {
                    counts.active += 1;
                }
                if task.priority {
                    counts.priority += 1;
                }
                counts
            },
        )
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
