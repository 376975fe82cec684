//! Domain types and state transitions for tasklist.
//!
//! Everything here is in-memory and synchronous: a [`TaskList`] holds tasks in
//! insertion order, a [`TaskFilter`] projects the visible subset, and the
//! [`Controller`] ties both to the form's edit mode.

/// View-state controller.
pub mod controller;
/// Status and priority filters.
pub mod filter;
/// Identifier types.
pub mod id;
/// Ordered task collection.
pub mod list;
/// Task entity and form draft.
pub mod task;

pub use controller::{Change, Controller};
pub use filter::{PriorityFilter, StatusFilter, TaskFilter};
pub use id::TaskId;
pub use list::{TaskCounts, TaskList};
pub use task::{Attachment, DueAt, DueAtParseError, TITLE_MAX_CHARS, Task, TaskDraft, normalize_title};
