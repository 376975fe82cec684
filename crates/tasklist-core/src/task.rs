use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use unicode_segmentation::UnicodeSegmentation;

use crate::id::TaskId;

/// Maximum number of grapheme clusters kept in a task title.
pub const TITLE_MAX_CHARS: usize = 70;

const DUE_INPUT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const DUE_INPUT_FORMAT_SPACED: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const DUE_DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Normalize raw title input.
///
/// Surrounding whitespace is trimmed and the result is capped at
/// [`TITLE_MAX_CHARS`] graphemes. Returns `None` when nothing is left.
#[must_use]
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let capped: String = trimmed.graphemes(true).take(TITLE_MAX_CHARS).collect();
    Some(capped.trim_end().to_owned())
}

fn normalize_description(raw: Option<String>) -> Option<String> {
    raw.and_then(|text| {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

/// Error returned when a due time cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid due time `{input}` (expected YYYY-MM-DDTHH:MM)")]
pub struct DueAtParseError {
    input: String,
    #[source]
    source: time::error::Parse,
}

/// Local due date-time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueAt(PrimitiveDateTime);

impl DueAt {
    /// Wrap an already constructed date-time.
    #[must_use]
    pub const fn new(value: PrimitiveDateTime) -> Self {
        Self(value)
    }

    /// Underlying date-time.
    #[must_use]
    pub const fn value(self) -> PrimitiveDateTime {
        self.0
    }

    /// Render in the same form accepted by [`FromStr`], for prefilled forms.
    #[must_use]
    pub fn to_input(self) -> String {
        self.0
            .format(DUE_INPUT_FORMAT)
            .unwrap_or_else(|_| self.to_string())
    }
}

impl FromStr for DueAt {
    type Err = DueAtParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        PrimitiveDateTime::parse(input, DUE_INPUT_FORMAT)
            .or_else(|_| PrimitiveDateTime::parse(input, DUE_INPUT_FORMAT_SPACED))
            .map(Self)
            .map_err(|source| DueAtParseError {
                input: input.to_owned(),
                source,
            })
    }
}

impl fmt::Display for DueAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(DUE_DISPLAY_FORMAT) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

/// Opaque reference to a file attached to a task. Never opened or read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attachment(PathBuf);

impl Attachment {
    /// Reference the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Referenced path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Final path component, falling back to the full path.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0.file_name().map_or_else(
            || self.0.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Editable fields of a task, as collected by the input form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Raw title input; normalized on add/update.
    pub title: String,
    /// Optional due time.
    pub due_at: Option<DueAt>,
    /// Optional free text.
    pub description: Option<String>,
    /// Attached file references.
    pub attachments: BTreeSet<Attachment>,
}

impl TaskDraft {
    /// Draft with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the due time.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DueAt) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an attachment reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.insert(attachment);
        self
    }

    /// `true` when the title is blank after trimming.
    #[must_use]
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    /// Non-empty title, at most [`TITLE_MAX_CHARS`] graphemes.
    title: String,
    /// Optional due time.
    pub due_at: Option<DueAt>,
    /// Optional free text.
    pub description: Option<String>,
    /// Attached file references.
    pub attachments: BTreeSet<Attachment>,
    /// Whether the task is done.
    pub completed: bool,
    /// Whether the task is flagged as priority.
    pub priority: bool,
}

impl Task {
    /// Build a fresh task from a draft. Returns `None` when the title is blank.
    #[must_use]
    pub fn from_draft(draft: TaskDraft) -> Option<Self> {
        let title = normalize_title(&draft.title)?;
        Some(Self {
            id: TaskId::new(),
            title,
            due_at: draft.due_at,
            description: normalize_description(draft.description),
            attachments: draft.attachments,
            completed: false,
            priority: false,
        })
    }

    /// Identifier assigned at creation.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Current title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace every mutable field from a draft, keeping id and flags.
    /// Returns `false` without touching the task when the title is blank.
    pub fn apply_draft(&mut self, draft: TaskDraft) -> bool {
        let Some(title) = normalize_title(&draft.title) else {
            return false;
        };
        self.title = title;
        self.due_at = draft.due_at;
        self.description = normalize_description(draft.description);
        self.attachments = draft.attachments;
        true
    }

    /// Load the editable fields into a form draft.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            due_at: self.due_at,
            description: self.description.clone(),
            attachments: self.attachments.clone(),
        }
    }
}
