//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside selected list entries.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Checkbox shown for completed tasks.
pub const CHECKBOX_DONE: &str = "[x]";
/// Checkbox shown for open tasks.
pub const CHECKBOX_OPEN: &str = "[ ]";
/// Marker for prioritized tasks.
pub const PRIORITY_MARKER: &str = "★";
/// Placeholder keeping titles aligned when a task is not prioritized.
pub const PRIORITY_PLACEHOLDER: &str = "☆";
/// Lines scrolled by the fast scroll actions.
pub const VIEWER_FAST_SCROLL_LINES: u16 = 10;
/// Width percentage for the description viewer popup before clamping.
pub const DESCRIPTION_VIEWER_WIDTH_PERCENT: u16 = 80;
/// Height percentage for the description viewer popup before clamping.
pub const DESCRIPTION_VIEWER_HEIGHT_PERCENT: u16 = 80;
/// Minimum width for the description viewer popup.
pub const DESCRIPTION_VIEWER_MIN_WIDTH: u16 = 40;
/// Minimum height for the description viewer popup.
pub const DESCRIPTION_VIEWER_MIN_HEIGHT: u16 = 10;
/// Maximum graphemes of a title shown in popup headers.
pub const POPUP_TITLE_MAX_CHARS: usize = 40;
