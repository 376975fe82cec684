//! Keybindings configuration for the TUI.

#![allow(
    clippy::uninlined_format_args,
    clippy::enum_glob_use,
    clippy::unused_self
)]

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Top-level configuration for tasklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TUI configuration.
    pub tui: TuiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    pub keybindings: KeyBindingsConfig,
}

/// Keybindings configuration for all TUI views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Keybindings for the task list view.
    pub task_list: TaskListKeyBindings,
    /// Keybindings for the description viewer.
    pub description_viewer: ViewerKeyBindings,
}

/// Keybindings for the task list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Move down in the list.
    pub down: Vec<String>,
    /// Move up in the list.
    pub up: Vec<String>,
    /// Open the form for a new task.
    pub create_task: Vec<String>,
    /// Open the form preloaded with the selected task.
    pub edit_task: Vec<String>,
    /// Delete the selected task.
    pub delete_task: Vec<String>,
    /// Toggle completion of the selected task.
    pub toggle_completed: Vec<String>,
    /// Toggle priority of the selected task.
    pub toggle_priority: Vec<String>,
    /// Show every task.
    pub filter_all: Vec<String>,
    /// Show tasks not yet completed.
    pub filter_active: Vec<String>,
    /// Show completed tasks.
    pub filter_completed: Vec<String>,
    /// Cycle the priority filter.
    pub cycle_priority_filter: Vec<String>,
    /// Remove every completed task.
    pub clear_completed: Vec<String>,
    /// Copy the selected task to the clipboard.
    pub copy_task: Vec<String>,
    /// Open description viewer.
    pub open_description_viewer: Vec<String>,
}

/// Keybindings for the description viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerKeyBindings {
    /// Close viewer.
    pub close: Vec<String>,
    /// Scroll down.
    pub scroll_down: Vec<String>,
    /// Scroll up.
    pub scroll_up: Vec<String>,
    /// Scroll down fast (half page).
    pub scroll_down_fast: Vec<String>,
    /// Scroll up fast (half page).
    pub scroll_up_fast: Vec<String>,
}

impl Default for TaskListKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Q", "Esc"],
            down: vec_of_strings!["j", "J", "Down"],
            up: vec_of_strings!["k", "K", "Up"],
            create_task: vec_of_strings!["n", "N"],
            edit_task: vec_of_strings!["e", "E"],
            delete_task: vec_of_strings!["d", "Delete"],
            toggle_completed: vec_of_strings!["Space", "x"],
            toggle_priority: vec_of_strings!["s", "S"],
            filter_all: vec_of_strings!["1"],
            filter_active: vec_of_strings!["2"],
            filter_completed: vec_of_strings!["3"],
            cycle_priority_filter: vec_of_strings!["p", "P"],
            clear_completed: vec_of_strings!["X"],
            copy_task: vec_of_strings!["y", "Y"],
            open_description_viewer: vec_of_strings!["v", "V", "Enter"],
        }
    }
}

impl Default for ViewerKeyBindings {
    fn default() -> Self {
        Self {
            close: vec_of_strings!["q", "Q", "Esc"],
            scroll_down: vec_of_strings!["j", "J", "Down"],
            scroll_up: vec_of_strings!["k", "K", "Up"],
            scroll_down_fast: vec_of_strings!["Ctrl+d"],
            scroll_up_fast: vec_of_strings!["Ctrl+u"],
        }
    }
}

/// Returns the default configuration file path.
///
/// On Linux: `~/.config/tasklist/config.toml`
/// On macOS: `~/Library/Application Support/tasklist/config.toml`
/// On Windows: `%APPDATA%\tasklist\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklist").join("config.toml"))
}

/// Generate default configuration as TOML string.
pub fn generate_default_config_toml() -> Result<String> {
    let config = Config::default();

    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize default configuration")?;

    let header = r#"# tasklist Configuration
#
# [tui.keybindings]
# Each action can have multiple key bindings.
#
# Supported key formats:
# - Single characters: "j", "k", "a", "1"
# - Special keys: "Enter", "Esc", "Tab", "Backspace", "Delete", "Insert", "Space"
# - Arrow keys: "Up", "Down", "Left", "Right"
# - Navigation keys: "Home", "End", "PageUp", "PageDown"
# - Modified keys: "Ctrl+d", "Alt+k", "Shift+Up"
#
# Note: When this file exists, ALL default keybindings are disabled.
# Make sure to define all actions you need.

"#;

    Ok(format!("{}{}", header, toml_str))
}

/// Load configuration from a TOML file.
///
/// # Arguments
/// - `path`: Optional path to the config file. If `None`, uses the default path.
///
/// # Returns
/// - `Ok(Some(config))` if the file exists and was successfully parsed
/// - `Ok(None)` if the file does not exist
/// - `Err(_)` if there was an error reading or parsing the file
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Space" -> `KeyCode::Char(' ')`
/// - "Ctrl+d" -> `KeyCode::Char('d')` with CONTROL modifier
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    if s.is_empty() {
        bail!("Empty key string");
    }
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        for &modifier in &parts[..parts.len() - 1] {
            match modifier {
                "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
                "Alt" => modifiers |= KeyModifiers::ALT,
                "Shift" => modifiers |= KeyModifiers::SHIFT,
                other => bail!("Unknown modifier: {}", other),
            }
        }
        parts[parts.len() - 1]
    } else {
        parts[0]
    };

    let code = parse_key_code(key_part)?;

    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "Delete" => Ok(KeyCode::Delete),
        "Insert" => Ok(KeyCode::Insert),
        "Space" => Ok(KeyCode::Char(' ')),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        other => bail!("Unknown key: {}", other),
    }
}

/// Validate the configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_tui_config(&config.tui)
}

/// Validate the TUI configuration.
pub fn validate_tui_config(config: &TuiConfig) -> Result<()> {
    validate_keybindings_config(&config.keybindings)
}

/// Validate the keybindings configuration.
///
/// Checks for:
/// - Empty key bindings
/// - Invalid key expressions
/// - Key conflicts within each view
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    let views = [
        ("task_list", collect_task_list_bindings(config)),
        ("description_viewer", collect_viewer_bindings(&config.description_viewer)),
    ];
    for (view_name, bindings) in &views {
        validate_non_empty_bindings(view_name, bindings)?;
        validate_key_expressions(view_name, bindings)?;
    }
    for (view_name, bindings) in views {
        validate_view_keybindings(view_name, bindings)?;
    }
    Ok(())
}

fn validate_non_empty_bindings(view_name: &str, bindings: &HashMap<String, Vec<String>>) -> Result<()> {
    let mut actions: Vec<&String> = bindings.keys().collect();
    actions.sort();
    for action in actions {
        if bindings[action].is_empty() {
            bail!("{}.{} must have at least one key binding", view_name, action);
        }
    }
    Ok(())
}

fn validate_key_expressions(view_name: &str, bindings: &HashMap<String, Vec<String>>) -> Result<()> {
    for (action, keys) in bindings {
        for key in keys {
            parse_key(key).with_context(|| format!("Invalid key '{}' in {}.{}", key, view_name, action))?;
        }
    }
    Ok(())
}

fn validate_view_keybindings(view_name: &str, bindings: HashMap<String, Vec<String>>) -> Result<()> {
    let mut key_to_actions: HashMap<(KeyCode, KeyModifiers), (String, Vec<String>)> = HashMap::new();

    for (action, keys) in bindings {
        for key in keys {
            let event = parse_key(&key).with_context(|| format!("Invalid key '{}' in {}.{}", key, view_name, action))?;
            let (_, actions) = key_to_actions
                .entry(normalized_key(&event))
                .or_insert_with(|| (key.clone(), Vec::new()));
            if !actions.contains(&action) {
                actions.push(action.clone());
            }
        }
    }

    for (key, mut actions) in key_to_actions.into_values() {
        if actions.len() > 1 {
            actions.sort();
            bail!(
                "Key '{}' is bound to multiple actions in {}: {:?}",
                key,
                view_name,
                actions
            );
        }
    }

    Ok(())
}

/// The part of a parsed key that [`KeyBindingsConfig::matches`] compares.
fn normalized_key(event: &KeyEvent) -> (KeyCode, KeyModifiers) {
    let modifiers = if matches!(event.code, KeyCode::Char(_)) {
        event.modifiers.difference(KeyModifiers::SHIFT)
    } else {
        event.modifiers
    };
    (event.code, modifiers)
}

fn collect_task_list_bindings(config: &KeyBindingsConfig) -> HashMap<String, Vec<String>> {
    let list = &config.task_list;
    [
        ("quit", &list.quit),
        ("down", &list.down),
        ("up", &list.up),
        ("create_task", &list.create_task),
        ("edit_task", &list.edit_task),
        ("delete_task", &list.delete_task),
        ("toggle_completed", &list.toggle_completed),
        ("toggle_priority", &list.toggle_priority),
        ("filter_all", &list.filter_all),
        ("filter_active", &list.filter_active),
        ("filter_completed", &list.filter_completed),
        ("cycle_priority_filter", &list.cycle_priority_filter),
        ("clear_completed", &list.clear_completed),
        ("copy_task", &list.copy_task),
        ("open_description_viewer", &list.open_description_viewer),
    ]
    .into_iter()
    .map(|(name, keys)| (name.to_string(), keys.clone()))
    .collect()
}

fn collect_viewer_bindings(viewer: &ViewerKeyBindings) -> HashMap<String, Vec<String>> {
    [
        ("close", &viewer.close),
        ("scroll_down", &viewer.scroll_down),
        ("scroll_up", &viewer.scroll_up),
        ("scroll_down_fast", &viewer.scroll_down_fast),
        ("scroll_up_fast", &viewer.scroll_up_fast),
    ]
    .into_iter()
    .map(|(name, keys)| (name.to_string(), keys.clone()))
    .collect()
}

/// View type for keybinding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Task list view.
    TaskList,
    /// Description viewer popup.
    DescriptionViewer,
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Common actions
    /// Quit the application.
    Quit,
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Close a popup.
    Close,

    // TaskList specific
    /// Open the form for a new task.
    CreateTask,
    /// Open the form for the selected task.
    EditTask,
    /// Delete the selected task.
    DeleteTask,
    /// Toggle completion.
    ToggleCompleted,
    /// Toggle priority.
    TogglePriority,
    /// Status filter: all.
    FilterAll,
    /// Status filter: active.
    FilterActive,
    /// Status filter: completed.
    FilterCompleted,
    /// Cycle the priority filter.
    CyclePriorityFilter,
    /// Clear completed tasks.
    ClearCompleted,
    /// Copy the selected task.
    CopyTask,
    /// Open the description viewer.
    OpenDescriptionViewer,

    // Viewer specific
    /// Scroll down.
    ScrollDown,
    /// Scroll up.
    ScrollUp,
    /// Scroll down fast.
    ScrollDownFast,
    /// Scroll up fast.
    ScrollUpFast,
}

impl KeyBindingsConfig {
    /// Generate help text for a specific view.
    pub fn generate_help_text(&self, view: ViewType) -> String {
        match view {
            ViewType::TaskList => self.generate_task_list_help(),
            ViewType::DescriptionViewer => self.generate_viewer_help(),
        }
    }

    fn generate_task_list_help(&self) -> String {
        let list = &self.task_list;
        format!(
            "{}:move {}:new {}:edit {}:delete {}:done {}:star {}/{}/{}:all/active/completed {}:priority filter {}:clear completed {}:copy {}:details {}:quit",
            self.format_key_pair(&list.down, &list.up),
            self.format_first_key(&list.create_task),
            self.format_first_key(&list.edit_task),
            self.format_first_key(&list.delete_task),
            self.format_first_key(&list.toggle_completed),
            self.format_first_key(&list.toggle_priority),
            self.format_first_key(&list.filter_all),
            self.format_first_key(&list.filter_active),
            self.format_first_key(&list.filter_completed),
            self.format_first_key(&list.cycle_priority_filter),
            self.format_first_key(&list.clear_completed),
            self.format_first_key(&list.copy_task),
            self.format_first_key(&list.open_description_viewer),
            self.format_first_key(&list.quit),
        )
    }

    fn generate_viewer_help(&self) -> String {
        let viewer = &self.description_viewer;
        format!(
            "{}:scroll {}/{}:half page {}:close",
            self.format_key_pair(&viewer.scroll_down, &viewer.scroll_up),
            self.format_first_key(&viewer.scroll_down_fast),
            self.format_first_key(&viewer.scroll_up_fast),
            self.format_first_key(&viewer.close),
        )
    }

    /// Display label of the first key bound to an action in a view.
    pub fn key_label(&self, view: ViewType, action: Action) -> String {
        self.format_first_key(self.get_keys(view, action))
    }

    /// Format the first key of a key binding list for display.
    fn format_first_key(&self, keys: &[String]) -> String {
        keys.first()
            .map_or_else(|| "?".to_string(), |k| self.format_key_display(k))
    }

    /// Format two keys as a pair (e.g., "j/k" for down/up).
    fn format_key_pair(&self, down: &[String], up: &[String]) -> String {
        format!("{}/{}", self.format_first_key(down), self.format_first_key(up))
    }

    /// Format a key for display, converting special keys to readable symbols.
    fn format_key_display(&self, key: &str) -> String {
        match key {
            "Enter" => "↵".to_string(),
            "Backspace" => "BS".to_string(),
            "Delete" => "Del".to_string(),
            "Space" => "Spc".to_string(),
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "PageUp" => "PgUp".to_string(),
            "PageDown" => "PgDn".to_string(),
            other if other.starts_with("Ctrl+") || other.starts_with("Alt+") => other.replace('+', "-"),
            other => other.to_string(),
        }
    }

    /// Check if a key event matches a configured action in a view.
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        self.get_keys(view, action)
            .iter()
            .filter_map(|key_str| parse_key(key_str).ok())
            .any(|expected| Self::key_event_matches(&expected, key))
    }

    fn key_event_matches(expected: &KeyEvent, actual: &KeyEvent) -> bool {
        // Terminals report SHIFT alongside an already upper-cased character.
        normalized_key(expected) == normalized_key(actual)
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        use Action::*;
        use ViewType::*;

        match (view, action) {
            (TaskList, Quit) => &self.task_list.quit,
            (TaskList, Down) => &self.task_list.down,
            (TaskList, Up) => &self.task_list.up,
            (TaskList, CreateTask) => &self.task_list.create_task,
            (TaskList, EditTask) => &self.task_list.edit_task,
            (TaskList, DeleteTask) => &self.task_list.delete_task,
            (TaskList, ToggleCompleted) => &self.task_list.toggle_completed,
            (TaskList, TogglePriority) => &self.task_list.toggle_priority,
            (TaskList, FilterAll) => &self.task_list.filter_all,
            (TaskList, FilterActive) => &self.task_list.filter_active,
            (TaskList, FilterCompleted) => &self.task_list.filter_completed,
            (TaskList, CyclePriorityFilter) => &self.task_list.cycle_priority_filter,
            (TaskList, ClearCompleted) => &self.task_list.clear_completed,
            (TaskList, CopyTask) => &self.task_list.copy_task,
            (TaskList, OpenDescriptionViewer) => &self.task_list.open_description_viewer,

            (DescriptionViewer, Close) => &self.description_viewer.close,
            (DescriptionViewer, ScrollDown) => &self.description_viewer.scroll_down,
            (DescriptionViewer, ScrollUp) => &self.description_viewer.scroll_up,
            (DescriptionViewer, ScrollDownFast) => &self.description_viewer.scroll_down_fast,
            (DescriptionViewer, ScrollUpFast) => &self.description_viewer.scroll_up_fast,

            // Invalid combinations
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
[tui.keybindings.task_list]
quit = ["Q"]
down = ["j"]
up = ["k"]
create_task = ["a"]
edit_task = ["e"]
delete_task = ["Delete"]
toggle_completed = ["Space"]
toggle_priority = ["*"]
filter_all = ["1"]
filter_active = ["2"]
filter_completed = ["3"]
cycle_priority_filter = ["p"]
clear_completed = ["Ctrl+x"]
copy_task = ["y"]
open_description_viewer = ["Enter"]

[tui.keybindings.description_viewer]
close = ["Esc"]
scroll_down = ["j"]
scroll_up = ["k"]
scroll_down_fast = ["Ctrl+d"]
scroll_up_fast = ["Ctrl+u"]
"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_default_keybindings() {
        let config = KeyBindingsConfig::default();
        assert_eq!(config.task_list.quit, vec!["q", "Q", "Esc"]);
        assert_eq!(config.task_list.toggle_completed, vec!["Space", "x"]);
        assert_eq!(config.task_list.clear_completed, vec!["X"]);
        assert_eq!(config.task_list.filter_active, vec!["2"]);
        assert_eq!(config.description_viewer.scroll_down_fast, vec!["Ctrl+d"]);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.to_string_lossy().contains("tasklist"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }

    #[test]
    fn test_parse_simple_and_special_keys() {
        let key = parse_key("j").unwrap();
        assert_eq!(key.code, KeyCode::Char('j'));
        assert_eq!(key.modifiers, KeyModifiers::NONE);

        assert_eq!(parse_key("Space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key("Delete").unwrap().code, KeyCode::Delete);
        assert_eq!(parse_key("*").unwrap().code, KeyCode::Char('*'));
    }

    #[test]
    fn test_parse_modified_key() {
        let key = parse_key("Ctrl+d").unwrap();
        assert_eq!(key.code, KeyCode::Char('d'));
        assert_eq!(key.modifiers, KeyModifiers::CONTROL);

        let key = parse_key("Alt+Shift+Up").unwrap();
        assert_eq!(key.code, KeyCode::Up);
        assert_eq!(key.modifiers, KeyModifiers::ALT | KeyModifiers::SHIFT);
    }

    #[test]
    fn test_parse_invalid_key() {
        assert!(parse_key("InvalidKey").is_err());
        assert!(parse_key("").is_err());
        assert!(parse_key("Hyper+k").is_err());
    }

    #[test]
    fn test_matches_ignores_shift_on_characters() {
        let config = KeyBindingsConfig::default();
        let shifted = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert!(config.matches(ViewType::TaskList, Action::ClearCompleted, &shifted));

        let lower = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!config.matches(ViewType::TaskList, Action::ClearCompleted, &lower));
        assert!(config.matches(ViewType::TaskList, Action::ToggleCompleted, &lower));
    }

    #[test]
    fn test_matches_requires_control_modifier() {
        let config = KeyBindingsConfig::default();
        let plain_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(config.matches(ViewType::DescriptionViewer, Action::ScrollDownFast, &ctrl_d));
        assert!(!config.matches(ViewType::DescriptionViewer, Action::ScrollDownFast, &plain_d));
        assert!(!config.matches(ViewType::TaskList, Action::DeleteTask, &ctrl_d));
    }

    #[test]
    fn test_matches_wrong_view() {
        let config = KeyBindingsConfig::default();
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(config.matches(ViewType::TaskList, Action::Quit, &key));
        assert!(!config.matches(ViewType::DescriptionViewer, Action::Quit, &key));
        assert!(config.matches(ViewType::DescriptionViewer, Action::Close, &key));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_keybindings_config(&KeyBindingsConfig::default()).is_ok());
    }

    #[test]
    fn test_detect_key_conflict_in_same_view() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.delete_task = vec!["s".to_string()];
        let err = validate_keybindings_config(&config).unwrap_err();
        assert!(err.to_string().contains("multiple actions"));
    }

    #[test]
    fn test_detect_conflict_between_shift_alias_and_plain_char() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.toggle_completed = vec!["x".to_string()];
        config.task_list.clear_completed = vec!["Shift+x".to_string()];
        let err = validate_keybindings_config(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("multiple actions"));
        assert!(message.contains("clear_completed"));
        assert!(message.contains("toggle_completed"));
    }

    #[test]
    fn test_detect_conflict_between_space_spellings() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.toggle_priority = vec![" ".to_string()];
        let err = validate_keybindings_config(&config).unwrap_err();
        assert!(err.to_string().contains("multiple actions"));
        assert!(err.to_string().contains("toggle_priority"));
    }

    #[test]
    fn test_aliases_within_one_action_are_not_conflicts() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.copy_task = vec!["y".to_string(), "Shift+y".to_string()];
        assert!(validate_keybindings_config(&config).is_ok());
    }

    #[test]
    fn test_ctrl_chars_conflict_regardless_of_shift() {
        let mut config = KeyBindingsConfig::default();
        config.description_viewer.scroll_up_fast = vec!["Ctrl+Shift+d".to_string()];
        let err = validate_keybindings_config(&config).unwrap_err();
        assert!(err.to_string().contains("scroll_down_fast"));
    }

    #[test]
    fn test_no_conflict_across_views() {
        let mut config = KeyBindingsConfig::default();
        config.description_viewer.close = vec!["p".to_string()];
        assert!(validate_keybindings_config(&config).is_ok());
    }

    #[test]
    fn test_empty_binding_validation() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.copy_task = Vec::new();
        let err = validate_keybindings_config(&config).unwrap_err();
        assert!(err.to_string().contains("task_list.copy_task"));
    }

    #[test]
    fn test_invalid_key_expression() {
        let mut config = KeyBindingsConfig::default();
        config.description_viewer.close = vec!["Escape".to_string()];
        assert!(validate_keybindings_config(&config).is_err());
    }

    #[test]
    fn test_help_text_uses_configured_keys() {
        let mut config = KeyBindingsConfig::default();
        let help = config.generate_help_text(ViewType::TaskList);
        assert!(help.contains("Spc:done"));
        assert!(help.contains("j/k:move"));

        config.task_list.create_task = vec!["Ctrl+n".to_string()];
        let help = config.generate_help_text(ViewType::TaskList);
        assert!(help.contains("Ctrl-n:new"));

        let viewer_help = config.generate_help_text(ViewType::DescriptionViewer);
        assert!(viewer_help.contains("Ctrl-d/Ctrl-u:half page"));
    }

    #[test]
    fn test_key_label_formats_first_binding() {
        let config = KeyBindingsConfig::default();
        assert_eq!(config.key_label(ViewType::TaskList, Action::ToggleCompleted), "Spc");
        assert_eq!(config.key_label(ViewType::TaskList, Action::FilterAll), "1");
        assert_eq!(config.key_label(ViewType::DescriptionViewer, Action::FilterAll), "?");
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = load_config(Some(Path::new("/nonexistent/path/config.toml"))).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_valid_custom_config_from_file() {
        let temp_file = write_temp(FULL_CONFIG);
        let config = load_config(Some(temp_file.path())).unwrap().unwrap();

        assert_eq!(config.tui.keybindings.task_list.quit, vec!["Q"]);
        assert_eq!(config.tui.keybindings.task_list.toggle_priority, vec!["*"]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_invalid_toml_syntax() {
        let temp_file = write_temp("[tui.keybindings\nquit = [\"q\"]\n");
        assert!(load_config(Some(temp_file.path())).is_err());
    }

    #[test]
    fn test_load_config_missing_required_fields() {
        let temp_file = write_temp(
            r#"
[tui.keybindings.task_list]
quit = ["q"]
down = ["j"]
"#,
        );
        assert!(load_config(Some(temp_file.path())).is_err());
    }

    #[test]
    fn test_generate_default_toml_is_valid() {
        let toml = generate_default_config_toml().unwrap();
        assert!(toml.contains("tasklist Configuration"));
        assert!(toml.contains("[tui.keybindings.task_list]"));

        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.tui.keybindings.task_list.quit, vec!["q", "Q", "Esc"]);
        assert!(validate_config(&parsed).is_ok());
    }
}
