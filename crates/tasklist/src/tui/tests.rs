use super::clipboard::*;
use super::editor::*;
use super::view::*;
use super::widgets::truncate_with_ellipsis;
use crate::config::KeyBindingsConfig;
use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Constraint;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use std::result::Result as StdResult;
use tasklist_core::{Controller, DueAt, PriorityFilter, StatusFilter, Task, TaskDraft, TaskId};

fn expect_ok<T, E: Display>(result: StdResult<T, E>, ctx: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{ctx}: {err}"),
    }
}

fn expect_err<T, E: Display>(result: StdResult<T, E>, ctx: &str) -> E {
    match result {
        Ok(_) => panic!("{ctx}"),
        Err(err) => err,
    }
}

fn expect_some<T>(value: Option<T>, ctx: &str) -> T {
    value.map_or_else(|| panic!("{ctx}"), |inner| inner)
}

#[derive(Default)]
struct NoopClipboard;

impl ClipboardSink for NoopClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

struct RecordingClipboard {
    writes: Rc<RefCell<Vec<String>>>,
}

impl RecordingClipboard {
    fn new(writes: Rc<RefCell<Vec<String>>>) -> Self {
        Self { writes }
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct FailingClipboard {
    message: String,
}

impl FailingClipboard {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ClipboardSink for FailingClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        Err(anyhow!(self.message.clone()))
    }
}

fn ui_with(titles: &[&str], clipboard: Box<dyn ClipboardSink>) -> Ui {
    let mut controller = Controller::new();
    for title in titles {
        controller.add(TaskDraft::titled(*title));
    }
    Ui::with_clipboard(controller, KeyBindingsConfig::default(), clipboard)
}

fn ui_with_tasks(titles: &[&str]) -> Ui {
    ui_with(titles, Box::new(NoopClipboard))
}

fn press(ui: &mut Ui, code: KeyCode) -> Option<UiAction> {
    ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press_char(ui: &mut Ui, ch: char) -> Option<UiAction> {
    let modifiers = if ch.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    ui.handle_key(KeyEvent::new(KeyCode::Char(ch), modifiers))
}

fn visible_titles(ui: &Ui) -> Vec<String> {
    ui.visibility
        .visible_tasks(ui.controller.tasks().as_slice())
        .map(|task| task.title().to_owned())
        .collect()
}

fn selected_title(ui: &Ui) -> Option<String> {
    ui.selected_task().map(|task| task.title().to_owned())
}

fn task_id(ui: &Ui, title: &str) -> TaskId {
    expect_some(
        ui.controller
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .map(Task::id),
        "task must exist",
    )
}

fn render(ui: &Ui, width: u16, height: u16) -> String {
    let mut terminal = expect_ok(Terminal::new(TestBackend::new(width, height)), "test terminal");
    expect_ok(terminal.draw(|f| ui.draw(f)), "draw must succeed");
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

const fn min_height_for_constraint(constraint: &Constraint) -> u16 {
    match *constraint {
        Constraint::Length(value) | Constraint::Min(value) => value,
        _ => 0,
    }
}

#[test]
fn truncate_with_ellipsis_returns_borrowed_when_short() {
    let title = "Short title";
    assert!(matches!(
        truncate_with_ellipsis(title, 20),
        Cow::Borrowed(result) if result == title
    ));
}

#[test]
fn truncate_with_ellipsis_keeps_grapheme_clusters_intact() {
    assert_eq!(truncate_with_ellipsis("a\u{0301}bcdef", 4), "a\u{0301}...");
    assert_eq!(truncate_with_ellipsis("あいうえおかきくけこ", 5), "あい...");
}

#[test]
fn status_footer_height_matches_constraints() {
    let total: u16 = Ui::status_layout_constraints()
        .iter()
        .map(min_height_for_constraint)
        .sum();
    assert_eq!(total, Ui::STATUS_FOOTER_HEIGHT);
}

#[test]
fn navigation_moves_selection_within_bounds() {
    let mut ui = ui_with_tasks(&["a", "b", "c"]);
    assert_eq!(selected_title(&ui).as_deref(), Some("a"));

    press_char(&mut ui, 'j');
    press(&mut ui, KeyCode::Down);
    press(&mut ui, KeyCode::Down);
    assert_eq!(selected_title(&ui).as_deref(), Some("c"));

    press_char(&mut ui, 'k');
    assert_eq!(selected_title(&ui).as_deref(), Some("b"));
}

#[test]
fn quits_on_q_and_escape() {
    let mut ui = ui_with_tasks(&[]);
    assert!(press_char(&mut ui, 'q').is_none());
    assert!(ui.should_quit);

    let mut ui = ui_with_tasks(&[]);
    press(&mut ui, KeyCode::Esc);
    assert!(ui.should_quit);
}

#[test]
fn key_release_events_are_ignored() {
    let mut ui = ui_with_tasks(&["a"]);
    let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    key.kind = KeyEventKind::Release;
    assert!(ui.handle_key(key).is_none());
    assert!(!ui.should_quit);
}

#[test]
fn space_toggles_completion_and_reports_it() {
    let mut ui = ui_with_tasks(&["Buy milk"]);
    let id = task_id(&ui, "Buy milk");

    press_char(&mut ui, ' ');
    assert_eq!(ui.controller.tasks().get(id).map(|task| task.completed), Some(true));
    let message = expect_some(ui.message.take(), "info message must be set");
    assert_eq!(message.level, MessageLevel::Info);
    assert!(message.text.contains("completed"));

    press_char(&mut ui, 'x');
    assert_eq!(ui.controller.tasks().get(id).map(|task| task.completed), Some(false));
}

#[test]
fn toggling_completion_under_active_filter_hides_task_and_moves_selection() {
    let mut ui = ui_with_tasks(&["a", "b"]);
    press_char(&mut ui, '2');
    assert_eq!(ui.controller.filter().status(), StatusFilter::Active);

    press_char(&mut ui, ' ');
    assert_eq!(visible_titles(&ui), vec!["b"]);
    assert_eq!(selected_title(&ui).as_deref(), Some("b"));
}

#[test]
fn delete_removes_selected_task_and_selects_neighbor() {
    let mut ui = ui_with_tasks(&["a", "b", "c"]);
    press_char(&mut ui, 'j');
    press(&mut ui, KeyCode::Delete);

    assert_eq!(visible_titles(&ui), vec!["a", "c"]);
    assert_eq!(selected_title(&ui).as_deref(), Some("c"));
    let message = expect_some(ui.message.take(), "info message must be set");
    assert!(message.text.contains("Deleted task: b"));
}

#[test]
fn delete_without_selection_shows_error() {
    let mut ui = ui_with_tasks(&[]);
    press_char(&mut ui, 'd');
    let message = expect_some(ui.message.take(), "error message must be set");
    assert_eq!(message.level, MessageLevel::Error);
}

#[test]
fn priority_filter_cycle_overrides_status_filter() {
    let mut ui = ui_with_tasks(&["Buy milk", "Call Bob"]);
    press_char(&mut ui, 'j');
    press_char(&mut ui, 's');
    press_char(&mut ui, '3');
    assert!(visible_titles(&ui).is_empty());

    press_char(&mut ui, 'p');
    assert_eq!(ui.controller.filter().priority(), PriorityFilter::Prioritized);
    assert_eq!(visible_titles(&ui), vec!["Call Bob"]);

    press_char(&mut ui, 'p');
    assert_eq!(visible_titles(&ui), vec!["Buy milk"]);

    press_char(&mut ui, 'p');
    assert_eq!(ui.controller.filter().priority(), PriorityFilter::Unset);
    assert!(visible_titles(&ui).is_empty());

    press_char(&mut ui, '1');
    assert_eq!(visible_titles(&ui), vec!["Buy milk", "Call Bob"]);
}

#[test]
fn selecting_status_resets_priority_filter() {
    let mut ui = ui_with_tasks(&["a"]);
    press_char(&mut ui, 'p');
    press_char(&mut ui, '2');
    assert_eq!(ui.controller.filter().priority(), PriorityFilter::Unset);
    assert_eq!(visible_titles(&ui), vec!["a"]);
    let message = expect_some(ui.message.take(), "filter message must be set");
    assert!(message.text.contains("Active"));
}

#[test]
fn shifted_x_clears_completed_tasks() {
    let mut ui = ui_with_tasks(&["a", "b", "c"]);
    press_char(&mut ui, ' ');
    press_char(&mut ui, 'j');
    press_char(&mut ui, 'j');
    press_char(&mut ui, ' ');

    press_char(&mut ui, 'X');
    assert_eq!(visible_titles(&ui), vec!["b"]);
    let message = expect_some(ui.message.take(), "info message must be set");
    assert!(message.text.contains("Cleared 2"));

    press_char(&mut ui, 'X');
    assert_eq!(visible_titles(&ui), vec!["b"]);
    let message = expect_some(ui.message.take(), "info message must be set");
    assert!(message.text.contains("No completed tasks"));
}

#[test]
fn copy_selected_task_writes_to_clipboard() {
    let writes = Rc::new(RefCell::new(Vec::new()));
    let mut ui = ui_with(&["Task"], Box::new(RecordingClipboard::new(Rc::clone(&writes))));

    press_char(&mut ui, 'y');

    assert_eq!(writes.borrow().last().cloned(), Some("Task".to_string()));
    let message = expect_some(ui.message.take(), "info message must be set");
    assert_eq!(message.level, MessageLevel::Info);
    assert!(message.text.contains("Copied"));
}

#[test]
fn copy_selected_task_reports_clipboard_failure() {
    let mut ui = ui_with(&["Task"], Box::new(FailingClipboard::new("broken clipboard")));

    ui.copy_selected_task();

    let message = expect_some(ui.message.take(), "error message must be set");
    assert_eq!(message.level, MessageLevel::Error);
    assert!(
        message.text.contains("broken clipboard"),
        "actual text: {}",
        message.text
    );
}

#[test]
fn osc52_sequence_encodes_text() {
    assert_eq!(osc52_sequence("Task-ID"), "\x1b]52;c;VGFzay1JRA==\x07");
}

#[test]
fn create_and_edit_keys_request_editor_actions() {
    let mut ui = ui_with_tasks(&["a"]);
    assert_eq!(press_char(&mut ui, 'n'), Some(UiAction::CreateTask));

    let id = task_id(&ui, "a");
    assert_eq!(press_char(&mut ui, 'e'), Some(UiAction::EditTask { task: id }));

    let mut empty = ui_with_tasks(&[]);
    assert_eq!(press_char(&mut empty, 'e'), None);
    assert!(empty.message.is_some());
}

#[test]
fn new_task_form_adds_and_selects_task() {
    let mut ui = ui_with_tasks(&["existing"]);
    let raw = "title: Write report\ndue: 2025-05-01T17:00\nattachments: /tmp/a.txt, /tmp/b.txt\n---\nQuarterly numbers\n";

    ui.apply_task_form_input(raw);

    assert_eq!(visible_titles(&ui), vec!["existing", "Write report"]);
    assert_eq!(selected_title(&ui).as_deref(), Some("Write report"));
    let task = expect_some(ui.selected_task(), "new task must be selected");
    assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
    assert_eq!(task.attachments.len(), 2);
    assert_eq!(task.due_at.map(|due| due.to_string()).as_deref(), Some("2025-05-01 17:00"));
    assert!(!task.completed && !task.priority);
}

#[test]
fn new_task_hidden_by_filter_is_reported() {
    let mut ui = ui_with_tasks(&[]);
    press_char(&mut ui, '3');
    ui.apply_task_form_input("title: Later\n");

    assert_eq!(ui.controller.tasks().len(), 1);
    assert!(visible_titles(&ui).is_empty());
    let message = expect_some(ui.message.take(), "info message must be set");
    assert!(message.text.contains("hidden"));
}

#[test]
fn edit_form_updates_in_place_and_leaves_edit_mode() {
    let mut ui = ui_with_tasks(&["Draft", "Other"]);
    let id = task_id(&ui, "Draft");
    press_char(&mut ui, ' ');

    let template = expect_some(ui.begin_edit(id), "task must load into the form");
    assert!(template.contains("title: Draft"));
    assert_eq!(ui.controller.editing(), Some(id));

    ui.apply_task_form_input(&template.replace("title: Draft", "title: Final"));

    assert_eq!(ui.controller.editing(), None);
    assert_eq!(ui.controller.tasks().len(), 2);
    let task = expect_some(ui.controller.tasks().get(id), "task must survive");
    assert_eq!(task.title(), "Final");
    assert!(task.completed);
    assert_eq!(selected_title(&ui).as_deref(), Some("Final"));
}

#[test]
fn invalid_form_reports_error_and_keeps_tasks() {
    let mut ui = ui_with_tasks(&["keep"]);
    let id = task_id(&ui, "keep");
    ui.begin_edit(id);

    ui.apply_task_form_input("title: keep\ndue: tomorrow\n");

    let message = expect_some(ui.message.take(), "error message must be set");
    assert_eq!(message.level, MessageLevel::Error);
    assert!(message.text.contains("tomorrow"));
    assert_eq!(ui.controller.editing(), None);
    assert_eq!(visible_titles(&ui), vec!["keep"]);
}

#[test]
fn empty_form_cancels() {
    let mut ui = ui_with_tasks(&["keep"]);
    ui.apply_task_form_input(&new_task_editor_template());

    assert_eq!(ui.controller.tasks().len(), 1);
    let message = expect_some(ui.message.take(), "info message must be set");
    assert!(message.text.contains("cancelled"));
}

#[test]
fn task_editor_output_parses_fields() {
    let raw = "# comment\ntitle:  Plan trip \ndue: 2025-07-01 09:15\n# hint\nattachments: a.pdf, , b.png\n---\nline one\n\nline two\n\n";
    let draft = expect_some(expect_ok(parse_task_editor_output(raw), "must parse"), "form must not be empty");

    assert_eq!(draft.title, "Plan trip");
    assert_eq!(
        draft.due_at,
        Some(expect_ok("2025-07-01T09:15".parse::<DueAt>(), "valid due"))
    );
    assert_eq!(draft.attachments.len(), 2);
    assert_eq!(draft.description.as_deref(), Some("line one\n\nline two"));
}

#[test]
fn task_editor_output_none_when_all_empty() {
    let raw = "title: \ndue: \nattachments: \n---\n\n";
    assert!(expect_ok(parse_task_editor_output(raw), "must parse").is_none());
}

#[test]
fn task_editor_output_requires_title() {
    let err = expect_err(
        parse_task_editor_output("title:\ndue: 2025-01-01T00:00\n"),
        "title must be required",
    );
    assert!(err.contains("Title"));
}

#[test]
fn task_editor_output_rejects_unknown_fields() {
    let err = expect_err(parse_task_editor_output("title: a\nowner: me\n"), "unknown field");
    assert!(err.contains("owner"));
    let err = expect_err(parse_task_editor_output("just text\n"), "malformed line");
    assert!(err.contains("just text"));
}

#[test]
fn edit_template_round_trips_through_parser() {
    let draft = TaskDraft::titled("Call Bob")
        .with_due_at(expect_ok("2025-02-03T04:05".parse::<DueAt>(), "valid due"))
        .with_description("about\nthe lease");
    let template = edit_task_editor_template(&draft);
    let parsed = expect_some(
        expect_ok(parse_task_editor_output(&template), "must parse"),
        "form must not be empty",
    );
    assert_eq!(parsed, draft);
}

#[test]
fn description_keeps_hash_lines_after_separator() {
    let raw = "# comment\ntitle: Triage\n---\n#1 blocker\n  # indented note\n";
    let draft = expect_some(expect_ok(parse_task_editor_output(raw), "must parse"), "form must not be empty");
    assert_eq!(draft.description.as_deref(), Some("#1 blocker\n  # indented note"));

    let draft = TaskDraft::titled("Triage").with_description("# Agenda\n- budget");
    let parsed = expect_some(
        expect_ok(parse_task_editor_output(&edit_task_editor_template(&draft)), "must parse"),
        "form must not be empty",
    );
    assert_eq!(parsed.description.as_deref(), Some("# Agenda\n- budget"));
}

#[test]
fn parse_list_trims_entries() {
    assert_eq!(
        parse_list("one, two , , three"),
        vec!["one".to_owned(), "two".to_owned(), "three".to_owned()]
    );
}

fn ui_with_description(title: &str, description: &str) -> Ui {
    let mut controller = Controller::new();
    controller.add(TaskDraft::titled(title).with_description(description));
    Ui::with_clipboard(controller, KeyBindingsConfig::default(), Box::new(NoopClipboard))
}

fn numbered_lines(count: usize) -> String {
    (1..=count).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n")
}

fn viewer_offset(ui: &Ui) -> Option<u16> {
    ui.description_viewer.as_ref().map(|viewer| viewer.scroll_offset)
}

#[test]
fn description_viewer_opens_scrolls_and_closes() {
    let mut ui = ui_with_description("a", &numbered_lines(30));
    press(&mut ui, KeyCode::Enter);
    assert_eq!(ui.detail_focus, DetailFocus::DescriptionViewer);

    ui.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
    press_char(&mut ui, 'k');
    assert_eq!(viewer_offset(&ui), Some(9));

    press_char(&mut ui, 'q');
    assert!(!ui.should_quit);
    assert!(ui.description_viewer.is_none());
    assert_eq!(ui.detail_focus, DetailFocus::None);
}

#[test]
fn description_viewer_scroll_stops_at_end_of_text() {
    let mut ui = ui_with_description("a", &numbered_lines(3));
    ui.open_description_viewer();
    for _ in 0..5 {
        ui.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
    }
    assert_eq!(viewer_offset(&ui), Some(2));
    press_char(&mut ui, 'k');
    assert_eq!(viewer_offset(&ui), Some(1));

    let mut empty = ui_with_tasks(&["no description"]);
    empty.open_description_viewer();
    press_char(&mut empty, 'j');
    assert_eq!(viewer_offset(&empty), Some(0));
}

#[test]
fn description_viewer_scroll_limit_follows_rendered_area() {
    let mut ui = ui_with_description("a", &numbered_lines(40));
    ui.open_description_viewer();
    render(&ui, 100, 24);

    let inner = ui
        .description_viewer
        .as_ref()
        .map(|viewer| viewer.inner_area.get())
        .unwrap_or_default();
    assert!(inner.height > 0 && inner.height < 40);
    assert_eq!(ui.description_viewer_max_scroll(), 40 - inner.height);

    for _ in 0..10 {
        ui.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
    }
    assert_eq!(viewer_offset(&ui), Some(40 - inner.height));
    let screen = render(&ui, 100, 24);
    assert!(screen.contains("line 40"));
    assert!(!screen.contains("line 1 "));
}

#[test]
fn description_viewer_renders_on_very_wide_terminal() {
    let mut ui = ui_with_description("wide", "short text");
    ui.open_description_viewer();
    let screen = render(&ui, 900, 24);
    assert!(screen.contains("Description: wide"));
    assert!(screen.contains("short text"));
}

#[test]
fn added_task_is_selected_over_previous_row() {
    let mut ui = ui_with_tasks(&["first", "second", "third"]);
    press_char(&mut ui, 'j');
    assert_eq!(selected_title(&ui).as_deref(), Some("second"));

    ui.apply_task_form_input("title: fourth\n");
    assert_eq!(selected_title(&ui).as_deref(), Some("fourth"));
}

#[test]
fn filter_buttons_highlight_active_filter() {
    let mut ui = ui_with_tasks(&["a"]);
    let active: Vec<String> = ui
        .filter_buttons()
        .into_iter()
        .filter(|button| button.active)
        .map(|button| button.label)
        .collect();
    assert_eq!(active, vec!["1:All Tasks"]);

    press_char(&mut ui, 'p');
    let buttons = ui.filter_buttons();
    assert_eq!(buttons.len(), 5);
    assert!(!buttons[0].active);
    assert!(buttons[3].active);
    assert!(buttons[3].label.contains("priority only"));
    assert!(buttons[4].label.contains("Clear completed (0)"));
}

#[test]
fn instructions_follow_custom_keybindings() {
    let mut keybindings = KeyBindingsConfig::default();
    keybindings.task_list.create_task = vec!["a".to_string()];
    let ui = Ui::with_clipboard(Controller::new(), keybindings, Box::new(NoopClipboard));
    assert!(ui.instructions().contains("a:new"));
}

#[test]
fn draw_renders_rows_details_and_filter_bar() {
    let mut ui = ui_with_tasks(&["Buy milk", "Call Bob"]);
    press_char(&mut ui, 'j');
    press_char(&mut ui, 's');

    let screen = render(&ui, 120, 30);
    assert!(screen.contains("[ ] ☆ Buy milk"));
    assert!(screen.contains("[ ] ★ Call Bob"));
    assert!(screen.contains("All Tasks"));
    assert!(screen.contains("Details"));
    assert!(screen.contains("2 total"));
}

#[test]
fn draw_handles_empty_list_and_open_viewer() {
    let ui = ui_with_tasks(&[]);
    let screen = render(&ui, 100, 24);
    assert!(screen.contains("No tasks yet"));
    assert!(screen.contains("No task selected"));

    let mut ui = ui_with_tasks(&["a"]);
    ui.open_description_viewer();
    let screen = render(&ui, 100, 24);
    assert!(screen.contains("Description: a"));
    assert!(screen.contains("No description."));
}
