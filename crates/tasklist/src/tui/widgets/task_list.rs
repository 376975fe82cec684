use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use tasklist_core::Task;

use super::super::constants::TASK_LIST_HIGHLIGHT_SYMBOL;
use super::super::view::Ui;
use super::util::{checkbox, priority_marker};

impl Ui {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let tasks = self.controller.tasks();
        let items = if self.visibility.has_visible_tasks() {
            self.visibility
                .visible_tasks(tasks.as_slice())
                .map(|task| ListItem::new(task_row(task)))
                .collect()
        } else {
            let message = if tasks.is_empty() {
                "No tasks yet"
            } else {
                "No tasks match the filter"
            };
            vec![ListItem::new(Line::from(message))]
        };

        let title = format!("Tasks ({}/{})", self.visibility.len(), tasks.len());
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if self.visibility.has_visible_tasks() {
            state.select(Some(self.visibility.selected_index()));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

pub(in crate::tui) fn task_row(task: &Task) -> Line<'_> {
    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let star_style = if task.priority {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::raw(checkbox(task.completed)),
        Span::raw(" "),
        Span::styled(priority_marker(task.priority), star_style),
        Span::raw(" "),
        Span::styled(task.title(), title_style),
    ];
    if let Some(due_at) = task.due_at {
        spans.push(Span::styled(
            format!(" ({due_at})"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
