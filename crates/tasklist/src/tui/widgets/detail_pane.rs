use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tasklist_core::Task;

use super::super::view::Ui;

impl Ui {
    pub(in crate::tui) fn draw_task_details(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Details").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let paragraph = self.selected_task().map_or_else(
            || Paragraph::new("No task selected").style(Style::default().fg(Color::DarkGray)),
            |task| Paragraph::new(detail_lines(task)),
        );
        f.render_widget(paragraph.wrap(Wrap { trim: false }), inner);
    }
}

pub(in crate::tui) fn detail_lines(task: &Task) -> Vec<Line<'_>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            task.title(),
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
        )),
        Line::from(format!("ID: {}", task.id().short())),
        Line::from(format!(
            "Status: {}",
            if task.completed { "completed" } else { "active" }
        )),
    ];
    if task.priority {
        lines.push(Line::from(Span::styled(
            "Priority: ★",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(due_at) = task.due_at {
        lines.push(Line::from(format!("Due: {due_at}")));
    }
    if !task.attachments.is_empty() {
        lines.push(Line::from(Span::styled("Attachments:", label)));
        for attachment in &task.attachments {
            lines.push(Line::from(format!(
                "  {} ({})",
                attachment.display_name(),
                attachment
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Description:", label)));
    match task.description.as_deref() {
        Some(description) => lines.extend(description.lines().map(|line| Line::from(line.to_owned()))),
        None => lines.push(Line::from(Span::styled(
            "No description.",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines
}
