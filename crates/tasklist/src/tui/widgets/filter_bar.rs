use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tasklist_core::{PriorityFilter, StatusFilter};

use super::super::view::Ui;
use crate::config::{Action, ViewType};

/// One entry of the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(in crate::tui) struct FilterButton {
    pub(in crate::tui) label: String,
    pub(in crate::tui) active: bool,
}

impl Ui {
    /// Filter bar entries in display order: the three status filters, the
    /// priority filter and the clear action.
    pub(in crate::tui) fn filter_buttons(&self) -> Vec<FilterButton> {
        let filter = self.controller.filter();
        let priority = filter.priority();
        let key = |action: Action| self.keybindings.key_label(ViewType::TaskList, action);

        let mut buttons: Vec<FilterButton> = [
            (StatusFilter::All, Action::FilterAll),
            (StatusFilter::Active, Action::FilterActive),
            (StatusFilter::Completed, Action::FilterCompleted),
        ]
        .into_iter()
        .map(|(status, action)| FilterButton {
            label: format!("{}:{}", key(action), status.label()),
            active: !priority.is_set() && filter.status() == status,
        })
        .collect();

        let priority_label = match priority {
            PriorityFilter::Unset => "Priority".to_string(),
            other => format!("Priority: {other}"),
        };
        buttons.push(FilterButton {
            label: format!("{}:{priority_label}", key(Action::CyclePriorityFilter)),
            active: priority.is_set(),
        });

        let completed = self.controller.tasks().counts().completed;
        buttons.push(FilterButton {
            label: format!("{}:Clear completed ({completed})", key(Action::ClearCompleted)),
            active: false,
        });
        buttons
    }

    pub(in crate::tui) fn draw_filter_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = Vec::new();
        for (idx, button) in self.filter_buttons().into_iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if button.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {} ", button.label), style));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).block(Block::default().title("Filter").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
