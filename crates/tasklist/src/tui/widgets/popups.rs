use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tasklist_core::Task;

use super::super::constants::{
    DESCRIPTION_VIEWER_HEIGHT_PERCENT, DESCRIPTION_VIEWER_MIN_HEIGHT, DESCRIPTION_VIEWER_MIN_WIDTH,
    DESCRIPTION_VIEWER_WIDTH_PERCENT, POPUP_TITLE_MAX_CHARS,
};
use super::super::view::Ui;
use super::util::truncate_with_ellipsis;

/// Centered popup area clamped to the frame.
pub(in crate::tui) fn centered_popup(area: Rect) -> Rect {
    let popup_width = percent_of(area.width, DESCRIPTION_VIEWER_WIDTH_PERCENT)
        .max(DESCRIPTION_VIEWER_MIN_WIDTH)
        .min(area.width);
    let popup_height = percent_of(area.height, DESCRIPTION_VIEWER_HEIGHT_PERCENT)
        .max(DESCRIPTION_VIEWER_MIN_HEIGHT)
        .min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

fn percent_of(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent) / 100;
    u16::try_from(scaled).unwrap_or(length)
}

fn description_paragraph(task: Option<&Task>) -> Paragraph<'_> {
    match task.and_then(|task| task.description.as_deref()) {
        Some(description) => {
            let lines: Vec<Line<'_>> = description.lines().map(Line::from).collect();
            Paragraph::new(lines).wrap(Wrap { trim: false })
        }
        None => Paragraph::new("No description.").style(Style::default().fg(Color::DarkGray)),
    }
}

impl Ui {
    /// Largest scroll offset that still leaves text in the viewer.
    ///
    /// Before the first draw this falls back to the raw line count.
    pub(in crate::tui) fn description_viewer_max_scroll(&self) -> u16 {
        let Some(viewer) = &self.description_viewer else {
            return 0;
        };
        let task = self.controller.tasks().get(viewer.task_id);
        let area = viewer.inner_area.get();
        let rendered = if area.width == 0 {
            task.and_then(|task| task.description.as_deref())
                .map_or(0, |description| description.lines().count())
                .saturating_sub(1)
        } else {
            description_paragraph(task)
                .line_count(area.width)
                .saturating_sub(usize::from(area.height))
        };
        u16::try_from(rendered).unwrap_or(u16::MAX)
    }

    pub(in crate::tui) fn draw_description_viewer_popup(&self, f: &mut Frame<'_>) {
        let Some(viewer) = &self.description_viewer else {
            return;
        };
        let popup_area = centered_popup(f.area());
        let task = self.controller.tasks().get(viewer.task_id);

        let task_title = task.map_or("unknown", |task| task.title());
        let block = Block::default()
            .title(format!(
                "Description: {}",
                truncate_with_ellipsis(task_title, POPUP_TITLE_MAX_CHARS)
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(Clear, popup_area);
        f.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);
        viewer.inner_area.set(inner);

        // A resize can shrink the limit below the stored offset.
        let scroll = viewer.scroll_offset.min(self.description_viewer_max_scroll());
        f.render_widget(description_paragraph(task).scroll((scroll, 0)), inner);
    }
}
