use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::JobView;

use super::progress_bar::progress_bar;
use super::theme::Theme;

/// Progress overlay shown while a deletion job runs
pub struct DeleteProgressView<'a> {
    job: &'a JobView,
    theme: &'a Theme,
}

impl<'a> DeleteProgressView<'a> {
    pub fn new(job: &'a JobView, theme: &'a Theme) -> Self {
        Self { job, theme }
    }
}

impl Widget for DeleteProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 50.min(area.width.saturating_sub(4));
        let height = 10.min(area.height.saturating_sub(4));
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let dialog_area = Rect::new(x, y, width, height);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Deleting... ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.yellow))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let text_style = Style::default().fg(self.theme.fg);
        let dim_style = Style::default().fg(self.theme.fg_dim);

        let mut row = inner.y;

        // Progress count
        let count_str = format!(
            "{} / {} processed",
            self.job.progress.completed, self.job.progress.total
        );
        buf.set_string(inner.x, row, &count_str, text_style);
        row += 1;

        // Progress bar
        let bar_width = (inner.width as usize).saturating_sub(2);
        let bar = progress_bar(self.job.progress.percentage(), bar_width);
        buf.set_string(inner.x, row, &bar, Style::default().fg(self.theme.green));
        row += 2;

        // Deleted count
        let deleted_str = format!("Deleted: {}", self.job.deleted);
        buf.set_string(inner.x, row, &deleted_str, text_style);
        row += 1;

        // Failures
        if self.job.errors > 0 {
            let fail_str = format!("{} failed", self.job.errors);
            buf.set_string(
                inner.x,
                row,
                &fail_str,
                Style::default()
                    .fg(self.theme.red)
                    .add_modifier(Modifier::BOLD),
            );
            row += 1;
        }

        // Hint at bottom
        let hint_y = row.max(inner.y + inner.height.saturating_sub(1));
        buf.set_string(
            inner.x,
            hint_y,
            "Press Esc to cancel after the current item",
            dim_style,
        );
    }
}
