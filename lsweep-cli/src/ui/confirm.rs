use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use lsweep_core::DeletionScope;

use super::theme::Theme;

/// Delete confirmation dialog widget
pub struct ConfirmDeleteView<'a> {
    scope: DeletionScope,
    count: usize,
    theme: &'a Theme,
}

impl<'a> ConfirmDeleteView<'a> {
    pub fn new(scope: DeletionScope, count: usize, theme: &'a Theme) -> Self {
        Self {
            scope,
            count,
            theme,
        }
    }
}

impl Widget for ConfirmDeleteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 52.min(area.width.saturating_sub(4));
        let height = 8.min(area.height.saturating_sub(4));
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let dialog_area = Rect::new(x, y, width, height);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Delete? ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.red))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let text_style = Style::default().fg(self.theme.fg);
        let warn_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);

        let what = match self.scope {
            DeletionScope::Selected => format!(
                "Delete {} selected item{}?",
                self.count,
                if self.count == 1 { "" } else { "s" }
            ),
            DeletionScope::AllVisible => format!(
                "Delete ALL {} visible item{}?",
                self.count,
                if self.count == 1 { "" } else { "s" }
            ),
        };
        buf.set_string(inner.x, inner.y, &what, warn_style);
        buf.set_string(
            inner.x,
            inner.y + 1,
            "Items are removed one at a time; Esc cancels mid-run.",
            text_style,
        );

        // Action hints at bottom
        let hints_y = inner.y + inner.height.saturating_sub(1);
        buf.set_string(inner.x, hints_y, "[y]", key_style);
        buf.set_string(inner.x + 4, hints_y, "Yes, delete", text_style);
        buf.set_string(inner.x + 18, hints_y, "[n]", key_style);
        buf.set_string(inner.x + 22, hints_y, "Cancel", text_style);
    }
}
