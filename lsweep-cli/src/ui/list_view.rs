use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use lsweep_core::{ListItem, SweepEngine};

use super::theme::Theme;

/// Main list view widget
pub struct ListView<'a> {
    engine: &'a SweepEngine,
    items: &'a [&'a ListItem],
    cursor: usize,
    scroll_offset: usize,
    theme: &'a Theme,
}

impl<'a> ListView<'a> {
    pub fn new(
        engine: &'a SweepEngine,
        items: &'a [&'a ListItem],
        cursor: usize,
        scroll_offset: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            engine,
            items,
            cursor,
            scroll_offset,
            theme,
        }
    }
}

impl Widget for ListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 30 {
            return;
        }

        if self.items.is_empty() {
            let message = if self.engine.filter_active() {
                "No items match the current filters"
            } else {
                "The list is empty"
            };
            buf.set_string(
                area.x + 2,
                area.y + 1,
                message,
                Style::default().fg(self.theme.fg_muted),
            );
            return;
        }

        let id_width = 16usize;
        let pos_width = 5usize;
        let mark_width = 4usize;
        let title_width = (area.width as usize)
            .saturating_sub(id_width + pos_width + mark_width + 4);

        for (i, item) in self
            .items
            .iter()
            .skip(self.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            let index = i + self.scroll_offset;
            let is_cursor = index == self.cursor;
            let is_selected = self.engine.is_selected(&item.id);

            // Three-state: cursor (selection_bg), selected (bg_highlight), normal
            let row_style = if is_cursor {
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.selection_fg)
            } else if is_selected {
                Style::default()
                    .bg(self.theme.bg_highlight)
                    .fg(self.theme.fg)
            } else {
                Style::default().fg(self.theme.fg)
            };

            // Clear the row
            for x in 0..area.width {
                buf.set_string(area.x + x, y, " ", row_style);
            }

            let mut x = area.x + 1;

            // Selection marker
            let mark = if is_selected { "[x]" } else { "[ ]" };
            let mark_style = if is_cursor {
                row_style
            } else if is_selected {
                Style::default()
                    .fg(self.theme.green)
                    .bg(self.theme.bg_highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.fg_muted)
            };
            buf.set_string(x, y, mark, mark_style);
            x += mark_width as u16;

            // Render position
            let pos_str = format!("{:>4}", item.position);
            let pos_style = if is_cursor {
                row_style
            } else {
                row_style.patch(Style::default().fg(self.theme.fg_dim))
            };
            buf.set_string(x, y, &pos_str, pos_style);
            x += pos_width as u16;

            // Title
            let display_title = if item.title.chars().count() > title_width {
                let truncated: String =
                    item.title.chars().take(title_width.saturating_sub(1)).collect();
                format!("{truncated}…")
            } else {
                item.title.clone()
            };
            let title_style = if is_cursor {
                row_style.add_modifier(Modifier::BOLD)
            } else {
                row_style
            };
            buf.set_string(x, y, &display_title, title_style);

            // Item id (right-aligned)
            let id_str: String = item.id.as_str().chars().take(id_width).collect();
            let id_x = area.x + area.width.saturating_sub(id_str.len() as u16 + 1);
            let id_style = if is_cursor {
                row_style
            } else {
                row_style.patch(Style::default().fg(self.theme.fg_muted))
            };
            buf.set_string(id_x, y, &id_str, id_style);
        }
    }
}
