use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppState;

use super::theme::Theme;

/// Header widget showing title, bulk-mode state, and item counts
pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 1 {
            return;
        }

        // Title
        let title = "LSWEEP";
        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, title, title_style);

        // Separator
        buf.set_string(
            area.x + 8,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        // Bulk-mode indicator
        let (mode_label, mode_style) = if self.state.engine.is_enabled() {
            (
                "BULK ON",
                Style::default()
                    .fg(self.theme.green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("bulk off", Style::default().fg(self.theme.fg_muted))
        };
        buf.set_string(area.x + 10, area.y, mode_label, mode_style);

        // Counts (right-aligned)
        let status = self.state.engine.status();
        let visible = self.state.engine.visible_ids().len();
        let counts = if self.state.engine.filter_active() {
            format!(
                "{} of {} visible, {} selected",
                visible, status.total_items, status.selected
            )
        } else {
            format!("{} items, {} selected", status.total_items, status.selected)
        };

        let counts_x = area.x + area.width.saturating_sub(counts.len() as u16 + 2);
        buf.set_string(
            counts_x,
            area.y,
            &counts,
            Style::default().fg(self.theme.fg_dim),
        );
    }
}
