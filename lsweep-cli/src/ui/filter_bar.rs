use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::{AppMode, AppState, FilterField};

use super::theme::Theme;

/// Single-line widget showing both filter fields and which one is focused
pub struct FilterBar<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn field_style(&self, field: FilterField, has_value: bool) -> Style {
        if self.state.mode == AppMode::EditFilter(field) {
            Style::default()
                .fg(self.theme.yellow)
                .add_modifier(Modifier::BOLD)
        } else if has_value {
            Style::default().fg(self.theme.fg)
        } else {
            Style::default().fg(self.theme.fg_muted)
        }
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let label_style = Style::default().fg(self.theme.fg_dim);
        let mut x = area.x + 1;

        buf.set_string(x, area.y, "Title:", label_style);
        x += 7;

        let editing_title = self.state.mode == AppMode::EditFilter(FilterField::Title);
        let title_text = if self.state.title_input.is_empty() && !editing_title {
            "(any)".to_string()
        } else if editing_title {
            format!("{}▎", self.state.title_input)
        } else {
            self.state.title_input.clone()
        };
        buf.set_string(
            x,
            area.y,
            &title_text,
            self.field_style(FilterField::Title, !self.state.title_input.is_empty()),
        );
        x += title_text.chars().count() as u16 + 3;

        buf.set_string(x, area.y, "Range:", label_style);
        x += 7;

        let editing_range = self.state.mode == AppMode::EditFilter(FilterField::Range);
        let range_text = if self.state.range_input.is_empty() && !editing_range {
            "(all)".to_string()
        } else if editing_range {
            format!("{}▎", self.state.range_input)
        } else {
            self.state.range_input.clone()
        };
        buf.set_string(
            x,
            area.y,
            &range_text,
            self.field_style(FilterField::Range, !self.state.range_input.is_empty()),
        );
        x += range_text.chars().count() as u16 + 3;

        if self.state.engine.filter_active() {
            let hidden = self.state.engine.hidden_count();
            if hidden > 0 {
                buf.set_string(
                    x,
                    area.y,
                    format!("({hidden} hidden)"),
                    Style::default().fg(self.theme.purple),
                );
            }
        }
    }
}
