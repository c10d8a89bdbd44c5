use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppMode;

use super::theme::Theme;

/// Footer widget showing keyboard hints and the latest engine notice
pub struct Footer<'a> {
    mode: AppMode,
    theme: &'a Theme,
    notice: Option<&'a str>,
}

impl<'a> Footer<'a> {
    pub fn new(mode: AppMode, theme: &'a Theme, notice: Option<&'a str>) -> Self {
        Self {
            mode,
            theme,
            notice,
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let hints: Vec<(&str, &str)> = match self.mode {
            AppMode::Browsing => vec![
                ("b", "Bulk mode"),
                ("Space", "Select"),
                ("a/x/i", "All/None/Invert"),
                ("/", "Title"),
                ("r", "Range"),
                ("d", "Delete"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
            AppMode::Help => vec![("Esc", "Close help"), ("q", "Quit")],
            AppMode::Stats => vec![("Esc", "Close stats"), ("q", "Quit")],
            AppMode::EditFilter(_) => vec![("Enter", "Apply"), ("Esc", "Cancel")],
            AppMode::ConfirmDelete => vec![("y", "Yes"), ("n", "Cancel")],
            AppMode::Deleting => vec![("Esc", "Cancel"), ("q", "Quit")],
        };

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            buf.set_string(x, area.y, *key, key_style);
            x += key.len() as u16 + 1;

            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.len() as u16;

            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }

        // Latest notice on the right
        if let Some(notice) = self.notice {
            let max_len = (area.width as usize).saturating_sub(x as usize + 4);
            let display: String = notice.chars().take(max_len).collect();
            if !display.is_empty() {
                let notice_x = area.x + area.width - display.chars().count() as u16 - 1;
                if notice_x > x + 2 {
                    buf.set_string(
                        notice_x,
                        area.y,
                        &display,
                        Style::default().fg(self.theme.teal),
                    );
                }
            }
        }
    }
}
