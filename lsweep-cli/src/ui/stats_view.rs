use std::time::{Duration, SystemTime};

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use lsweep_core::{SessionSnapshot, SessionStats, format_elapsed};

use super::theme::Theme;

/// Overlay showing lifetime and current-session statistics
pub struct StatsView<'a> {
    stats: &'a SessionStats,
    session: Option<&'a SessionSnapshot>,
    theme: &'a Theme,
}

impl<'a> StatsView<'a> {
    pub fn new(
        stats: &'a SessionStats,
        session: Option<&'a SessionSnapshot>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            stats,
            session,
            theme,
        }
    }
}

impl Widget for StatsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 46.min(area.width.saturating_sub(4));
        let height = 13.min(area.height.saturating_sub(4));
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let stats_area = Rect::new(x, y, width, height);

        Clear.render(stats_area, buf);

        let block = Block::default()
            .title(" Statistics ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.blue))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(stats_area);
        block.render(stats_area, buf);

        let label_style = Style::default().fg(self.theme.fg_dim);
        let value_style = Style::default().fg(self.theme.fg);
        let section_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);

        let average = if self.stats.total_deleted > 0 {
            format!("{:.1}s per item", self.stats.average_delete_ms / 1000.0)
        } else {
            "n/a".to_string()
        };
        let last_used = match self.stats.last_used {
            Some(t) => match SystemTime::now().duration_since(t) {
                Ok(elapsed) if elapsed > Duration::from_secs(5) => {
                    format!("{} ago", format_elapsed(elapsed))
                }
                _ => "just now".to_string(),
            },
            None => "never".to_string(),
        };

        let mut lines: Vec<(String, String, bool)> = vec![
            ("Lifetime".to_string(), String::new(), true),
            ("Sessions".to_string(), self.stats.sessions_count.to_string(), false),
            (
                "Items deleted".to_string(),
                self.stats.total_deleted.to_string(),
                false,
            ),
            (
                "Time in bulk mode".to_string(),
                format_elapsed(Duration::from_millis(self.stats.total_session_ms)),
                false,
            ),
            ("Average delete".to_string(), average, false),
            ("Last used".to_string(), last_used, false),
        ];

        if let Some(session) = self.session {
            lines.push((String::new(), String::new(), false));
            lines.push(("This session".to_string(), String::new(), true));
            lines.push((
                "Deleted".to_string(),
                session.deleted_in_session.to_string(),
                false,
            ));
            lines.push((
                "Errors".to_string(),
                session.errors_in_session.to_string(),
                false,
            ));
            lines.push((
                "Elapsed".to_string(),
                format_elapsed(session.elapsed()),
                false,
            ));
        }

        for (i, (label, value, is_section)) in lines.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }
            let y = inner.y + i as u16;
            if *is_section {
                buf.set_string(inner.x, y, label, section_style);
            } else if !label.is_empty() {
                buf.set_string(inner.x, y, format!("{label:<20}"), label_style);
                buf.set_string(inner.x + 20, y, value, value_style);
            }
        }
    }
}
