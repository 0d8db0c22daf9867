//! Logs panel component
//!
//! Displays recent entries from the shared `LogBuffer` with color-coded
//! levels. Follows new entries until the user scrolls up.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// How many entries the panel keeps around for scrolling back
const SCROLLBACK: usize = 500;

#[derive(Default)]
pub struct LogsPanel {
    scroll: ScrollState,
    entries: Vec<LogEntry>,
    /// Entries held by the buffer, which may exceed what is kept here
    total: usize,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull the latest entries; `area` includes borders
    pub fn sync(&mut self, buffer: &LogBuffer, area: Rect) {
        self.entries = buffer.recent(SCROLLBACK);
        self.total = buffer.len();
        self.scroll
            .update_dimensions(self.entries.len(), area.height.saturating_sub(2) as usize);
    }
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.short_target(),
        entry.message
    )
}

impl Component for LogsPanel {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self
            .entries
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|entry| {
                let mut style = Style::default().fg(ctx.theme.log_level(entry.level));
                if entry.level == LogLevel::Error {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ListItem::new(format_log_entry(entry)).style(style)
            })
            .collect();

        let title = if self.scroll.auto_follow {
            format!(" Logs ({}) ", self.total)
        } else {
            format!(" Logs ({}) [scroll] ", self.total)
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ctx.border_color(ctx.theme.highlight)))
                .title(title),
        );

        f.render_widget(list, area);
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll.scroll_down(),
            KeyCode::PageUp => self.scroll.page_up(),
            KeyCode::PageDown => self.scroll.page_down(),
            KeyCode::Home => self.scroll.scroll_to_top(),
            KeyCode::End => self.scroll.scroll_to_bottom(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  End:follow  Tab:friends")
    }
}
