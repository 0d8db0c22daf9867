//! Chat panel - shows the focused conversation window

use crate::tui::conversations::{ChatLine, Conversation, LineKind};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Default)]
pub struct ChatPanel {
    scroll: ScrollState,
    title: String,
    lines: Vec<ChatLine>,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the conversation for this frame; `area` includes borders
    pub fn sync(&mut self, conversation: Option<&Conversation>, area: Rect) {
        match conversation {
            Some(conversation) => {
                self.title = format!(" Chat with {} ", conversation.title);
                self.lines.clone_from(&conversation.lines);
            }
            None => {
                self.title = " Chat ".to_string();
                self.lines.clear();
            }
        }
        self.scroll
            .update_dimensions(self.lines.len(), area.height.saturating_sub(2) as usize);
    }

    /// A different window got focus; start at its bottom
    pub fn reset(&mut self) {
        self.scroll.scroll_to_bottom();
    }

    fn format_line<'a>(line: &'a ChatLine, ctx: &RenderContext) -> Line<'a> {
        let time = Span::styled(
            line.timestamp.format("[%H:%M] ").to_string(),
            Style::default().fg(ctx.theme.hint),
        );
        match &line.kind {
            LineKind::Message { from } => Line::from(vec![
                time,
                Span::styled(
                    format!("{from}: "),
                    Style::default()
                        .fg(ctx.theme.selection)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(line.text.as_str()),
            ]),
            LineKind::Action { from } => Line::from(vec![
                time,
                Span::styled(
                    format!("* {from} {}", line.text),
                    Style::default().fg(ctx.theme.action),
                ),
            ]),
            LineKind::Notice => Line::from(vec![
                time,
                Span::styled(
                    line.text.as_str(),
                    Style::default()
                        .fg(ctx.theme.hint)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]),
        }
    }
}

impl Component for ChatPanel {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (start, end) = self.scroll.visible_range();
        let lines: Vec<Line> = self
            .lines
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|line| Self::format_line(line, ctx))
            .collect();

        let title = if self.scroll.auto_follow {
            self.title.clone()
        } else {
            format!("{}[scroll] ", self.title)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ctx.border_color(ctx.theme.selection)))
            .title(title);

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Interactive for ChatPanel {
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
        Some("↑↓:scroll  Tab:next chat  c:close  Esc:friends")
    }
}
