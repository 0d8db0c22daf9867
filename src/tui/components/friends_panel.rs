//! Friends panel - the friend list itself
//!
//! Rows come from `Roster::render_view`, which has already cut status
//! messages to the panel width; this component only adds color. It also
//! remembers where each friend landed on screen so mouse clicks can select.

use crate::roster::{DisplayRow, FriendRow};
use crate::tui::traits::{Component, RenderContext};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Usage hint shown above a non-empty list
pub const HINT_LINES: [&str; 3] = [
    " Open chat with up/down keys and enter.",
    " Delete friends with the backspace key.",
    "",
];

#[derive(Debug, Default)]
pub struct FriendsPanel {
    rows: Vec<DisplayRow>,
    /// Inner area (inside borders) from the last sync
    inner: Rect,
}

impl FriendsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width available to a row inside the borders
    pub fn inner_width(area: Rect) -> usize {
        area.width.saturating_sub(2) as usize
    }

    /// Take this frame's rows; `area` is the full panel including borders
    pub fn sync(&mut self, rows: Vec<DisplayRow>, area: Rect) {
        self.rows = rows;
        self.inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
    }

    /// Hint lines drawn above the rows; none when only the notice is shown
    fn hints(&self) -> &'static [&'static str] {
        let has_friends = self
            .rows
            .iter()
            .any(|row| matches!(row, DisplayRow::Friend(_)));
        if has_friends {
            &HINT_LINES
        } else {
            &[]
        }
    }

    /// Slot of the friend drawn at screen position (`column`, `row`)
    pub fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = self.inner;
        if column < inner.x || column >= inner.x + inner.width {
            return None;
        }
        let line = row.checked_sub(inner.y)? as usize;
        if line >= inner.height as usize {
            return None;
        }
        match self.rows.get(line.checked_sub(self.hints().len())?)? {
            DisplayRow::Friend(friend) => Some(friend.slot),
            DisplayRow::Notice(_) => None,
        }
    }

    fn friend_line<'a>(friend: &'a FriendRow, ctx: &RenderContext) -> Line<'a> {
        let theme = ctx.theme;
        let marker_style = Style::default()
            .fg(theme.selection)
            .add_modifier(Modifier::BOLD);
        let name_style = if friend.selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(friend.marker(), marker_style),
            Span::styled("[O]", Style::default().fg(theme.glyph(friend.glyph))),
            Span::styled(friend.name.as_str(), name_style),
        ];
        if let Some(status) = &friend.status {
            spans.push(Span::styled(
                format!(" ({status})"),
                Style::default().fg(theme.status_message),
            ));
        }
        Line::from(spans)
    }
}

impl Component for FriendsPanel {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines: Vec<Line> = self
            .hints()
            .iter()
            .map(|hint| Line::styled(*hint, Style::default().fg(ctx.theme.hint)))
            .collect();

        lines.extend(self.rows.iter().map(|row| match row {
            DisplayRow::Notice(text) => Line::from(format!(" {text}")),
            DisplayRow::Friend(friend) => Self::friend_line(friend, ctx),
        }));

        let friends = self
            .rows
            .iter()
            .filter(|r| matches!(r, DisplayRow::Friend(_)))
            .count();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ctx.border_color(ctx.theme.selection)))
            .title(format!(" Friends ({friends}) "));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Glyph, Presence};

    fn friend(slot: usize) -> DisplayRow {
        DisplayRow::Friend(FriendRow {
            slot,
            selected: false,
            glyph: Glyph::Online(Presence::None),
            name: format!("peer-{slot}"),
            status: None,
        })
    }

    #[test]
    fn test_slot_at_skips_hints_and_borders() {
        let mut panel = FriendsPanel::new();
        // Slots 0 and 2 are active, slot 1 is a hole
        panel.sync(vec![friend(0), friend(2)], Rect::new(0, 0, 40, 20));

        let first_row = 1 + HINT_LINES.len() as u16;
        assert_eq!(panel.slot_at(5, first_row), Some(0));
        assert_eq!(panel.slot_at(5, first_row + 1), Some(2));
        assert_eq!(panel.slot_at(5, first_row + 2), None);
        assert_eq!(panel.slot_at(5, 1), None);
        assert_eq!(panel.slot_at(0, first_row), None);
        assert_eq!(panel.slot_at(39, first_row), None);
    }

    #[test]
    fn test_notice_is_not_clickable() {
        let mut panel = FriendsPanel::new();
        panel.sync(
            vec![DisplayRow::Notice(crate::roster::EMPTY_NOTICE)],
            Rect::new(0, 0, 40, 20),
        );
        assert_eq!(panel.slot_at(5, 1), None);
    }

    #[test]
    fn test_hints_only_above_friends() {
        let mut panel = FriendsPanel::new();
        panel.sync(
            vec![DisplayRow::Notice(crate::roster::EMPTY_NOTICE)],
            Rect::new(0, 0, 40, 20),
        );
        assert!(panel.hints().is_empty());

        panel.sync(vec![friend(0)], Rect::new(0, 0, 40, 20));
        assert_eq!(panel.hints()[0], " Open chat with up/down keys and enter.");
        assert_eq!(panel.hints()[1], " Delete friends with the backspace key.");
        assert_eq!(panel.slot_at(5, 1 + HINT_LINES.len() as u16), Some(0));
    }

    #[test]
    fn test_inner_width() {
        assert_eq!(FriendsPanel::inner_width(Rect::new(0, 0, 40, 5)), 38);
        assert_eq!(FriendsPanel::inner_width(Rect::new(0, 0, 1, 5)), 0);
    }
}
