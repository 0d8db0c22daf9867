// Title bar component
//
// App name plus a one-line summary of the friend list and open chats.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let roster = &app.client.roster;
    let online = roster.active_slots().filter(|(_, s)| s.online).count();

    let mut title = format!(
        " Roster ── {} friends, {} online ── {}/{} slots",
        roster.len(),
        online,
        roster.count(),
        roster.capacity()
    );

    let chats = app.conversations.len();
    if chats > 0 {
        title.push_str(&format!(" ── {chats} chats"));
        let unread = app.conversations.total_unread();
        if unread > 0 {
            title.push_str(&format!(" ({unread} unread)"));
        }
    }

    let widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.title)),
        );

    f.render_widget(widget, area);
}
