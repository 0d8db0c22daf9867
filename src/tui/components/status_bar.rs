// Status bar component
//
// Uptime, the selected friend's presence, theme and the focused panel's keys.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let selected = match app.client.roster.selected_slot() {
        Some(friend) if friend.online => {
            format!("{} ({})", friend.name, friend.presence.label())
        }
        Some(friend) => format!("{} (offline)", friend.name),
        None => "nobody selected".to_string(),
    };

    let text = format!(
        " {} │ {} │ theme: {} │ {}  t:theme  l:logs  q:quit",
        app.uptime(),
        selected,
        app.theme.name,
        app.focus_hint(),
    );

    let status = Paragraph::new(text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
