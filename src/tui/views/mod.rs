// Views module - screen-level rendering
//
// Shell layout, top to bottom: title bar, content, logs panel (optional),
// status bar. The content area shows the friend list or the focused chat.

use super::app::{App, Focus, View};
use super::components::{status_bar, title_bar, FriendsPanel};
use super::traits::{Component, RenderContext};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(8)];
    if app.show_logs {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    title_bar::render(f, chunks[0], app);

    let content = chunks[1];
    match app.view {
        View::Friends => {
            app.set_friends_width(FriendsPanel::inner_width(content));
            let rows = app.friends_rows();
            app.friends_panel.sync(rows, content);

            let ctx = RenderContext::new(&app.theme, app.focus == Focus::Friends);
            app.friends_panel.render(f, content, &ctx);
        }
        View::Chat => {
            app.chat_panel.sync(app.conversations.active(), content);
            let ctx = RenderContext::new(&app.theme, true);
            app.chat_panel.render(f, content, &ctx);
        }
    }

    if app.show_logs {
        let area = chunks[2];
        app.logs_panel.sync(&app.log_buffer, area);
        let focused = app.view == View::Friends && app.focus == Focus::Logs;
        let ctx = RenderContext::new(&app.theme, focused);
        app.logs_panel.render(f, area, &ctx);
    }

    status_bar::render(f, chunks[chunks.len() - 1], app);

    // Toast on top of everything
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
    app.clear_expired_toast();
}
