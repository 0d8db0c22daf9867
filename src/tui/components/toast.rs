//! Toast notifications
//!
//! One-line notices drawn over the bottom-right corner of the screen.
//! Save failures linger longer than routine notices and use the error color.

use crate::theme::Theme;
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// What the notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Friend added or deleted, theme switched
    Notice,
    /// Something the user has to act on, like an unsaved friend list
    Failure,
}

impl ToastKind {
    fn lifetime(self) -> Duration {
        match self {
            ToastKind::Notice => Duration::from_secs(2),
            ToastKind::Failure => Duration::from_secs(5),
        }
    }
}

pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    pub fn notice(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Notice)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Failure)
    }

    fn with_kind(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.kind.lifetime()
    }

    /// Box size for `screen`: message plus border and a space each side
    fn area_in(&self, screen: Rect) -> Rect {
        let width = (display_width(&self.message) as u16 + 4).min(screen.width.saturating_sub(4));
        let x = screen.right().saturating_sub(width + 2);
        let y = screen.bottom().saturating_sub(5);
        Rect::new(x, y, width, 3)
    }

    pub fn render(&self, f: &mut Frame, screen: Rect, theme: &Theme) {
        let area = self.area_in(screen);
        let color = match self.kind {
            ToastKind::Notice => theme.highlight,
            ToastKind::Failure => theme.log_error,
        };

        let text = truncate_to_width(&self.message, area.width.saturating_sub(4) as usize);
        let widget = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

        f.render_widget(Clear, area);
        f.render_widget(widget, area);
    }
}
