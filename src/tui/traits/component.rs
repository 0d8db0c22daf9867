//! Core component trait - the foundation of the UI system

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Immutable context passed to components during rendering
///
/// Components only see what they need; no access to mutable app state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Whether the component being rendered has input focus
    pub focused: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focused: bool) -> Self {
        Self { theme, focused }
    }

    /// Border color for a panel: its identity color when focused
    pub fn border_color(&self, focus_color: ratatui::style::Color) -> ratatui::style::Color {
        if self.focused {
            focus_color
        } else {
            self.theme.border
        }
    }
}

/// Anything that can draw itself into a rectangle
pub trait Component {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
