//! Interactive trait for components that handle keyboard input
//!
//! The App routes keys to the focused component first; anything it leaves
//! alone bubbles back up for view-level handling.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Components that take keyboard input
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hint for the status bar while this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
