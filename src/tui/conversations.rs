// Conversation windows - the TUI side of the ConversationHost seam
//
// The roster asks for a conversation by peer and gets back an opaque handle.
// Windows stay open when their friend is deleted; closing one reports back
// through `Client::conversation_closed` with the same handle.

use crate::roster::{ConversationHandle, ConversationHost};
use chrono::{DateTime, Local};

/// What kind of line a conversation shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Message { from: String },
    Action { from: String },
    /// Local notice ("conversation opened")
    Notice,
}

#[derive(Debug, Clone)]
pub struct ChatLine {
    pub timestamp: DateTime<Local>,
    pub kind: LineKind,
    pub text: String,
}

impl ChatLine {
    pub fn incoming(from: String, text: String, action: bool) -> Self {
        let kind = if action {
            LineKind::Action { from }
        } else {
            LineKind::Message { from }
        };
        Self {
            timestamp: Local::now(),
            kind,
            text,
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            kind: LineKind::Notice,
            text: text.into(),
        }
    }
}

/// One open conversation window
#[derive(Debug)]
pub struct Conversation {
    pub handle: ConversationHandle,
    pub peer_id: u32,
    /// Name at the time the window was opened
    pub title: String,
    pub lines: Vec<ChatLine>,
    /// Lines received while the window was not focused
    pub unread: usize,
}

/// All open conversation windows, in opening order
#[derive(Debug)]
pub struct ConversationManager {
    windows: Vec<Conversation>,
    next_handle: u32,
    active: Option<ConversationHandle>,
    width: usize,
}

impl ConversationManager {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            next_handle: 1,
            active: None,
            width: 80,
        }
    }

    /// Record the friends panel width for the next `render_view`
    pub fn set_display_width(&mut self, width: usize) {
        self.width = width;
    }

    pub fn get(&self, handle: ConversationHandle) -> Option<&Conversation> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    fn get_mut(&mut self, handle: ConversationHandle) -> Option<&mut Conversation> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active.and_then(|h| self.get(h))
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn total_unread(&self) -> usize {
        self.windows.iter().map(|w| w.unread).sum()
    }

    /// Append a line; counts as unread unless the window is focused
    pub fn push_line(&mut self, handle: ConversationHandle, line: ChatLine) {
        let focused = self.active == Some(handle);
        match self.get_mut(handle) {
            Some(window) => {
                window.lines.push(line);
                if !focused {
                    window.unread += 1;
                }
            }
            None => tracing::warn!(?handle, "Line for a conversation that is not open"),
        }
    }

    /// Close a window; focus moves to its neighbor if it was active
    pub fn close(&mut self, handle: ConversationHandle) -> Option<Conversation> {
        let index = self.windows.iter().position(|w| w.handle == handle)?;
        let closed = self.windows.remove(index);

        if self.active == Some(handle) {
            self.active = self
                .windows
                .get(index)
                .or_else(|| self.windows.last())
                .map(|w| w.handle);
            if let Some(next) = self.active {
                self.focus_conversation(next);
            }
        }
        Some(closed)
    }

    /// Focus the window after the active one, wrapping around
    pub fn cycle(&mut self) -> Option<ConversationHandle> {
        if self.windows.is_empty() {
            return None;
        }
        let next = match self.active.and_then(|h| self.windows.iter().position(|w| w.handle == h))
        {
            Some(i) => (i + 1) % self.windows.len(),
            None => 0,
        };
        let handle = self.windows[next].handle;
        self.focus_conversation(handle);
        Some(handle)
    }
}

impl Default for ConversationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationHost for ConversationManager {
    fn open_conversation(&mut self, peer_id: u32, name: &str) -> ConversationHandle {
        let handle = ConversationHandle(self.next_handle);
        self.next_handle += 1;

        self.windows.push(Conversation {
            handle,
            peer_id,
            title: name.to_string(),
            lines: vec![ChatLine::notice(format!("Conversation with {name} opened"))],
            unread: 0,
        });
        tracing::debug!(peer_id, ?handle, "Conversation opened");
        handle
    }

    fn focus_conversation(&mut self, handle: ConversationHandle) {
        if let Some(window) = self.get_mut(handle) {
            window.unread = 0;
            self.active = Some(handle);
        }
    }

    fn display_width(&self) -> usize {
        self.width
    }
}
