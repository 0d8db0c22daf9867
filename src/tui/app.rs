// TUI application state
//
// App owns the client (and through it the roster) plus the conversation
// windows, and is the only thing that mutates them: peer events and key
// presses both arrive here on the UI task.

use super::components::{ChatPanel, FriendsPanel, LogsPanel, Toast};
use super::conversations::{ChatLine, ConversationManager};
use super::input::InputHandler;
use super::traits::{Handled, Interactive};
use crate::client::{Client, Outcome};
use crate::events::PeerEvent;
use crate::logging::LogBuffer;
use crate::roster::{Direction, DisplayRow, RosterError};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Which screen fills the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Friends,
    Chat,
}

/// Which panel receives navigation keys in the friends view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Friends,
    Logs,
}

pub struct App {
    pub client: Client,
    pub conversations: ConversationManager,

    pub view: View,
    pub focus: Focus,
    pub show_logs: bool,

    pub friends_panel: FriendsPanel,
    pub chat_panel: ChatPanel,
    pub logs_panel: LogsPanel,

    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub toast: Option<Toast>,

    pub should_quit: bool,
    start_time: Instant,
    input_handler: InputHandler,
}

impl App {
    pub fn new(client: Client, log_buffer: LogBuffer, theme: Theme) -> Self {
        Self {
            client,
            conversations: ConversationManager::new(),
            view: View::Friends,
            focus: Focus::Friends,
            show_logs: true,
            friends_panel: FriendsPanel::new(),
            chat_panel: ChatPanel::new(),
            logs_panel: LogsPanel::new(),
            log_buffer,
            theme,
            toast: None,
            should_quit: false,
            start_time: Instant::now(),
            input_handler: InputHandler::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Peer events
    // ─────────────────────────────────────────────────────────────────────

    pub fn apply_peer_event(&mut self, event: PeerEvent) {
        match self
            .client
            .handle_peer_event(event, &mut self.conversations)
        {
            Outcome::Message {
                handle,
                from,
                text,
                action,
            } => {
                self.conversations
                    .push_line(handle, ChatLine::incoming(from, text, action));
            }
            Outcome::Added { name, .. } => {
                self.show_toast(format!("{name} added to friends"));
            }
            Outcome::Rejected(RosterError::Full { capacity }) => {
                self.show_toast(format!("Friend list is full ({capacity})"));
            }
            Outcome::Unsaved(e) => {
                tracing::error!("{:#}", anyhow::Error::from(e));
                self.show_failure("Friend list could not be saved");
            }
            Outcome::Rejected(_) | Outcome::Updated | Outcome::UnknownPeer(_) => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Friend list actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn move_selection(&mut self, direction: Direction) {
        self.client.move_selection(direction);
    }

    /// Open (or focus) the chat with the selected friend and switch to it
    pub fn open_selected(&mut self) {
        if self.client.open_selected(&mut self.conversations).is_some() {
            self.chat_panel.reset();
            self.view = View::Chat;
        }
    }

    pub fn delete_selected(&mut self) {
        match self.client.delete_selected() {
            Ok(Some(deleted)) => {
                self.show_toast(format!("Deleted {}", deleted.name));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("{:#}", anyhow::Error::from(e));
                self.show_failure("Friend deleted, but the list could not be saved");
            }
        }
    }

    /// Select the friend under a mouse click
    pub fn click(&mut self, column: u16, row: u16) {
        if self.view != View::Friends {
            return;
        }
        if let Some(slot) = self.friends_panel.slot_at(column, row) {
            self.focus = Focus::Friends;
            self.client.roster.select(slot);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Conversations
    // ─────────────────────────────────────────────────────────────────────

    /// Close the focused conversation and tell the roster it is gone
    pub fn close_active_conversation(&mut self) {
        let Some(handle) = self.conversations.active().map(|c| c.handle) else {
            return;
        };
        if let Some(closed) = self.conversations.close(handle) {
            self.client.conversation_closed(closed.peer_id, handle);
        }
        self.chat_panel.reset();
        if self.conversations.active().is_none() {
            self.view = View::Friends;
        }
    }

    pub fn next_conversation(&mut self) {
        if self.conversations.cycle().is_some() {
            self.chat_panel.reset();
            self.view = View::Chat;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Keys
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// Route a key to whatever currently has focus
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match (self.view, self.focus) {
            (View::Chat, _) => self.chat_panel.handle_key(key),
            (View::Friends, Focus::Logs) if self.show_logs => self.logs_panel.handle_key(key),
            (View::Friends, _) => self.handle_friends_key(key),
        }
    }

    fn handle_friends_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(Direction::Down),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => self.delete_selected(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Friends if self.show_logs => Focus::Logs,
            _ => Focus::Friends,
        };
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs {
            self.focus = Focus::Friends;
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.show_toast(format!("Theme: {}", self.theme.name));
    }

    pub fn focus_hint(&self) -> &'static str {
        let hint = match (self.view, self.focus) {
            (View::Chat, _) => self.chat_panel.focus_hint(),
            (View::Friends, Focus::Logs) if self.show_logs => self.logs_panel.focus_hint(),
            (View::Friends, _) => Some("↑↓:select  Enter:chat  Del:delete  Tab:logs"),
        };
        hint.unwrap_or("")
    }

    // ─────────────────────────────────────────────────────────────────────
    // Misc
    // ─────────────────────────────────────────────────────────────────────

    /// Record the friends panel width so `render_view` cuts rows to fit
    pub fn set_friends_width(&mut self, width: usize) {
        self.conversations.set_display_width(width);
    }

    pub fn friends_rows(&self) -> Vec<DisplayRow> {
        self.client.roster.render_view(&self.conversations)
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::notice(message));
    }

    pub fn show_failure(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::failure(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Uptime as H:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}
