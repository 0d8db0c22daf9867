// Components module - reusable UI building blocks
//
// Shell components are rendered in every view:
// - Title bar: friend and chat counts
// - Status bar: uptime, selected friend, key hints
// - Logs panel: system log entries (toggleable)
//
// Content components fill the middle: the friends panel or the chat panel.

pub mod chat_panel;
pub mod friends_panel;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use chat_panel::ChatPanel;
pub use friends_panel::FriendsPanel;
pub use logs_panel::LogsPanel;
pub use toast::{Toast, ToastKind};
