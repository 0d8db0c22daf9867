//! Narrow interfaces the roster consumes
//!
//! The roster never talks to the network, the disk or the terminal directly.
//! Each of those concerns sits behind one of these traits so the host can
//! wire in the real thing and tests can wire in fakes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identifier of an open conversation view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationHandle(pub u32);

/// One peer as handed to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPeer {
    pub peer_id: u32,
    pub name: String,
    #[serde(default)]
    pub status_message: String,
}

/// Failures raised while persisting the roster
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode roster: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Identity and protocol side of the peer network
pub trait PeerDirectory {
    /// Current name advertised by a peer, if known
    fn resolve_name(&self, peer_id: u32) -> Option<String>;

    /// Drop the peer from the protocol engine's friend list
    fn remove_peer(&mut self, peer_id: u32);
}

/// Persistence side: saves the roster whenever a saved field changes
pub trait RosterStore {
    fn save_roster(&self, peers: &[SavedPeer]) -> Result<(), StoreError>;
}

/// Windowing side: owns conversation views and knows the display width
pub trait ConversationHost {
    /// Create a conversation view for a peer and return its handle
    fn open_conversation(&mut self, peer_id: u32, name: &str) -> ConversationHandle;

    /// Bring an existing conversation view to the front
    fn focus_conversation(&mut self, handle: ConversationHandle);

    /// Columns available to a single roster row
    fn display_width(&self) -> usize;
}
