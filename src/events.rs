// Events that flow from the peer network to the friend list
//
// The protocol engine (here: the demo network) produces these on its own
// task; they travel over an mpsc channel and are applied to the roster on the
// UI task, which is the only place the roster is ever touched.

use crate::roster::Presence;
use serde::{Deserialize, Serialize};

/// Network-originated event, keyed by protocol peer id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")] // {"type": "nick_changed", ...}
pub enum PeerEvent {
    /// A peer became a friend; `name` is what it advertised, if anything
    FriendAdded { peer_id: u32, name: Option<String> },

    /// A chat message arrived
    Message { peer_id: u32, text: String },

    /// An action ("/me waves") arrived
    Action { peer_id: u32, text: String },

    /// The peer connected or disconnected
    ConnectionChanged { peer_id: u32, online: bool },

    /// The peer changed its nickname
    NickChanged { peer_id: u32, name: String },

    /// The peer changed its availability
    StatusChanged { peer_id: u32, presence: Presence },

    /// The peer changed its status message
    StatusMessageChanged { peer_id: u32, message: String },
}

impl PeerEvent {
    pub fn peer_id(&self) -> u32 {
        match self {
            PeerEvent::FriendAdded { peer_id, .. }
            | PeerEvent::Message { peer_id, .. }
            | PeerEvent::Action { peer_id, .. }
            | PeerEvent::ConnectionChanged { peer_id, .. }
            | PeerEvent::NickChanged { peer_id, .. }
            | PeerEvent::StatusChanged { peer_id, .. }
            | PeerEvent::StatusMessageChanged { peer_id, .. } => *peer_id,
        }
    }
}
