// Peer directory - local stand-in for the protocol engine's friend table
//
// Tracks the peers the protocol layer knows about and the names they
// advertise. The roster asks it for names when a friend is added and tells
// it to forget peers on deletion.

use crate::roster::PeerDirectory;
use std::collections::HashMap;

/// Known peers and their advertised names
#[derive(Debug, Default)]
pub struct LocalDirectory {
    names: HashMap<u32, String>,
    next_id: u32,
}

impl LocalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a peer, optionally with the name it advertised
    pub fn register(&mut self, peer_id: u32, name: Option<&str>) {
        match name {
            Some(name) => {
                self.names.insert(peer_id, name.to_string());
            }
            None => {
                self.names.remove(&peer_id);
            }
        }
        self.next_id = self.next_id.max(peer_id.saturating_add(1));
    }

    /// Next peer id never handed out by this directory
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}

impl PeerDirectory for LocalDirectory {
    fn resolve_name(&self, peer_id: u32) -> Option<String> {
        self.names.get(&peer_id).cloned()
    }

    fn remove_peer(&mut self, peer_id: u32) {
        if self.names.remove(&peer_id).is_some() {
            tracing::debug!(peer_id, "Peer removed from directory");
        }
    }
}
