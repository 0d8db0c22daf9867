// Client - wires the roster to its directory and store
//
// Owns the single `Roster` instance together with the collaborators it needs
// for mutation. Both front-ends (TUI and headless) funnel peer events and
// user actions through here, always from one task.

use crate::config::Config;
use crate::directory::LocalDirectory;
use crate::events::PeerEvent;
use crate::roster::{
    ConversationHandle, ConversationHost, DeletedPeer, Direction, Roster, RosterError,
    RosterStore, StoreError,
};
use crate::storage::JsonStore;
use anyhow::Result;

/// What applying a peer event produced, for the front-end to act on
#[derive(Debug)]
pub enum Outcome {
    /// Nothing visible beyond the roster itself
    Updated,
    /// Event referred to a peer that is not in the friend list
    UnknownPeer(u32),
    /// A friend was added to the given slot
    Added { slot: usize, name: String },
    /// Adding a friend was refused
    Rejected(RosterError),
    /// The roster changed but writing it to disk failed
    Unsaved(StoreError),
    /// Text arrived for a conversation
    Message {
        handle: ConversationHandle,
        from: String,
        text: String,
        action: bool,
    },
}

pub struct Client {
    pub roster: Roster,
    pub directory: LocalDirectory,
    pub store: JsonStore,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        Self {
            roster: Roster::new(config.roster_limits()),
            directory: LocalDirectory::new(),
            store: JsonStore::new(&config.data_file),
        }
    }

    /// Re-add every friend saved in the store; returns how many came back
    pub fn restore(&mut self) -> Result<usize> {
        let saved = self.store.load()?;
        let mut restored = 0;

        for peer in saved {
            self.directory.register(peer.peer_id, Some(&peer.name));
            match self.roster.add_peer(peer.peer_id, &self.directory) {
                Ok(slot) => {
                    if !peer.status_message.is_empty() {
                        self.roster
                            .on_status_message_changed(slot, &peer.status_message);
                    }
                    restored += 1;
                }
                Err(e) => tracing::warn!("Skipping saved friend {}: {}", peer.peer_id, e),
            }
        }

        tracing::info!(
            "Restored {} friends from {:?}",
            restored,
            self.store.path()
        );
        Ok(restored)
    }

    /// Apply a network event to the roster
    pub fn handle_peer_event(
        &mut self,
        event: PeerEvent,
        host: &mut impl ConversationHost,
    ) -> Outcome {
        if let PeerEvent::FriendAdded { peer_id, name } = event {
            return self.add_friend(peer_id, name.as_deref());
        }

        let peer_id = event.peer_id();
        let Some(slot) = self.roster.slot_of(peer_id) else {
            tracing::debug!(peer_id, "Event for unknown peer dropped");
            return Outcome::UnknownPeer(peer_id);
        };

        match event {
            PeerEvent::FriendAdded { .. } => Outcome::Updated,
            PeerEvent::Message { text, .. } => self.deliver(slot, text, false, host),
            PeerEvent::Action { text, .. } => self.deliver(slot, text, true, host),
            PeerEvent::ConnectionChanged { online, .. } => {
                self.roster.on_presence_changed(slot, online);
                Outcome::Updated
            }
            PeerEvent::NickChanged { name, .. } => {
                let before = self.roster.slot(slot).map(|s| s.name.clone());
                self.roster.on_nickname_changed(slot, &name);
                if self.roster.slot(slot).map(|s| &s.name) == before.as_ref() {
                    return Outcome::Updated;
                }
                self.directory.register(peer_id, Some(&name));
                self.persist()
            }
            PeerEvent::StatusChanged { presence, .. } => {
                self.roster.on_status_changed(slot, presence);
                Outcome::Updated
            }
            PeerEvent::StatusMessageChanged { message, .. } => {
                let before = self.roster.slot(slot).map(|s| s.status_message.clone());
                self.roster.on_status_message_changed(slot, &message);
                if self.roster.slot(slot).map(|s| &s.status_message) == before.as_ref() {
                    return Outcome::Updated;
                }
                self.persist()
            }
        }
    }

    /// Add a friend announced by the network; the directory only learns the
    /// name once the roster has accepted the peer
    fn add_friend(&mut self, peer_id: u32, name: Option<&str>) -> Outcome {
        let mut candidate = LocalDirectory::new();
        candidate.register(peer_id, name);

        let slot = match self.roster.add_peer(peer_id, &candidate) {
            Ok(slot) => slot,
            Err(e) => {
                tracing::warn!("Could not add friend {}: {}", peer_id, e);
                return Outcome::Rejected(e);
            }
        };
        self.directory.register(peer_id, name);

        if let Outcome::Unsaved(e) = self.persist() {
            return Outcome::Unsaved(e);
        }
        let name = self
            .roster
            .slot(slot)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        Outcome::Added { slot, name }
    }

    /// Write the current roster to the store
    fn persist(&self) -> Outcome {
        match self.store.save_roster(&self.roster.snapshot()) {
            Ok(()) => Outcome::Updated,
            Err(e) => {
                tracing::error!("Could not save friend list: {}", e);
                Outcome::Unsaved(e)
            }
        }
    }

    fn deliver(
        &mut self,
        slot: usize,
        text: String,
        action: bool,
        host: &mut impl ConversationHost,
    ) -> Outcome {
        let handle = if action {
            self.roster.on_action_received(slot, host)
        } else {
            self.roster.on_message_received(slot, host)
        };
        let from = self
            .roster
            .slot(slot)
            .map(|s| s.name.clone())
            .unwrap_or_default();

        match handle {
            Some(handle) => Outcome::Message {
                handle,
                from,
                text,
                action,
            },
            None => Outcome::Updated,
        }
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.roster.move_selection(direction);
    }

    /// Open or focus the conversation with the selected friend
    pub fn open_selected(&mut self, host: &mut impl ConversationHost) -> Option<ConversationHandle> {
        self.roster.activate_selected(host)
    }

    /// Delete the selected friend and save the list
    pub fn delete_selected(&mut self) -> Result<Option<DeletedPeer>, RosterError> {
        self.roster.delete_selected(&mut self.directory, &self.store)
    }

    /// A conversation view went away; clear the friend's handle if it still
    /// points at that view (the friend may have been deleted and re-added)
    pub fn conversation_closed(&mut self, peer_id: u32, handle: ConversationHandle) {
        let Some(slot) = self.roster.slot_of(peer_id) else {
            return;
        };
        if self.roster.slot(slot).and_then(|s| s.conversation) == Some(handle) {
            self.roster.on_conversation_closed(slot);
        }
    }
}
