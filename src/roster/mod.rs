//! Roster manager - the friend list model behind the friends view
//!
//! The roster is a fixed-capacity arena of friend slots addressed by index.
//! Slots freed by deletion are recycled by the next addition, and `count` is a
//! high-water mark rather than a live count: inactive holes below it are
//! allowed and are skipped by navigation and rendering.
//!
//! Every operation is synchronous and expects to be called from the single
//! task that owns the roster. Network-originated events must be marshalled
//! onto that task by the host before they reach the hooks below.
//!
//! # Peer references
//!
//! Event hooks take a *peer reference*: the slot index the peer lives in.
//! References outside `[0, count)` or pointing at an inactive slot are ignored
//! without any signal to the caller. Use [`Roster::slot_of`] to turn a
//! protocol peer id into a reference.

pub mod collaborators;
mod render;

#[cfg(test)]
mod tests;

pub use collaborators::{
    ConversationHandle, ConversationHost, PeerDirectory, RosterStore, SavedPeer, StoreError,
};
pub use render::{DisplayRow, FriendRow, Glyph, EMPTY_NOTICE};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name given to peers whose identity could not be resolved
pub const UNKNOWN_NAME: &str = "Unknown";

/// Coarse availability a peer reports while online
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    #[default]
    None,
    Away,
    Busy,
}

impl Presence {
    pub fn label(&self) -> &'static str {
        match self {
            Presence::None => "online",
            Presence::Away => "away",
            Presence::Busy => "busy",
        }
    }
}

/// Direction of a selection move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One fixed position in the roster
///
/// An inactive slot is always equal to `FriendSlot::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendSlot {
    pub active: bool,
    pub peer_id: u32,
    pub name: String,
    pub status_message: String,
    pub online: bool,
    pub presence: Presence,
    pub conversation: Option<ConversationHandle>,
}

impl FriendSlot {
    /// Stored status message length in bytes
    pub fn status_message_len(&self) -> usize {
        self.status_message.len()
    }
}

/// Size limits the roster enforces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLimits {
    /// Number of slots
    pub capacity: usize,
    /// Names of this many bytes or more are rejected
    pub max_name_len: usize,
    /// Status messages of this many bytes or more are rejected
    pub max_status_len: usize,
    /// Name used when the directory has none for a peer
    pub placeholder_name: String,
}

impl Default for RosterLimits {
    fn default() -> Self {
        Self {
            capacity: 1024,
            max_name_len: 128,
            max_status_len: 1007,
            placeholder_name: UNKNOWN_NAME.to_string(),
        }
    }
}

/// A peer that was removed by [`Roster::delete_selected`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedPeer {
    pub slot: usize,
    pub peer_id: u32,
    pub name: String,
    pub conversation: Option<ConversationHandle>,
}

/// Failures the roster reports to its host
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("friend list is full ({capacity} slots)")]
    Full { capacity: usize },

    #[error("peer {peer_id} is already in the friend list (slot {slot})")]
    Duplicate { peer_id: u32, slot: usize },

    #[error("removed {} but the friend list could not be saved: {source}", peer.name)]
    Persist {
        peer: DeletedPeer,
        #[source]
        source: StoreError,
    },
}

/// The friend list: slots, high-water mark and selection cursor
#[derive(Debug, Clone)]
pub struct Roster {
    slots: Vec<FriendSlot>,
    count: usize,
    selected: usize,
    limits: RosterLimits,
}

impl Roster {
    pub fn new(limits: RosterLimits) -> Self {
        Self {
            slots: vec![FriendSlot::default(); limits.capacity],
            count: 0,
            selected: 0,
            limits,
        }
    }

    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    /// High-water mark: one past the highest slot ever left occupied
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of active slots
    pub fn len(&self) -> usize {
        self.active_slots().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Selected slot, or `None` for an empty roster
    pub fn selected(&self) -> Option<usize> {
        (self.count > 0).then_some(self.selected)
    }

    pub fn selected_slot(&self) -> Option<&FriendSlot> {
        self.selected().and_then(|i| self.slots.get(i))
    }

    /// Any slot below the high-water mark, active or not
    pub fn slot(&self, index: usize) -> Option<&FriendSlot> {
        if index < self.count {
            self.slots.get(index)
        } else {
            None
        }
    }

    /// Active slots in index order
    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &FriendSlot)> {
        self.slots[..self.count]
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
    }

    /// Resolve a protocol peer id to its slot
    pub fn slot_of(&self, peer_id: u32) -> Option<usize> {
        self.active_slots()
            .find(|(_, slot)| slot.peer_id == peer_id)
            .map(|(i, _)| i)
    }

    /// Active peers as handed to the persistence collaborator
    pub fn snapshot(&self) -> Vec<SavedPeer> {
        self.active_slots()
            .map(|(_, slot)| SavedPeer {
                peer_id: slot.peer_id,
                name: slot.name.clone(),
                status_message: slot.status_message.clone(),
            })
            .collect()
    }

    fn live_slot_mut(&mut self, peer_ref: usize) -> Option<&mut FriendSlot> {
        if peer_ref >= self.count {
            tracing::debug!(peer_ref, count = self.count, "Ignoring out-of-range peer");
            return None;
        }
        self.slots.get_mut(peer_ref).filter(|slot| slot.active)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event hooks
    // ─────────────────────────────────────────────────────────────────────

    /// A message arrived: make sure a conversation exists for the peer
    ///
    /// Returns the conversation the message belongs to.
    pub fn on_message_received(
        &mut self,
        peer_ref: usize,
        host: &mut impl ConversationHost,
    ) -> Option<ConversationHandle> {
        let slot = self.live_slot_mut(peer_ref)?;
        if slot.conversation.is_none() {
            let handle = host.open_conversation(slot.peer_id, &slot.name);
            tracing::debug!(peer_id = slot.peer_id, ?handle, "Opened conversation");
            slot.conversation = Some(handle);
        }
        slot.conversation
    }

    /// An action ("/me") arrived; behaves exactly like a message
    pub fn on_action_received(
        &mut self,
        peer_ref: usize,
        host: &mut impl ConversationHost,
    ) -> Option<ConversationHandle> {
        self.on_message_received(peer_ref, host)
    }

    pub fn on_presence_changed(&mut self, peer_ref: usize, online: bool) {
        if let Some(slot) = self.live_slot_mut(peer_ref) {
            slot.online = online;
        }
    }

    pub fn on_nickname_changed(&mut self, peer_ref: usize, name: &str) {
        let max = self.limits.max_name_len;
        if name.len() >= max {
            tracing::debug!(peer_ref, len = name.len(), max, "Rejected oversized nickname");
            return;
        }
        let placeholder = self.limits.placeholder_name.clone();
        if let Some(slot) = self.live_slot_mut(peer_ref) {
            let name = printable(name);
            slot.name = if name.is_empty() { placeholder } else { name };
        }
    }

    pub fn on_status_changed(&mut self, peer_ref: usize, presence: Presence) {
        if let Some(slot) = self.live_slot_mut(peer_ref) {
            slot.presence = presence;
        }
    }

    pub fn on_status_message_changed(&mut self, peer_ref: usize, message: &str) {
        let max = self.limits.max_status_len;
        if message.len() >= max {
            tracing::debug!(peer_ref, len = message.len(), max, "Rejected oversized status message");
            return;
        }
        if let Some(slot) = self.live_slot_mut(peer_ref) {
            slot.status_message = printable(message);
            tracing::trace!(peer_ref, len = slot.status_message_len(), "Status message changed");
        }
    }

    /// The conversation view for a peer was torn down
    pub fn on_conversation_closed(&mut self, peer_ref: usize) {
        if let Some(slot) = self.live_slot_mut(peer_ref) {
            slot.conversation = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Claim the first free slot for a new peer
    ///
    /// Scans one past the high-water mark so freed holes are reused before
    /// the roster grows.
    pub fn add_peer(
        &mut self,
        peer_id: u32,
        directory: &impl PeerDirectory,
    ) -> Result<usize, RosterError> {
        let capacity = self.limits.capacity;
        if self.count >= capacity {
            return Err(RosterError::Full { capacity });
        }
        if let Some(slot) = self.slot_of(peer_id) {
            return Err(RosterError::Duplicate { peer_id, slot });
        }

        let Some(index) = (0..=self.count).find(|&i| !self.slots[i].active) else {
            return Err(RosterError::Full { capacity });
        };

        let name = directory
            .resolve_name(peer_id)
            .filter(|name| name.len() < self.limits.max_name_len)
            .map(|name| printable(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.limits.placeholder_name.clone());

        let was_empty = self.selected_slot().map_or(true, |slot| !slot.active);

        self.slots[index] = FriendSlot {
            active: true,
            peer_id,
            name,
            ..FriendSlot::default()
        };

        if index == self.count {
            self.count += 1;
        }
        if was_empty {
            self.selected = index;
        }

        tracing::info!(peer_id, slot = index, name = %self.slots[index].name, "Friend added");
        Ok(index)
    }

    /// Move the cursor to the next active slot in `direction`, wrapping
    ///
    /// The scan starts one past the current selection and ends on the
    /// current selection itself, so a lone peer stays selected.
    pub fn move_selection(&mut self, direction: Direction) {
        let count = self.count;
        if count == 0 {
            return;
        }

        let base = self.selected % count;
        let found = (1..=count)
            .map(|step| match direction {
                Direction::Down => (base + step) % count,
                Direction::Up => (base + count - step % count) % count,
            })
            .find(|&i| self.slots[i].active);

        match found {
            Some(index) => self.selected = index,
            None => {
                // count > 0 always leaves an active slot at count - 1
                debug_assert!(false, "no active slot below high-water mark {count}");
                tracing::error!(count, "Selection found no active friend");
            }
        }
    }

    /// Open (or re-focus) the conversation for the selected peer
    pub fn activate_selected(
        &mut self,
        host: &mut impl ConversationHost,
    ) -> Option<ConversationHandle> {
        let index = self.selected()?;
        let slot = self.slots.get_mut(index).filter(|slot| slot.active)?;

        let handle = match slot.conversation {
            Some(handle) => handle,
            None => {
                let handle = host.open_conversation(slot.peer_id, &slot.name);
                slot.conversation = Some(handle);
                handle
            }
        };
        host.focus_conversation(handle);
        Some(handle)
    }

    /// Remove the selected peer, trim the high-water mark and persist
    ///
    /// The roster is fully consistent again before a save failure is
    /// reported, so the host may keep using it regardless of the result.
    pub fn delete_selected(
        &mut self,
        directory: &mut impl PeerDirectory,
        store: &impl RosterStore,
    ) -> Result<Option<DeletedPeer>, RosterError> {
        let Some(index) = self.selected() else {
            return Ok(None);
        };
        if !self.slots[index].active {
            return Ok(None);
        }

        directory.remove_peer(self.slots[index].peer_id);
        let removed = std::mem::take(&mut self.slots[index]);

        while self.count > 0 && !self.slots[self.count - 1].active {
            self.count -= 1;
        }

        let peer = DeletedPeer {
            slot: index,
            peer_id: removed.peer_id,
            name: removed.name,
            conversation: removed.conversation,
        };
        tracing::info!(peer_id = peer.peer_id, slot = index, count = self.count, "Friend deleted");

        let saved = store.save_roster(&self.snapshot());

        if self.count == 0 {
            self.selected = 0;
        } else {
            self.move_selection(Direction::Down);
        }

        match saved {
            Ok(()) => Ok(Some(peer)),
            Err(source) => Err(RosterError::Persist { peer, source }),
        }
    }

    /// Point the cursor at an active slot; returns false if it is not one
    pub fn select(&mut self, index: usize) -> bool {
        if self.slot(index).is_some_and(|slot| slot.active) {
            self.selected = index;
            true
        } else {
            false
        }
    }
}

/// Strip control characters and NUL padding so stored text is always safe to draw
fn printable(raw: &str) -> String {
    raw.trim_end_matches('\0')
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}
