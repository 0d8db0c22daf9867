//! Roster behavior tests
//!
//! Collaborators are small in-memory fakes that record what the roster asked
//! of them.

use super::*;
use pretty_assertions::assert_eq;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Fakes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeDirectory {
    names: HashMap<u32, String>,
    removed: Vec<u32>,
}

impl FakeDirectory {
    fn with(names: &[(u32, &str)]) -> Self {
        Self {
            names: names.iter().map(|(id, n)| (*id, n.to_string())).collect(),
            removed: Vec::new(),
        }
    }
}

impl PeerDirectory for FakeDirectory {
    fn resolve_name(&self, peer_id: u32) -> Option<String> {
        self.names.get(&peer_id).cloned()
    }

    fn remove_peer(&mut self, peer_id: u32) {
        self.removed.push(peer_id);
    }
}

#[derive(Default)]
struct FakeStore {
    saves: RefCell<Vec<Vec<SavedPeer>>>,
    fail: Cell<bool>,
}

impl RosterStore for FakeStore {
    fn save_roster(&self, peers: &[SavedPeer]) -> Result<(), StoreError> {
        if self.fail.get() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        self.saves.borrow_mut().push(peers.to_vec());
        Ok(())
    }
}

struct FakeHost {
    next: u32,
    opened: Vec<u32>,
    focused: Vec<ConversationHandle>,
    width: usize,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            next: 1,
            opened: Vec::new(),
            focused: Vec::new(),
            width: 80,
        }
    }
}

impl ConversationHost for FakeHost {
    fn open_conversation(&mut self, peer_id: u32, _name: &str) -> ConversationHandle {
        self.opened.push(peer_id);
        let handle = ConversationHandle(self.next);
        self.next += 1;
        handle
    }

    fn focus_conversation(&mut self, handle: ConversationHandle) {
        self.focused.push(handle);
    }

    fn display_width(&self) -> usize {
        self.width
    }
}

fn roster_with_capacity(capacity: usize) -> Roster {
    Roster::new(RosterLimits {
        capacity,
        max_name_len: 16,
        max_status_len: 32,
        ..RosterLimits::default()
    })
}

/// Roster holding peers 1..=n named "peer-1".. in slots 0..n
fn populated(n: u32) -> (Roster, FakeDirectory) {
    let names: Vec<(u32, String)> = (1..=n).map(|id| (id, format!("peer-{id}"))).collect();
    let dir = FakeDirectory {
        names: names.into_iter().collect(),
        removed: Vec::new(),
    };
    let mut roster = roster_with_capacity(8);
    for id in 1..=n {
        roster.add_peer(id, &dir).unwrap();
    }
    (roster, dir)
}

fn assert_unique_peer_ids(roster: &Roster) {
    let mut ids: Vec<u32> = roster.active_slots().map(|(_, s)| s.peer_id).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "duplicate peer ids in roster");
}

fn assert_selection_valid(roster: &Roster) {
    if roster.count() > 0 {
        let slot = roster.selected_slot().expect("selection exists");
        assert!(slot.active, "selection points at inactive slot");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Addition
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_add_peer_populates_slot() {
    let dir = FakeDirectory::with(&[(42, "alice")]);
    let mut roster = roster_with_capacity(4);

    let slot = roster.add_peer(42, &dir).unwrap();

    assert_eq!(slot, 0);
    assert_eq!(roster.count(), 1);
    let friend = roster.slot(0).unwrap();
    assert!(friend.active);
    assert_eq!(friend.peer_id, 42);
    assert_eq!(friend.name, "alice");
    assert!(!friend.online);
    assert_eq!(friend.presence, Presence::None);
    assert_eq!(friend.conversation, None);
    assert_eq!(roster.selected(), Some(0));
}

#[test]
fn test_add_peer_falls_back_to_placeholder() {
    let dir = FakeDirectory::with(&[(2, "")]);
    let mut roster = roster_with_capacity(4);

    roster.add_peer(1, &dir).unwrap();
    roster.add_peer(2, &dir).unwrap();

    assert_eq!(roster.slot(0).unwrap().name, UNKNOWN_NAME);
    assert_eq!(roster.slot(1).unwrap().name, UNKNOWN_NAME);
}

#[test]
fn test_add_peer_full() {
    let (mut roster, dir) = populated(0);
    for id in 1..=8 {
        roster.add_peer(id, &dir).unwrap();
    }

    let err = roster.add_peer(99, &dir).unwrap_err();
    assert!(matches!(err, RosterError::Full { capacity: 8 }));
    assert_eq!(roster.count(), 8);
}

#[test]
fn test_add_peer_rejects_duplicate() {
    let (mut roster, dir) = populated(3);

    let err = roster.add_peer(2, &dir).unwrap_err();
    assert!(matches!(
        err,
        RosterError::Duplicate {
            peer_id: 2,
            slot: 1
        }
    ));
    assert_eq!(roster.len(), 3);
    assert_unique_peer_ids(&roster);
}

#[test]
fn test_add_peer_recycles_hole() {
    let (mut roster, mut dir) = populated(3);
    let store = FakeStore::default();

    assert!(roster.select(1));
    roster.delete_selected(&mut dir, &store).unwrap();
    assert_eq!(roster.count(), 3);

    let slot = roster.add_peer(7, &dir).unwrap();
    assert_eq!(slot, 1);
    assert_eq!(roster.count(), 3);
}

#[test]
fn test_add_after_emptying_selects_new_peer() {
    let (mut roster, mut dir) = populated(2);
    let store = FakeStore::default();

    assert!(roster.select(1));
    roster.delete_selected(&mut dir, &store).unwrap();
    roster.delete_selected(&mut dir, &store).unwrap();
    assert_eq!(roster.count(), 0);
    assert_eq!(roster.selected(), None);

    roster.add_peer(5, &dir).unwrap();
    assert_eq!(roster.selected(), Some(0));
    assert_selection_valid(&roster);
}

// ─────────────────────────────────────────────────────────────────────────────
// Navigation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_move_selection_empty_is_noop() {
    let mut roster = roster_with_capacity(3);
    roster.move_selection(Direction::Down);
    roster.move_selection(Direction::Up);
    assert_eq!(roster.selected(), None);
    assert_eq!(roster.count(), 0);
}

#[test]
fn test_move_selection_wraps() {
    let (mut roster, _) = populated(3);
    assert_eq!(roster.selected(), Some(0));

    roster.move_selection(Direction::Up);
    assert_eq!(roster.selected(), Some(2));

    roster.move_selection(Direction::Down);
    assert_eq!(roster.selected(), Some(0));

    roster.move_selection(Direction::Down);
    roster.move_selection(Direction::Down);
    roster.move_selection(Direction::Down);
    assert_eq!(roster.selected(), Some(0));
}

#[test]
fn test_down_then_up_returns_to_start() {
    let (mut roster, _) = populated(4);
    for start in 0..4 {
        assert!(roster.select(start));
        roster.move_selection(Direction::Down);
        assert_ne!(roster.selected(), Some(start));
        roster.move_selection(Direction::Up);
        assert_eq!(roster.selected(), Some(start));
    }
}

#[test]
fn test_single_peer_cycle_of_one() {
    let (mut roster, mut dir) = populated(3);
    let store = FakeStore::default();

    // Leave only slot 2 active, with holes below it
    roster.select(0);
    roster.delete_selected(&mut dir, &store).unwrap();
    roster.select(1);
    roster.delete_selected(&mut dir, &store).unwrap();
    assert_eq!(roster.count(), 3);
    assert_eq!(roster.selected(), Some(2));

    roster.move_selection(Direction::Down);
    assert_eq!(roster.selected(), Some(2));
    roster.move_selection(Direction::Up);
    assert_eq!(roster.selected(), Some(2));
}

// ─────────────────────────────────────────────────────────────────────────────
// Deletion
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_delete_middle_keeps_count_and_skips_hole() {
    let mut dir = FakeDirectory::with(&[(10, "A"), (20, "B"), (30, "C")]);
    let store = FakeStore::default();
    let mut roster = roster_with_capacity(3);
    for id in [10, 20, 30] {
        roster.add_peer(id, &dir).unwrap();
    }
    assert_eq!(roster.count(), 3);

    assert!(roster.select(1));
    let deleted = roster.delete_selected(&mut dir, &store).unwrap().unwrap();

    assert_eq!(deleted.peer_id, 20);
    assert_eq!(dir.removed, vec![20]);
    assert_eq!(roster.count(), 3);
    assert_eq!(roster.slot(1), Some(&FriendSlot::default()));
    assert_eq!(roster.selected(), Some(2));

    let mut visited = Vec::new();
    for _ in 0..4 {
        roster.move_selection(Direction::Down);
        visited.push(roster.selected().unwrap());
    }
    assert_eq!(visited, vec![0, 2, 0, 2]);

    visited.clear();
    for _ in 0..4 {
        roster.move_selection(Direction::Up);
        visited.push(roster.selected().unwrap());
    }
    assert_eq!(visited, vec![0, 2, 0, 2]);
}

#[test]
fn test_delete_top_trims_trailing_holes() {
    let (mut roster, mut dir) = populated(4);
    let store = FakeStore::default();

    roster.select(2);
    roster.delete_selected(&mut dir, &store).unwrap();
    assert_eq!(roster.count(), 4);

    roster.select(3);
    roster.delete_selected(&mut dir, &store).unwrap();
    assert_eq!(roster.count(), 2);
    assert_selection_valid(&roster);
}

#[test]
fn test_add_then_delete_restores_count() {
    let (mut roster, mut dir) = populated(3);
    let store = FakeStore::default();
    let before = roster.count();

    let slot = roster.add_peer(99, &dir).unwrap();
    assert!(roster.select(slot));
    roster.delete_selected(&mut dir, &store).unwrap();

    assert_eq!(roster.count(), before);
}

#[test]
fn test_delete_saves_snapshot() {
    let (mut roster, mut dir) = populated(2);
    let store = FakeStore::default();

    roster.delete_selected(&mut dir, &store).unwrap();

    let saves = store.saves.borrow();
    assert_eq!(saves.len(), 1);
    assert_eq!(
        saves[0],
        vec![SavedPeer {
            peer_id: 2,
            name: "peer-2".to_string(),
            status_message: String::new(),
        }]
    );
}

#[test]
fn test_delete_empty_is_noop() {
    let mut roster = roster_with_capacity(2);
    let mut dir = FakeDirectory::default();
    let store = FakeStore::default();

    assert!(roster.delete_selected(&mut dir, &store).unwrap().is_none());
    assert!(dir.removed.is_empty());
    assert!(store.saves.borrow().is_empty());
}

#[test]
fn test_delete_persist_failure_leaves_consistent_roster() {
    let (mut roster, mut dir) = populated(3);
    let store = FakeStore::default();
    store.fail.set(true);

    let err = roster.delete_selected(&mut dir, &store).unwrap_err();
    match err {
        RosterError::Persist { peer, .. } => assert_eq!(peer.peer_id, 1),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(roster.slot_of(1), None);
    assert_eq!(roster.selected(), Some(1));
    assert_selection_valid(&roster);
}

#[test]
fn test_random_add_delete_sequence_keeps_invariants() {
    let names: Vec<(u32, &str)> = (0..20).map(|id| (id, "x")).collect();
    let mut dir = FakeDirectory::with(&names);
    let store = FakeStore::default();
    let mut roster = roster_with_capacity(6);

    // Deterministic pseudo-random walk over add / move / delete
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        match seed % 4 {
            0 | 1 => {
                let _ = roster.add_peer(seed % 20, &dir);
            }
            2 => roster.move_selection(if seed & 8 == 0 {
                Direction::Up
            } else {
                Direction::Down
            }),
            _ => {
                roster.delete_selected(&mut dir, &store).unwrap();
            }
        }

        assert_unique_peer_ids(&roster);
        assert_selection_valid(&roster);
        assert!(roster.count() <= roster.capacity());
        if roster.count() > 0 {
            assert!(roster.slot(roster.count() - 1).unwrap().active);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event hooks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hooks_ignore_out_of_range_refs() {
    let (mut roster, _) = populated(2);
    let mut host = FakeHost::default();
    let before = roster.clone();

    roster.on_presence_changed(5, true);
    roster.on_nickname_changed(2, "ghost");
    roster.on_status_changed(100, Presence::Busy);
    roster.on_status_message_changed(7, "hi");
    roster.on_conversation_closed(9);
    assert_eq!(roster.on_message_received(2, &mut host), None);

    assert!(host.opened.is_empty());
    assert_eq!(roster.snapshot(), before.snapshot());
    assert!(roster.active_slots().all(|(_, s)| !s.online));
}

#[test]
fn test_hooks_ignore_inactive_slots() {
    let (mut roster, mut dir) = populated(3);
    let store = FakeStore::default();
    roster.select(1);
    roster.delete_selected(&mut dir, &store).unwrap();

    roster.on_presence_changed(1, true);
    roster.on_nickname_changed(1, "zombie");

    assert_eq!(roster.slot(1), Some(&FriendSlot::default()));
}

#[test]
fn test_presence_and_status_updates() {
    let (mut roster, _) = populated(1);

    roster.on_presence_changed(0, true);
    roster.on_status_changed(0, Presence::Away);
    roster.on_status_message_changed(0, "lunch");

    let friend = roster.slot(0).unwrap();
    assert!(friend.online);
    assert_eq!(friend.presence, Presence::Away);
    assert_eq!(friend.status_message, "lunch");
    assert_eq!(friend.status_message_len(), 5);

    roster.on_presence_changed(0, false);
    assert!(!roster.slot(0).unwrap().online);
}

#[test]
fn test_oversized_updates_rejected() {
    let (mut roster, _) = populated(1);
    roster.on_status_message_changed(0, "short");

    // Limits in tests: names < 16 bytes, status < 32 bytes
    roster.on_nickname_changed(0, &"n".repeat(16));
    roster.on_status_message_changed(0, &"s".repeat(32));

    let friend = roster.slot(0).unwrap();
    assert_eq!(friend.name, "peer-1");
    assert_eq!(friend.status_message, "short");

    roster.on_nickname_changed(0, &"n".repeat(15));
    assert_eq!(roster.slot(0).unwrap().name, "n".repeat(15));
}

#[test]
fn test_nickname_is_sanitized() {
    let (mut roster, _) = populated(1);

    roster.on_nickname_changed(0, "bob\u{7}\0\0");
    assert_eq!(roster.slot(0).unwrap().name, "bob");

    roster.on_nickname_changed(0, "\0");
    assert_eq!(roster.slot(0).unwrap().name, UNKNOWN_NAME);
}

#[test]
fn test_message_opens_conversation_once() {
    let (mut roster, _) = populated(2);
    let mut host = FakeHost::default();

    let first = roster.on_message_received(1, &mut host);
    let second = roster.on_action_received(1, &mut host);

    assert_eq!(first, Some(ConversationHandle(1)));
    assert_eq!(second, first);
    assert_eq!(host.opened, vec![2]);
    // Incoming messages never steal focus
    assert!(host.focused.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Activation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_activate_twice_reuses_handle() {
    let (mut roster, _) = populated(1);
    let mut host = FakeHost::default();

    let first = roster.activate_selected(&mut host).unwrap();
    let second = roster.activate_selected(&mut host).unwrap();

    assert_eq!(first, second);
    assert_eq!(host.opened.len(), 1);
    assert_eq!(host.focused, vec![first, first]);
}

#[test]
fn test_activate_empty_returns_none() {
    let mut roster = roster_with_capacity(2);
    let mut host = FakeHost::default();
    assert_eq!(roster.activate_selected(&mut host), None);
    assert!(host.opened.is_empty());
}

#[test]
fn test_conversation_closed_allows_reopen() {
    let (mut roster, _) = populated(1);
    let mut host = FakeHost::default();

    let first = roster.activate_selected(&mut host).unwrap();
    roster.on_conversation_closed(0);
    assert_eq!(roster.slot(0).unwrap().conversation, None);

    let second = roster.activate_selected(&mut host).unwrap();
    assert_ne!(first, second);
    assert_eq!(host.opened.len(), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_render_empty_roster() {
    let roster = roster_with_capacity(3);
    let host = FakeHost::default();
    assert_eq!(
        roster.render_view(&host),
        vec![DisplayRow::Notice(EMPTY_NOTICE)]
    );
}

#[test]
fn test_render_rows_in_slot_order() {
    let (mut roster, mut dir) = populated(3);
    let store = FakeStore::default();
    roster.select(1);
    roster.delete_selected(&mut dir, &store).unwrap();
    roster.on_presence_changed(2, true);
    roster.on_status_changed(2, Presence::Busy);
    roster.on_status_message_changed(2, "working");

    let rows = roster.render_rows(80);

    assert_eq!(
        rows,
        vec![
            DisplayRow::Friend(FriendRow {
                slot: 0,
                selected: false,
                glyph: Glyph::Offline,
                name: "peer-1".to_string(),
                status: None,
            }),
            DisplayRow::Friend(FriendRow {
                slot: 2,
                selected: true,
                glyph: Glyph::Online(Presence::Busy),
                name: "peer-3".to_string(),
                status: Some("working".to_string()),
            }),
        ]
    );
}

#[test]
fn test_render_truncation_does_not_mutate_state() {
    let (mut roster, _) = populated(1);
    roster.on_presence_changed(0, true);
    roster.on_status_message_changed(0, "a rather long status");

    // " > [O]peer-1 (" is 14 columns; ")" and a spare column leave 4 for the message
    let rows = roster.render_rows(20);
    let DisplayRow::Friend(row) = &rows[0] else {
        panic!("expected a friend row");
    };
    assert_eq!(row.status.as_deref(), Some("a ra"));
    assert_eq!(row.text(), " > [O]peer-1 (a ra)");

    let friend = roster.slot(0).unwrap();
    assert_eq!(friend.status_message, "a rather long status");
    assert_eq!(friend.status_message_len(), 20);

    // A wider render sees the whole message again
    let rows = roster.render_rows(200);
    let DisplayRow::Friend(row) = &rows[0] else {
        panic!("expected a friend row");
    };
    assert_eq!(row.status.as_deref(), Some("a rather long status"));
}
