// Demo network: a simulated set of peers that keeps the friend list busy
//
// Stands in for the protocol engine. Peers are added at startup (a few of
// them without an advertised name), then every tick one of them connects,
// disconnects, renames itself, changes status or says something.
//
// Run headless with: ROSTER_NO_TUI=1 RUST_LOG=roster=debug roster

use crate::config::DemoConfig;
use crate::events::PeerEvent;
use crate::roster::Presence;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;

const NAMES: &[&str] = &[
    "alice", "bob", "carol", "dmitri", "eun-ji", "farah", "gustavo", "hiro", "ines", "jonas",
];

const NICKNAMES: &[&str] = &[
    "al1ce", "bobby tables", "carol (away)", "d", "은지", "farah_on_mobile", "gus", "hiro!!",
];

const STATUS_MESSAGES: &[&str] = &[
    "compiling...",
    "on a train, signal is bad",
    "do not disturb unless it's on fire",
    "back in 5",
    "",
    "listening to the same album for the ninth time today, send help",
];

const MESSAGES: &[&str] = &[
    "hey, are you around?",
    "did the build pass?",
    "lunch?",
    "sent you the file",
    "brb",
];

const ACTIONS: &[&str] = &["waves", "shrugs", "is typing furiously", "yawns"];

/// Event source over a fixed set of simulated peers; a given seed always
/// plays the same script
pub struct DemoScript {
    peers: Vec<DemoPeer>,
    rng: StdRng,
}

struct DemoPeer {
    peer_id: u32,
    online: bool,
}

impl DemoScript {
    /// `count` peers with consecutive ids starting at `first_peer_id`
    pub fn new(first_peer_id: u32, count: u32, seed: u64) -> Self {
        Self::with_rng(first_peer_id, count, StdRng::seed_from_u64(seed))
    }

    /// Same as `new`, but seeded from the OS so every run differs
    pub fn unseeded(first_peer_id: u32, count: u32) -> Self {
        Self::with_rng(first_peer_id, count, StdRng::from_entropy())
    }

    fn with_rng(first_peer_id: u32, count: u32, rng: StdRng) -> Self {
        Self {
            peers: (0..count)
                .map(|i| DemoPeer {
                    peer_id: first_peer_id.saturating_add(i),
                    online: false,
                })
                .collect(),
            rng,
        }
    }

    /// One `FriendAdded` per peer; every fourth peer advertises no name
    pub fn introductions(&self) -> Vec<PeerEvent> {
        self.peers
            .iter()
            .enumerate()
            .map(|(i, peer)| PeerEvent::FriendAdded {
                peer_id: peer.peer_id,
                name: (i % 4 != 3).then(|| NAMES[i % NAMES.len()].to_string()),
            })
            .collect()
    }

    fn pick(&mut self, items: &[&str]) -> String {
        items.choose(&mut self.rng).copied().unwrap_or_default().to_string()
    }

    /// Next simulated event, or None when there are no peers
    pub fn next_event(&mut self) -> Option<PeerEvent> {
        if self.peers.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.peers.len());
        let peer_id = self.peers[index].peer_id;

        // Offline peers can only come back online
        if !self.peers[index].online {
            self.peers[index].online = true;
            return Some(PeerEvent::ConnectionChanged {
                peer_id,
                online: true,
            });
        }

        let event = match self.rng.gen_range(0..10) {
            0 => {
                self.peers[index].online = false;
                PeerEvent::ConnectionChanged {
                    peer_id,
                    online: false,
                }
            }
            1 => PeerEvent::NickChanged {
                peer_id,
                name: self.pick(NICKNAMES),
            },
            2 | 3 => {
                let presence = [Presence::None, Presence::Away, Presence::Busy]
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or_default();
                PeerEvent::StatusChanged { peer_id, presence }
            }
            4 | 5 => PeerEvent::StatusMessageChanged {
                peer_id,
                message: self.pick(STATUS_MESSAGES),
            },
            6 => PeerEvent::Action {
                peer_id,
                text: self.pick(ACTIONS),
            },
            _ => PeerEvent::Message {
                peer_id,
                text: self.pick(MESSAGES),
            },
        };
        Some(event)
    }
}

/// Feed simulated peer events into `tx` until shutdown or the receiver goes away
pub async fn run_demo(
    tx: mpsc::Sender<PeerEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
    config: DemoConfig,
    first_peer_id: u32,
) {
    let mut script = DemoScript::unseeded(first_peer_id, config.peers);
    let interval = Duration::from_millis(config.interval_ms);

    // Let the UI draw its first frame before anything happens
    sleep(Duration::from_millis(500)).await;

    for event in script.introductions() {
        if shutdown_rx.try_recv().is_ok() || tx.send(event).await.is_err() {
            return;
        }
        sleep(interval / 4).await;
    }
    tracing::info!("Demo network started with {} peers", config.peers);

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::info!("Demo network received shutdown signal");
                return;
            }
            _ = sleep(interval) => {
                let Some(event) = script.next_event() else {
                    continue;
                };
                if tx.send(event).await.is_err() {
                    tracing::debug!("Event receiver dropped, stopping demo network");
                    return;
                }
            }
        }
    }
}
