// Headless mode - the friend list without a terminal UI
//
// Applies peer events exactly like the TUI does, but conversations are just
// log lines and the list is printed to stdout whenever it changes.

use crate::client::{Client, Outcome};
use crate::events::PeerEvent;
use crate::roster::{ConversationHandle, ConversationHost, DisplayRow};
use std::future::Future;
use tokio::sync::mpsc;

/// Line width used when printing the list
const HEADLESS_WIDTH: usize = 100;

/// Conversation host that only counts and logs
#[derive(Debug, Default)]
pub struct HeadlessHost {
    opened: u32,
}

impl ConversationHost for HeadlessHost {
    fn open_conversation(&mut self, peer_id: u32, name: &str) -> ConversationHandle {
        self.opened += 1;
        tracing::info!(peer_id, "Conversation with {} opened", name);
        ConversationHandle(self.opened)
    }

    fn focus_conversation(&mut self, handle: ConversationHandle) {
        tracing::debug!(?handle, "Conversation focused");
    }

    fn display_width(&self) -> usize {
        HEADLESS_WIDTH
    }
}

/// Render the list as plain text lines
pub fn list_lines(client: &Client, host: &HeadlessHost) -> Vec<String> {
    client
        .roster
        .render_view(host)
        .into_iter()
        .map(|row| match row {
            DisplayRow::Notice(text) => text.to_string(),
            DisplayRow::Friend(friend) => friend.text(),
        })
        .collect()
}

/// Print the list, then apply events until `shutdown` resolves or the
/// network closes (with no network this just prints the saved list)
pub async fn run(
    mut client: Client,
    mut event_rx: mpsc::Receiver<PeerEvent>,
    shutdown: impl Future<Output = ()>,
) -> Client {
    let mut host = HeadlessHost::default();
    tokio::pin!(shutdown);

    for line in list_lines(&client, &host) {
        println!("{line}");
    }
    println!();

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            event = event_rx.recv() => {
                let Some(event) = event else {
                    tracing::info!("Peer network closed");
                    break;
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    tracing::debug!(event = %json, "Peer event");
                }

                match client.handle_peer_event(event, &mut host) {
                    Outcome::Message { from, text, action: false, .. } => {
                        println!("<{from}> {text}");
                    }
                    Outcome::Message { from, text, action: true, .. } => {
                        println!("* {from} {text}");
                    }
                    Outcome::UnknownPeer(_) => continue,
                    _ => {}
                }

                for line in list_lines(&client, &host) {
                    println!("{line}");
                }
                println!();
            }
        }
    }

    client
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::roster::EMPTY_NOTICE;

    fn client_in(dir: &tempfile::TempDir) -> Client {
        Client::new(&Config {
            data_file: dir.path().join("friends.json"),
            ..Config::default()
        })
    }

    #[test]
    fn test_empty_list_prints_notice() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_in(&dir);
        assert_eq!(
            list_lines(&client, &HeadlessHost::default()),
            vec![EMPTY_NOTICE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_run_applies_events_until_channel_closes() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = mpsc::channel(8);

        tx.send(PeerEvent::FriendAdded {
            peer_id: 4,
            name: Some("dana".to_string()),
        })
        .await
        .unwrap();
        tx.send(PeerEvent::Message {
            peer_id: 4,
            text: "hi".to_string(),
        })
        .await
        .unwrap();
        drop(tx);

        let client = run(client_in(&dir), rx, std::future::pending()).await;

        let friend = client.roster.slot(0).unwrap();
        assert_eq!(friend.name, "dana");
        assert_eq!(friend.conversation, Some(ConversationHandle(1)));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let (_tx, rx) = mpsc::channel::<PeerEvent>(8);

        let client = run(client_in(&dir), rx, async {}).await;
        assert!(client.roster.is_empty());
    }
}
