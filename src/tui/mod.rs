// TUI module - Terminal User Interface
//
// Manages the terminal UI using ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks, peer events)
// - Layered key dispatch into the App

pub mod app;
pub mod components;
pub mod conversations;
pub mod input;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::client::Client;
use crate::events::PeerEvent;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use anyhow::{Context, Result};
use app::{App, View};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::Handled;

/// Run the TUI until the user quits
///
/// Sets up the terminal, runs the event loop and restores the terminal even
/// when the loop fails. Returns the client so the caller can log final state.
pub async fn run_tui(
    client: Client,
    mut event_rx: mpsc::Receiver<PeerEvent>,
    log_buffer: LogBuffer,
    theme: Theme,
) -> Result<Client> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(client, log_buffer, theme);

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result.map(|()| app.client)
}

/// Main event loop
///
/// Waits on input, a redraw tick and the peer event channel with
/// tokio::select!, handling whichever is ready first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<PeerEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));
    let mut network_open = true;

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic redraw (toasts expire, uptime ticks)
            _ = tick_interval.tick() => {}

            event = event_rx.recv(), if network_open => match event {
                Some(event) => app.apply_peer_event(event),
                None => {
                    tracing::info!("Peer network closed");
                    network_open = false;
                }
            },
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → View-specific → Focused component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    match key_event.kind {
        KeyEventKind::Press => {}
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            return;
        }
        _ => return,
    }

    let key = key_event.code;
    if !app.handle_key_press(key) {
        return;
    }

    // Layer 1: global keys
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('t') => {
            app.cycle_theme();
            return;
        }
        KeyCode::Char('l') => {
            app.toggle_logs();
            return;
        }
        _ => {}
    }

    // Layer 2: view keys
    match (app.view, key) {
        (View::Friends, KeyCode::Tab) => {
            app.toggle_focus();
            return;
        }
        (View::Chat, KeyCode::Esc) => {
            app.view = View::Friends;
            return;
        }
        (View::Chat, KeyCode::Tab) => {
            app.next_conversation();
            return;
        }
        (View::Chat, KeyCode::Char('c')) => {
            app.close_active_conversation();
            return;
        }
        _ => {}
    }

    // Layer 3: focused component
    if app.dispatch_to_focused(key_event) == Handled::No {
        tracing::trace!(?key, "Unhandled key");
    }
}

/// Handle mouse input: wheel scrolls, left click selects a friend
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => {
            app.dispatch_to_focused(KeyEvent::from(KeyCode::Up));
        }
        MouseEventKind::ScrollDown => {
            app.dispatch_to_focused(KeyEvent::from(KeyCode::Down));
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.click(mouse_event.column, mouse_event.row);
        }
        _ => {}
    }
}
