// Key gating for held keys
//
// Terminals report a held key as a stream of presses, usually without a
// release. Selection keys may follow that stream at a bounded rate. Every
// other key fires once and stays quiet until the stream stops, so holding
// Delete removes one friend, not the whole list.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum spacing between two moves while a selection key is held
const REPEAT_INTERVAL: Duration = Duration::from_millis(40);

/// Silence after which the next press of an action key counts as new
const PRESS_GAP: Duration = Duration::from_millis(150);

fn repeats(key: KeyCode) -> bool {
    matches!(
        key,
        KeyCode::Up
            | KeyCode::Down
            | KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::PageUp
            | KeyCode::PageDown
    )
}

#[derive(Debug, Default, Clone, Copy)]
struct Seen {
    event: Option<Instant>,
    fired: Option<Instant>,
}

#[derive(Debug, Default)]
pub struct InputHandler {
    keys: HashMap<KeyCode, Seen>,
}

impl InputHandler {
    /// Returns true if this press should reach the app
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.press_at(key, Instant::now())
    }

    /// A release ends the press, whatever the timing
    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    fn press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let seen = self.keys.entry(key).or_default();
        let elapsed = |at: Option<Instant>| at.map(|t| now.saturating_duration_since(t));

        let fire = if repeats(key) {
            elapsed(seen.fired).map_or(true, |d| d >= REPEAT_INTERVAL)
        } else {
            elapsed(seen.event).map_or(true, |d| d >= PRESS_GAP)
        };

        seen.event = Some(now);
        if fire {
            seen.fired = Some(now);
        }
        fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_held_delete_fires_once() {
        let mut input = InputHandler::default();
        let t0 = Instant::now();

        assert!(input.press_at(KeyCode::Delete, t0));
        // Terminal autorepeat, ~30ms apart
        for i in 1..20 {
            assert!(!input.press_at(KeyCode::Delete, t0 + ms(30 * i)));
        }
    }

    #[test]
    fn test_action_key_fires_again_after_pause() {
        let mut input = InputHandler::default();
        let t0 = Instant::now();

        assert!(input.press_at(KeyCode::Enter, t0));
        assert!(input.press_at(KeyCode::Enter, t0 + ms(400)));
    }

    #[test]
    fn test_release_starts_new_press() {
        let mut input = InputHandler::default();
        let t0 = Instant::now();

        assert!(input.press_at(KeyCode::Backspace, t0));
        input.handle_key_release(KeyCode::Backspace);
        assert!(input.press_at(KeyCode::Backspace, t0 + ms(10)));
    }

    #[test]
    fn test_held_down_repeats_at_bounded_rate() {
        let mut input = InputHandler::default();
        let t0 = Instant::now();

        let fired = (0..10)
            .filter(|i| input.press_at(KeyCode::Down, t0 + ms(20 * i)))
            .count();
        // Events at 0..180ms, one move per 40ms
        assert_eq!(fired, 5);
    }

    #[test]
    fn test_keys_tracked_independently() {
        let mut input = InputHandler::default();
        let t0 = Instant::now();

        assert!(input.press_at(KeyCode::Char('d'), t0));
        assert!(input.press_at(KeyCode::Char('q'), t0 + ms(5)));
    }
}
