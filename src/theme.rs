// Theme support for the TUI
//
// Color palettes selected by name in the config file (`theme = "nord"`).
// "default" uses the terminal's ANSI palette, named themes use true color.

use crate::logging::LogLevel;
use crate::roster::{Glyph, Presence};
use ratatui::style::Color;

/// Names accepted by `Theme::by_name`, in cycling order
pub const THEME_NAMES: &[&str] = &["default", "nord", "gruvbox", "dracula"];

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Presence glyph colors
    pub presence_none: Color,
    pub presence_away: Color,
    pub presence_busy: Color,
    pub offline: Color,

    // UI element colors
    pub selection: Color,
    pub status_message: Color,
    pub hint: Color,
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub action: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Theme {
    /// Load theme by name; unknown names fall back to "default"
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            "dracula" => Self::dracula(),
            "default" => Self::terminal(),
            other => {
                tracing::warn!("Unknown theme {:?}, using default", other);
                Self::terminal()
            }
        }
    }

    /// The theme after this one in `THEME_NAMES`
    pub fn next(&self) -> Self {
        let current = THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .unwrap_or(0);
        Self::by_name(THEME_NAMES[(current + 1) % THEME_NAMES.len()])
    }

    /// Color for a friend's presence glyph
    pub fn glyph(&self, glyph: Glyph) -> Color {
        match glyph {
            Glyph::Offline => self.offline,
            Glyph::Online(Presence::None) => self.presence_none,
            Glyph::Online(Presence::Away) => self.presence_away,
            Glyph::Online(Presence::Busy) => self.presence_busy,
        }
    }

    pub fn log_level(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug | LogLevel::Trace => self.log_debug,
        }
    }

    /// Terminal ANSI palette
    pub fn terminal() -> Self {
        Self {
            name: "default".to_string(),
            presence_none: Color::Green,
            presence_away: Color::Yellow,
            presence_busy: Color::Red,
            offline: Color::DarkGray,
            selection: Color::Cyan,
            status_message: Color::Gray,
            hint: Color::DarkGray,
            status_bar: Color::Green,
            title: Color::Cyan,
            border: Color::White,
            highlight: Color::Yellow,
            action: Color::Magenta,
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Green,
            log_debug: Color::DarkGray,
        }
    }

    /// Nord theme - https://www.nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            presence_none: Color::Rgb(0xa3, 0xbe, 0x8c), // nord14 green
            presence_away: Color::Rgb(0xeb, 0xcb, 0x8b), // nord13 yellow
            presence_busy: Color::Rgb(0xbf, 0x61, 0x6a), // nord11 red
            offline: Color::Rgb(0x4c, 0x56, 0x6a),       // nord3
            selection: Color::Rgb(0x88, 0xc0, 0xd0),     // nord8
            status_message: Color::Rgb(0xd8, 0xde, 0xe9), // nord4
            hint: Color::Rgb(0x61, 0x6e, 0x88),
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),
            title: Color::Rgb(0x88, 0xc0, 0xd0),
            border: Color::Rgb(0x4c, 0x56, 0x6a),
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),
            action: Color::Rgb(0xb4, 0x8e, 0xad), // nord15 purple
            log_error: Color::Rgb(0xbf, 0x61, 0x6a),
            log_warn: Color::Rgb(0xeb, 0xcb, 0x8b),
            log_info: Color::Rgb(0xa3, 0xbe, 0x8c),
            log_debug: Color::Rgb(0x61, 0x6e, 0x88),
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            presence_none: Color::Rgb(0xb8, 0xbb, 0x26), // green
            presence_away: Color::Rgb(0xfa, 0xbd, 0x2f), // yellow
            presence_busy: Color::Rgb(0xfb, 0x49, 0x34), // red
            offline: Color::Rgb(0x66, 0x5c, 0x54),       // bg3
            selection: Color::Rgb(0x83, 0xa5, 0x98),     // blue
            status_message: Color::Rgb(0xbd, 0xae, 0x93), // fg3
            hint: Color::Rgb(0x92, 0x83, 0x74),          // gray
            status_bar: Color::Rgb(0xb8, 0xbb, 0x26),
            title: Color::Rgb(0x8e, 0xc0, 0x7c), // aqua
            border: Color::Rgb(0x66, 0x5c, 0x54),
            highlight: Color::Rgb(0xfe, 0x80, 0x19), // orange
            action: Color::Rgb(0xd3, 0x86, 0x9b),    // purple
            log_error: Color::Rgb(0xfb, 0x49, 0x34),
            log_warn: Color::Rgb(0xfa, 0xbd, 0x2f),
            log_info: Color::Rgb(0xb8, 0xbb, 0x26),
            log_debug: Color::Rgb(0x92, 0x83, 0x74),
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            presence_none: Color::Rgb(0x50, 0xfa, 0x7b), // green
            presence_away: Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
            presence_busy: Color::Rgb(0xff, 0x55, 0x55), // red
            offline: Color::Rgb(0x62, 0x72, 0xa4),       // comment
            selection: Color::Rgb(0x8b, 0xe9, 0xfd),     // cyan
            status_message: Color::Rgb(0xf8, 0xf8, 0xf2), // foreground
            hint: Color::Rgb(0x62, 0x72, 0xa4),
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),
            title: Color::Rgb(0x8b, 0xe9, 0xfd),
            border: Color::Rgb(0x62, 0x72, 0xa4),
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),
            action: Color::Rgb(0xff, 0x79, 0xc6), // pink
            log_error: Color::Rgb(0xff, 0x55, 0x55),
            log_warn: Color::Rgb(0xf1, 0xfa, 0x8c),
            log_info: Color::Rgb(0x50, 0xfa, 0x7b),
            log_debug: Color::Rgb(0x62, 0x72, 0xa4),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::terminal()
    }
}
