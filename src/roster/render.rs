//! Render-data assembly for the friends view
//!
//! Produces plain rows; colors and widgets are the TUI's business.

use super::{ConversationHost, Presence, Roster};
use crate::util::{display_width, truncate_to_width};

/// Row shown instead of the list when nobody has been added yet
pub const EMPTY_NOTICE: &str = "Empty. Add some friends! :-)";

/// Columns taken by the selection marker
const MARKER_WIDTH: usize = 3;
/// Columns taken by the "[O]" presence glyph
const GLYPH_WIDTH: usize = 3;
/// " (" before the status message and ")" plus one spare column after it
const STATUS_DECORATION_WIDTH: usize = 4;

/// Presence glyph; the TUI colors `Online` by presence state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Offline,
    Online(Presence),
}

/// One visible friend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRow {
    pub slot: usize,
    pub selected: bool,
    pub glyph: Glyph,
    pub name: String,
    /// Status message already cut to fit; only present while online
    pub status: Option<String>,
}

impl FriendRow {
    pub fn marker(&self) -> &'static str {
        if self.selected {
            " > "
        } else {
            "   "
        }
    }

    /// Plain-text rendition of the row
    pub fn text(&self) -> String {
        match &self.status {
            Some(status) => format!("{}[O]{} ({})", self.marker(), self.name, status),
            None => format!("{}[O]{}", self.marker(), self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    /// Informational line (empty roster)
    Notice(&'static str),
    Friend(FriendRow),
}

impl Roster {
    /// Build the rows for the current state at the host's display width
    pub fn render_view(&self, host: &impl ConversationHost) -> Vec<DisplayRow> {
        self.render_rows(host.display_width())
    }

    /// Build the rows for a given width
    ///
    /// Status messages are truncated into fresh strings; stored slots are
    /// never touched.
    pub fn render_rows(&self, width: usize) -> Vec<DisplayRow> {
        if self.is_empty() {
            return vec![DisplayRow::Notice(EMPTY_NOTICE)];
        }

        let selected = self.selected();
        self.active_slots()
            .map(|(index, slot)| {
                let (glyph, status) = if slot.online {
                    let used = MARKER_WIDTH
                        + GLYPH_WIDTH
                        + display_width(&slot.name)
                        + STATUS_DECORATION_WIDTH;
                    let room = width.saturating_sub(used);
                    let status = truncate_to_width(&slot.status_message, room).to_string();
                    (Glyph::Online(slot.presence), Some(status))
                } else {
                    (Glyph::Offline, None)
                };

                DisplayRow::Friend(FriendRow {
                    slot: index,
                    selected: selected == Some(index),
                    glyph,
                    name: slot.name.clone(),
                    status,
                })
            })
            .collect()
    }
}
