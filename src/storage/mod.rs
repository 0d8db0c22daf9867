// Storage module - persists the friend list as a JSON document
//
// The roster core only knows the `RosterStore` trait; this is the concrete
// store the client wires in. The file is rewritten in full on every save:
// write to a sibling temp file, then rename over the old one, so a crash
// mid-write never leaves a truncated friend list behind.
//
// Format:
//   { "version": 1, "peers": [ { "peer_id": 7, "name": "alice", "status_message": "" } ] }

use crate::roster::{RosterStore, SavedPeer, StoreError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Current on-disk format version
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct RosterFile {
    version: u32,
    #[serde(default)]
    peers: Vec<SavedPeer>,
}

/// Friend list file on disk
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved friend list; a missing file is an empty list
    pub fn load(&self) -> Result<Vec<SavedPeer>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No friend list at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        let file: RosterFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        if file.version > FORMAT_VERSION {
            tracing::warn!(
                "Friend list {:?} has newer format version {} (expected {}), reading anyway",
                self.path,
                file.version,
                FORMAT_VERSION
            );
        }

        Ok(file.peers)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RosterStore for JsonStore {
    fn save_roster(&self, peers: &[SavedPeer]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = RosterFile {
            version: FORMAT_VERSION,
            peers: peers.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.temp_path();
        {
            let mut out = fs::File::create(&tmp)?;
            out.write_all(json.as_bytes())?;
            out.write_all(b"\n")?;
            // Flush to disk before the rename makes it visible
            out.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!("Saved {} friends to {:?}", peers.len(), self.path);
        Ok(())
    }
}
