use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{LeaderboardEntry, NewEntry, StoreError};

/// Persistence seam for the leaderboard. Implementations assign ids.
pub trait LeaderboardStore {
    fn insert(&mut self, entry: NewEntry) -> Result<LeaderboardEntry, StoreError>;
    fn entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<LeaderboardEntry>,
    next_id: u64,
}

impl LeaderboardStore for MemoryStore {
    fn insert(&mut self, entry: NewEntry) -> Result<LeaderboardEntry, StoreError> {
        self.next_id += 1;
        let stored = LeaderboardEntry {
            id: self.next_id,
            username: entry.username,
            score: entry.score,
            submitted_at_ms: entry.submitted_at_ms,
        };
        self.entries.push(stored.clone());
        Ok(stored)
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.entries.clone())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    entries: Vec<LeaderboardEntry>,
}

/// Whole-file RON store. Every insert rewrites the file via temp + rename.
#[derive(Debug)]
pub struct RonFileStore {
    path: PathBuf,
    data: StoreFile,
}

impl RonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let txt = fs::read_to_string(&path)?;
            ron::from_str::<StoreFile>(&txt)
                .map_err(|e| StoreError::Decode(format!("{}: {e}", path.display())))?
        } else {
            StoreFile::default()
        };
        log::info!(
            target: "leaderboard",
            "opened store {} ({} entries)",
            path.display(),
            data.entries.len()
        );
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let txt = ron::ser::to_string_pretty(&self.data, ron::ser::PrettyConfig::default())
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("ron.tmp");
        fs::write(&tmp, txt)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LeaderboardStore for RonFileStore {
    fn insert(&mut self, entry: NewEntry) -> Result<LeaderboardEntry, StoreError> {
        let stored = LeaderboardEntry {
            id: self.data.next_id + 1,
            username: entry.username,
            score: entry.score,
            submitted_at_ms: entry.submitted_at_ms,
        };
        self.data.next_id = stored.id;
        self.data.entries.push(stored.clone());
        if let Err(e) = self.persist() {
            self.data.entries.pop();
            self.data.next_id -= 1;
            return Err(e);
        }
        Ok(stored)
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.data.entries.clone())
    }
}
