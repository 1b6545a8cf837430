//! leaderboard: validated score submission and top-N ranking behind a small
//! HTTP surface. Storage is pluggable through [`LeaderboardStore`].

pub mod client;
mod entry;
mod error;
pub mod http;
mod store;

pub use entry::*;
pub use error::{LeaderboardError, StoreError};
pub use store::{LeaderboardStore, MemoryStore, RonFileStore};

use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Leaderboard service over a store.
pub struct Leaderboard<S: LeaderboardStore> {
    store: S,
}

impl<S: LeaderboardStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn submit(&mut self, req: &SubmitRequest) -> Result<LeaderboardEntry, LeaderboardError> {
        self.submit_at(req, now_ms())
    }

    /// Validates and persists a submission stamped at `submitted_at_ms`.
    pub fn submit_at(
        &mut self,
        req: &SubmitRequest,
        submitted_at_ms: u64,
    ) -> Result<LeaderboardEntry, LeaderboardError> {
        let entry = validate(req, submitted_at_ms)?;
        let stored = self.store.insert(entry)?;
        log::info!(
            target: "leaderboard",
            "stored #{} {} = {}",
            stored.id,
            stored.username,
            stored.score
        );
        Ok(stored)
    }

    /// Up to [`TOP_LIMIT`] entries, best first.
    pub fn top(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Ok(rank(self.store.entries()?, TOP_LIMIT))
    }
}
