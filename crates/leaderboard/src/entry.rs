use serde::{Deserialize, Serialize};

use crate::LeaderboardError;

/// Longest username kept after trimming, in characters.
pub const MAX_USERNAME_CHARS: usize = 50;
/// Most entries returned by a fetch.
pub const TOP_LIMIT: usize = 20;

/// Persisted leaderboard record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub username: String,
    pub score: u64,
    /// Milliseconds since the Unix epoch.
    pub submitted_at_ms: u64,
}

/// Wire shape of a submission, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub username: String,
    /// Any JSON number. Fractional scores are floored when stored.
    pub score: f64,
}

/// A validated submission waiting for an id from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub username: String,
    pub score: u64,
    pub submitted_at_ms: u64,
}

/// Trims the name, truncates it to `MAX_USERNAME_CHARS` and rejects blanks.
pub fn normalize_username(raw: &str) -> Result<String, LeaderboardError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LeaderboardError::EmptyUsername);
    }
    Ok(trimmed.chars().take(MAX_USERNAME_CHARS).collect())
}

/// Finite, non-negative scores only; `12.0` and `12.9` both store as 12.
pub fn stored_score(raw: f64) -> Result<u64, LeaderboardError> {
    if !raw.is_finite() || raw < 0.0 {
        return Err(LeaderboardError::InvalidScore(raw));
    }
    Ok(raw.floor() as u64)
}

pub fn validate(req: &SubmitRequest, submitted_at_ms: u64) -> Result<NewEntry, LeaderboardError> {
    let username = normalize_username(&req.username)?;
    let score = stored_score(req.score)?;
    Ok(NewEntry {
        username,
        score,
        submitted_at_ms,
    })
}

/// Score descending, then earliest submission, then id.
pub fn rank(mut entries: Vec<LeaderboardEntry>, limit: usize) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.submitted_at_ms.cmp(&b.submitted_at_ms))
            .then(a.id.cmp(&b.id))
    });
    entries.truncate(limit);
    entries
}
