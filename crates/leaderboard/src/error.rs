use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leaderboard store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard store decode: {0}")]
    Decode(String),
    #[error("leaderboard store encode: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("score must be a finite non-negative number, got {0}")]
    InvalidScore(f64),
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("could not persist score: {0}")]
    Persistence(#[from] StoreError),
}

impl LeaderboardError {
    /// Validation problems are the caller's (400); store failures are ours and retryable (500).
    pub fn status_code(&self) -> u16 {
        match self {
            LeaderboardError::Persistence(_) => 500,
            _ => 400,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, LeaderboardError::Persistence(_))
    }
}

// StoreError wraps io::Error, which has no PartialEq; compare by variant and message.
impl PartialEq for LeaderboardError {
    fn eq(&self, other: &Self) -> bool {
        use LeaderboardError::*;
        match (self, other) {
            (EmptyUsername, EmptyUsername) => true,
            (InvalidScore(a), InvalidScore(b)) => a.to_bits() == b.to_bits(),
            (MalformedRequest(a), MalformedRequest(b)) => a == b,
            (Persistence(a), Persistence(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
