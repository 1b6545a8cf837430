//! Blocking client for the leaderboard HTTP surface.

use thiserror::Error;

use crate::http::{ErrorBody, LEADERBOARD_PATH};
use crate::{LeaderboardEntry, SubmitRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("leaderboard rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("leaderboard unreachable: {0}")]
    Transport(String),
    #[error("unexpected leaderboard response: {0}")]
    Decode(String),
}

impl ClientError {
    /// 5xx and transport failures are worth retrying; 4xx are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Rejected { status, .. } => *status >= 500,
            ClientError::Transport(_) => true,
            ClientError::Decode(_) => false,
        }
    }
}

pub fn endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), LEADERBOARD_PATH)
}

pub fn submit(base_url: &str, req: &SubmitRequest) -> Result<LeaderboardEntry, ClientError> {
    let response = ureq::post(&endpoint(base_url))
        .send_json(req)
        .map_err(map_error)?;
    response
        .into_json::<LeaderboardEntry>()
        .map_err(|e| ClientError::Decode(e.to_string()))
}

pub fn fetch_top(base_url: &str) -> Result<Vec<LeaderboardEntry>, ClientError> {
    let response = ureq::get(&endpoint(base_url)).call().map_err(map_error)?;
    response
        .into_json::<Vec<LeaderboardEntry>>()
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn map_error(err: ureq::Error) -> ClientError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<ErrorBody>()
                .map(|b| b.error)
                .unwrap_or_else(|_| "no details".into());
            ClientError::Rejected { status, message }
        }
        ureq::Error::Transport(t) => ClientError::Transport(t.to_string()),
    }
}
