//! HTTP surface: a pure router plus a blocking `tiny_http` accept loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiny_http::{Header, Response, Server};

use crate::{Leaderboard, LeaderboardError, LeaderboardStore, SubmitRequest};

pub const LEADERBOARD_PATH: &str = "/api/leaderboard";

/// Body of every non-2xx reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, &format!("encode failure: {e}")),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = ErrorBody {
            error: message.to_string(),
        };
        Self {
            status,
            body: serde_json::to_string(&body).unwrap_or_else(|_| "{}".into()),
        }
    }

    fn from_error(err: &LeaderboardError) -> Self {
        Self::error(err.status_code(), &err.to_string())
    }
}

/// Routes one request. `GET` fetches the top entries, `POST` submits a score.
pub fn route<S: LeaderboardStore>(
    board: &mut Leaderboard<S>,
    method: &str,
    url: &str,
    body: &str,
) -> Reply {
    let path = url.split('?').next().unwrap_or_default();
    if path.trim_end_matches('/') != LEADERBOARD_PATH {
        return Reply::error(404, "not found");
    }
    match method {
        "GET" => match board.top() {
            Ok(entries) => Reply::json(200, &entries),
            Err(e) => Reply::from_error(&e),
        },
        "POST" => {
            let parsed = serde_json::from_str::<SubmitRequest>(body)
                .map_err(|e| LeaderboardError::MalformedRequest(e.to_string()));
            match parsed.and_then(|req| board.submit(&req)) {
                Ok(entry) => Reply::json(200, &entry),
                Err(e) => {
                    log::warn!(target: "leaderboard", "submit rejected: {e}");
                    Reply::from_error(&e)
                }
            }
        }
        _ => Reply::error(405, "method not allowed"),
    }
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("could not bind {addr}: {message}")]
    Bind { addr: String, message: String },
}

/// Serves until the process exits. Requests are handled one at a time, so the
/// store needs no locking.
pub fn serve<S: LeaderboardStore>(addr: &str, mut board: Leaderboard<S>) -> Result<(), ServeError> {
    let server = Server::http(addr).map_err(|e| ServeError::Bind {
        addr: addr.to_string(),
        message: e.to_string(),
    })?;
    log::info!(target: "leaderboard", "listening on http://{addr}{LEADERBOARD_PATH}");

    let headers: Vec<Header> = [
        (&b"Content-Type"[..], &b"application/json"[..]),
        (&b"Access-Control-Allow-Origin"[..], &b"*"[..]),
    ]
    .into_iter()
    .filter_map(|(k, v)| Header::from_bytes(k, v).ok())
    .collect();

    for mut request in server.incoming_requests() {
        let mut body = String::new();
        let reply = match request.as_reader().read_to_string(&mut body) {
            Ok(_) => route(
                &mut board,
                &request.method().to_string(),
                request.url(),
                &body,
            ),
            Err(e) => Reply::error(400, &format!("unreadable body: {e}")),
        };
        log::debug!(
            target: "leaderboard",
            "{} {} -> {}",
            request.method(),
            request.url(),
            reply.status
        );
        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        for header in &headers {
            response.add_header(header.clone());
        }
        if let Err(e) = request.respond(response) {
            log::warn!(target: "leaderboard", "failed to send response: {e}");
        }
    }
    Ok(())
}
