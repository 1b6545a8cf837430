//! Game-over summary and the optional score submission to the leaderboard service.
//!
//! Submission runs on the IO task pool; the blocking client never touches the frame.
//! Results come back over a channel polled once per frame.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Mutex;

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use game_core::{GameOver, GameSession, Level};
use leaderboard::client::{self, ClientError};
use leaderboard::{normalize_username, LeaderboardEntry, SubmitRequest};

use crate::core::config::GameConfig;
use crate::identity::PlayerIdentity;

const LOG_TARGET: &str = "leaderboard";

/// Score card captured at the moment the game ended.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameOverSummary {
    pub score: u64,
    pub drops: u32,
    pub merges: u32,
    pub highest_level: Option<Level>,
    pub player: String,
}

impl GameOverSummary {
    pub fn from_session(session: &GameSession, player: &str) -> Self {
        let stats = session.stats();
        Self {
            score: session.score(),
            drops: stats.drops,
            merges: stats.merges,
            highest_level: stats.highest_level,
            player: player.to_string(),
        }
    }

    pub fn request(&self) -> SubmitRequest {
        SubmitRequest {
            username: self.player.clone(),
            score: self.score as f64,
        }
    }

    pub fn card_text(&self) -> String {
        let best = self
            .highest_level
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        format!(
            "GAME OVER\nScore: {}\nBest ball: {}\nMerges: {}  Drops: {}\nPlayer: {}",
            self.score, best, self.merges, self.drops, self.player
        )
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// No leaderboard URL configured.
    Disabled,
    Pending,
    Submitted {
        id: u64,
        rank: Option<usize>,
    },
    Failed(String),
}

impl SubmissionStatus {
    pub fn in_flight_or_done(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Pending | SubmissionStatus::Submitted { .. }
        )
    }

    pub fn label(&self) -> Option<String> {
        match self {
            SubmissionStatus::Idle => Some("Enter: submit score   R: restart".into()),
            SubmissionStatus::Disabled => Some("Leaderboard disabled   R: restart".into()),
            SubmissionStatus::Pending => Some("Submitting...".into()),
            SubmissionStatus::Submitted { rank: Some(r), .. } => {
                Some(format!("Submitted! Rank #{r}   R: restart"))
            }
            SubmissionStatus::Submitted { rank: None, .. } => {
                Some("Submitted!   R: restart".into())
            }
            SubmissionStatus::Failed(msg) => Some(format!("Submit failed: {msg}")),
        }
    }
}

/// What the submission task sends back: the stored entry and its 1-based place, if it made the top list.
#[derive(Debug, Clone)]
pub struct SubmissionReply {
    pub entry: LeaderboardEntry,
    pub rank: Option<usize>,
}

#[derive(Resource)]
pub struct SubmissionChannel(Mutex<Receiver<Result<SubmissionReply, ClientError>>>);

impl SubmissionChannel {
    pub fn new(rx: Receiver<Result<SubmissionReply, ClientError>>) -> Self {
        Self(Mutex::new(rx))
    }
}

/// Submits, then looks the new entry up in the top list to report its placement.
fn submit_and_rank(base_url: &str, req: &SubmitRequest) -> Result<SubmissionReply, ClientError> {
    let entry = client::submit(base_url, req)?;
    let rank = client::fetch_top(base_url)
        .ok()
        .and_then(|top| top.iter().position(|e| e.id == entry.id))
        .map(|i| i + 1);
    Ok(SubmissionReply { entry, rank })
}

pub fn publish_summary(
    mut commands: Commands,
    mut over: EventReader<GameOver>,
    session: Res<GameSession>,
    identity: Option<Res<PlayerIdentity>>,
    cfg: Res<GameConfig>,
) {
    if over.read().last().is_none() {
        return;
    }
    let player = identity.map_or_else(|| "Guest".to_string(), |id| id.display_name.clone());
    let summary = GameOverSummary::from_session(&session, &player);
    info!(target: LOG_TARGET, "{}", summary.card_text().replace('\n', " | "));
    commands.insert_resource(summary);
    commands.insert_resource(if cfg.leaderboard.url.is_some() {
        SubmissionStatus::Idle
    } else {
        SubmissionStatus::Disabled
    });
}

/// Enter on the game-over card submits once; repeated presses are ignored.
pub fn submit_on_enter(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    summary: Option<Res<GameOverSummary>>,
    mut status: ResMut<SubmissionStatus>,
    cfg: Res<GameConfig>,
) {
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }
    let Some(summary) = summary else {
        return;
    };
    if status.in_flight_or_done() {
        return;
    }
    let Some(base_url) = cfg.leaderboard.url.clone() else {
        *status = SubmissionStatus::Disabled;
        return;
    };
    let req = summary.request();
    if let Err(e) = normalize_username(&req.username) {
        *status = SubmissionStatus::Failed(e.to_string());
        return;
    }

    let (tx, rx) = mpsc::channel();
    IoTaskPool::get()
        .spawn(async move {
            let _ = tx.send(submit_and_rank(&base_url, &req));
        })
        .detach();
    commands.insert_resource(SubmissionChannel::new(rx));
    *status = SubmissionStatus::Pending;
    info!(target: LOG_TARGET, "submitting score {} for {}", summary.score, summary.player);
}

pub fn poll_submission(
    mut commands: Commands,
    channel: Option<Res<SubmissionChannel>>,
    mut status: ResMut<SubmissionStatus>,
) {
    let Some(channel) = channel else {
        return;
    };
    let Ok(rx) = channel.0.lock() else {
        commands.remove_resource::<SubmissionChannel>();
        *status = SubmissionStatus::Failed("submission channel poisoned".into());
        return;
    };
    let next = match rx.try_recv() {
        Err(TryRecvError::Empty) => return,
        Ok(Ok(reply)) => {
            info!(
                target: LOG_TARGET,
                "score accepted as entry {} (rank {:?})", reply.entry.id, reply.rank
            );
            SubmissionStatus::Submitted {
                id: reply.entry.id,
                rank: reply.rank,
            }
        }
        Ok(Err(e)) => {
            warn!(target: LOG_TARGET, "score submission failed (retryable={}): {e}", e.is_retryable());
            SubmissionStatus::Failed(e.to_string())
        }
        Err(TryRecvError::Disconnected) => {
            SubmissionStatus::Failed("submission task ended without a reply".into())
        }
    };
    // A restart mid-flight resets the status; late replies are discarded.
    if *status == SubmissionStatus::Pending {
        *status = next;
    }
    commands.remove_resource::<SubmissionChannel>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u64) -> GameOverSummary {
        GameOverSummary {
            score,
            drops: 12,
            merges: 4,
            highest_level: Level::new(5),
            player: "Guest-000042".into(),
        }
    }

    #[test]
    fn card_lists_score_and_best_ball() {
        let text = summary(77).card_text();
        assert!(text.starts_with("GAME OVER"));
        assert!(text.contains("Score: 77"));
        assert!(text.contains("Best ball: L5"));
        assert!(text.contains("Guest-000042"));
    }

    #[test]
    fn request_carries_score_and_player() {
        let req = summary(10).request();
        assert_eq!(req.score, 10.0);
        assert_eq!(req.username, "Guest-000042");
    }

    #[test]
    fn pending_and_done_block_resubmission() {
        assert!(SubmissionStatus::Pending.in_flight_or_done());
        assert!(SubmissionStatus::Submitted { id: 1, rank: None }.in_flight_or_done());
        assert!(!SubmissionStatus::Failed("x".into()).in_flight_or_done());
        assert!(!SubmissionStatus::Idle.in_flight_or_done());
    }
}
