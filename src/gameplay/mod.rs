//! Player-facing rules wired into the frame: drop input, game-over polling,
//! restart, exit teardown and score submission.

use bevy::prelude::*;
use game_core::game_active;
use game_physics::MergeSet;

use crate::core::system::system_order::GameplaySet;

pub mod drop;
pub mod game_over;
pub mod lifecycle;
pub mod restart;
pub mod submission;

pub use drop::CursorWorld;
pub use game_over::GameOverPoll;
pub use submission::{GameOverSummary, SubmissionChannel, SubmissionReply, SubmissionStatus};

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorWorld>()
            .init_resource::<SubmissionStatus>()
            .configure_sets(
                Update,
                (GameplaySet::Input, GameplaySet::Drop)
                    .chain()
                    .before(MergeSet::Collect),
            )
            .configure_sets(Update, GameplaySet::Session.after(MergeSet::Capacity))
            .add_systems(Startup, game_over::setup_game_over_poll)
            .add_systems(
                Update,
                (
                    drop::track_cursor,
                    drop::read_drop_input.after(drop::track_cursor),
                    restart::read_restart_input,
                    submission::submit_on_enter,
                )
                    .in_set(GameplaySet::Input),
            )
            .add_systems(
                Update,
                drop::handle_drop_requests.in_set(GameplaySet::Drop),
            )
            .add_systems(
                Update,
                (
                    game_over::poll_game_over.run_if(game_active),
                    submission::publish_summary,
                    restart::handle_restart,
                    submission::poll_submission,
                )
                    .chain()
                    .in_set(GameplaySet::Session),
            )
            .add_systems(Last, lifecycle::teardown_on_exit);
    }
}
