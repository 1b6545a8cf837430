use bevy::prelude::*;
use game_core::{Ball, GameOverConfig, GameRestarted, GameSession, MergeQueue, RestartRequested};

use super::game_over::GameOverPoll;
use super::submission::{GameOverSummary, SubmissionStatus};

const LOG_TARGET: &str = "session";

pub fn read_restart_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut requests: EventWriter<RestartRequested>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        requests.write(RestartRequested);
    }
}

/// Clears every live ball and pending merge, then resets the session.
/// Ordered after the merge pipeline so balls merged this frame are already in the world.
pub fn handle_restart(
    mut commands: Commands,
    mut requests: EventReader<RestartRequested>,
    mut session: ResMut<GameSession>,
    mut queue: ResMut<MergeQueue>,
    cfg: Res<GameOverConfig>,
    balls: Query<Entity, With<Ball>>,
    mut restarted: EventWriter<GameRestarted>,
) {
    if requests.read().last().is_none() {
        return;
    }
    let tracked = session.restart();
    let mut cleared = 0usize;
    for entity in &balls {
        commands.entity(entity).despawn();
        cleared += 1;
    }
    queue.clear();
    commands.remove_resource::<GameOverSummary>();
    commands.insert_resource(SubmissionStatus::default());
    commands.insert_resource(GameOverPoll::from_config(&cfg));
    info!(
        target: LOG_TARGET,
        "restart: cleared {cleared} balls ({} tracked)",
        tracked.len()
    );
    restarted.write(GameRestarted);
}
