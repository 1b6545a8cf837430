use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierConfiguration;
use game_core::{Ball, GameSession, MergeQueue};

use super::game_over::GameOverPoll;
use super::submission::SubmissionChannel;

/// On exit: stop stepping, drop pending merges and in-flight submissions, despawn every ball.
pub fn teardown_on_exit(
    mut commands: Commands,
    mut exits: EventReader<AppExit>,
    mut session: ResMut<GameSession>,
    mut queue: ResMut<MergeQueue>,
    balls: Query<Entity, With<Ball>>,
    mut rapier: Query<&mut RapierConfiguration>,
) {
    if exits.read().last().is_none() {
        return;
    }
    for mut cfg in &mut rapier {
        cfg.physics_pipeline_active = false;
    }
    queue.clear();
    session.end_game();
    commands.remove_resource::<GameOverPoll>();
    commands.remove_resource::<SubmissionChannel>();
    let mut count = 0usize;
    for entity in &balls {
        commands.entity(entity).despawn();
        count += 1;
    }
    info!(target: "session", "teardown: released {count} balls, final score {}", session.score());
}
