use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;
use game_core::{
    any_resting_above, ArenaConfig, Ball, BallSample, GameOver, GameOverConfig, GameSession,
};

const LOG_TARGET: &str = "game_over";

/// Repeating poll for the "ball at rest above the line" check.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct GameOverPoll(pub Timer);

impl GameOverPoll {
    pub fn from_config(cfg: &GameOverConfig) -> Self {
        Self(Timer::from_seconds(
            cfg.poll_interval_secs,
            TimerMode::Repeating,
        ))
    }
}

pub fn setup_game_over_poll(mut commands: Commands, cfg: Res<GameOverConfig>) {
    commands.insert_resource(GameOverPoll::from_config(&cfg));
}

/// Balls without a body yet have no velocity and are skipped.
pub fn poll_game_over(
    time: Res<Time>,
    cfg: Res<GameOverConfig>,
    arena: Res<ArenaConfig>,
    poll: Option<ResMut<GameOverPoll>>,
    mut session: ResMut<GameSession>,
    balls: Query<(&Ball, &Transform, &Velocity)>,
    mut over: EventWriter<GameOver>,
) {
    let Some(mut poll) = poll else {
        return;
    };
    if !poll.tick(time.delta()).just_finished() {
        return;
    }
    let samples: Vec<BallSample> = balls
        .iter()
        .map(|(ball, tf, vel)| BallSample {
            ball: *ball,
            y: tf.translation.y,
            velocity_y: vel.linvel.y,
        })
        .collect();
    if !any_resting_above(&samples, arena.boundary_y(), time.elapsed_secs(), &cfg) {
        return;
    }
    if session.end_game() {
        info!(
            target: LOG_TARGET,
            "game over: score={} balls={}",
            session.score(),
            session.ball_count()
        );
        over.write(GameOver {
            score: session.score(),
        });
    }
}
