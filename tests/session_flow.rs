use std::sync::mpsc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::{CollisionEvent, Velocity};
use game_core::*;
use game_physics::*;
use leaderboard::client::ClientError;
use leaderboard::LeaderboardEntry;
use merge_drop::gameplay::{
    GameOverPoll, GameOverSummary, GameplayPlugin, SubmissionChannel, SubmissionReply,
    SubmissionStatus,
};
use merge_drop::GameConfig;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(ButtonInput::<KeyCode>::default())
        .insert_resource(ButtonInput::<MouseButton>::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    GameConfig::default().insert_resources(&mut app);
    app.insert_resource(GameOverConfig {
        poll_interval_secs: 0.1,
        rest_velocity_epsilon: 5.0,
        settle_grace_secs: 0.0,
    })
    .add_plugins(GameCorePlugin)
    .insert_resource(GameSession::with_seed(21))
    .add_event::<CollisionEvent>()
    .configure_sets(
        Update,
        (MergeSet::Collect, MergeSet::Apply, MergeSet::Capacity).chain(),
    )
    .add_systems(
        Update,
        (
            collect_merge_candidates.in_set(MergeSet::Collect),
            apply_pending_merges.in_set(MergeSet::Apply),
            enforce_capacity.in_set(MergeSet::Capacity),
        )
            .run_if(game_active),
    )
    .add_plugins(GameplayPlugin);
    app
}

fn ball_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&Ball>()
        .iter(app.world())
        .count()
}

fn spawn_still_ball(app: &mut App, y: f32, velocity_y: f32) -> Entity {
    let e = app
        .world_mut()
        .spawn((
            BallBundle::new(Level::MIN, Vec2::new(0.0, y), 0.0),
            Velocity::linear(Vec2::new(0.0, velocity_y)),
        ))
        .id();
    app.world_mut()
        .resource_mut::<GameSession>()
        .track(e, Level::MIN);
    e
}

fn drop_at(app: &mut App, x: f32) {
    app.world_mut().send_event(DropRequested { x });
}

#[test]
fn drop_spawns_clamped_ball_and_rotates_preview() {
    let mut app = test_app();
    app.update();
    let (current, next) = {
        let s = app.world().resource::<GameSession>();
        (s.current_level(), s.next_level())
    };
    drop_at(&mut app, 10_000.0);
    app.update();

    let arena = *app.world().resource::<ArenaConfig>();
    let mut q = app.world_mut().query::<(&Ball, &Transform)>();
    let balls: Vec<_> = q.iter(app.world()).map(|(b, t)| (*b, t.translation)).collect();
    assert_eq!(balls.len(), 1);
    assert_eq!(balls[0].0.level, current);
    assert_eq!(balls[0].1.x, arena.half_width() - current.radius());
    assert_eq!(balls[0].1.y, arena.spawn_y());

    let s = app.world().resource::<GameSession>();
    assert_eq!(s.current_level(), next);
    assert_eq!(s.ball_count(), 1);
    assert_eq!(s.stats().drops, 1);
}

#[test]
fn second_drop_inside_cooldown_is_rejected() {
    let mut app = test_app();
    app.update();
    drop_at(&mut app, 0.0);
    drop_at(&mut app, 20.0);
    app.update();
    assert_eq!(ball_count(&mut app), 1);

    // 0.4 s cooldown, 100 ms per frame.
    for _ in 0..5 {
        app.update();
    }
    drop_at(&mut app, 20.0);
    app.update();
    assert_eq!(ball_count(&mut app), 2);
}

#[test]
fn resting_ball_above_line_ends_game_and_blocks_drops() {
    let mut app = test_app();
    app.update();
    let y = app.world().resource::<ArenaConfig>().boundary_y() + 30.0;
    spawn_still_ball(&mut app, y, 0.0);
    for _ in 0..4 {
        app.update();
    }

    assert!(app.world().resource::<GameSession>().is_over());
    let summary = app.world().resource::<GameOverSummary>();
    assert_eq!(summary.score, 0);
    assert_eq!(summary.player, "Guest");
    assert_eq!(
        *app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Disabled
    );

    drop_at(&mut app, 0.0);
    app.update();
    assert_eq!(ball_count(&mut app), 1);
}

#[test]
fn moving_ball_above_line_does_not_end_game() {
    let mut app = test_app();
    app.update();
    let y = app.world().resource::<ArenaConfig>().boundary_y() + 30.0;
    spawn_still_ball(&mut app, y, -300.0);
    for _ in 0..6 {
        app.update();
    }
    assert!(!app.world().resource::<GameSession>().is_over());
    assert!(app.world().get_resource::<GameOverSummary>().is_none());
}

#[test]
fn resting_ball_below_line_does_not_end_game() {
    let mut app = test_app();
    app.update();
    let y = app.world().resource::<ArenaConfig>().boundary_y() - 30.0;
    spawn_still_ball(&mut app, y, 0.0);
    for _ in 0..6 {
        app.update();
    }
    assert!(!app.world().resource::<GameSession>().is_over());
}

#[test]
fn restart_clears_balls_score_and_summary() {
    let mut app = test_app();
    app.update();
    let y = app.world().resource::<ArenaConfig>().boundary_y() + 30.0;
    spawn_still_ball(&mut app, y, 0.0);
    spawn_still_ball(&mut app, -200.0, 0.0);
    for _ in 0..4 {
        app.update();
    }
    assert!(app.world().resource::<GameSession>().is_over());

    app.world_mut().send_event(RestartRequested);
    app.update();

    assert_eq!(ball_count(&mut app), 0);
    let s = app.world().resource::<GameSession>();
    assert!(!s.is_over());
    assert_eq!(s.score(), 0);
    assert_eq!(s.ball_count(), 0);
    assert!(app.world().get_resource::<GameOverSummary>().is_none());
    assert_eq!(
        *app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Idle
    );
    assert!(app.world().resource::<MergeQueue>().is_empty());
    assert_eq!(app.world().resource::<Events<GameRestarted>>().len(), 1);

    drop_at(&mut app, 0.0);
    app.update();
    assert_eq!(ball_count(&mut app), 1);
}

#[test]
fn r_key_requests_restart() {
    let mut app = test_app();
    app.update();
    spawn_still_ball(&mut app, -200.0, 0.0);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyR);
    app.update();
    assert_eq!(ball_count(&mut app), 0);
}

#[test]
fn app_exit_tears_down_every_ball() {
    let mut app = test_app();
    app.update();
    spawn_still_ball(&mut app, -200.0, 0.0);
    spawn_still_ball(&mut app, -100.0, 0.0);
    app.world_mut().send_event(AppExit::Success);
    app.update();
    assert_eq!(ball_count(&mut app), 0);
    assert!(app.world().resource::<GameSession>().is_over());
    assert!(app.world().get_resource::<GameOverPoll>().is_none());
}

fn entry(id: u64) -> LeaderboardEntry {
    LeaderboardEntry {
        id,
        username: "Guest".into(),
        score: 0,
        submitted_at_ms: 1,
    }
}

/// Installs a channel whose reply is already waiting, with the status at `status`.
fn with_reply(app: &mut App, status: SubmissionStatus, reply: Result<SubmissionReply, ClientError>) {
    let (tx, rx) = mpsc::channel();
    tx.send(reply).unwrap();
    app.insert_resource(SubmissionChannel::new(rx));
    app.insert_resource(status);
}

#[test]
fn pending_submission_resolves_to_submitted_with_rank() {
    let mut app = test_app();
    app.update();
    with_reply(
        &mut app,
        SubmissionStatus::Pending,
        Ok(SubmissionReply {
            entry: entry(7),
            rank: Some(3),
        }),
    );
    app.update();
    assert_eq!(
        *app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Submitted {
            id: 7,
            rank: Some(3)
        }
    );
    assert!(app.world().get_resource::<SubmissionChannel>().is_none());
}

#[test]
fn pending_submission_resolves_to_failed_on_client_error() {
    let mut app = test_app();
    app.update();
    with_reply(
        &mut app,
        SubmissionStatus::Pending,
        Err(ClientError::Transport("connection refused".into())),
    );
    app.update();
    match app.world().resource::<SubmissionStatus>() {
        SubmissionStatus::Failed(msg) => assert!(msg.contains("connection refused"), "{msg}"),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(app.world().get_resource::<SubmissionChannel>().is_none());
}

#[test]
fn dropped_task_without_reply_fails_the_submission() {
    let mut app = test_app();
    app.update();
    let (tx, rx) = mpsc::channel::<Result<SubmissionReply, ClientError>>();
    drop(tx);
    app.insert_resource(SubmissionChannel::new(rx));
    app.insert_resource(SubmissionStatus::Pending);
    app.update();
    assert!(matches!(
        app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Failed(_)
    ));
}

#[test]
fn unanswered_submission_stays_pending() {
    let mut app = test_app();
    app.update();
    let (_tx, rx) = mpsc::channel::<Result<SubmissionReply, ClientError>>();
    app.insert_resource(SubmissionChannel::new(rx));
    app.insert_resource(SubmissionStatus::Pending);
    app.update();
    app.update();
    assert_eq!(
        *app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Pending
    );
    assert!(app.world().get_resource::<SubmissionChannel>().is_some());
}

#[test]
fn late_reply_after_restart_is_discarded() {
    let mut app = test_app();
    app.update();
    // Restart already put the status back to Idle when the old reply lands.
    with_reply(
        &mut app,
        SubmissionStatus::Idle,
        Ok(SubmissionReply {
            entry: entry(9),
            rank: Some(1),
        }),
    );
    app.update();
    assert_eq!(
        *app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Idle
    );
    assert!(app.world().get_resource::<SubmissionChannel>().is_none());
}

#[test]
fn enter_after_game_over_goes_pending_then_fails_against_dead_server() {
    let mut app = test_app();
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    app.world_mut().resource_mut::<GameConfig>().leaderboard.url =
        Some(format!("http://127.0.0.1:{port}"));
    app.update();
    let y = app.world().resource::<ArenaConfig>().boundary_y() + 30.0;
    spawn_still_ball(&mut app, y, 0.0);
    for _ in 0..4 {
        app.update();
    }
    assert_eq!(
        *app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Idle
    );

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Enter);
    app.update();
    // No input plugin here, so clear the press by hand.
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    assert_ne!(
        *app.world().resource::<SubmissionStatus>(),
        SubmissionStatus::Idle
    );

    for _ in 0..100 {
        if app.world().get_resource::<SubmissionChannel>().is_none() {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
        app.update();
    }
    match app.world().resource::<SubmissionStatus>() {
        SubmissionStatus::Failed(msg) => assert!(msg.contains("unreachable"), "{msg}"),
        other => panic!("expected Failed, got {other:?}"),
    }
}
