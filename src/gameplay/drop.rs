use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use game_core::{ArenaConfig, BallBundle, BallDropped, DropConfig, DropRequested, GameSession};

use crate::rendering::camera::GameCamera;

const LOG_TARGET: &str = "drop";

/// Pointer position in world space; `None` while the cursor is outside the window.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CursorWorld(pub Option<Vec2>);

pub fn track_cursor(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    mut cursor: ResMut<CursorWorld>,
) {
    let (Ok(window), Ok((camera, cam_tf))) = (windows.single(), cameras.single()) else {
        return;
    };
    cursor.0 = window
        .cursor_position()
        .and_then(|pos| camera.viewport_to_world_2d(cam_tf, pos).ok());
}

/// Left click drops at the cursor; Space drops at the cursor or, without one, centre.
pub fn read_drop_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    cursor: Res<CursorWorld>,
    mut requests: EventWriter<DropRequested>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        if let Some(pos) = cursor.0 {
            requests.write(DropRequested { x: pos.x });
        }
    } else if keys.just_pressed(KeyCode::Space) {
        requests.write(DropRequested {
            x: cursor.0.map_or(0.0, |p| p.x),
        });
    }
}

/// Spawns the current ball for each accepted request; rejected requests are logged and dropped.
pub fn handle_drop_requests(
    mut commands: Commands,
    time: Res<Time>,
    arena: Res<ArenaConfig>,
    rules: Res<DropConfig>,
    mut session: ResMut<GameSession>,
    mut requests: EventReader<DropRequested>,
    mut dropped: EventWriter<BallDropped>,
) {
    let now = time.elapsed_secs();
    for req in requests.read() {
        match session.plan_drop(req.x, &arena, &rules, now) {
            Ok(plan) => {
                let entity = commands
                    .spawn(BallBundle::new(plan.level, plan.position, now))
                    .id();
                session.track(entity, plan.level);
                debug!(target: LOG_TARGET, "dropped {} at x={:.1}", plan.level, plan.position.x);
                dropped.write(BallDropped {
                    entity,
                    level: plan.level,
                });
            }
            Err(reason) => debug!(target: LOG_TARGET, "drop rejected: {reason}"),
        }
    }
}
