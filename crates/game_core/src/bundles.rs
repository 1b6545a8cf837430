use bevy::prelude::*;

use crate::{Ball, Level};

#[derive(Bundle)]
pub struct BallBundle {
    pub name: Name,
    pub ball: Ball,
    pub transform: Transform,
    pub global_transform: GlobalTransform,
    pub visibility: Visibility,
}

impl BallBundle {
    pub fn new(level: Level, position: Vec2, now: f32) -> Self {
        Self {
            name: Name::new(format!("Ball{level}")),
            ball: Ball::new(level, now),
            transform: Transform::from_translation(position.extend(0.0)),
            global_transform: GlobalTransform::IDENTITY,
            visibility: Visibility::default(),
        }
    }
}
