use bevy::prelude::*;

use crate::Level;

/// Player asked to drop the current ball at world-space `x`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DropRequested {
    pub x: f32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct BallDropped {
    pub entity: Entity,
    pub level: Level,
}

/// Two balls of `source_level` consumed; `merged` holds the new ball.
#[derive(Event, Debug, Clone, Copy)]
pub struct BallsMerged {
    pub merged: Entity,
    pub source_level: Level,
    pub position: Vec2,
    pub score_gained: u32,
}

/// Cosmetic camera shake; intensity grows with the merged level.
#[derive(Event, Debug, Clone, Copy)]
pub struct ShakeEffect {
    pub intensity: f32,
}

impl ShakeEffect {
    pub fn for_level(level: Level) -> Self {
        Self {
            intensity: 2.0 + level.get() as f32 * 1.5,
        }
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct BallsEvicted {
    pub count: usize,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct GameOver {
    pub score: u64,
}

#[derive(Event, Debug, Default, Clone, Copy)]
pub struct RestartRequested;

#[derive(Event, Debug, Default, Clone, Copy)]
pub struct GameRestarted;
