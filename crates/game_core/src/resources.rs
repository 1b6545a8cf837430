use bevy::prelude::*;

use crate::Level;

/// Score accumulator and preview levels. Frozen once `game_over` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u64,
    pub current_level: Level,
    pub next_level: Level,
    pub game_over: bool,
}

impl GameState {
    pub fn new(current_level: Level, next_level: Level) -> Self {
        Self {
            score: 0,
            current_level,
            next_level,
            game_over: false,
        }
    }
}

/// Play-field geometry. The field is centred on the origin, +y up.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    /// Distance from the top edge down to the drop spawn height.
    pub spawn_margin: f32,
    /// Distance from the top edge down to the game-over line.
    pub boundary_margin: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 420.0,
            height: 640.0,
            wall_thickness: 20.0,
            spawn_margin: 40.0,
            boundary_margin: 100.0,
        }
    }
}

impl ArenaConfig {
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }
    pub fn floor_y(&self) -> f32 {
        -self.half_height()
    }
    pub fn spawn_y(&self) -> f32 {
        self.half_height() - self.spawn_margin
    }
    pub fn boundary_y(&self) -> f32 {
        self.half_height() - self.boundary_margin
    }

    /// Keeps a ball of `radius` fully inside the side walls.
    pub fn clamp_drop_x(&self, x: f32, radius: f32) -> f32 {
        if !x.is_finite() {
            return 0.0;
        }
        let limit = (self.half_width() - radius).max(0.0);
        x.clamp(-limit, limit)
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DropConfig {
    /// Minimum seconds between two accepted drops.
    pub cooldown_secs: f32,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self { cooldown_secs: 0.4 }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GameOverConfig {
    pub poll_interval_secs: f32,
    /// |velocity.y| below this (world units / s) counts as resting.
    pub rest_velocity_epsilon: f32,
    /// Balls younger than this are ignored so a fresh drop cannot end the game.
    pub settle_grace_secs: f32,
}

impl Default for GameOverConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 0.5,
            rest_velocity_epsilon: 5.0,
            settle_grace_secs: 1.0,
        }
    }
}

/// Simulation cost bound: past `max_balls`, the oldest `evict_count` go.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityConfig {
    pub max_balls: usize,
    pub evict_count: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            max_balls: 180,
            evict_count: 30,
        }
    }
}
