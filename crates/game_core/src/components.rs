use bevy::prelude::*;

use crate::Level;

/// A live ball. The physics adapter attaches the rigid body and collider.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ball {
    pub level: Level,
    /// Seconds since startup when the ball entered the world.
    pub spawned_at: f32,
}

impl Ball {
    pub fn new(level: Level, spawned_at: f32) -> Self {
        Self { level, spawned_at }
    }

    pub fn radius(&self) -> f32 {
        self.level.radius()
    }
}

/// Which side of the play field a static wall closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundarySide {
    Floor,
    Left,
    Right,
}

/// Static play-field wall. Never takes part in merges.
#[derive(Component, Clone, Copy, Debug)]
pub struct Boundary {
    pub side: BoundarySide,
}
