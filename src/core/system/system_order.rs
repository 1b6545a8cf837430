//! Central system ordering labels to make the update sequence explicit.
//! Stages (high-level):
//! 1. Input (pointer / keyboard -> gameplay events)
//! 2. Drop (new balls enter the world)
//! 3. MergeSet::{Collect, Apply, Capacity} (game_physics)
//! 4. Session (game-over polling, restart, submissions)
//! 5. Rapier step (PostUpdate, handled by plugin)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum GameplaySet {
    Input,
    Drop,
    Session,
}
