//! game_physics: Rapier2D adapter for the merge game.
//!
//! Responsibilities:
//! * Install Rapier and keep gravity in sync with `PhysicsConfig`.
//! * Spawn the static play-field boundaries.
//! * Attach bodies / colliders to new balls.
//! * Collect collision-start events into the `MergeQueue`, apply merges
//!   synchronously afterwards, then enforce the capacity cap.
//! * Halt and resume stepping on game over / restart.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use game_core::game_active;

mod arena;
mod config;
mod systems;

pub use arena::spawn_boundaries;
pub use config::PhysicsConfig;
pub use systems::*;

/// Ordering of the per-frame merge pipeline.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum MergeSet {
    Collect,
    Apply,
    Capacity,
}

pub struct GamePhysicsPlugin;
impl Plugin for GamePhysicsPlugin {
    fn build(&self, app: &mut App) {
        let ppm = app
            .world_mut()
            .get_resource_or_insert_with::<PhysicsConfig>(PhysicsConfig::default)
            .pixels_per_meter;

        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(ppm));

        app.configure_sets(
            Update,
            (MergeSet::Collect, MergeSet::Apply, MergeSet::Capacity).chain(),
        )
        .add_systems(Startup, spawn_boundaries)
        .add_systems(
            Update,
            (
                collect_merge_candidates.in_set(MergeSet::Collect),
                apply_pending_merges.in_set(MergeSet::Apply),
                enforce_capacity.in_set(MergeSet::Capacity),
            )
                .run_if(game_active),
        )
        .add_systems(
            Update,
            (
                apply_gravity_config,
                attach_ball_bodies.after(MergeSet::Capacity),
                halt_on_game_over,
                resume_on_restart,
            ),
        );
    }
}
