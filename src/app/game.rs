// This file is part of Merge Drop.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use game_core::GameCorePlugin;
use game_physics::GamePhysicsPlugin;

use crate::core::config::log_config_report;
use crate::debug::DebugPlugin;
use crate::gameplay::GameplayPlugin;
use crate::identity::IdentityPlugin;
use crate::rendering::RenderingPlugin;

/// Full game: rules, physics, player-facing systems, visuals and debug tooling.
/// Expects `GameConfig::insert_resources` to have run first.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GameCorePlugin,
            GamePhysicsPlugin,
            IdentityPlugin,
            GameplayPlugin,
            RenderingPlugin,
            DebugPlugin,
        ))
        .add_systems(Startup, log_config_report);
    }
}
