//! Debug module: feature gated stats logging and the Rapier wireframe toggle.
//! Built only when compiled with `--features debug` (on by default).

#[cfg(feature = "debug")]
mod logging;

#[cfg(feature = "debug")]
pub use logging::DebugLogState;

use bevy::prelude::*;

pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier2d::render::{DebugRenderContext, RapierDebugRenderPlugin};
        use logging::debug_logging_system;

        fn toggle_wireframe(keys: Res<ButtonInput<KeyCode>>, mut ctx: ResMut<DebugRenderContext>) {
            if keys.just_pressed(KeyCode::F3) {
                ctx.enabled = !ctx.enabled;
                info!("Rapier wireframe {}", if ctx.enabled { "on" } else { "off" });
            }
        }

        app.add_plugins(RapierDebugRenderPlugin::default().disabled())
            .init_resource::<DebugLogState>()
            .add_systems(Update, (debug_logging_system, toggle_wireframe));
    }
}

#[cfg(not(feature = "debug"))]
impl Plugin for DebugPlugin {
    fn build(&self, _app: &mut App) {}
}
